use crate::{
    errors::AgentError,
    providers::db::storage::Storage,
    types::{QueryResult, Row},
};
use async_trait::async_trait;
use serde_json::Value;
use std::{
    fmt::{self, Debug},
    path::Path,
};
use tracing::{debug, info};
use turso::{Connection, Database, Value as TursoValue};

pub mod sql;

/// A provider for interacting with a local SQLite database using Turso.
///
/// This provider holds a `Database` instance. When cloned, it shares the same
/// underlying database, allowing concurrent request handlers to use one file.
#[derive(Clone)]
pub struct SqliteProvider {
    /// The Turso database instance. It's cloneable and thread-safe.
    db: Database,
    path: String,
}

impl SqliteProvider {
    /// Opens (or creates) a database at `db_path`.
    ///
    /// The parent directory is created when missing. Use ":memory:" for an
    /// isolated in-memory database; clone the provider to share it.
    pub async fn new(db_path: &str) -> Result<Self, AgentError> {
        if db_path != ":memory:" {
            if let Some(parent) = Path::new(db_path).parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent).map_err(|e| {
                        AgentError::StorageConnection(format!(
                            "cannot create directory '{}': {e}",
                            parent.display()
                        ))
                    })?;
                }
            }
        }

        let db = turso::Builder::new_local(db_path)
            .build()
            .await
            .map_err(|e| AgentError::StorageConnection(format!("{db_path}: {e}")))?;

        let conn = db
            .connect()
            .map_err(|e| AgentError::StorageConnection(e.to_string()))?;
        // PRAGMA journal_mode returns a row, so it goes through `query`.
        conn.query("PRAGMA journal_mode=WAL;", ())
            .await
            .map_err(|e| AgentError::StorageConnection(e.to_string()))?;

        debug!(path = %db_path, "Opened SQLite database");

        Ok(Self {
            db,
            path: db_path.to_string(),
        })
    }

    /// The location this provider was opened with.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Opens a new connection to the underlying database.
    pub fn connect(&self) -> Result<Connection, AgentError> {
        self.db
            .connect()
            .map_err(|e| AgentError::StorageConnection(e.to_string()))
    }

    /// A helper for tests to pre-populate data by executing multiple SQL statements.
    pub async fn initialize_with_data(&self, init_sql: &str) -> Result<(), AgentError> {
        let conn = self.connect()?;
        for statement in init_sql.split(';').filter(|s| !s.trim().is_empty()) {
            conn.execute(statement, ())
                .await
                .map_err(|e| AgentError::StorageOperationFailed(e.to_string()))?;
        }
        Ok(())
    }

    /// Ensures that all application tables and indexes exist.
    ///
    /// Idempotent: existing tables and their rows are left untouched.
    pub async fn initialize_schema(&self) -> Result<(), AgentError> {
        let conn = self.connect()?;

        for statement in sql::ALL_TABLE_CREATION_SQL
            .iter()
            .chain(sql::ALL_INDEX_CREATION_SQL)
        {
            conn.execute(statement, ())
                .await
                .map_err(|e| AgentError::StorageOperationFailed(e.to_string()))?;
        }
        info!(path = %self.path, "Database schema is ready.");
        Ok(())
    }

    /// Returns which of the application tables are missing from the database.
    pub async fn missing_tables(&self) -> Result<Vec<String>, AgentError> {
        let existing = self.list_tables().await?;
        Ok(sql::TABLES_IN_DELETE_ORDER
            .iter()
            .rev()
            .filter(|t| !existing.iter().any(|e| e == *t))
            .map(|t| t.to_string())
            .collect())
    }

    /// Counts the rows in a table.
    pub async fn count_rows(&self, table_name: &str) -> Result<i64, AgentError> {
        let conn = self.connect()?;
        let mut rows = conn
            .query(&format!("SELECT COUNT(*) FROM {table_name};"), ())
            .await
            .map_err(|e| AgentError::StorageQueryFailed(e.to_string()))?;
        match rows
            .next()
            .await
            .map_err(|e| AgentError::StorageQueryFailed(e.to_string()))?
        {
            Some(row) => match row.get_value(0) {
                Ok(TursoValue::Integer(n)) => Ok(n),
                _ => Ok(0),
            },
            None => Ok(0),
        }
    }
}

impl Debug for SqliteProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteProvider")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

/// Maps a failure while running a query to an error.
///
/// A locked, busy or unreadable database file is a storage failure; anything
/// else (unknown column, syntax error) is a problem with the query itself.
pub(crate) fn query_error(message: String) -> AgentError {
    const STORAGE_MARKERS: &[&str] = &[
        "database is locked",
        "table is locked",
        "database is busy",
        "i/o error",
        "io error",
        "disk is full",
        "disk image is malformed",
        "corrupt",
        "file is not a database",
        "readonly database",
        "permission denied",
    ];
    let lower = message.to_lowercase();
    if STORAGE_MARKERS.iter().any(|m| lower.contains(m)) {
        AgentError::StorageOperationFailed(message)
    } else {
        AgentError::StorageQueryFailed(message)
    }
}

/// Converts a Turso value to a serde_json::Value.
pub(crate) fn turso_value_to_json(v: TursoValue) -> Value {
    match v {
        TursoValue::Null => Value::Null,
        TursoValue::Integer(i) => Value::Number(i.into()),
        TursoValue::Real(f) => serde_json::Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        TursoValue::Text(s) => Value::String(s),
        TursoValue::Blob(_) => Value::String("<blob>".to_string()),
    }
}

#[async_trait]
impl Storage for SqliteProvider {
    fn name(&self) -> &str {
        "SQLite"
    }

    fn dialect(&self) -> &str {
        "SQLite"
    }

    async fn execute_query(&self, query: &str, max_rows: usize) -> Result<QueryResult, AgentError> {
        debug!(query = %query, max_rows, "--> Executing SQLite query");

        let conn = self.connect()?;

        let mut stmt = conn
            .prepare(query)
            .await
            .map_err(|e| query_error(e.to_string()))?;

        let columns: Vec<String> = stmt
            .columns()
            .iter()
            .map(|c| c.name().to_string())
            .collect();

        let mut rows = stmt
            .query(())
            .await
            .map_err(|e| query_error(e.to_string()))?;

        let mut result = QueryResult {
            columns,
            ..Default::default()
        };

        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| query_error(e.to_string()))?
        {
            if result.rows.len() == max_rows {
                result.truncated = true;
                break;
            }
            let mut row_map = Row::new();
            for (i, name) in result.columns.iter().enumerate() {
                let value = row
                    .get_value(i)
                    .map_err(|e| query_error(e.to_string()))?;
                row_map.insert(name.clone(), turso_value_to_json(value));
            }
            result.rows.push(row_map);
        }

        debug!(rows = result.rows.len(), truncated = result.truncated, "<-- Query finished");
        Ok(result)
    }

    async fn list_tables(&self) -> Result<Vec<String>, AgentError> {
        let conn = self.connect()?;

        let mut rows = conn
            .query(
                "SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%' ORDER BY name;",
                (),
            )
            .await
            .map_err(|e| AgentError::StorageOperationFailed(e.to_string()))?;

        let mut tables = Vec::new();
        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| AgentError::StorageOperationFailed(e.to_string()))?
        {
            if let Ok(TursoValue::Text(name)) = row.get_value(0) {
                tables.push(name);
            }
        }
        Ok(tables)
    }

}
