use crate::{errors::AgentError, types::QueryResult};
use async_trait::async_trait;
use dyn_clone::DynClone;
use std::fmt::Debug;

/// A trait for interacting with a storage backend.
///
/// This trait defines a common interface for executing read queries and
/// listing tables, so the agent does not depend on a concrete database engine.
#[async_trait]
pub trait Storage: Send + Sync + DynClone + Debug {
    /// Returns the name of the storage provider (e.g., "SQLite").
    fn name(&self) -> &str;

    /// The SQL dialect the model should generate for this provider.
    fn dialect(&self) -> &str;

    /// Executes a SQL query and returns at most `max_rows` rows.
    ///
    /// When more rows are available the result is marked as truncated.
    async fn execute_query(&self, sql: &str, max_rows: usize) -> Result<QueryResult, AgentError>;

    /// Lists the user tables in the database.
    async fn list_tables(&self) -> Result<Vec<String>, AgentError>;
}

dyn_clone::clone_trait_object!(Storage);
