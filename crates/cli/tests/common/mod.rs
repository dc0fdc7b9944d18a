//! Helpers shared by the CLI integration tests.

#![allow(unused)]

use assert_cmd::prelude::*;
use bizquery::providers::db::sqlite::SqliteProvider;
use bizquery_test_utils::WIDGET_SCENARIO_SQL;
use std::path::Path;
use std::process::Command;

const AI_VARS: &[&str] = &[
    "AI_PROVIDER",
    "AI_API_URL",
    "AI_MODEL",
    "AI_API_KEY",
    "GROQ_API_KEY",
    "DB_URL",
    "CONFIG_PATH",
];

/// The `bizquery` binary, run inside `dir` with the AI and database variables cleared.
pub fn bizquery(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("bizquery").unwrap();
    cmd.current_dir(dir);
    for var in AI_VARS {
        cmd.env_remove(var);
    }
    cmd
}

/// Creates a database holding the Widget scenario and closes it again, so the
/// binary under test is the only process with the file open.
pub async fn write_widget_db(path: &Path) {
    let provider = SqliteProvider::new(path.to_str().unwrap()).await.unwrap();
    provider.initialize_schema().await.unwrap();
    provider
        .initialize_with_data(WIDGET_SCENARIO_SQL)
        .await
        .unwrap();
}

pub async fn count_rows(path: &Path, table: &str) -> i64 {
    let provider = SqliteProvider::new(path.to_str().unwrap()).await.unwrap();
    provider.count_rows(table).await.unwrap()
}
