//! # Ask Command Tests
//!
//! Runs `bizquery ask` against a temporary database, with the completion API
//! replaced by an `httpmock` server.

mod common;

use assert_cmd::prelude::*;
use bizquery_test_utils::{chat_completion, WIDGET_REVENUE_SQL};
use common::{bizquery, write_widget_db};
use httpmock::{Method, MockServer};
use predicates::prelude::*;
use tempfile::tempdir;

const CHAT_PATH: &str = "/v1/chat/completions";

#[test]
fn test_ask_lists_sample_questions() {
    let temp_dir = tempdir().unwrap();

    bizquery(temp_dir.path())
        .args(["ask", "--samples"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Sample questions"))
        .stdout(predicate::str::contains("top 5 best-selling products"));
}

#[test]
fn test_ask_requires_a_question() {
    let temp_dir = tempdir().unwrap();

    bizquery(temp_dir.path()).arg("ask").assert().failure();
}

#[tokio::test(flavor = "multi_thread")]
async fn test_ask_prints_sql_and_rows() {
    // Arrange
    let temp_dir = tempdir().unwrap();
    let db_path = temp_dir.path().join("widget.db");
    write_widget_db(&db_path).await;

    let server = MockServer::start_async().await;
    let reply = format!("```sql\n{WIDGET_REVENUE_SQL};\n```");
    let mock = server
        .mock_async(|when, then| {
            when.method(Method::POST)
                .path(CHAT_PATH)
                .body_contains("How much revenue did Widget bring in?");
            then.status(200).json_body(chat_completion(&reply));
        })
        .await;

    // Act & Assert
    bizquery(temp_dir.path())
        .env("AI_PROVIDER", "local")
        .env("AI_API_URL", server.url(CHAT_PATH))
        .args(["ask", "How much revenue did Widget bring in?", "--no-interpret"])
        .arg("--db")
        .arg(db_path.to_str().unwrap())
        .assert()
        .success()
        .stdout(predicate::str::contains("generated query"))
        .stdout(predicate::str::contains("SELECT SUM(s.total_amount)"))
        .stdout(predicate::str::contains("29.97"))
        .stdout(predicate::str::contains("(1 rows)"));
    mock.assert_async().await;
}

#[tokio::test(flavor = "multi_thread")]
async fn test_ask_reports_reply_without_sql() {
    let temp_dir = tempdir().unwrap();
    let db_path = temp_dir.path().join("widget.db");
    write_widget_db(&db_path).await;

    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(Method::POST).path(CHAT_PATH);
            then.status(200)
                .json_body(chat_completion("I am not sure how to answer that."));
        })
        .await;

    bizquery(temp_dir.path())
        .env("AI_PROVIDER", "local")
        .env("AI_API_URL", server.url(CHAT_PATH))
        .args(["ask", "How much revenue did Widget bring in?", "--no-interpret"])
        .arg("--db")
        .arg(db_path.to_str().unwrap())
        .assert()
        .failure()
        .stderr(predicate::str::contains("No SQL statement found"));
}

#[test]
fn test_ask_without_api_key_fails() {
    let temp_dir = tempdir().unwrap();
    let db_path = temp_dir.path().join("empty.db");

    bizquery(temp_dir.path())
        .env("AI_PROVIDER", "openai")
        .args(["ask", "How many customers do we have?"])
        .arg("--db")
        .arg(db_path.to_str().unwrap())
        .assert()
        .failure()
        .stderr(predicate::str::contains("API key is missing"));
}
