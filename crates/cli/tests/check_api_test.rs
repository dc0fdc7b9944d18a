//! # Check API Command Tests

mod common;

use assert_cmd::prelude::*;
use bizquery_test_utils::chat_completion;
use common::bizquery;
use httpmock::{Method, MockServer};
use predicates::prelude::*;
use tempfile::tempdir;

const CHAT_PATH: &str = "/v1/chat/completions";

#[test]
fn test_check_api_success() {
    // Arrange
    let temp_dir = tempdir().unwrap();
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(Method::POST).path(CHAT_PATH);
        then.status(200).json_body(chat_completion("  API connection successful  "));
    });

    // Act & Assert
    bizquery(temp_dir.path())
        .env("AI_PROVIDER", "local")
        .env("AI_API_URL", server.url(CHAT_PATH))
        .env("AI_MODEL", "tiny-test-model")
        .arg("check-api")
        .assert()
        .success()
        .stdout(predicate::str::contains("tiny-test-model"))
        .stdout(predicate::str::contains("✅ API connection successful!"))
        .stdout(predicate::str::contains("Model reply: API connection successful"));
    mock.assert();
}

#[test]
fn test_check_api_rejected_key() {
    let temp_dir = tempdir().unwrap();
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(Method::POST).path(CHAT_PATH);
        then.status(401)
            .json_body(serde_json::json!({"error": {"message": "Invalid API Key"}}));
    });

    bizquery(temp_dir.path())
        .env("AI_PROVIDER", "local")
        .env("AI_API_URL", server.url(CHAT_PATH))
        .arg("check-api")
        .assert()
        .failure()
        .stderr(predicate::str::contains("API connection failed"))
        .stderr(predicate::str::contains("Troubleshooting"))
        .stderr(predicate::str::contains("Check that your API key is correct"));
}

#[test]
fn test_check_api_missing_key() {
    let temp_dir = tempdir().unwrap();

    bizquery(temp_dir.path())
        .env("AI_PROVIDER", "openai")
        .arg("check-api")
        .assert()
        .failure()
        .stderr(predicate::str::contains("API key is missing"))
        .stderr(predicate::str::contains("AI_API_KEY"));
}
