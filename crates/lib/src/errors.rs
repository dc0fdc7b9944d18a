use serde::Serialize;
use thiserror::Error;

/// The broad category an [`AgentError`] belongs to.
///
/// Callers (the web server, the CLI) use this to decide how to present a failure
/// without matching on every concrete variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Missing or invalid configuration, such as an absent API key.
    Configuration,
    /// The hosted model could not be reached, rejected the credentials, or throttled us.
    ExternalService,
    /// The model's reply did not contain a recognizable SQL statement.
    Parse,
    /// The extracted SQL was rejected or failed when run against the schema.
    Query,
    /// The database file could not be opened, created, or written.
    Storage,
    /// The caller supplied unusable input (e.g., an empty question).
    InvalidInput,
}

/// Custom error types for the application.
#[derive(Error, Debug)]
pub enum AgentError {
    #[error("API key is missing: {0}")]
    MissingApiKey(String),
    #[error("Invalid configuration: {0}")]
    Configuration(String),
    #[error("Failed to build Reqwest client: {0}")]
    ReqwestClientBuild(reqwest::Error),
    #[error("Failed to send request to AI provider: {0}")]
    AiRequest(reqwest::Error),
    #[error("Failed to deserialize AI provider response: {0}")]
    AiDeserialization(reqwest::Error),
    #[error("AI provider rejected the credentials (status {status}): {message}")]
    AiAuthentication { status: u16, message: String },
    #[error("AI provider rate limit exceeded: {0}")]
    AiRateLimited(String),
    #[error("AI provider returned an error (status {status}): {message}")]
    AiApi { status: u16, message: String },
    #[error("AI provider returned an empty completion")]
    AiEmptyResponse,
    #[error("No SQL statement found in the model response: {0}")]
    NoSqlFound(String),
    #[error("Only read-only SELECT statements may be executed: {0}")]
    ReadOnlyViolation(String),
    #[error("Query execution failed: {0}")]
    StorageQueryFailed(String),
    #[error("Storage connection error: {0}")]
    StorageConnection(String),
    #[error("Storage operation failed: {0}")]
    StorageOperationFailed(String),
    #[error("The question must not be empty")]
    EmptyQuestion,
    #[error("Unknown view: {0}")]
    UnknownView(String),
    #[error("JSON serialization error: {0}")]
    JsonSerialization(#[from] serde_json::Error),
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
}

impl AgentError {
    /// Returns the category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            AgentError::MissingApiKey(_)
            | AgentError::Configuration(_)
            | AgentError::ReqwestClientBuild(_)
            | AgentError::Regex(_) => ErrorKind::Configuration,
            AgentError::AiRequest(_)
            | AgentError::AiDeserialization(_)
            | AgentError::AiAuthentication { .. }
            | AgentError::AiRateLimited(_)
            | AgentError::AiApi { .. }
            | AgentError::AiEmptyResponse => ErrorKind::ExternalService,
            AgentError::NoSqlFound(_) => ErrorKind::Parse,
            AgentError::ReadOnlyViolation(_) | AgentError::StorageQueryFailed(_) => {
                ErrorKind::Query
            }
            AgentError::StorageConnection(_)
            | AgentError::StorageOperationFailed(_)
            | AgentError::JsonSerialization(_) => ErrorKind::Storage,
            AgentError::EmptyQuestion | AgentError::UnknownView(_) => ErrorKind::InvalidInput,
        }
    }

    /// Whether a retry could plausibly succeed. Only external service failures qualify,
    /// and an authentication failure will not fix itself.
    pub fn is_retryable(&self) -> bool {
        self.kind() == ErrorKind::ExternalService
            && !matches!(self, AgentError::AiAuthentication { .. })
    }
}
