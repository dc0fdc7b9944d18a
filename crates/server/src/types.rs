//! Request and response bodies shared by the handlers.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Query parameters accepted by endpoints that can explain themselves.
#[derive(Debug, Deserialize, Default)]
pub struct DebugParams {
    pub debug: Option<bool>,
}

/// The envelope every JSON endpoint returns.
#[derive(Serialize, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug: Option<Value>,
    pub result: T,
}

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    pub question: String,
}

/// A canned view as listed on the dashboard.
#[derive(Debug, Serialize, Deserialize)]
pub struct ViewSummary {
    pub name: String,
    pub title: String,
}
