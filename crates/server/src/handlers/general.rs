//! # General Route Handlers
//!
//! The dashboard page, the health check and the sample questions.

use super::{wrap_response, ApiResponse, DebugParams};
use axum::{extract::Query, response::Html, Json};
use bizquery::prompts::samples::SAMPLE_QUESTIONS;

const DASHBOARD_HTML: &str = include_str!("../../static/dashboard.html");

/// The handler for the root (`/`) endpoint. Serves the dashboard page.
pub async fn root() -> Html<&'static str> {
    Html(DASHBOARD_HTML)
}

/// The handler for the health check (`/health`) endpoint.
pub async fn health_check() -> &'static str {
    "OK"
}

/// Lists the example questions shown under the question box.
pub async fn samples_handler(
    debug_params: Query<DebugParams>,
) -> Json<ApiResponse<Vec<&'static str>>> {
    wrap_response(SAMPLE_QUESTIONS.to_vec(), debug_params, None)
}
