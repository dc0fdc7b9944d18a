//! # Question Handler
//!
//! `POST /api/ask` runs a natural-language question through the query agent.

use super::{wrap_response, ApiResponse, AppError, AppState, DebugParams};
use crate::types::AskRequest;
use axum::{
    extract::{Query, State},
    Json,
};
use bizquery::{providers::db::storage::Storage, Answer};
use serde_json::json;
use tracing::info;

/// Answers a question with the generated SQL, the rows, a chart suggestion and,
/// when enabled, a short analysis.
///
/// With `?debug=true` the response also names the model and the agent settings.
pub async fn ask_handler(
    State(app_state): State<AppState>,
    debug_params: Query<DebugParams>,
    Json(payload): Json<AskRequest>,
) -> Result<Json<ApiResponse<Answer>>, AppError> {
    info!("Received question: '{}'", payload.question);

    let answer = app_state.agent.answer(&payload.question).await?;

    let debug_info = if debug_params.debug.unwrap_or(false) {
        let options = app_state.agent.options();
        Some(json!({
            "model": app_state.agent.model_name(),
            "dialect": app_state.agent.storage().dialect(),
            "use_shortcuts": options.use_shortcuts,
            "interpret_results": options.interpret_results,
            "max_rows": options.max_rows,
        }))
    } else {
        None
    };
    Ok(wrap_response(answer, debug_params, debug_info))
}
