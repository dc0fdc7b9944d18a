//! # Dashboard Data Handlers
//!
//! Headline stats and the canned views. None of these call the model.

use super::{wrap_response, ApiResponse, AppError, AppState, DebugParams};
use crate::types::ViewSummary;
use axum::{
    extract::{Path, Query, State},
    Json,
};
use bizquery::views::{dashboard_stats, run_view, CannedView, DashboardStats, ViewResult};
use serde_json::json;
use tracing::info;

pub async fn stats_handler(
    State(app_state): State<AppState>,
    debug_params: Query<DebugParams>,
) -> Result<Json<ApiResponse<DashboardStats>>, AppError> {
    let stats = dashboard_stats(&*app_state.sqlite_provider).await?;
    Ok(wrap_response(stats, debug_params, None))
}

/// Lists the canned views in display order.
pub async fn list_views_handler(
    debug_params: Query<DebugParams>,
) -> Json<ApiResponse<Vec<ViewSummary>>> {
    let views = CannedView::ALL
        .iter()
        .map(|view| ViewSummary {
            name: view.name().to_string(),
            title: view.title().to_string(),
        })
        .collect();
    wrap_response(views, debug_params, None)
}

/// Runs one canned view by name. Unknown names are rejected with 400.
pub async fn view_handler(
    State(app_state): State<AppState>,
    Path(name): Path<String>,
    debug_params: Query<DebugParams>,
) -> Result<Json<ApiResponse<ViewResult>>, AppError> {
    let view: CannedView = name.parse()?;
    info!(view = %view, "Running canned view");

    let result = run_view(&*app_state.sqlite_provider, view).await?;

    let debug_info = Some(json!({ "sql": view.sql() }));
    Ok(wrap_response(result, debug_params, debug_info))
}
