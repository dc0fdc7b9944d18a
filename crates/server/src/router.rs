use super::{handlers, state::AppState};
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

/// Creates the Axum router with all the application routes.
pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_check))
        .route("/api/ask", post(handlers::ask_handler))
        .route("/api/samples", get(handlers::samples_handler))
        .route("/api/stats", get(handlers::stats_handler))
        .route("/api/views", get(handlers::list_views_handler))
        .route("/api/views/{name}", get(handlers::view_handler))
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
}
