use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use bizquery::{AgentError, ErrorKind};
use serde_json::json;
use tracing::{error, warn};

/// A library error on its way to becoming an HTTP response.
///
/// The body is `{"error": message, "kind": kind}` so the dashboard can show the
/// message instead of failing.
pub struct AppError(pub AgentError);

impl From<AgentError> for AppError {
    fn from(err: AgentError) -> Self {
        AppError(err)
    }
}

/// The HTTP status used for each error category.
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Configuration | ErrorKind::Storage => StatusCode::INTERNAL_SERVER_ERROR,
        ErrorKind::ExternalService => StatusCode::BAD_GATEWAY,
        ErrorKind::Parse => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorKind::Query | ErrorKind::InvalidInput => StatusCode::BAD_REQUEST,
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let AppError(err) = self;
        let kind = err.kind();
        let status_code = status_for(kind);
        if status_code.is_server_error() {
            error!("AgentError: {:?}", err);
        } else {
            warn!("Request failed: {err}");
        }

        let body = Json(json!({
            "error": err.to_string(),
            "kind": kind,
        }));

        (status_code, body).into_response()
    }
}
