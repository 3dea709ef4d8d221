use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response as AxumResponse},
};
use groupsync_core::{CoreError, ErrorKind};
use serde_json::json;
use thiserror::Error;

pub mod app_state;
pub mod middleware;
pub mod openapi;
pub mod response;
pub mod router;

pub use app_state::{AppState, SyncService};
pub use response::Response;
pub use router::app_router;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Internal server error")]
    InternalServerError,

    #[error("Startup error: {0}")]
    StartupError(String),
}

impl From<CoreError> for ApiError {
    fn from(error: CoreError) -> Self {
        let msg = error.to_string();
        match error.kind() {
            ErrorKind::Unauthenticated => ApiError::Unauthorized(msg),
            ErrorKind::PermissionDenied => ApiError::Forbidden(msg),
            ErrorKind::NotFound => ApiError::NotFound(msg),
            ErrorKind::Validation => ApiError::BadRequest(msg),
            ErrorKind::NetworkUnavailable => ApiError::ServiceUnavailable(msg),
            ErrorKind::Unknown => {
                tracing::error!(error = %msg, "Unclassified core error");
                ApiError::InternalServerError
            }
        }
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::InternalServerError | ApiError::StartupError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> AxumResponse {
        let status = self.status();
        let body = json!({
            "error": self.to_string(),
        });

        (status, Json(body)).into_response()
    }
}
