use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::error;

use service::errors::ServiceError;

/// JSON error envelope: every failure renders as `{"error": <message>}` with
/// a handler-chosen status code. Messages are static so internal detail never
/// leaks to clients; the detail goes to the log instead.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: &'static str,
}

impl ApiError {
    pub fn new(status: StatusCode, message: &'static str) -> Self {
        Self { status, message }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(serde_json::json!({ "error": self.message }))).into_response()
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation(_) => {
                Self::new(StatusCode::BAD_REQUEST, "Missing required fields.")
            }
            ServiceError::Conflict(_) => Self::new(
                StatusCode::CONFLICT,
                "A product with this name already exists.",
            ),
            ServiceError::NotFound(_) => Self::new(StatusCode::NOT_FOUND, "Product not found"),
            ServiceError::Storage(detail) => {
                error!(error = %detail, "storage failure while handling request");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        }
    }
}
