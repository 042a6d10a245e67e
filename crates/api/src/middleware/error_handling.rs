//! # Error Handling Middleware
//!
//! Maps domain-specific errors to HTTP status codes and JSON error
//! responses so every endpoint fails the same way. Unexpected persistence
//! failures are logged and reported with a generic message; internal detail
//! never reaches the caller.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use mentorhub_core::errors::MentorError;
use serde_json::json;

/// Application error wrapper that provides HTTP status code mapping
///
/// `AppError` wraps domain-specific `MentorError` instances and implements
/// `IntoResponse` to convert them into HTTP responses with appropriate
/// status codes and JSON payloads.
#[derive(Debug)]
pub struct AppError(pub MentorError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Map error types to HTTP status codes
        let status = match &self.0 {
            MentorError::NotFound(_) => StatusCode::NOT_FOUND,
            MentorError::Validation(_) => StatusCode::BAD_REQUEST,
            MentorError::Conflict(_) => StatusCode::BAD_REQUEST,
            MentorError::Authentication(_) => StatusCode::UNAUTHORIZED,
            MentorError::Authorization(_) => StatusCode::FORBIDDEN,
            MentorError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            MentorError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Persistence and internal failures are logged server-side and
        // reported with a generic message only.
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("Internal error: {}", self.0);
            "Internal server error".to_string()
        } else {
            self.0.to_string()
        };

        let body = Json(json!({ "error": message }));

        (status, body).into_response()
    }
}

/// Automatic conversion from MentorError to AppError
///
/// This implementation allows using `?` operator with functions that return
/// `Result<T, MentorError>` in handler functions that return `Result<T, AppError>`.
impl From<MentorError> for AppError {
    fn from(err: MentorError) -> Self {
        AppError(err)
    }
}

/// Automatic conversion from eyre::Report to AppError
///
/// Wraps the eyre error in a MentorError::Database variant so repository
/// failures propagate with `?`.
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(MentorError::Database(err))
    }
}
