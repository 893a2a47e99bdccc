//! Application error type mapping to HTTP status codes and envelope format.

use axum::response::{IntoResponse, Response};
use axum::Json;

use calbook_types::error::InputError;

use crate::http::response::{ApiResponse, ErrorCode};

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// The request carried no usable session.
    NotFound(String),
    /// Validation error.
    Validation(String),
}

impl From<InputError> for AppError {
    fn from(e: InputError) -> Self {
        AppError::Validation(e.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (code, message) = match self {
            AppError::NotFound(msg) => (ErrorCode::SessionNotFound, msg),
            AppError::Validation(msg) => (ErrorCode::Validation, msg),
        };
        tracing::debug!(code = code.as_str(), %message, "api request rejected");
        (code.status(), Json(ApiResponse::failure(code, message))).into_response()
    }
}
