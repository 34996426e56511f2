//! # HTTP API Errors
//!
//! Maps service errors onto status codes and a `{message, error}` body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::CoreError;

/// Result type for HTTP handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// HTTP API errors
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// Error returned by the service chain
    #[error("{0}")]
    Core(#[from] CoreError),

    /// Request body is not a JSON object
    #[error("{0}")]
    InvalidBody(String),
}

impl ApiError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            ApiError::Core(err) => match err {
                CoreError::NamespaceNotFound { .. } => StatusCode::NOT_FOUND,
                CoreError::ItemNotFound { .. } => StatusCode::NOT_FOUND,
                CoreError::ItemExists { .. } => StatusCode::CONFLICT,
                CoreError::InvalidItem(_) => StatusCode::BAD_REQUEST,
                CoreError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    /// Short, stable description for clients
    pub fn message(&self) -> &'static str {
        match self {
            ApiError::InvalidBody(_) => "Invalid request",
            ApiError::Core(err) => match err {
                CoreError::NamespaceNotFound { .. } => "Invalid kind",
                CoreError::ItemNotFound { .. } => "Item not found",
                CoreError::ItemExists { .. } => "Item exists",
                CoreError::InvalidItem(_) => "Invalid request",
                CoreError::Internal(_) => "Unexpected error occurred",
            },
        }
    }
}

/// Error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
    pub error: String,
}

impl From<&ApiError> for ErrorResponse {
    fn from(err: &ApiError) -> Self {
        Self {
            message: err.message().to_string(),
            error: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorResponse::from(&self));
        (status, body).into_response()
    }
}
