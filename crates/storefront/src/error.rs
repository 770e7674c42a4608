//! Unified error handling for route handlers.
//!
//! All route handlers return `Result<T, AppError>`. Client-input errors are
//! answered with `400` and their message; everything else is logged and
//! answered with a generic `500`.

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::services::CommerceError;

/// Body message for malformed request payloads.
pub const INVALID_REQUEST: &str = "Invalid request";

/// Body message for unexpected failures.
pub const INTERNAL_SERVER_ERROR: &str = "Internal Server Error";

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Cart, checkout or discount operation failed.
    #[error(transparent)]
    Commerce(#[from] CommerceError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Request body or query could not be parsed.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Commerce(err) if err.is_client_error() => StatusCode::BAD_REQUEST,
            Self::Commerce(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection.body_text(), "rejected JSON body");
        Self::BadRequest(INVALID_REQUEST.to_string())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        tracing::debug!(error = %rejection.body_text(), "rejected query string");
        Self::BadRequest(INVALID_REQUEST.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Don't expose internal error details to clients
        let message = if status.is_server_error() {
            tracing::error!(error = %self, "Request error");
            INTERNAL_SERVER_ERROR.to_string()
        } else {
            match self {
                Self::Commerce(err) => err.to_string(),
                Self::NotFound(msg) | Self::BadRequest(msg) => msg,
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
