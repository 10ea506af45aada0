//! Branchline API error types.

use std::io::ErrorKind;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use branchline_content::error::ContentError;
use serde::Serialize;
use thiserror::Error;

/// Startup and runtime errors for the API server.
#[derive(Debug, Error)]
pub enum AppError {
    /// An environment variable is invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// The configured content file cannot be served.
    #[error("content error: {0}")]
    Content(#[from] ContentError),

    /// Network binding or I/O error.
    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
}

/// JSON body returned for error responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Machine-readable error code.
    pub error: &'static str,
    /// Human-readable error message.
    pub message: String,
}

/// HTTP-layer wrapper around `ContentError` that implements `IntoResponse`.
#[derive(Debug)]
pub struct ApiError(pub ContentError);

impl From<ContentError> for ApiError {
    fn from(err: ContentError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code) = match &self.0 {
            ContentError::Io { source, .. } if source.kind() == ErrorKind::NotFound => {
                (StatusCode::NOT_FOUND, "content_not_found")
            }
            ContentError::Io { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "content_unavailable"),
            ContentError::Json(_) | ContentError::Yaml(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "content_malformed")
            }
            ContentError::UnsupportedFormat(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "unsupported_format")
            }
        };

        if status.is_server_error() {
            tracing::error!(error = %self.0, code = error_code, "content request failed");
        }

        let body = ErrorBody {
            error: error_code,
            message: self.0.to_string(),
        };

        (status, Json(body)).into_response()
    }
}
