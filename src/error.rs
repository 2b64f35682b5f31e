// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type that converts to HTTP responses.
///
/// Every variant is reported to the caller as the same generic failure;
/// the distinction only matters for logs.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Upload error: {0}")]
    Upload(String),

    #[error("Filesystem error: {0}")]
    Filesystem(String),

    #[error("Invalid request: {0}")]
    Request(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Message returned to clients for any failed registration.
    pub const PUBLIC_MESSAGE: &'static str = "Upload failed.";

    /// Short machine-readable kind, used as a log field.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Upload(_) => "upload_error",
            AppError::Filesystem(_) => "filesystem_error",
            AppError::Request(_) => "request_error",
            AppError::Internal(_) => "internal_error",
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Filesystem(err.to_string())
    }
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!(kind = self.kind(), error = %self, "Request failed");

        let body = ErrorResponse {
            error: Self::PUBLIC_MESSAGE.to_string(),
        };

        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
