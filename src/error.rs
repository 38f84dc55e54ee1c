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
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid request: {0}")]
    Validation(String),

    #[error("Invalid date for '{field}': {value}")]
    InvalidDate { field: &'static str, value: String },

    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Upstream network or status failure. `status` is the upstream HTTP
    /// status when one was received.
    #[error("GitHub API unavailable (status {status:?}): {detail}")]
    UpstreamUnavailable { status: Option<u16>, detail: String },

    #[error("GitHub user not found: {0}")]
    UserNotFound(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl AppError {
    /// Build an upstream failure from a transport error (no status received).
    pub fn upstream_transport(err: impl std::fmt::Display) -> Self {
        AppError::UpstreamUnavailable {
            status: None,
            detail: err.to_string(),
        }
    }

    /// HTTP status for this error. Shared by JSON and status-only responses.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::InvalidDate { .. } => StatusCode::BAD_REQUEST,
            AppError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::UpstreamUnavailable { .. } => StatusCode::BAD_GATEWAY,
            AppError::UserNotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Log the error at a level matching its cause.
    pub fn log(&self) {
        match self {
            AppError::Validation(msg) => tracing::debug!(error = %msg, "Rejected request"),
            AppError::InvalidDate { field, value } => {
                tracing::debug!(field = *field, value = %value, "Rejected unparseable date")
            }
            AppError::Configuration(msg) => tracing::error!(error = %msg, "Configuration error"),
            AppError::UpstreamUnavailable { status, detail } => {
                tracing::warn!(status = ?status, detail = %detail, "GitHub API unavailable")
            }
            AppError::UserNotFound(login) => {
                tracing::info!(username = %login, "GitHub user not found")
            }
            AppError::Internal(err) => tracing::error!(error = %err, "Internal server error"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.log();

        let (error, details) = match &self {
            AppError::Validation(msg) => ("validation_error", Some(msg.clone())),
            AppError::InvalidDate { .. } => ("invalid_date", Some(self.to_string())),
            AppError::Configuration(msg) => ("configuration_error", Some(msg.clone())),
            AppError::UpstreamUnavailable { .. } => (
                "upstream_unavailable",
                Some("Failed to fetch data from GitHub API".to_string()),
            ),
            AppError::UserNotFound(_) => ("user_not_found", Some(self.to_string())),
            AppError::Internal(_) => ("internal_error", None),
        };

        let body = ErrorResponse {
            error: error.to_string(),
            details,
        };

        (self.status_code(), Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
