//! Unified error types for the todo service.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::metrics;

/// Process-level error type (startup, configuration, I/O).
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Configuration loaded but failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors surfaced to API callers by todo operations.
///
/// Every variant is terminal for the request that produced it; none of them
/// leave the store partially mutated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TodoError {
    /// Malformed id, missing required field, or undecodable body.
    #[error("{0}")]
    InvalidArgument(String),

    /// No todo with the requested id.
    #[error("Todo not found")]
    NotFound {
        /// The id that was looked up.
        id: i64,
    },
}

impl TodoError {
    /// Id path segment that is not an integer.
    pub fn invalid_id() -> Self {
        Self::InvalidArgument("Invalid ID".to_string())
    }

    /// HTTP status this error maps to.
    pub fn status_code(&self) -> StatusCode {
        match self {
            TodoError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            TodoError::NotFound { .. } => StatusCode::NOT_FOUND,
        }
    }

    /// Short machine-readable reason, used as a metric label.
    pub fn reason(&self) -> &'static str {
        match self {
            TodoError::InvalidArgument(_) => "invalid_argument",
            TodoError::NotFound { .. } => "not_found",
        }
    }
}

/// Error body: `{"error": message}`.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}

impl IntoResponse for TodoError {
    fn into_response(self) -> Response {
        debug!(reason = self.reason(), "Request rejected: {}", self);
        metrics::inc_requests_rejected(self.reason());

        let body = Json(ErrorResponse {
            error: self.to_string(),
        });
        (self.status_code(), body).into_response()
    }
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, AppError>;
