//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Maps repository and domain errors to HTTP status codes and returns JSON
//! error response bodies with an error code and message. Internal error
//! details are logged but never exposed in responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::repo::RepoError;

/// Structured JSON error response body.
///
/// All error responses use this format across the API surface.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Inner error detail.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g., "NOT_FOUND", "VALIDATION_ERROR").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

/// Application-level error type that implements [`IntoResponse`] for Axum.
#[derive(Error, Debug)]
pub enum AppError {
    /// Referenced board or note does not exist (404). The message already
    /// names the missing entity ("board X not found"), so it passes through
    /// unprefixed.
    #[error("{0}")]
    NotFound(String),

    /// Malformed or semantically invalid input (400): empty required text,
    /// invalid category, self-merge.
    #[error("validation error: {0}")]
    Validation(String),

    /// Request body could not be parsed (400).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Internal server error (500). Message is logged but not returned to the client.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Return the HTTP status code and machine-readable error code for this error.
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Self::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        // Never expose internal error messages to clients.
        let message = match &self {
            Self::Internal(_) => "An internal error occurred".to_string(),
            other => other.to_string(),
        };

        if let Self::Internal(_) = &self {
            tracing::error!(error = %self, "internal server error");
        }

        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message,
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Convert domain validation errors to API errors.
impl From<retroboard_core::ValidationError> for AppError {
    fn from(err: retroboard_core::ValidationError) -> Self {
        Self::Validation(err.to_string())
    }
}

/// Convert repository errors to API errors.
impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => Self::NotFound(msg),
            RepoError::Validation(e) => Self::Validation(e.to_string()),
            RepoError::Db(e) => Self::Internal(e.to_string()),
        }
    }
}
