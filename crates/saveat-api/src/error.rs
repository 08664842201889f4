//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Maps domain and store errors to the service's HTTP taxonomy:
//! validation → 400, authentication → 401, authorization → 403,
//! missing records → 404, everything else → 500. Internal error
//! details never reach the client.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::state::StoreError;

/// Structured JSON error response body.
///
/// Every non-2xx response uses this format. The `details` field carries
/// schema-validation specifics for 400s and is omitted otherwise.
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
    /// Additional detail, present only for validation errors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Application-level error type that implements [`IntoResponse`] for Axum.
#[derive(Error, Debug)]
pub enum AppError {
    /// Resource not found (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// Required field missing or field constraint violated (400).
    /// Carries optional schema-validation detail for the response body.
    #[error("validation error: {0}")]
    Validation(String, Option<serde_json::Value>),

    /// Authentication failure — missing, invalid, or expired credentials
    /// (401). The message is deliberately generic: unknown email and
    /// wrong password are indistinguishable.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Authorization failure — insufficient role (403).
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Internal server error (500). Message is logged but not returned.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Validation error without extra detail.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into(), None)
    }

    /// Validation error with schema detail for the response body.
    pub fn validation_with_details(msg: impl Into<String>, details: serde_json::Value) -> Self {
        Self::Validation(msg.into(), Some(details))
    }

    /// Return the HTTP status code and machine-readable error code.
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Self::Validation(..) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            Self::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            Self::Forbidden(_) => (StatusCode::FORBIDDEN, "FORBIDDEN"),
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        // Never expose internal error messages to clients.
        let message = match &self {
            Self::Internal(_) => "unknown server error".to_string(),
            other => other.to_string(),
        };

        let details = match &self {
            Self::Validation(_, details) => details.clone(),
            _ => None,
        };

        // Log server-side errors for operator visibility.
        if let Self::Internal(_) = &self {
            tracing::error!(error = %self, "internal server error");
        }

        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message,
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Store uniqueness violations surface as validation errors (400), the
/// same answer the pre-check gives — a lost insert race is
/// indistinguishable from a failed pre-check.
impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        Self::validation(err.to_string())
    }
}

/// Domain validation errors are client errors.
impl From<saveat_core::ValidationError> for AppError {
    fn from(err: saveat_core::ValidationError) -> Self {
        Self::validation(err.to_string())
    }
}

/// Database failures in the request path are internal errors.
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        Self::Internal(err.to_string())
    }
}
