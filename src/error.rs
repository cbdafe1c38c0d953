//! Application error taxonomy and its mapping to wire responses.
//!
//! Every failure in the service funnels into [`AppError`]. Client-caused
//! conditions (`Validation`, `NotFound`, `Conflict`) are produced
//! deliberately by resource logic and keep meaningful status codes.
//! Everything else (`MalformedBody`, `Database`, `Internal`) is an
//! unhandled failure: it renders the opaque `{"error": "Internal server
//! error"}` body with status 500 and the detail goes to the operational
//! log, never to the caller.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use validator::ValidationErrors;

/// Uniform wire shape for every error response.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Closed set of error variants raised anywhere in the request pipeline.
#[derive(Debug, Error)]
pub enum AppError {
    /// Input rejected by resource logic (bad field values, unknown tokens).
    #[error("{message}")]
    Validation { message: String, details: Value },

    /// A referenced resource does not exist.
    #[error("{message}")]
    NotFound { message: String, details: Value },

    /// State conflict: uniqueness violation, insufficient stock,
    /// disallowed status transition.
    #[error("{message}")]
    Conflict { message: String, details: Value },

    /// Request body could not be parsed as JSON.
    #[error("malformed request body")]
    MalformedBody(#[source] JsonRejection),

    /// Storage layer failure.
    #[error("database failure")]
    Database(#[from] sqlx::Error),

    /// Any other unhandled failure.
    #[error("{0}")]
    Internal(String),
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let details = serde_json::to_value(&errors).unwrap_or(Value::Null);
        Self::Validation {
            message: "Request validation failed".to_string(),
            details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, details) = match self {
            AppError::Validation { message, details } => {
                (StatusCode::BAD_REQUEST, message, details)
            }
            AppError::NotFound { message, details } => (StatusCode::NOT_FOUND, message, details),
            AppError::Conflict { message, details } => (StatusCode::CONFLICT, message, details),
            failure => {
                // Single logging point for unhandled failures: the chain
                // is recorded exactly once, the caller sees only the
                // opaque body.
                tracing::error!(error = ?failure, "unhandled failure in request pipeline");

                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorBody {
                        error: "Internal server error".to_string(),
                    }),
                )
                    .into_response();
            }
        };

        tracing::debug!(status = status.as_u16(), %message, %details, "request rejected");

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
