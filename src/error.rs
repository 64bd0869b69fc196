//! Application error type shared by the engine, the stores and the HTTP layer.
//!
//! Every failure is an explicit [`AppError`] value. The HTTP boundary renders it
//! as `{ "error": { "code", "message", "details" } }` with a matching status.

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Machine-readable error payload.
#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Malformed input: bad custom code, oversized URL, non-positive validity.
    #[error("{message}")]
    Validation { message: String, details: Value },

    /// The requested short code was never issued.
    #[error("{message}")]
    NotFound { message: String, details: Value },

    /// The short code exists but its validity window has passed.
    #[error("{message}")]
    Expired { message: String, details: Value },

    /// The short code is already taken (insert-if-absent lost).
    #[error("{message}")]
    Conflict { message: String, details: Value },

    /// Random generation ran out of attempts.
    #[error("{message}")]
    Exhausted { message: String, details: Value },

    /// Transient store failure; safe to retry.
    #[error("{message}")]
    Unavailable { message: String, details: Value },

    #[error("{message}")]
    Internal { message: String, details: Value },
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
    pub fn expired(message: impl Into<String>, details: Value) -> Self {
        Self::Expired {
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
    pub fn exhausted(message: impl Into<String>, details: Value) -> Self {
        Self::Exhausted {
            message: message.into(),
            details,
        }
    }
    pub fn unavailable(message: impl Into<String>, details: Value) -> Self {
        Self::Unavailable {
            message: message.into(),
            details,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// Returns true for the two outcomes a visitor sees as "this code is unusable".
    pub fn is_unusable_code(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::Expired { .. })
    }

    /// Returns true if the caller may retry the same request later.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Unavailable { .. })
    }

    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::Validation { .. } => (StatusCode::BAD_REQUEST, "validation_error"),
            // Expired and missing codes are indistinguishable to clients.
            Self::NotFound { .. } | Self::Expired { .. } => (StatusCode::NOT_FOUND, "not_found"),
            Self::Conflict { .. } => (StatusCode::CONFLICT, "conflict"),
            Self::Exhausted { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "generation_exhausted")
            }
            Self::Unavailable { .. } => (StatusCode::SERVICE_UNAVAILABLE, "store_unavailable"),
            Self::Internal { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        }
    }

    /// Converts the error into its serializable payload.
    pub fn to_error_info(&self) -> ErrorInfo {
        let (_, code) = self.status_and_code();
        let (message, details) = match self {
            Self::Validation { message, details }
            | Self::NotFound { message, details }
            | Self::Expired { message, details }
            | Self::Conflict { message, details }
            | Self::Exhausted { message, details }
            | Self::Unavailable { message, details }
            | Self::Internal { message, details } => (message.clone(), details.clone()),
        };

        ErrorInfo {
            code,
            message,
            details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, _) = self.status_and_code();

        match &self {
            Self::Internal { .. } | Self::Exhausted { .. } => {
                tracing::error!(error = %self, details = ?self.to_error_info().details, "Request failed");
            }
            Self::Unavailable { .. } => {
                tracing::warn!(error = %self, "Store unavailable");
            }
            _ => {}
        }

        let body = ErrorBody {
            error: self.to_error_info(),
        };

        if self.is_transient() {
            return (status, [(header::RETRY_AFTER, "1")], Json(body)).into_response();
        }

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        map_sqlx_error(e)
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        let details = serde_json::to_value(&e).unwrap_or_else(|_| json!({}));
        AppError::bad_request("Request validation failed", details)
    }
}

pub fn map_sqlx_error(e: sqlx::Error) -> AppError {
    if let Some(db) = e.as_database_error()
        && db.is_unique_violation()
    {
        return AppError::conflict(
            "Unique constraint violation",
            json!({ "constraint": db.constraint() }),
        );
    }

    match e {
        sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::WorkerCrashed => {
            AppError::unavailable("Store unavailable", json!({ "reason": e.to_string() }))
        }
        _ => AppError::internal("Database error", json!({})),
    }
}
