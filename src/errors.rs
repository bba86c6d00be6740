//! Centralized error handling.
//!
//! Provides a unified error type for the entire application,
//! with automatic HTTP response conversion.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Application error types.
///
/// `InvalidArgument`, `Conflict`, `NotFound` and `FailedPrecondition` are
/// expected business outcomes and surface their message to the caller.
/// `Database` and `Internal` are infrastructure failures: logged, reported
/// to Sentry, and surfaced as an opaque generic message.
#[derive(Error, Debug)]
pub enum AppError {
    // Caller must fix the request
    #[error("{0}")]
    InvalidArgument(String),

    // Uniqueness violation
    #[error("{0} already exists")]
    Conflict(String),

    // Referenced entity absent
    #[error("{0} not found")]
    NotFound(String),

    // Business rule blocks the operation
    #[error("{0}")]
    FailedPrecondition(String),

    // External service errors
    #[error("Database error")]
    Database(#[from] sea_orm::DbErr),

    // Internal
    #[error("Internal server error")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: String,
    message: String,
}

impl AppError {
    /// Get error code for client
    fn code(&self) -> &'static str {
        match self {
            AppError::InvalidArgument(_) => "INVALID_ARGUMENT",
            AppError::Conflict(_) => "CONFLICT",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::FailedPrecondition(_) => "FAILED_PRECONDITION",
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Get HTTP status code
    pub fn status(&self) -> StatusCode {
        match self {
            // Insufficient funds maps to 400 alongside bad arguments
            AppError::InvalidArgument(_) | AppError::FailedPrecondition(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get user-facing message (hides internal details)
    fn user_message(&self) -> String {
        match self {
            // Show full message for expected business outcomes
            AppError::InvalidArgument(msg) => msg.clone(),
            AppError::FailedPrecondition(msg) => msg.clone(),
            AppError::Conflict(entity) => format!("{} already exists", entity),
            AppError::NotFound(entity) => format!("{} not found", entity),

            // Hide details for infrastructure failures
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                sentry::capture_error(self);
                "internal server error".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                sentry::capture_error(self);
                "internal server error".to_string()
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.code().to_string(),
                message: self.user_message(),
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Convenience constructors
impl AppError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        AppError::InvalidArgument(msg.into())
    }

    pub fn conflict(entity: impl Into<String>) -> Self {
        AppError::Conflict(entity.into())
    }

    pub fn not_found(entity: impl Into<String>) -> Self {
        AppError::NotFound(entity.into())
    }

    pub fn failed_precondition(msg: impl Into<String>) -> Self {
        AppError::FailedPrecondition(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn business_errors_keep_their_message() {
        assert_eq!(
            AppError::invalid_argument("transfer amount must be positive").to_string(),
            "transfer amount must be positive"
        );
        assert_eq!(
            AppError::not_found("sender wallet").to_string(),
            "sender wallet not found"
        );
        assert_eq!(
            AppError::conflict("username").to_string(),
            "username already exists"
        );
    }

    #[test]
    fn status_codes_follow_the_boundary_contract() {
        assert_eq!(
            AppError::invalid_argument("bad amount").status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::failed_precondition("insufficient funds").status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AppError::conflict("username").status(), StatusCode::CONFLICT);
        assert_eq!(AppError::not_found("wallet").status(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::internal("boom").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
