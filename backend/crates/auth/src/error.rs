//! Auth Error Types
//!
//! Auth-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::response::{IntoResponse, Response};
use kernel::error::conversions::connection_failed;
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Malformed or missing input (the message is client-facing)
    #[error("{0}")]
    Validation(String),

    /// Per-IP rate limit exceeded
    #[error("Too many attempts, please try again later")]
    RateLimited,

    /// Wrong password or unknown user - one variant so both paths are
    /// indistinguishable to the caller
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Username or email already registered
    #[error("Username or email already exists")]
    DuplicateUser,

    /// Data store unreachable and no break-glass match
    #[error("Service temporarily unavailable")]
    StoreUnavailable,

    /// Database error
    #[error("Service temporarily unavailable")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal server error")]
    Internal(String),
}

impl AuthError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::Validation(_) => ErrorKind::BadRequest,
            AuthError::RateLimited => ErrorKind::TooManyRequests,
            AuthError::InvalidCredentials => ErrorKind::Unauthorized,
            AuthError::DuplicateUser => ErrorKind::Conflict,
            AuthError::StoreUnavailable | AuthError::Database(_) => ErrorKind::ServiceUnavailable,
            AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// True when the underlying failure is a store connection failure
    /// (the only condition under which the break-glass path applies).
    pub fn is_connection_failure(&self) -> bool {
        match self {
            AuthError::Database(e) => connection_failed(e),
            _ => false,
        }
    }

    /// Convert to AppError. The Display message is what the client sees;
    /// database detail stays in the logs.
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::StoreUnavailable => {
                tracing::error!("Auth store unavailable");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::RateLimited => {
                tracing::warn!("Auth rate limit exceeded");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}
