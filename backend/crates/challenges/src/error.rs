//! Challenges Error Types

use axum::response::{IntoResponse, Response};
use kernel::error::conversions::connection_failed;
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Challenges-specific result type alias
pub type ChallengesResult<T> = Result<T, ChallengesError>;

/// Challenges-specific error variants
#[derive(Debug, Error)]
pub enum ChallengesError {
    /// Malformed or missing input (the message is client-facing)
    #[error("{0}")]
    Validation(String),

    /// Per-IP creation limit exceeded
    #[error("Too many requests, please try again later")]
    RateLimited,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl ChallengesError {
    /// Get the ErrorKind for this error
    ///
    /// Query failures are 500; pool exhaustion and connection loss are
    /// retryable and reported as 503.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ChallengesError::Validation(_) => ErrorKind::BadRequest,
            ChallengesError::RateLimited => ErrorKind::TooManyRequests,
            ChallengesError::Database(e) if connection_failed(e) => ErrorKind::ServiceUnavailable,
            ChallengesError::Database(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError. Database detail never reaches the client.
    pub fn to_app_error(&self) -> AppError {
        match self {
            ChallengesError::Database(_) => {
                let message = match self.kind() {
                    ErrorKind::ServiceUnavailable => "Service temporarily unavailable",
                    _ => "Internal server error",
                };
                AppError::new(self.kind(), message)
            }
            other => AppError::new(other.kind(), other.to_string()),
        }
    }

    fn log(&self) {
        match self {
            ChallengesError::Database(e) => {
                tracing::error!(error = %e, "Challenges database error");
            }
            ChallengesError::RateLimited => {
                tracing::warn!("Challenge creation rate limit exceeded");
            }
            _ => {
                tracing::debug!(error = %self, "Challenges error");
            }
        }
    }
}

impl IntoResponse for ChallengesError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ChallengesError::Validation("bad".into()).kind().status_code(),
            400
        );
        assert_eq!(ChallengesError::RateLimited.kind().status_code(), 429);
        assert_eq!(
            ChallengesError::Database(sqlx::Error::RowNotFound)
                .kind()
                .status_code(),
            500
        );
        assert_eq!(
            ChallengesError::Database(sqlx::Error::PoolTimedOut)
                .kind()
                .status_code(),
            503
        );
    }

    #[test]
    fn test_database_detail_does_not_leak() {
        let err = ChallengesError::Database(sqlx::Error::RowNotFound);
        let app_err = err.to_app_error();
        assert_eq!(app_err.message(), "Internal server error");
    }
}
