//! Error conversions - classification of infrastructure errors and the
//! HTTP rendering of [`AppError`] (feature-gated).

#[cfg(feature = "axum")]
use super::app_error::AppError;

// ============================================================================
// SQLx classification (feature-gated)
// ============================================================================

/// True when the error means the store itself could not be reached
/// (as opposed to a query that ran and failed).
///
/// The login flow uses this to decide whether the break-glass credential
/// check applies: only a connection-level failure qualifies, a "no rows"
/// result or a constraint violation never does.
#[cfg(feature = "sqlx")]
pub fn connection_failed(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Io(_)
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::Tls(_) => true,
        sqlx::Error::Database(db_err) => {
            // Class 53 (insufficient resources) and 57 (operator
            // intervention) mean the server is up but unusable.
            matches!(
                db_err.code().as_deref(),
                Some("53000" | "53100" | "53200" | "53300")
                    | Some("57000" | "57014" | "57P01" | "57P02" | "57P03")
            )
        }
        _ => false,
    }
}

/// True when the error is a unique-constraint violation (duplicate key).
#[cfg(feature = "sqlx")]
pub fn unique_violation(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23505")
    )
}

// ============================================================================
// Axum rendering (feature-gated)
// ============================================================================

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // Every failure is `{"error": message}`; the source never leaves
        // the server.
        let body = serde_json::json!({ "error": self.message() });

        (status, Json(body)).into_response()
    }
}
