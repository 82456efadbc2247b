//! CSRF Middleware
//!
//! State-mutating requests must echo a token previously fetched from
//! `/api/csrf-token` in the `X-CSRF-Token` header. Requests with a safe
//! method pass through untouched; everything else is rejected with 403
//! before any business logic runs.

use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use kernel::error::app_error::AppError;
use std::sync::Arc;

use platform::csrf::CsrfTokenStore;

/// Header carrying the CSRF token
pub const CSRF_TOKEN_HEADER: &str = "x-csrf-token";

/// Middleware state
#[derive(Clone)]
pub struct CsrfState {
    pub tokens: Arc<CsrfTokenStore>,
}

/// Middleware that requires a valid CSRF token on mutating requests
pub async fn require_csrf_token(
    State(state): State<CsrfState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, Response> {
    if req.method().is_safe() {
        return Ok(next.run(req).await);
    }

    let valid = req
        .headers()
        .get(CSRF_TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|token| state.tokens.validate(token));

    if !valid {
        tracing::warn!(method = %req.method(), uri = %req.uri(), "CSRF token rejected");
        return Err(AppError::forbidden("Invalid or missing CSRF token").into_response());
    }

    Ok(next.run(req).await)
}
