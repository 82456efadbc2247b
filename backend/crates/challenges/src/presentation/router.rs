//! Challenges Router

use axum::{
    Router, middleware,
    routing::{delete, get, post},
};
use std::sync::Arc;

use platform::csrf::CsrfTokenStore;
use platform::rate_limit::MemoryRateLimitStore;

use crate::application::config::ChallengesConfig;
use crate::domain::repository::ChallengeRepository;
use crate::infra::postgres::PgChallengeRepository;
use crate::presentation::handlers::{self, ChallengesAppState};
use crate::presentation::middleware::{CsrfState, require_csrf_token};

/// Create the Challenges router with PostgreSQL repository
pub fn challenges_router(
    repo: PgChallengeRepository,
    limiter: Arc<MemoryRateLimitStore>,
    tokens: Arc<CsrfTokenStore>,
    config: ChallengesConfig,
) -> Router {
    challenges_router_generic(repo, limiter, tokens, config)
}

/// Create a generic Challenges router for any repository implementation
///
/// The CSRF layer covers every route; safe methods (the list endpoint)
/// pass through it untouched.
pub fn challenges_router_generic<R>(
    repo: R,
    limiter: Arc<MemoryRateLimitStore>,
    tokens: Arc<CsrfTokenStore>,
    config: ChallengesConfig,
) -> Router
where
    R: ChallengeRepository + Clone + Send + Sync + 'static,
{
    let state = ChallengesAppState {
        repo: Arc::new(repo),
        limiter,
        config: Arc::new(config),
    };

    let csrf_state = CsrfState { tokens };

    Router::new()
        .route(
            "/",
            get(handlers::list_challenges::<R>).post(handlers::create_challenge::<R>),
        )
        .route("/{id}", delete(handlers::delete_challenge::<R>))
        .route("/bulk-delete", post(handlers::bulk_delete::<R>))
        .route_layer(middleware::from_fn_with_state(
            csrf_state,
            require_csrf_token,
        ))
        .with_state(state)
}
