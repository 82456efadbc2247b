//! Auth Router

use axum::{Router, routing::post};
use std::sync::Arc;

use platform::rate_limit::MemoryRateLimitStore;

use crate::application::config::AuthConfig;
use crate::domain::repository::UserRepository;
use crate::infra::postgres::PgAuthRepository;
use crate::presentation::handlers::{self, AuthAppState};

/// Create the Auth router with PostgreSQL repository
pub fn auth_router(
    repo: PgAuthRepository,
    limiter: Arc<MemoryRateLimitStore>,
    config: AuthConfig,
) -> Router {
    auth_router_generic(repo, limiter, config)
}

/// Create a generic Auth router for any repository implementation
pub fn auth_router_generic<R>(
    repo: R,
    limiter: Arc<MemoryRateLimitStore>,
    config: AuthConfig,
) -> Router
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let state = AuthAppState {
        repo: Arc::new(repo),
        limiter,
        config: Arc::new(config),
    };

    Router::new()
        .route("/register", post(handlers::register::<R>))
        .route("/login", post(handlers::login::<R>))
        .with_state(state)
}
