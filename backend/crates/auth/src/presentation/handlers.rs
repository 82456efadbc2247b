//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;
use std::sync::Arc;

use platform::client::extract_client_ip;
use platform::rate_limit::MemoryRateLimitStore;

use crate::application::config::AuthConfig;
use crate::application::{LoginInput, LoginUseCase, RegisterInput, RegisterUseCase};
use crate::domain::repository::UserRepository;
use crate::error::AuthResult;
use crate::presentation::dto::{
    AuthenticatedUser, LoginRequest, LoginResponse, RegisterRequest, RegisterResponse,
    RegisteredUser,
};

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub limiter: Arc<MemoryRateLimitStore>,
    pub config: Arc<AuthConfig>,
}

// ============================================================================
// Register
// ============================================================================

/// POST /api/auth/register
pub async fn register<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
    axum::extract::ConnectInfo(addr): axum::extract::ConnectInfo<std::net::SocketAddr>,
    Json(req): Json<RegisterRequest>,
) -> AuthResult<Json<RegisterResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let client_ip = extract_client_ip(&headers, Some(addr.ip()));

    let use_case = RegisterUseCase::new(
        state.repo.clone(),
        state.limiter.clone(),
        state.config.clone(),
    );

    let input = RegisterInput {
        username: req.username,
        password: req.password,
        email: req.email,
        client_ip,
    };

    let output = use_case.execute(input).await?;

    Ok(Json(RegisterResponse {
        ok: true,
        user: RegisteredUser {
            username: output.username,
        },
    }))
}

// ============================================================================
// Login
// ============================================================================

/// POST /api/auth/login
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
    axum::extract::ConnectInfo(addr): axum::extract::ConnectInfo<std::net::SocketAddr>,
    Json(req): Json<LoginRequest>,
) -> AuthResult<Json<LoginResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let client_ip = extract_client_ip(&headers, Some(addr.ip()));

    let use_case = LoginUseCase::new(
        state.repo.clone(),
        state.limiter.clone(),
        state.config.clone(),
    );

    let input = LoginInput {
        username: req.username,
        password: req.password,
        client_ip,
    };

    let output = use_case.execute(input).await?;

    Ok(Json(LoginResponse {
        ok: true,
        user: AuthenticatedUser {
            username: output.username,
            profile_photo: output.profile_photo,
        },
    }))
}
