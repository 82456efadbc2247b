//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors; application-level errors use
//! `kernel::error::AppError` and always render as `{"error": ...}` JSON.

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use auth::{AuthConfig, PgAuthRepository, auth_router};
use axum::{
    Json, Router,
    body::Body,
    extract::State,
    http::{self, HeaderName, HeaderValue, Method, Request, header},
    middleware::Next,
    response::{IntoResponse, Response},
    routing::get,
};
use challenges::{ChallengesConfig, PgChallengeRepository, challenges_router};
use kernel::error::app_error::AppError;
use platform::client::{extract_client_ip, rate_limit_key};
use platform::csrf::CsrfTokenStore;
use platform::rate_limit::{MemoryRateLimitStore, RateLimitConfig, RateLimitStore};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// How often the in-memory security stores drop expired entries
const SWEEP_INTERVAL: Duration = Duration::from_secs(600);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,auth=info,challenges=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Database connection: bounded pool, 2 s acquire timeout, 30 s idle
    // eviction. Pool exhaustion surfaces to callers as 503, not retried.
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_millis(2_000))
        .idle_timeout(Duration::from_secs(30))
        .connect_with(connect_options()?)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    // Process-wide security state, injected everywhere it is needed
    let limiter = Arc::new(MemoryRateLimitStore::new());
    let csrf_tokens = Arc::new(CsrfTokenStore::new());

    spawn_sweeper(limiter.clone(), csrf_tokens.clone());

    // CORS configuration
    let allowed_origins = env::var("ALLOWED_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:5173,http://127.0.0.1:5173".to_string());

    let allowed_origins: Vec<http::HeaderValue> = allowed_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            HeaderName::from_static("x-csrf-token"),
        ]))
        .allow_credentials(true);

    let api_state = ApiState {
        ping_message: Arc::new(
            env::var("PING_MESSAGE").unwrap_or_else(|_| "Server is running".to_string()),
        ),
        csrf_tokens: csrf_tokens.clone(),
    };

    let global_limit = GlobalLimitState {
        limiter: limiter.clone(),
        config: Arc::new(RateLimitConfig::new(1_000, 60)),
    };

    // Build router
    let app = Router::new()
        .route("/api/ping", get(ping))
        .route("/api/csrf-token", get(issue_csrf_token))
        .with_state(api_state)
        .nest(
            "/api/auth",
            auth_router(
                PgAuthRepository::new(pool.clone()),
                limiter.clone(),
                auth_config_from_env(),
            ),
        )
        .nest(
            "/api/challenges",
            challenges_router(
                PgChallengeRepository::new(pool.clone()),
                limiter.clone(),
                csrf_tokens.clone(),
                ChallengesConfig::default(),
            ),
        )
        .layer(axum::middleware::from_fn_with_state(
            global_limit,
            global_rate_limit,
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-xss-protection"),
            HeaderValue::from_static("1; mode=block"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::REFERRER_POLICY,
            HeaderValue::from_static("strict-origin-when-cross-origin"),
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], 8080));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

// ============================================================================
// Configuration
// ============================================================================

/// Postgres connection options: `DATABASE_URL` wins, otherwise the
/// discrete `DB_*` variables with local defaults.
fn connect_options() -> anyhow::Result<PgConnectOptions> {
    if let Ok(url) = env::var("DATABASE_URL") {
        return Ok(url.parse()?);
    }

    let mut options = PgConnectOptions::new()
        .host(&env::var("DB_HOST").unwrap_or_else(|_| "localhost".to_string()))
        .username(&env::var("DB_USER").unwrap_or_else(|_| "postgres".to_string()))
        .database(&env::var("DB_NAME").unwrap_or_else(|_| "javakata".to_string()));

    if let Ok(port) = env::var("DB_PORT") {
        options = options.port(port.parse()?);
    }
    if let Ok(password) = env::var("DB_PASSWORD") {
        options = options.password(&password);
    }

    Ok(options)
}

/// Auth configuration. The break-glass credential exists only when both
/// environment variables are present; enabling it is loud on purpose.
fn auth_config_from_env() -> AuthConfig {
    match (
        env::var("BREAK_GLASS_USERNAME"),
        env::var("BREAK_GLASS_PASSWORD"),
    ) {
        (Ok(username), Ok(password)) => {
            tracing::warn!("Break-glass operator credential is ENABLED");
            AuthConfig::with_break_glass(username, password)
        }
        _ => AuthConfig::default(),
    }
}

/// Periodically drop expired rate-limit windows and CSRF tokens so the
/// process-wide maps stay bounded.
fn spawn_sweeper(limiter: Arc<MemoryRateLimitStore>, csrf_tokens: Arc<CsrfTokenStore>) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(SWEEP_INTERVAL);
        interval.tick().await; // first tick fires immediately
        loop {
            interval.tick().await;
            let windows = limiter.sweep();
            let tokens = csrf_tokens.sweep();
            tracing::debug!(
                rate_limit_windows = windows,
                csrf_tokens = tokens,
                "Swept expired security state"
            );
        }
    });
}

// ============================================================================
// Handlers
// ============================================================================

#[derive(Clone)]
struct ApiState {
    ping_message: Arc<String>,
    csrf_tokens: Arc<CsrfTokenStore>,
}

/// GET /api/ping
async fn ping(State(state): State<ApiState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": state.ping_message.as_str() }))
}

/// GET /api/csrf-token
async fn issue_csrf_token(State(state): State<ApiState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({ "csrfToken": state.csrf_tokens.issue() }))
}

// ============================================================================
// Global rate limit middleware
// ============================================================================

#[derive(Clone)]
struct GlobalLimitState {
    limiter: Arc<MemoryRateLimitStore>,
    config: Arc<RateLimitConfig>,
}

/// Per-IP limit applied to every request before routing handlers run.
async fn global_rate_limit(
    State(state): State<GlobalLimitState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, Response> {
    let client_ip = req
        .extensions()
        .get::<axum::extract::ConnectInfo<SocketAddr>>()
        .map(|info| info.0.ip());

    let client_ip = extract_client_ip(req.headers(), client_ip);
    let key = rate_limit_key("global", client_ip);

    let result = state.limiter.check(&key, &state.config).await;
    if !result.allowed {
        return Err(AppError::too_many_requests("Too many requests").into_response());
    }

    Ok(next.run(req).await)
}
