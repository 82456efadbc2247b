//! Register Use Case
//!
//! Creates a new user account. Order per request: rate limit, input
//! validation, sanitization, transactional uniqueness check + insert.

use std::net::IpAddr;
use std::sync::Arc;

use platform::client::rate_limit_key;
use platform::password::PlainPassword;
use platform::rate_limit::RateLimitStore;
use platform::sanitize::sanitize_input;

use crate::application::config::AuthConfig;
use crate::domain::entities::NewUser;
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};

/// Minimum username length in characters
pub const MIN_USERNAME_LENGTH: usize = 3;

/// Register input
pub struct RegisterInput {
    pub username: Option<String>,
    pub password: Option<String>,
    pub email: Option<String>,
    /// Client IP for rate limiting
    pub client_ip: Option<IpAddr>,
}

/// Register output
#[derive(Debug)]
pub struct RegisterOutput {
    /// The sanitized username as stored (never the password or hash)
    pub username: String,
}

/// Register use case
pub struct RegisterUseCase<R, L>
where
    R: UserRepository,
    L: RateLimitStore,
{
    user_repo: Arc<R>,
    limiter: Arc<L>,
    config: Arc<AuthConfig>,
}

impl<R, L> RegisterUseCase<R, L>
where
    R: UserRepository,
    L: RateLimitStore,
{
    pub fn new(user_repo: Arc<R>, limiter: Arc<L>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            limiter,
            config,
        }
    }

    pub async fn execute(&self, input: RegisterInput) -> AuthResult<RegisterOutput> {
        // Rate limit first: every attempt consumes quota, valid or not.
        let key = rate_limit_key("register", input.client_ip);
        let result = self
            .limiter
            .check(&key, &self.config.register_limit)
            .await;
        if !result.allowed {
            return Err(AuthError::RateLimited);
        }

        // Validate the raw input; sanitization below can only shrink it.
        let username_raw = input.username.unwrap_or_default();
        if username_raw.chars().count() < MIN_USERNAME_LENGTH {
            return Err(AuthError::Validation(format!(
                "Username must be at least {MIN_USERNAME_LENGTH} characters"
            )));
        }

        let password = PlainPassword::new(input.password.unwrap_or_default())
            .map_err(|e| AuthError::Validation(e.to_string()))?;

        // Sanitize what gets stored.
        let username = sanitize_input(&username_raw);
        let email = input
            .email
            .as_deref()
            .map(sanitize_input)
            .filter(|e| !e.is_empty());

        let password_hash = password
            .hash()
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        let user = self
            .user_repo
            .create_user(&NewUser {
                username,
                email,
                password_hash: password_hash.as_phc_string().to_string(),
            })
            .await?;

        tracing::info!(username = %user.username, "User registered");

        Ok(RegisterOutput {
            username: user.username,
        })
    }
}
