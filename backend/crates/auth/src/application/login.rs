//! Login Use Case
//!
//! Authenticates a user. Unknown-user and wrong-password outcomes are one
//! error variant so the responses are indistinguishable. When the store
//! connection itself fails, the configured break-glass credential (if any)
//! is checked in constant time before giving up.

use std::net::IpAddr;
use std::sync::Arc;

use platform::client::rate_limit_key;
use platform::crypto::constant_time_eq;
use platform::password::{PasswordHash, PlainPassword};
use platform::rate_limit::RateLimitStore;
use platform::sanitize::sanitize_input;

use crate::application::config::AuthConfig;
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};

/// Login input
pub struct LoginInput {
    pub username: Option<String>,
    pub password: Option<String>,
    /// Client IP for rate limiting
    pub client_ip: Option<IpAddr>,
}

/// Login output
#[derive(Debug)]
pub struct LoginOutput {
    pub username: String,
    /// Absent when none is stored, and always absent on break-glass logins
    pub profile_photo: Option<String>,
}

/// Login use case
pub struct LoginUseCase<R, L>
where
    R: UserRepository,
    L: RateLimitStore,
{
    user_repo: Arc<R>,
    limiter: Arc<L>,
    config: Arc<AuthConfig>,
}

impl<R, L> LoginUseCase<R, L>
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

    pub async fn execute(&self, input: LoginInput) -> AuthResult<LoginOutput> {
        let key = rate_limit_key("login", input.client_ip);
        let result = self.limiter.check(&key, &self.config.login_limit).await;
        if !result.allowed {
            return Err(AuthError::RateLimited);
        }

        let username_raw = input.username.unwrap_or_default();
        let password_raw = input.password.unwrap_or_default();
        if username_raw.is_empty() || password_raw.is_empty() {
            return Err(AuthError::Validation(
                "Username and password are required".to_string(),
            ));
        }

        let username = sanitize_input(&username_raw);

        let credentials = match self.user_repo.find_credentials(&username).await {
            Ok(found) => found,
            Err(e) if e.is_connection_failure() => {
                tracing::error!(error = %e, "Store unreachable during login");
                return self.check_break_glass(&username_raw, &password_raw);
            }
            Err(e) => return Err(e),
        };

        // Unknown user falls through to the same error as a wrong
        // password.
        let credentials = credentials.ok_or(AuthError::InvalidCredentials)?;

        // A password that cannot pass the policy cannot match any stored
        // hash; report it as failed credentials, not validation.
        let password =
            PlainPassword::new(password_raw).map_err(|_| AuthError::InvalidCredentials)?;

        let stored_hash = PasswordHash::from_phc_string(&credentials.password_hash)
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        if !stored_hash.verify(&password) {
            return Err(AuthError::InvalidCredentials);
        }

        tracing::info!(username = %credentials.username, "User logged in");

        Ok(LoginOutput {
            username: credentials.username,
            profile_photo: credentials.profile_photo,
        })
    }

    /// Emergency fallback while the store is down.
    ///
    /// Both comparisons always run (`&`, not `&&`) so a mismatch in one
    /// field is not distinguishable from the other by timing.
    fn check_break_glass(&self, username: &str, password: &str) -> AuthResult<LoginOutput> {
        let Some(break_glass) = &self.config.break_glass else {
            return Err(AuthError::StoreUnavailable);
        };

        let username_ok = constant_time_eq(username.as_bytes(), break_glass.username.as_bytes());
        let password_ok = constant_time_eq(password.as_bytes(), break_glass.password.as_bytes());

        if username_ok & password_ok {
            tracing::warn!(
                username = %break_glass.username,
                "Break-glass credential used while store unreachable"
            );
            Ok(LoginOutput {
                username: break_glass.username.clone(),
                profile_photo: None,
            })
        } else {
            Err(AuthError::StoreUnavailable)
        }
    }
}
