//! Application Configuration
//!
//! Configuration for the Auth application layer.

use platform::rate_limit::RateLimitConfig;

/// Fixed operator credential honored only while the data store is
/// unreachable.
///
/// This is an emergency-access path for operational continuity, not a
/// general bypass: it is disabled unless explicitly configured, compared
/// in constant time on both fields, and every use is audit-logged.
#[derive(Debug, Clone)]
pub struct BreakGlassCredentials {
    pub username: String,
    pub password: String,
}

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Per-IP registration limit (5 attempts per 5 minutes)
    pub register_limit: RateLimitConfig,
    /// Per-IP login limit (10 attempts per 5 minutes)
    pub login_limit: RateLimitConfig,
    /// Break-glass credential; `None` disables the fallback entirely
    pub break_glass: Option<BreakGlassCredentials>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            register_limit: RateLimitConfig::new(5, 300),
            login_limit: RateLimitConfig::new(10, 300),
            break_glass: None,
        }
    }
}

impl AuthConfig {
    /// Config with the break-glass credential enabled.
    pub fn with_break_glass(username: String, password: String) -> Self {
        Self {
            break_glass: Some(BreakGlassCredentials { username, password }),
            ..Default::default()
        }
    }
}
