//! Application Configuration

use platform::rate_limit::RateLimitConfig;

/// Challenges application configuration
#[derive(Debug, Clone)]
pub struct ChallengesConfig {
    /// Per-IP challenge creation limit (20 per minute)
    pub create_limit: RateLimitConfig,
}

impl Default for ChallengesConfig {
    fn default() -> Self {
        Self {
            create_limit: RateLimitConfig::new(20, 60),
        }
    }
}
