//! Create Challenge Use Case
//!
//! Validates the payload, HTML-escapes the display fields, and inserts.
//! `sample_code` and `test_cases` are stored verbatim: escaping would
//! corrupt Java source (`List<String>`), and clients render them as code.

use std::net::IpAddr;
use std::sync::Arc;

use platform::client::rate_limit_key;
use platform::rate_limit::RateLimitStore;
use platform::sanitize::sanitize_html;

use crate::application::config::ChallengesConfig;
use crate::domain::entities::{Challenge, NewChallenge};
use crate::domain::repository::ChallengeRepository;
use crate::error::{ChallengesError, ChallengesResult};

/// Create challenge input
pub struct CreateChallengeInput {
    pub title: Option<String>,
    pub problem: Option<String>,
    pub concept: Option<String>,
    pub category: Option<String>,
    pub difficulty: Option<String>,
    pub sample_code: Option<String>,
    pub test_cases: Option<String>,
    /// Client IP for rate limiting
    pub client_ip: Option<IpAddr>,
}

/// Create challenge use case
pub struct CreateChallengeUseCase<R, L>
where
    R: ChallengeRepository,
    L: RateLimitStore,
{
    repo: Arc<R>,
    limiter: Arc<L>,
    config: Arc<ChallengesConfig>,
}

impl<R, L> CreateChallengeUseCase<R, L>
where
    R: ChallengeRepository,
    L: RateLimitStore,
{
    pub fn new(repo: Arc<R>, limiter: Arc<L>, config: Arc<ChallengesConfig>) -> Self {
        Self {
            repo,
            limiter,
            config,
        }
    }

    pub async fn execute(&self, input: CreateChallengeInput) -> ChallengesResult<Challenge> {
        let key = rate_limit_key("challenge-create", input.client_ip);
        let result = self.limiter.check(&key, &self.config.create_limit).await;
        if !result.allowed {
            return Err(ChallengesError::RateLimited);
        }

        let title = required_field(input.title, "title")?;
        let problem = required_field(input.problem, "problem")?;
        let category = required_field(input.category, "category")?;
        let difficulty = required_field(input.difficulty, "difficulty")?;

        let challenge = self
            .repo
            .insert(&NewChallenge {
                title: sanitize_html(&title),
                problem: sanitize_html(&problem),
                concept: input.concept.as_deref().map(sanitize_html),
                category: sanitize_html(&category),
                difficulty: sanitize_html(&difficulty),
                sample_code: input.sample_code,
                test_cases: input.test_cases,
            })
            .await?;

        tracing::info!(
            challenge_id = challenge.id,
            category = %challenge.category,
            "Challenge created"
        );

        Ok(challenge)
    }
}

fn required_field(value: Option<String>, name: &str) -> ChallengesResult<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ChallengesError::Validation(format!(
            "Field '{name}' is required"
        ))),
    }
}
