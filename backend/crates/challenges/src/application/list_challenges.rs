//! List Challenges Use Case

use std::sync::Arc;

use crate::domain::entities::Challenge;
use crate::domain::repository::ChallengeRepository;
use crate::error::ChallengesResult;

/// List challenges use case
pub struct ListChallengesUseCase<R>
where
    R: ChallengeRepository,
{
    repo: Arc<R>,
}

impl<R> ListChallengesUseCase<R>
where
    R: ChallengeRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self) -> ChallengesResult<Vec<Challenge>> {
        self.repo.list().await
    }
}
