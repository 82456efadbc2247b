//! Delete Challenge Use Cases
//!
//! Single and bulk deletion. Deleting an id that does not exist is not an
//! error; the surface reports success with the affected row count.

use std::sync::Arc;

use crate::domain::repository::ChallengeRepository;
use crate::error::{ChallengesError, ChallengesResult};

/// Delete challenge use case
pub struct DeleteChallengeUseCase<R>
where
    R: ChallengeRepository,
{
    repo: Arc<R>,
}

impl<R> DeleteChallengeUseCase<R>
where
    R: ChallengeRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, id: i64) -> ChallengesResult<u64> {
        let deleted = self.repo.delete(id).await?;
        tracing::info!(challenge_id = id, deleted, "Challenge delete");
        Ok(deleted)
    }
}

/// Bulk delete use case
pub struct BulkDeleteUseCase<R>
where
    R: ChallengeRepository,
{
    repo: Arc<R>,
}

impl<R> BulkDeleteUseCase<R>
where
    R: ChallengeRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, ids: Option<Vec<i64>>) -> ChallengesResult<u64> {
        let ids = match ids {
            Some(ids) if !ids.is_empty() => ids,
            _ => {
                return Err(ChallengesError::Validation(
                    "Field 'ids' must be a non-empty list".to_string(),
                ));
            }
        };

        let deleted = self.repo.delete_many(&ids).await?;
        tracing::info!(requested = ids.len(), deleted, "Challenge bulk delete");
        Ok(deleted)
    }
}
