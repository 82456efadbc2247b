//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use crate::domain::entities::{Challenge, NewChallenge};
use crate::error::ChallengesResult;

/// Challenge repository trait
#[trait_variant::make(ChallengeRepository: Send)]
pub trait LocalChallengeRepository {
    /// All challenges, newest first
    async fn list(&self) -> ChallengesResult<Vec<Challenge>>;

    /// Insert a challenge and return the stored row
    async fn insert(&self, challenge: &NewChallenge) -> ChallengesResult<Challenge>;

    /// Delete one challenge; returns the number of rows removed (0 or 1)
    async fn delete(&self, id: i64) -> ChallengesResult<u64>;

    /// Delete a batch of challenges; returns the number of rows removed
    async fn delete_many(&self, ids: &[i64]) -> ChallengesResult<u64>;
}
