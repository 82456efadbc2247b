pub mod config;
pub mod create_challenge;
pub mod delete_challenges;
pub mod list_challenges;

pub use create_challenge::{CreateChallengeInput, CreateChallengeUseCase};
pub use delete_challenges::{BulkDeleteUseCase, DeleteChallengeUseCase};
pub use list_challenges::ListChallengesUseCase;
