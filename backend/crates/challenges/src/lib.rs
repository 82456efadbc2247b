//! Challenges Backend Module
//!
//! CRUD for the coding-challenge catalog:
//! - `domain/` - Entities and repository traits
//! - `application/` - List/create/delete use cases and configuration
//! - `infra/` - PostgreSQL repository
//! - `presentation/` - HTTP handlers, DTOs, router, CSRF middleware
//!
//! Mutating routes require a valid `X-CSRF-Token` header (rejected with
//! 403 before any business logic) and challenge creation is rate limited
//! per client IP. Display fields are HTML-escaped at creation; code
//! fields are stored verbatim.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::config::ChallengesConfig;
pub use error::{ChallengesError, ChallengesResult};
pub use infra::postgres::PgChallengeRepository;
pub use presentation::router::challenges_router;
