//! Auth (Authentication) Backend Module
//!
//! Structure:
//! - `domain/` - Entities and repository traits
//! - `application/` - Register/login use cases and configuration
//! - `infra/` - PostgreSQL repository
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - Registration with transactional username/email uniqueness
//! - Login with uniform invalid-credential responses (no user enumeration)
//! - Per-IP fixed-window rate limits on both flows
//! - Optional break-glass operator credential for store outages
//!   (disabled by default, audit-logged on use)
//!
//! ## Security Model
//! - Passwords hashed with Argon2id, never returned or logged
//! - Usernames/emails sanitized before storage
//! - Break-glass comparison is constant-time on both fields

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use application::config::{AuthConfig, BreakGlassCredentials};
pub use error::{AuthError, AuthResult};
pub use infra::postgres::PgAuthRepository;
pub use presentation::router::auth_router;
