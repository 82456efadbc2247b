//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Clock abstraction (injectable time source for stores and tests)
//! - Cryptographic utilities (CSPRNG, Base64, constant-time comparison)
//! - Password hashing (Argon2id, PHC string format)
//! - Input sanitization (metacharacter stripping, HTML escaping)
//! - Fixed-window rate limiting
//! - CSRF token issuance and validation
//! - Client identification (IP extraction)

pub mod clock;
pub mod client;
pub mod crypto;
pub mod csrf;
pub mod password;
pub mod rate_limit;
pub mod sanitize;
