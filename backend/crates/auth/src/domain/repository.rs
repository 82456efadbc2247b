//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use crate::domain::entities::{NewUser, StoredCredentials, User};
use crate::error::AuthResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Insert a new user.
    ///
    /// The uniqueness check (same username, or same non-null email) and
    /// the insert run inside one transaction; a duplicate yields
    /// `AuthError::DuplicateUser` and rolls back.
    async fn create_user(&self, user: &NewUser) -> AuthResult<User>;

    /// Fetch the stored credentials for a username.
    ///
    /// `Ok(None)` means the user does not exist; `Err` is reserved for
    /// store failures (the distinction drives the break-glass path).
    async fn find_credentials(&self, username: &str) -> AuthResult<Option<StoredCredentials>>;
}
