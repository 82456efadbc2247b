//! Auth Domain Entities

use chrono::{DateTime, Utc};

/// A registered user as stored in the `users` table.
///
/// The password hash lives in [`StoredCredentials`] and is deliberately
/// absent here so it cannot leak through response serialization.
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: Option<String>,
    pub profile_photo: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Data for inserting a new user. Username and email are already
/// sanitized by the register use case; the password is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: Option<String>,
    pub password_hash: String,
}

/// The columns login needs: the stored hash for verification, plus the
/// profile photo returned on success.
#[derive(Debug, Clone)]
pub struct StoredCredentials {
    pub username: String,
    pub password_hash: String,
    pub profile_photo: Option<String>,
}
