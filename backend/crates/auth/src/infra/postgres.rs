//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::error::conversions::unique_violation;
use sqlx::PgPool;

use crate::domain::entities::{NewUser, StoredCredentials, User};
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};

/// PostgreSQL-backed user repository
#[derive(Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl UserRepository for PgAuthRepository {
    async fn create_user(&self, user: &NewUser) -> AuthResult<User> {
        let mut tx = self.pool.begin().await?;

        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM users
                WHERE username = $1
                   OR ($2::text IS NOT NULL AND email = $2)
            )
            "#,
        )
        .bind(&user.username)
        .bind(&user.email)
        .fetch_one(&mut *tx)
        .await?;

        if exists {
            tx.rollback().await?;
            return Err(AuthError::DuplicateUser);
        }

        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (username, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, username, email, profile_photo, created_at
            "#,
        )
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            // A racing insert can slip past the SELECT; the unique index
            // still reports it as a duplicate, not a store failure.
            if unique_violation(&e) {
                AuthError::DuplicateUser
            } else {
                AuthError::from(e)
            }
        })?;

        tx.commit().await?;

        tracing::info!(username = %row.username, "User row created");

        Ok(row.into_user())
    }

    async fn find_credentials(&self, username: &str) -> AuthResult<Option<StoredCredentials>> {
        let row = sqlx::query_as::<_, CredentialsRow>(
            r#"
            SELECT username, password_hash, profile_photo
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_credentials()))
    }
}

// Internal row types for sqlx mapping

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    username: String,
    email: Option<String>,
    profile_photo: Option<String>,
    created_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> User {
        User {
            id: self.id,
            username: self.username,
            email: self.email,
            profile_photo: self.profile_photo,
            created_at: self.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct CredentialsRow {
    username: String,
    password_hash: String,
    profile_photo: Option<String>,
}

impl CredentialsRow {
    fn into_credentials(self) -> StoredCredentials {
        StoredCredentials {
            username: self.username,
            password_hash: self.password_hash,
            profile_photo: self.profile_photo,
        }
    }
}
