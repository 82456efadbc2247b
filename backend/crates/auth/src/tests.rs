//! Unit tests for the auth crate
//!
//! Use cases are exercised against an in-memory repository; the store's
//! "offline" switch simulates a connection-level outage for the
//! break-glass paths.

use std::net::IpAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use platform::rate_limit::MemoryRateLimitStore;

use crate::application::config::{AuthConfig, BreakGlassCredentials};
use crate::application::{LoginInput, LoginUseCase, RegisterInput, RegisterUseCase};
use crate::domain::entities::{NewUser, StoredCredentials, User};
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};

// ============================================================================
// In-memory repository
// ============================================================================

#[derive(Default)]
struct MemUserRepository {
    users: Mutex<Vec<StoredCredentials>>,
    emails: Mutex<Vec<String>>,
    offline: AtomicBool,
}

impl MemUserRepository {
    fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn outage_error() -> AuthError {
        AuthError::Database(sqlx::Error::PoolTimedOut)
    }
}

impl UserRepository for MemUserRepository {
    async fn create_user(&self, user: &NewUser) -> AuthResult<User> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(MemUserRepository::outage_error());
        }

        let mut users = self.users.lock().unwrap();
        let mut emails = self.emails.lock().unwrap();

        let email_taken = user
            .email
            .as_ref()
            .is_some_and(|e| emails.iter().any(|stored| stored == e));
        if users.iter().any(|u| u.username == user.username) || email_taken {
            return Err(AuthError::DuplicateUser);
        }

        users.push(StoredCredentials {
            username: user.username.clone(),
            password_hash: user.password_hash.clone(),
            profile_photo: None,
        });
        if let Some(email) = &user.email {
            emails.push(email.clone());
        }

        Ok(User {
            id: users.len() as i64,
            username: user.username.clone(),
            email: user.email.clone(),
            profile_photo: None,
            created_at: chrono::Utc::now(),
        })
    }

    async fn find_credentials(&self, username: &str) -> AuthResult<Option<StoredCredentials>> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(MemUserRepository::outage_error());
        }

        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn test_ip() -> Option<IpAddr> {
    Some("198.51.100.5".parse().unwrap())
}

fn register_use_case(
    repo: &Arc<MemUserRepository>,
    limiter: &Arc<MemoryRateLimitStore>,
    config: &Arc<AuthConfig>,
) -> RegisterUseCase<MemUserRepository, MemoryRateLimitStore> {
    RegisterUseCase::new(repo.clone(), limiter.clone(), config.clone())
}

fn login_use_case(
    repo: &Arc<MemUserRepository>,
    limiter: &Arc<MemoryRateLimitStore>,
    config: &Arc<AuthConfig>,
) -> LoginUseCase<MemUserRepository, MemoryRateLimitStore> {
    LoginUseCase::new(repo.clone(), limiter.clone(), config.clone())
}

fn register_input(username: &str, password: &str, email: Option<&str>) -> RegisterInput {
    RegisterInput {
        username: Some(username.to_string()),
        password: Some(password.to_string()),
        email: email.map(|e| e.to_string()),
        client_ip: test_ip(),
    }
}

fn login_input(username: &str, password: &str) -> LoginInput {
    LoginInput {
        username: Some(username.to_string()),
        password: Some(password.to_string()),
        client_ip: test_ip(),
    }
}

async fn seed_user(repo: &Arc<MemUserRepository>, username: &str, password: &str) {
    let limiter = Arc::new(MemoryRateLimitStore::new());
    let config = Arc::new(AuthConfig::default());
    register_use_case(repo, &limiter, &config)
        .execute(register_input(username, password, None))
        .await
        .expect("seed user");
}

// ============================================================================
// Register
// ============================================================================

mod register {
    use super::*;

    #[tokio::test]
    async fn test_register_success() {
        let repo = Arc::new(MemUserRepository::default());
        let limiter = Arc::new(MemoryRateLimitStore::new());
        let config = Arc::new(AuthConfig::default());

        let output = register_use_case(&repo, &limiter, &config)
            .execute(register_input("alice", "secret1", Some("a@x.com")))
            .await
            .unwrap();

        assert_eq!(output.username, "alice");
    }

    #[tokio::test]
    async fn test_register_sanitizes_username() {
        let repo = Arc::new(MemUserRepository::default());
        let limiter = Arc::new(MemoryRateLimitStore::new());
        let config = Arc::new(AuthConfig::default());

        let output = register_use_case(&repo, &limiter, &config)
            .execute(register_input("  <alice>  ", "secret1", None))
            .await
            .unwrap();

        // Angle brackets stripped, whitespace trimmed, before storage.
        assert_eq!(output.username, "alice");
        assert!(
            repo.find_credentials("alice").await.unwrap().is_some(),
            "sanitized name should be the stored name"
        );
    }

    #[tokio::test]
    async fn test_register_short_username_rejected() {
        let repo = Arc::new(MemUserRepository::default());
        let limiter = Arc::new(MemoryRateLimitStore::new());
        let config = Arc::new(AuthConfig::default());

        let err = register_use_case(&repo, &limiter, &config)
            .execute(register_input("ab", "secret1", None))
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::Validation(_)));
        assert_eq!(err.kind().status_code(), 400);
    }

    #[tokio::test]
    async fn test_register_missing_username_rejected() {
        let repo = Arc::new(MemUserRepository::default());
        let limiter = Arc::new(MemoryRateLimitStore::new());
        let config = Arc::new(AuthConfig::default());

        let use_case = register_use_case(&repo, &limiter, &config);
        let err = use_case
            .execute(RegisterInput {
                username: None,
                password: Some("secret1".to_string()),
                email: None,
                client_ip: test_ip(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::Validation(_)));
    }

    #[tokio::test]
    async fn test_register_short_password_rejected() {
        let repo = Arc::new(MemUserRepository::default());
        let limiter = Arc::new(MemoryRateLimitStore::new());
        let config = Arc::new(AuthConfig::default());

        let err = register_use_case(&repo, &limiter, &config)
            .execute(register_input("alice", "12345", None))
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::Validation(_)));
        assert_eq!(err.kind().status_code(), 400);
    }

    #[tokio::test]
    async fn test_register_twice_conflicts() {
        let repo = Arc::new(MemUserRepository::default());
        let limiter = Arc::new(MemoryRateLimitStore::new());
        let config = Arc::new(AuthConfig::default());
        let use_case = register_use_case(&repo, &limiter, &config);

        let input = register_input("alice", "secret1", Some("a@x.com"));
        use_case.execute(input).await.unwrap();

        let err = use_case
            .execute(register_input("alice", "secret1", Some("a@x.com")))
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::DuplicateUser));
        assert_eq!(err.kind().status_code(), 409);
    }

    #[tokio::test]
    async fn test_register_duplicate_email_conflicts() {
        let repo = Arc::new(MemUserRepository::default());
        let limiter = Arc::new(MemoryRateLimitStore::new());
        let config = Arc::new(AuthConfig::default());
        let use_case = register_use_case(&repo, &limiter, &config);

        use_case
            .execute(register_input("alice", "secret1", Some("a@x.com")))
            .await
            .unwrap();

        let err = use_case
            .execute(register_input("bob", "secret1", Some("a@x.com")))
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::DuplicateUser));
    }

    #[tokio::test]
    async fn test_register_store_error_is_503() {
        let repo = Arc::new(MemUserRepository::default());
        let limiter = Arc::new(MemoryRateLimitStore::new());
        let config = Arc::new(AuthConfig::default());
        repo.set_offline(true);

        let err = register_use_case(&repo, &limiter, &config)
            .execute(register_input("alice", "secret1", None))
            .await
            .unwrap_err();

        assert_eq!(err.kind().status_code(), 503);
    }

    #[tokio::test]
    async fn test_register_rate_limit_counts_invalid_payloads() {
        // Six attempts from one IP within the window: the first five get
        // their validation outcome, the sixth is rate limited no matter
        // what the payload looks like.
        let repo = Arc::new(MemUserRepository::default());
        let limiter = Arc::new(MemoryRateLimitStore::new());
        let config = Arc::new(AuthConfig::default());
        let use_case = register_use_case(&repo, &limiter, &config);

        for _ in 0..5 {
            let err = use_case
                .execute(register_input("x", "short", None))
                .await
                .unwrap_err();
            assert!(matches!(err, AuthError::Validation(_)));
        }

        let err = use_case
            .execute(register_input("valid_name", "long enough", None))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::RateLimited));
        assert_eq!(err.kind().status_code(), 429);
    }

    #[tokio::test]
    async fn test_register_rate_limit_is_per_ip() {
        let repo = Arc::new(MemUserRepository::default());
        let limiter = Arc::new(MemoryRateLimitStore::new());
        let config = Arc::new(AuthConfig::default());
        let use_case = register_use_case(&repo, &limiter, &config);

        for i in 0..5 {
            use_case
                .execute(register_input(&format!("user_{i}"), "secret1", None))
                .await
                .unwrap();
        }

        // Same window, different IP: unaffected.
        let other_ip = RegisterInput {
            username: Some("other_user".to_string()),
            password: Some("secret1".to_string()),
            email: None,
            client_ip: Some("203.0.113.99".parse().unwrap()),
        };
        assert!(use_case.execute(other_ip).await.is_ok());
    }
}

// ============================================================================
// Login
// ============================================================================

mod login {
    use super::*;

    #[tokio::test]
    async fn test_login_success() {
        let repo = Arc::new(MemUserRepository::default());
        seed_user(&repo, "alice", "secret1").await;

        let limiter = Arc::new(MemoryRateLimitStore::new());
        let config = Arc::new(AuthConfig::default());

        let output = login_use_case(&repo, &limiter, &config)
            .execute(login_input("alice", "secret1"))
            .await
            .unwrap();

        assert_eq!(output.username, "alice");
        assert!(output.profile_photo.is_none());
    }

    #[tokio::test]
    async fn test_login_returns_profile_photo() {
        let repo = Arc::new(MemUserRepository::default());
        seed_user(&repo, "alice", "secret1").await;
        repo.users.lock().unwrap()[0].profile_photo = Some("avatars/alice.png".to_string());

        let limiter = Arc::new(MemoryRateLimitStore::new());
        let config = Arc::new(AuthConfig::default());

        let output = login_use_case(&repo, &limiter, &config)
            .execute(login_input("alice", "secret1"))
            .await
            .unwrap();

        assert_eq!(output.profile_photo.as_deref(), Some("avatars/alice.png"));
    }

    #[tokio::test]
    async fn test_login_missing_fields_rejected() {
        let repo = Arc::new(MemUserRepository::default());
        let limiter = Arc::new(MemoryRateLimitStore::new());
        let config = Arc::new(AuthConfig::default());
        let use_case = login_use_case(&repo, &limiter, &config);

        let err = use_case
            .execute(LoginInput {
                username: Some("alice".to_string()),
                password: None,
                client_ip: test_ip(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::Validation(_)));
        assert_eq!(err.kind().status_code(), 400);
    }

    #[tokio::test]
    async fn test_login_uniform_failure() {
        // Unknown user and wrong password must be indistinguishable:
        // same variant, same status, same client-facing message.
        let repo = Arc::new(MemUserRepository::default());
        seed_user(&repo, "realuser", "secret1").await;

        let limiter = Arc::new(MemoryRateLimitStore::new());
        let config = Arc::new(AuthConfig::default());
        let use_case = login_use_case(&repo, &limiter, &config);

        let ghost = use_case
            .execute(login_input("ghost", "x_anything"))
            .await
            .unwrap_err();
        let wrong_pass = use_case
            .execute(login_input("realuser", "wrongpass"))
            .await
            .unwrap_err();

        assert!(matches!(ghost, AuthError::InvalidCredentials));
        assert!(matches!(wrong_pass, AuthError::InvalidCredentials));
        assert_eq!(ghost.kind().status_code(), 401);
        assert_eq!(wrong_pass.kind().status_code(), 401);
        assert_eq!(ghost.to_string(), wrong_pass.to_string());
    }

    #[tokio::test]
    async fn test_login_rate_limit() {
        let repo = Arc::new(MemUserRepository::default());
        seed_user(&repo, "alice", "secret1").await;

        let limiter = Arc::new(MemoryRateLimitStore::new());
        let config = Arc::new(AuthConfig::default());
        let use_case = login_use_case(&repo, &limiter, &config);

        for _ in 0..10 {
            let _ = use_case.execute(login_input("alice", "wrongpass")).await;
        }

        let err = use_case
            .execute(login_input("alice", "secret1"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::RateLimited));
    }
}

// ============================================================================
// Break-glass fallback
// ============================================================================

mod break_glass {
    use super::*;

    fn break_glass_config() -> Arc<AuthConfig> {
        Arc::new(AuthConfig {
            break_glass: Some(BreakGlassCredentials {
                username: "ops_admin".to_string(),
                password: "glass-hammer-9".to_string(),
            }),
            ..AuthConfig::default()
        })
    }

    #[tokio::test]
    async fn test_fallback_success_has_no_photo() {
        let repo = Arc::new(MemUserRepository::default());
        repo.set_offline(true);

        let limiter = Arc::new(MemoryRateLimitStore::new());
        let config = break_glass_config();

        let output = login_use_case(&repo, &limiter, &config)
            .execute(login_input("ops_admin", "glass-hammer-9"))
            .await
            .unwrap();

        assert_eq!(output.username, "ops_admin");
        assert!(output.profile_photo.is_none());
    }

    #[tokio::test]
    async fn test_fallback_wrong_credentials_is_503() {
        let repo = Arc::new(MemUserRepository::default());
        repo.set_offline(true);

        let limiter = Arc::new(MemoryRateLimitStore::new());
        let config = break_glass_config();
        let use_case = login_use_case(&repo, &limiter, &config);

        let err = use_case
            .execute(login_input("ops_admin", "not-the-password"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::StoreUnavailable));
        assert_eq!(err.kind().status_code(), 503);

        let err = use_case
            .execute(login_input("not-the-user", "glass-hammer-9"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::StoreUnavailable));
    }

    #[tokio::test]
    async fn test_fallback_disabled_by_default() {
        let repo = Arc::new(MemUserRepository::default());
        repo.set_offline(true);

        let limiter = Arc::new(MemoryRateLimitStore::new());
        let config = Arc::new(AuthConfig::default());

        let err = login_use_case(&repo, &limiter, &config)
            .execute(login_input("ops_admin", "glass-hammer-9"))
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::StoreUnavailable));
    }

    #[tokio::test]
    async fn test_fallback_not_used_when_store_is_up() {
        // With the store reachable, the operator pair is not a real
        // account and must fail like any other unknown user.
        let repo = Arc::new(MemUserRepository::default());
        let limiter = Arc::new(MemoryRateLimitStore::new());
        let config = break_glass_config();

        let err = login_use_case(&repo, &limiter, &config)
            .execute(login_input("ops_admin", "glass-hammer-9"))
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::InvalidCredentials));
    }
}
