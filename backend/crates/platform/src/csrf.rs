//! CSRF Token Management
//!
//! Issues opaque random tokens that state-mutating routes must echo back
//! in the `X-CSRF-Token` header. Tokens are valid until their TTL elapses
//! or the process restarts; they are not single-use and not bound to a
//! session (the broader protection relies on same-origin checks).

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::clock::{Clock, SystemClock};
use crate::crypto::{random_bytes, to_base64url};

/// Token entropy in bytes (256 bits)
pub const TOKEN_BYTES: usize = 32;

/// Default token lifetime: one hour
pub const DEFAULT_TTL: Duration = Duration::from_millis(3_600_000);

/// Process-wide CSRF token validity set.
///
/// One instance is shared between the issuing endpoint and the validating
/// middleware. Expiry is an `expires_at` timestamp checked on validation;
/// [`CsrfTokenStore::sweep`] reclaims expired entries so the set stays
/// bounded.
pub struct CsrfTokenStore {
    tokens: Mutex<HashMap<String, i64>>,
    ttl_ms: i64,
    clock: Arc<dyn Clock>,
}

impl CsrfTokenStore {
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_TTL)
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self::with_clock(ttl, Arc::new(SystemClock))
    }

    pub fn with_clock(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            tokens: Mutex::new(HashMap::new()),
            ttl_ms: ttl.as_millis() as i64,
            clock,
        }
    }

    /// Issue a fresh token and register it as valid for the TTL.
    pub fn issue(&self) -> String {
        let token = to_base64url(&random_bytes(TOKEN_BYTES));
        let expires_at_ms = self.clock.now_ms() + self.ttl_ms;

        self.tokens
            .lock()
            .expect("csrf token set poisoned")
            .insert(token.clone(), expires_at_ms);

        tracing::debug!("Issued CSRF token");
        token
    }

    /// True iff the token is registered and unexpired. Never mutates the
    /// set; tokens stay valid for repeated requests until expiry.
    pub fn validate(&self, token: &str) -> bool {
        let now_ms = self.clock.now_ms();
        self.tokens
            .lock()
            .expect("csrf token set poisoned")
            .get(token)
            .is_some_and(|&expires_at_ms| now_ms < expires_at_ms)
    }

    /// Remove expired tokens. Returns how many were dropped.
    pub fn sweep(&self) -> usize {
        let now_ms = self.clock.now_ms();
        let mut tokens = self.tokens.lock().expect("csrf token set poisoned");
        let before = tokens.len();
        tokens.retain(|_, &mut expires_at_ms| now_ms < expires_at_ms);
        before - tokens.len()
    }

    /// Number of outstanding tokens (for observability).
    pub fn len(&self) -> usize {
        self.tokens.lock().expect("csrf token set poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for CsrfTokenStore {
    fn default() -> Self {
        Self::new()
    }
}
