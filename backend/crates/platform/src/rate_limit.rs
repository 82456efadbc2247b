//! Rate Limiting Infrastructure
//!
//! Fixed-window rate limiting: requests are counted in discrete,
//! non-overlapping intervals and the counter resets at each boundary.
//! Keys combine an action name with a client identity
//! (e.g. `"login:203.0.113.7"`).

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::clock::{Clock, SystemClock};

/// Rate limit configuration
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Maximum requests allowed in the window
    pub max_requests: u32,
    /// Time window duration
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 10,
            window: Duration::from_secs(60),
        }
    }
}

impl RateLimitConfig {
    pub fn new(max_requests: u32, window_secs: u64) -> Self {
        Self {
            max_requests,
            window: Duration::from_secs(window_secs),
        }
    }

    pub fn window_ms(&self) -> i64 {
        self.window.as_millis() as i64
    }
}

/// Rate limit check result
#[derive(Debug, Clone)]
pub struct RateLimitResult {
    pub allowed: bool,
    pub remaining: u32,
    pub reset_at_ms: i64,
}

/// Trait for rate limit storage backends
#[trait_variant::make(RateLimitStore: Send)]
pub trait LocalRateLimitStore {
    /// Check the counter for `key` and, if the limit is not yet reached,
    /// consume one unit of quota.
    async fn check(&self, key: &str, config: &RateLimitConfig) -> RateLimitResult;
}

/// Per-key window state
#[derive(Debug, Clone)]
struct WindowRecord {
    count: u32,
    reset_at_ms: i64,
}

/// In-memory fixed-window store.
///
/// One instance is shared process-wide and injected into every handler
/// context; the map is guarded by a mutex that is never held across an
/// await. Call [`MemoryRateLimitStore::sweep`] periodically to drop
/// expired windows, otherwise the map grows with distinct keys.
///
/// Algorithm, per call: normalize the record for the current window
/// (reset when `now >= reset_at`), then reject without incrementing when
/// the count has reached the limit, otherwise increment and accept. A key
/// therefore gets at most `max_requests` accepted calls per window, and a
/// call landing exactly on the boundary opens a fresh window.
pub struct MemoryRateLimitStore {
    entries: Mutex<HashMap<String, WindowRecord>>,
    clock: Arc<dyn Clock>,
}

impl MemoryRateLimitStore {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            clock,
        }
    }

    /// Remove records whose window has expired. Returns how many were
    /// dropped.
    pub fn sweep(&self) -> usize {
        let now_ms = self.clock.now_ms();
        let mut entries = self.entries.lock().expect("rate limit map poisoned");
        let before = entries.len();
        entries.retain(|_, record| now_ms < record.reset_at_ms);
        before - entries.len()
    }

    /// Number of tracked keys (for observability).
    pub fn len(&self) -> usize {
        self.entries.lock().expect("rate limit map poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check_sync(&self, key: &str, config: &RateLimitConfig) -> RateLimitResult {
        let now_ms = self.clock.now_ms();
        let mut entries = self.entries.lock().expect("rate limit map poisoned");

        let record = entries.entry(key.to_string()).or_insert(WindowRecord {
            count: 0,
            reset_at_ms: now_ms + config.window_ms(),
        });

        // Expired window: start fresh before evaluating the limit.
        if now_ms >= record.reset_at_ms {
            record.count = 0;
            record.reset_at_ms = now_ms + config.window_ms();
        }

        if record.count >= config.max_requests {
            tracing::warn!(key = %key, max = config.max_requests, "Rate limit exceeded");
            return RateLimitResult {
                allowed: false,
                remaining: 0,
                reset_at_ms: record.reset_at_ms,
            };
        }

        record.count += 1;
        RateLimitResult {
            allowed: true,
            remaining: config.max_requests - record.count,
            reset_at_ms: record.reset_at_ms,
        }
    }
}

impl Default for MemoryRateLimitStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RateLimitStore for MemoryRateLimitStore {
    async fn check(&self, key: &str, config: &RateLimitConfig) -> RateLimitResult {
        self.check_sync(key, config)
    }
}
