//! Cached API token and its expiry check.

use std::time::Duration;

use tokio::time::Instant;

/// How long a token stays valid after it was issued.
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(800);

/// A token together with the monotonic instant it was obtained.
#[derive(Clone, Debug)]
pub(crate) struct Token {
    value: String,
    obtained_at: Instant,
}

impl Token {
    /// Stamps `value` with the current monotonic time.
    pub(crate) fn new(value: String) -> Self {
        Self {
            value,
            obtained_at: Instant::now(),
        }
    }

    pub(crate) fn value(&self) -> &str {
        &self.value
    }

    pub(crate) fn obtained_at(&self) -> Instant {
        self.obtained_at
    }

    /// A token is stale once `ttl` has fully elapsed.
    pub(crate) fn is_expired(&self, ttl: Duration) -> bool {
        self.obtained_at.elapsed() >= ttl
    }
}
