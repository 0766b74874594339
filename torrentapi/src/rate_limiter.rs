//! Minimum-interval gate shared by every outbound request.
//!
//! The endpoint allows roughly one request every two seconds. Token requests
//! and data requests go through the same gate, so a call that has to renew
//! its token can take up to twice the interval.

use std::time::Duration;

use tokio::time::{sleep, Instant};

/// Default spacing between two requests.
pub const DEFAULT_MIN_INTERVAL: Duration = Duration::from_millis(2100);

/// Tracks when the last request finished and delays the next one until
/// `min_interval` has passed.
#[derive(Debug)]
pub struct RateLimiter {
    min_interval: Duration,
    last_request: Option<Instant>,
}

impl RateLimiter {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_request: None,
        }
    }

    /// Time left before the next request may be sent, as seen from `now`.
    pub fn remaining(&self, now: Instant) -> Duration {
        match self.last_request {
            Some(last) => (last + self.min_interval).saturating_duration_since(now),
            None => Duration::ZERO,
        }
    }

    /// Sleeps once for whatever is left of the interval.
    pub async fn wait(&self) {
        let wait = self.remaining(Instant::now());
        if !wait.is_zero() {
            tracing::debug!("Rate limit: waiting {:.2}s", wait.as_secs_f64());
            sleep(wait).await;
        }
    }

    /// Marks a request as finished. Called whether the request succeeded or not.
    pub fn record(&mut self) {
        let now = Instant::now();
        self.last_request = Some(match self.last_request {
            Some(last) if last > now => last,
            _ => now,
        });
    }

    /// Marks a request as sent. The returned guard records it when dropped,
    /// including when the caller's future is cancelled mid-request.
    pub(crate) fn in_flight(&mut self) -> InFlight<'_> {
        InFlight(self)
    }

    pub fn last_request(&self) -> Option<Instant> {
        self.last_request
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }
}

/// Outstanding request; records it on the limiter when dropped.
pub(crate) struct InFlight<'a>(&'a mut RateLimiter);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.record();
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_INTERVAL)
    }
}
