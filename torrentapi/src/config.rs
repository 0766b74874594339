//! Client configuration: endpoint, identity, token lifetime and pacing.

use std::time::Duration;

use crate::rate_limiter::DEFAULT_MIN_INTERVAL;
use crate::token::DEFAULT_TOKEN_TTL;

/// Production endpoint.
pub const DEFAULT_BASE_URL: &str = "https://torrentapi.org/pubapi_v2.php";

/// Application identifier sent as `app_id` and in the `User-Agent`.
pub const DEFAULT_APP_ID: &str = "torrentapi-rs";

/// Total request timeout.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(90);

/// Connection establishment timeout.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Settings for [`Client`](crate::Client). Immutable once the client is built.
#[derive(Clone, Debug)]
pub struct Config {
    pub base_url: String,
    pub app_id: String,
    /// Age at which a cached token is renewed.
    pub token_ttl: Duration,
    /// Minimum spacing between two outbound requests.
    pub min_interval: Duration,
    pub timeout: Duration,
    pub connect_timeout: Duration,
    /// Extra regular expressions for "no results" error messages.
    pub no_results_patterns: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            app_id: DEFAULT_APP_ID.to_string(),
            token_ttl: DEFAULT_TOKEN_TTL,
            min_interval: DEFAULT_MIN_INTERVAL,
            timeout: REQUEST_TIMEOUT,
            connect_timeout: CONNECT_TIMEOUT,
            no_results_patterns: Vec::new(),
        }
    }
}

impl Config {
    /// Defaults overridden by `TORRENTAPI_*` environment variables.
    ///
    /// | Variable | Field |
    /// |---|---|
    /// | `TORRENTAPI_BASE_URL` | `base_url` |
    /// | `TORRENTAPI_APP_ID` | `app_id` |
    /// | `TORRENTAPI_TOKEN_TTL_SECS` | `token_ttl` |
    /// | `TORRENTAPI_MIN_INTERVAL_MS` | `min_interval` |
    /// | `TORRENTAPI_TIMEOUT_SECS` | `timeout` |
    ///
    /// Unparsable numbers keep the default.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let secs = |name: &str, default: Duration| {
            lookup(name)
                .and_then(|v| v.trim().parse::<u64>().ok())
                .map(Duration::from_secs)
                .unwrap_or(default)
        };
        Self {
            base_url: lookup("TORRENTAPI_BASE_URL").unwrap_or(defaults.base_url),
            app_id: lookup("TORRENTAPI_APP_ID").unwrap_or(defaults.app_id),
            token_ttl: secs("TORRENTAPI_TOKEN_TTL_SECS", defaults.token_ttl),
            min_interval: lookup("TORRENTAPI_MIN_INTERVAL_MS")
                .and_then(|v| v.trim().parse::<u64>().ok())
                .map(Duration::from_millis)
                .unwrap_or(defaults.min_interval),
            timeout: secs("TORRENTAPI_TIMEOUT_SECS", defaults.timeout),
            connect_timeout: defaults.connect_timeout,
            no_results_patterns: defaults.no_results_patterns,
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.to_string();
        self
    }

    pub fn with_app_id(mut self, app_id: &str) -> Self {
        self.app_id = app_id.to_string();
        self
    }

    pub fn with_token_ttl(mut self, token_ttl: Duration) -> Self {
        self.token_ttl = token_ttl;
        self
    }

    /// Shorten this in tests; the endpoint itself expects about two seconds.
    pub fn with_min_interval(mut self, min_interval: Duration) -> Self {
        self.min_interval = min_interval;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_connect_timeout(mut self, connect_timeout: Duration) -> Self {
        self.connect_timeout = connect_timeout;
        self
    }

    /// Adds a regular expression matching an error message that should be
    /// read as an empty result set.
    pub fn with_no_results_pattern(mut self, pattern: &str) -> Self {
        self.no_results_patterns.push(pattern.to_string());
        self
    }
}
