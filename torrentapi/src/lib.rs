//! Client for the torrentapi.org torrent index.
//!
//! [`Client`] lists and searches torrents, keeping the short-lived API token
//! fresh and spacing requests to respect the endpoint's rate limit.

mod client;
mod config;
mod errors;
mod query;
mod rate_limiter;
mod response;
mod token;
pub mod types;
mod user_agent;
pub use self::client::Client;
pub use self::config::{Config, CONNECT_TIMEOUT, DEFAULT_APP_ID, DEFAULT_BASE_URL, REQUEST_TIMEOUT};
pub use self::errors::Error;
pub use self::query::{Format, ListQuery, Mode, Params, Query, QueryCommon, SearchQuery, Sort};
pub use self::rate_limiter::{RateLimiter, DEFAULT_MIN_INTERVAL};
pub use self::response::{NoResultsMatcher, DEFAULT_NO_RESULTS_PATTERNS};
pub use self::token::DEFAULT_TOKEN_TTL;
pub use self::types::Torrent;
