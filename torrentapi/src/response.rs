//! Turns a decoded response body into results or an error.

use regex::Regex;

use crate::types::{ApiResponse, Torrent};
use crate::Error;

/// Error messages the endpoint uses to say "nothing matched".
///
/// The endpoint does not document these strings, so the set can be extended
/// through [`Config::with_no_results_pattern`](crate::Config::with_no_results_pattern).
pub const DEFAULT_NO_RESULTS_PATTERNS: [&str; 2] = [
    r"(?i)^\s*no results found\s*$",
    r"(?i)can'?t find .+ in database",
];

/// Classifies `error` messages that mean an empty result set.
#[derive(Clone, Debug)]
pub struct NoResultsMatcher {
    patterns: Vec<Regex>,
}

impl NoResultsMatcher {
    /// The default patterns plus `extra`, each a regular expression.
    pub fn new<S: AsRef<str>>(extra: &[S]) -> Result<Self, Error> {
        let mut matcher = Self::default();
        for pattern in extra {
            matcher.add_pattern(pattern.as_ref())?;
        }
        Ok(matcher)
    }

    pub fn add_pattern(&mut self, pattern: &str) -> Result<(), Error> {
        let re = Regex::new(pattern).map_err(|e| {
            Error::Config(format!("invalid no-results pattern '{}': {}", pattern, e))
        })?;
        self.patterns.push(re);
        Ok(())
    }

    pub fn is_no_results(&self, message: &str) -> bool {
        self.patterns.iter().any(|re| re.is_match(message))
    }

    /// Maps a response envelope to its torrents.
    ///
    /// A "no results" error yields an empty list, any other error becomes
    /// [`Error::Api`], and a missing `torrent_results` is treated as empty.
    pub fn interpret(&self, response: ApiResponse) -> Result<Vec<Torrent>, Error> {
        match response.error {
            Some(message) if self.is_no_results(&message) => {
                tracing::debug!("No results: {}", message);
                Ok(Vec::new())
            }
            Some(message) => Err(Error::Api {
                message,
                code: response.error_code,
            }),
            None => Ok(response.torrent_results.unwrap_or_default()),
        }
    }
}

impl Default for NoResultsMatcher {
    fn default() -> Self {
        let patterns = DEFAULT_NO_RESULTS_PATTERNS
            .iter()
            .map(|p| Regex::new(p).expect("default no-results pattern is valid"))
            .collect();
        Self { patterns }
    }
}
