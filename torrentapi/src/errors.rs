//! Error types for the API client.

/// Errors that can occur when making API requests.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The caller passed parameters the endpoint cannot accept. Raised before
    /// any network activity.
    #[error("{0}")]
    InvalidInput(String),
    /// The endpoint answered with a non-success HTTP status.
    #[error("{reason} ({status})")]
    Request { status: u16, reason: String },
    /// The endpoint answered successfully but the body carried an `error` field.
    #[error("{message}")]
    Api { message: String, code: Option<i64> },
    /// Connection, timeout or body read failure from the HTTP layer.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
    /// A successful response whose body was not the expected JSON.
    #[error("Failed to parse response: {0}")]
    ParseFailed(String),
    /// The client could not be built from the supplied configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl Error {
    /// True for failures of the underlying connection rather than of the API.
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport(_))
    }

    /// True when the HTTP layer gave up waiting for the endpoint.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Transport(e) if e.is_timeout())
    }

    pub(crate) fn invalid_input(msg: impl Into<String>) -> Self {
        Error::InvalidInput(msg.into())
    }
}
