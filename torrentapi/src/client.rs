//! HTTP client for the torrentapi.org JSON endpoint.

use std::time::Duration;

use hyper::ext::ReasonPhrase;
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;
use tokio::time::Instant;
use url::Url;

use crate::{
    config::Config,
    query::{ListQuery, Params, Query, SearchQuery},
    rate_limiter::RateLimiter,
    response::NoResultsMatcher,
    token::Token,
    types::{ApiResponse, TokenResponse, Torrent},
    user_agent::get_user_agent,
    Error,
};

/// Client for the torrent index API.
///
/// Holds the cached token and the rate limiter. Every outbound request, token
/// renewals included, waits for the configured minimum interval after the
/// previous one. Token check, wait, dispatch and bookkeeping run under a
/// single lock, so a `Client` can be shared between tasks.
///
/// ```no_run
/// # async fn run() -> Result<(), torrentapi::Error> {
/// use torrentapi::{Client, ListQuery, Query};
///
/// let client = Client::new()?;
/// let torrents = client
///     .list(&ListQuery::default().with_limit(100).with_category(44))
///     .await?;
/// # Ok(())
/// # }
/// ```
pub struct Client {
    http: reqwest::Client,
    base_url: Url,
    app_id: String,
    token_ttl: Duration,
    no_results: NoResultsMatcher,
    state: Mutex<State>,
}

/// Mutable client state, always accessed under the client lock.
struct State {
    token: Option<Token>,
    limiter: RateLimiter,
}

impl Client {
    /// Creates a client for the production endpoint with default settings.
    pub fn new() -> Result<Self, Error> {
        Self::from_config(Config::default())
    }

    /// Creates a client with a custom endpoint URL. Used for testing with wiremock.
    pub fn with_base_url(base_url: &str) -> Result<Self, Error> {
        Self::from_config(Config::default().with_base_url(base_url))
    }

    pub fn from_config(config: Config) -> Result<Self, Error> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            Error::Config(format!("invalid base URL '{}': {}", config.base_url, e))
        })?;
        let http = reqwest::Client::builder()
            .user_agent(get_user_agent(&config.app_id))
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .gzip(true)
            .build()
            .map_err(|e| Error::Config(format!("failed to build HTTP client: {}", e)))?;
        let no_results = NoResultsMatcher::new(&config.no_results_patterns)?;

        Ok(Self {
            http,
            base_url,
            app_id: config.app_id,
            token_ttl: config.token_ttl,
            no_results,
            state: Mutex::new(State {
                token: None,
                limiter: RateLimiter::new(config.min_interval),
            }),
        })
    }

    /// Lists recent torrents matching the query's filters.
    ///
    /// Returns an empty list when the endpoint reports no results.
    pub async fn list(&self, query: &ListQuery) -> Result<Vec<Torrent>, Error> {
        self.fetch(query).await
    }

    /// Searches torrents by string or external id.
    ///
    /// Fails with [`Error::InvalidInput`] before any request is sent when the
    /// query has no search identifier.
    pub async fn search(&self, query: &SearchQuery) -> Result<Vec<Torrent>, Error> {
        self.fetch(query).await
    }

    /// Requests a new token regardless of the cached one's age.
    pub async fn force_token(&self) -> Result<String, Error> {
        let mut state = self.state.lock().await;
        self.acquire_token(&mut state).await
    }

    /// The cached token, if one was ever obtained. It may be stale.
    pub async fn token(&self) -> Option<String> {
        let state = self.state.lock().await;
        state.token.as_ref().map(|t| t.value().to_string())
    }

    /// Monotonic instant at which the cached token was obtained.
    pub async fn token_obtained_at(&self) -> Option<Instant> {
        let state = self.state.lock().await;
        state.token.as_ref().map(Token::obtained_at)
    }

    /// Monotonic instant at which the last request finished.
    pub async fn last_request_at(&self) -> Option<Instant> {
        self.state.lock().await.limiter.last_request()
    }

    async fn fetch<Q: Query>(&self, query: &Q) -> Result<Vec<Torrent>, Error> {
        let mut params = query.to_params()?;

        let mut state = self.state.lock().await;
        let token = self.valid_token(&mut state).await?;
        params.insert("mode", query.mode().to_string());
        params.insert("token", token);

        let response: ApiResponse = self.get(&mut state.limiter, &params).await?;
        self.no_results.interpret(response)
    }

    async fn valid_token(&self, state: &mut State) -> Result<String, Error> {
        if let Some(token) = &state.token {
            if !token.is_expired(self.token_ttl) {
                return Ok(token.value().to_string());
            }
            tracing::debug!("API token expired, renewing");
        }
        self.acquire_token(state).await
    }

    async fn acquire_token(&self, state: &mut State) -> Result<String, Error> {
        let params: Params = [("get_token", "get_token")].into_iter().collect();
        let response: TokenResponse = self.get(&mut state.limiter, &params).await?;

        if let Some(message) = response.error {
            return Err(Error::Api {
                message,
                code: response.error_code,
            });
        }
        let value = response
            .token
            .ok_or_else(|| Error::ParseFailed("token field missing from response".to_string()))?;

        tracing::debug!("Obtained new API token");
        state.token = Some(Token::new(value.clone()));
        Ok(value)
    }

    /// Rate-limited GET. The limiter records the request even when it fails or
    /// the returned future is dropped before completing.
    async fn get<T>(&self, limiter: &mut RateLimiter, params: &Params) -> Result<T, Error>
    where
        T: DeserializeOwned,
    {
        limiter.wait().await;
        let in_flight = limiter.in_flight();
        let result = self.dispatch(params).await;
        drop(in_flight);
        let body = result?;

        serde_json::from_str::<T>(&body).map_err(|e| {
            Error::ParseFailed(format!("{} | body: {}", e, truncate_body(&body)))
        })
    }

    async fn dispatch(&self, params: &Params) -> Result<String, Error> {
        tracing::trace!("GET {} {}", self.base_url, params.to_query_string());
        let resp = self
            .http
            .get(self.base_url.clone())
            .query(&[("app_id", self.app_id.as_str())])
            .query(&params.pairs())
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            tracing::warn!("Request failed with status {}", status);
            return Err(Error::Request {
                status: status.as_u16(),
                reason: reason_phrase(&resp),
            });
        }

        Ok(resp.text().await?)
    }
}

/// Reason phrase as sent by the server, or the canonical one for the status.
fn reason_phrase(resp: &reqwest::Response) -> String {
    match resp.extensions().get::<ReasonPhrase>() {
        Some(phrase) => String::from_utf8_lossy(phrase.as_bytes()).into_owned(),
        None => resp
            .status()
            .canonical_reason()
            .unwrap_or("Unknown Status")
            .to_string(),
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...[truncated]", &body[..idx]),
        None => body.to_string(),
    }
}
