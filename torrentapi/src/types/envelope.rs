use serde::{Deserialize, Serialize};

use super::Torrent;

/// Top-level body of a list or search response.
///
/// Either `torrent_results` or `error` is set. "No results" is reported
/// through `error` rather than as an empty list.
#[derive(Serialize, Deserialize, Debug, Default)]
pub struct ApiResponse {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub error_code: Option<i64>,
    #[serde(default)]
    pub torrent_results: Option<Vec<Torrent>>,
}

/// Body of a `get_token` response.
#[derive(Serialize, Deserialize, Debug, Default)]
pub struct TokenResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub error_code: Option<i64>,
}
