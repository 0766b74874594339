use serde::Deserialize;
use serde_json::Value;

use super::common::{from_json_object, imdb_id, Mode, Params, Query, QueryCommon};
use super::de;
use crate::Error;

/// Identifier keys accepted by search mode, in the order they are checked.
const SEARCH_KEYS: [&str; 4] = ["string", "imdb", "tvdb", "themoviedb"];

/// Searches torrents by free text or by an external database id.
///
/// At least one of `string`, `imdb`, `tvdb` or `themoviedb` must be set;
/// they may be combined.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SearchQuery {
    #[serde(flatten)]
    pub common: QueryCommon,
    #[serde(deserialize_with = "de::identifier")]
    pub string: Option<String>,
    /// IMDb id, with or without the `tt` prefix.
    #[serde(deserialize_with = "de::identifier")]
    pub imdb: Option<String>,
    #[serde(deserialize_with = "de::identifier")]
    pub tvdb: Option<String>,
    #[serde(deserialize_with = "de::identifier")]
    pub themoviedb: Option<String>,
}

impl Query for SearchQuery {
    fn mode(&self) -> Mode {
        Mode::Search
    }

    fn to_params(&self) -> Result<Params, Error> {
        self.require_identifier()?;

        let mut params = Params::new();
        if let Some(string) = &self.string {
            params.insert("search_string", string.as_str());
        }
        if let Some(imdb) = &self.imdb {
            params.insert("search_imdb", imdb_id(imdb));
        }
        if let Some(tvdb) = &self.tvdb {
            params.insert("search_tvdb", tvdb.as_str());
        }
        if let Some(themoviedb) = &self.themoviedb {
            params.insert("search_themoviedb", themoviedb.as_str());
        }
        self.common.add_to_params(&mut params);
        Ok(params)
    }

    fn get_common(&mut self) -> &mut QueryCommon {
        &mut self.common
    }
}

impl SearchQuery {
    /// Builds a query from a JSON object such as `{"string": "Rogue One"}`.
    ///
    /// Fails with [`Error::InvalidInput`] when `value` is not an object.
    /// The identifier requirement is checked later, by [`Query::to_params`].
    pub fn from_json(value: &Value) -> Result<Self, Error> {
        from_json_object(value, &SEARCH_KEYS)
    }

    pub fn with_string(mut self, string: &str) -> Self {
        self.string = Some(string.to_string());
        self
    }

    pub fn with_imdb(mut self, imdb: &str) -> Self {
        self.imdb = Some(imdb.to_string());
        self
    }

    pub fn with_tvdb(mut self, tvdb: &str) -> Self {
        self.tvdb = Some(tvdb.to_string());
        self
    }

    pub fn with_themoviedb(mut self, themoviedb: &str) -> Self {
        self.themoviedb = Some(themoviedb.to_string());
        self
    }

    fn require_identifier(&self) -> Result<(), Error> {
        let present = [&self.string, &self.imdb, &self.tvdb, &self.themoviedb]
            .iter()
            .any(|id| id.is_some());
        if present {
            Ok(())
        } else {
            Err(Error::invalid_input(format!(
                "one search parameter required among: {}",
                SEARCH_KEYS.join(", ")
            )))
        }
    }
}
