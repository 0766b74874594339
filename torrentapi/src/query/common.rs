//! Shared query infrastructure: the [`Query`] trait, [`QueryCommon`] filters,
//! the wire-format [`Params`] map, and the named normalization steps.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde_json::{Map, Value};

use super::de;
use crate::Error;

/// Trait implemented by all query builders. Provides serialization into wire
/// parameters and shared builder methods for the filters both modes accept.
pub trait Query {
    /// The `mode` value sent with this query.
    fn mode(&self) -> Mode;

    /// Validates the query and produces its normalized wire parameters.
    ///
    /// `mode` and `token` are not included; the client injects them last.
    fn to_params(&self) -> Result<Params, Error>;

    /// Returns a mutable reference to the common filter fields.
    fn get_common(&mut self) -> &mut QueryCommon;

    /// Adds a category id to the filter.
    fn with_category(mut self, category: u32) -> Self
    where
        Self: Sized,
    {
        self.get_common().categories.push(category);
        self
    }

    /// Adds several category ids to the filter.
    fn with_categories(mut self, categories: &[u32]) -> Self
    where
        Self: Sized,
    {
        self.get_common().categories.extend_from_slice(categories);
        self
    }

    /// Sets the result format.
    fn with_format(mut self, format: Format) -> Self
    where
        Self: Sized,
    {
        self.get_common().format = Some(format);
        self
    }

    /// Sets the maximum number of results. The endpoint accepts 25, 50 or 100.
    fn with_limit(mut self, limit: u32) -> Self
    where
        Self: Sized,
    {
        self.get_common().limit = Some(limit);
        self
    }

    /// Only return torrents with at least this many seeders.
    fn with_min_seeders(mut self, min_seeders: u32) -> Self
    where
        Self: Sized,
    {
        self.get_common().min_seeders = Some(min_seeders);
        self
    }

    /// Only return torrents with at least this many leechers.
    fn with_min_leechers(mut self, min_leechers: u32) -> Self
    where
        Self: Sized,
    {
        self.get_common().min_leechers = Some(min_leechers);
        self
    }

    /// Includes (`true`) or excludes (`false`) unranked torrents.
    fn with_ranked(mut self, ranked: bool) -> Self
    where
        Self: Sized,
    {
        self.get_common().ranked = Some(ranked);
        self
    }

    /// Sets the result ordering.
    fn with_sort(mut self, sort: Sort) -> Self
    where
        Self: Sized,
    {
        self.get_common().sort = Some(sort);
        self
    }
}

/// Operation discriminator sent as the `mode` parameter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    List,
    Search,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Mode::List => "list",
            Mode::Search => "search",
        })
    }
}

/// Shape of each returned torrent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Format {
    /// Filename, category and download link only. This is the endpoint default.
    #[default]
    Json,
    /// Adds title, seeders, leechers, size, publication date and episode info.
    JsonExtended,
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Format::Json => "json",
            Format::JsonExtended => "json_extended",
        })
    }
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(Format::Json),
            "json_extended" | "extended" => Ok(Format::JsonExtended),
            _ => Err(Error::invalid_input(format!(
                "unknown format '{}', expected json or json_extended",
                s
            ))),
        }
    }
}

/// Result ordering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sort {
    /// Most recently added first. This is the endpoint default.
    #[default]
    Last,
    Seeders,
    Leechers,
}

impl fmt::Display for Sort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Sort::Last => "last",
            Sort::Seeders => "seeders",
            Sort::Leechers => "leechers",
        })
    }
}

impl FromStr for Sort {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "last" => Ok(Sort::Last),
            "seeders" => Ok(Sort::Seeders),
            "leechers" => Ok(Sort::Leechers),
            _ => Err(Error::invalid_input(format!(
                "unknown sort '{}', expected last, seeders or leechers",
                s
            ))),
        }
    }
}

/// Filters shared by list and search queries. Every field is optional and
/// omitted from the request when unset.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct QueryCommon {
    /// Category ids, sent joined with `;`.
    #[serde(rename = "category", deserialize_with = "de::categories")]
    pub categories: Vec<u32>,
    pub format: Option<Format>,
    pub limit: Option<u32>,
    pub min_seeders: Option<u32>,
    pub min_leechers: Option<u32>,
    /// `Some(false)` is sent as `0`, `Some(true)` as `1`.
    #[serde(deserialize_with = "de::ranked")]
    pub ranked: Option<bool>,
    pub sort: Option<Sort>,
}

impl QueryCommon {
    /// Appends the normalized common filters to the parameters.
    pub fn add_to_params(&self, params: &mut Params) {
        if !self.categories.is_empty() {
            params.insert("category", join_categories(&self.categories));
        }
        if let Some(format) = self.format {
            params.insert("format", format.to_string());
        }
        if let Some(limit) = self.limit {
            params.insert("limit", limit.to_string());
        }
        if let Some(min_seeders) = self.min_seeders {
            params.insert("min_seeders", min_seeders.to_string());
        }
        if let Some(min_leechers) = self.min_leechers {
            params.insert("min_leechers", min_leechers.to_string());
        }
        if let Some(ranked) = self.ranked {
            params.insert("ranked", ranked_flag(ranked));
        }
        if let Some(sort) = self.sort {
            params.insert("sort", sort.to_string());
        }
    }
}

/// Joins category ids into the `;`-separated form the endpoint expects.
pub(crate) fn join_categories(categories: &[u32]) -> String {
    categories
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(";")
}

pub(crate) fn ranked_flag(ranked: bool) -> &'static str {
    if ranked {
        "1"
    } else {
        "0"
    }
}

/// Prefixes an IMDb id with `tt` unless it already carries it.
pub(crate) fn imdb_id(id: &str) -> String {
    if id.starts_with("tt") {
        id.to_string()
    } else {
        format!("tt{}", id)
    }
}

/// Keys of [`QueryCommon`] as they appear in JSON input.
pub(crate) const COMMON_KEYS: [&str; 7] = [
    "category",
    "format",
    "limit",
    "min_seeders",
    "min_leechers",
    "ranked",
    "sort",
];

/// Deserializes a query from a dynamic JSON value, rejecting anything that
/// is not an object.
///
/// Keys outside [`COMMON_KEYS`] and `extra_keys` are dropped and logged at
/// debug level. `mode` and `token` are among them; the client sets both.
pub(crate) fn from_json_object<'a, T: Deserialize<'a>>(
    value: &'a Value,
    extra_keys: &[&str],
) -> Result<T, Error> {
    let Some(object) = value.as_object() else {
        return Err(Error::invalid_input("Expected params object"));
    };
    for key in ignored_keys(object, extra_keys) {
        tracing::debug!("Ignoring unknown query parameter '{}'", key);
    }
    T::deserialize(value).map_err(|e| Error::invalid_input(format!("Invalid params: {}", e)))
}

pub(crate) fn ignored_keys<'a>(
    object: &'a Map<String, Value>,
    extra_keys: &[&str],
) -> Vec<&'a str> {
    object
        .keys()
        .map(String::as_str)
        .filter(|key| !COMMON_KEYS.contains(key) && !extra_keys.contains(key))
        .collect()
}

/// Normalized, string-keyed request parameters in wire format.
///
/// Inserting an existing key replaces its value, which is how `mode` and
/// `token` take precedence over anything set earlier.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Params(BTreeMap<String, String>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Key/value pairs in key order.
    pub fn pairs(&self) -> Vec<(&str, &str)> {
        self.0
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect()
    }

    /// URL-encoded `key=value&...` form, in key order.
    pub fn to_query_string(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.0.iter())
            .finish()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
