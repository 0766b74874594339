use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single torrent as returned by the endpoint.
///
/// The object is kept verbatim. Which keys are present depends on the
/// requested [`Format`](crate::Format): plain `json` carries `filename`,
/// `category` and `download`; `json_extended` carries `title`, `seeders`,
/// `leechers`, `size`, `pubdate`, `info_page` and `episode_info` as well.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(transparent)]
pub struct Torrent(Map<String, Value>);

impl Torrent {
    /// Raw access to any field.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn filename(&self) -> Option<&str> {
        self.str_field("filename")
    }

    pub fn title(&self) -> Option<&str> {
        self.str_field("title")
    }

    /// `filename` for plain results, `title` for extended ones.
    pub fn name(&self) -> Option<&str> {
        self.filename().or_else(|| self.title())
    }

    /// Magnet link.
    pub fn download(&self) -> Option<&str> {
        self.str_field("download")
    }

    pub fn category(&self) -> Option<&str> {
        self.str_field("category")
    }

    pub fn seeders(&self) -> Option<u64> {
        self.0.get("seeders").and_then(Value::as_u64)
    }

    pub fn leechers(&self) -> Option<u64> {
        self.0.get("leechers").and_then(Value::as_u64)
    }

    /// Size in bytes.
    pub fn size(&self) -> Option<u64> {
        self.0.get("size").and_then(Value::as_u64)
    }

    pub fn pubdate(&self) -> Option<&str> {
        self.str_field("pubdate")
    }

    pub fn info_page(&self) -> Option<&str> {
        self.str_field("info_page")
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }
}

impl From<Map<String, Value>> for Torrent {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}
