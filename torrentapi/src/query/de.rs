//! Lenient field deserializers used when a query is built from dynamic JSON.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Accepts an array of ids, a single id, or an already joined `"45;46"` string.
pub(super) fn categories<'de, D>(deserializer: D) -> Result<Vec<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => items.iter().map(category_id).collect(),
        Value::String(joined) => joined
            .split(';')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| s.parse::<u32>().map_err(D::Error::custom))
            .collect(),
        single => category_id(&single).map(|id| vec![id]),
    }
}

fn category_id<E: serde::de::Error>(value: &Value) -> Result<u32, E> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(|| E::custom(format!("invalid category id {}", n))),
        Value::String(s) => s.trim().parse::<u32>().map_err(E::custom),
        other => Err(E::custom(format!("invalid category id {}", other))),
    }
}

/// `false` means unranked; any other present value means ranked.
pub(super) fn ranked<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::Bool(false) => Some(false),
        _ => Some(true),
    })
}

/// Accepts strings and numbers, so ids like `tvdb: 121361` work unquoted.
pub(super) fn identifier<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        other => Err(D::Error::custom(format!(
            "expected a string or number, found {}",
            other
        ))),
    }
}
