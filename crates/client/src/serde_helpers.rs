//! Serde helpers for the Animal API's inconsistent JSON typing.
//!
//! Responsibilities:
//! - Accept either JSON numbers or strings for record ids.
//! - Coerce `friends` and `born_at` into their tagged unions.
//!
//! Explicitly does NOT handle:
//! - Splitting delimited friends or parsing dates (see the pipeline transformer).
//!
//! Invariants / assumptions:
//! - `friends` list elements that are null, empty, `false` or `0` are dropped.
//! - `born_at` that is null, missing or an empty string decodes to `None`.
//! - Integer `born_at` values are Unix epoch milliseconds in UTC, accepted for
//!   years 0000-9999. Anything outside that range is kept as raw text.

use chrono::{DateTime, Datelike, Utc};
use serde::Deserialize;
use serde::de::Error as _;
use serde_json::Value;

use crate::models::{BornAt, FriendsField};

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum I64OrString {
    I64(i64),
    String(String),
}

pub fn i64_from_string_or_number<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match I64OrString::deserialize(deserializer)? {
        I64OrString::I64(v) => Ok(v),
        I64OrString::String(s) => s.trim().parse::<i64>().map_err(D::Error::custom),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

fn value_to_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

pub fn friends_from_any<'de, D>(deserializer: D) -> Result<FriendsField, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => FriendsField::default(),
        Some(Value::String(s)) => FriendsField::Delimited(s),
        Some(Value::Array(items)) => FriendsField::List(
            items
                .into_iter()
                .filter(is_truthy)
                .map(value_to_text)
                .collect(),
        ),
        Some(other) => FriendsField::Delimited(other.to_string()),
    })
}

pub fn opt_born_at_from_any<'de, D>(deserializer: D) -> Result<Option<BornAt>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.is_empty() => Ok(None),
        Some(Value::String(s)) => Ok(Some(BornAt::Text(s))),
        Some(Value::Number(n)) if n.is_i64() => {
            let millis = n.as_i64().unwrap_or_default();
            // Outside years 0000-9999 the value stays raw text so the
            // transformer rejects it against the record.
            Ok(Some(
                DateTime::<Utc>::from_timestamp_millis(millis)
                    .filter(|dt| (0..=9999).contains(&dt.year()))
                    .map_or_else(
                        || BornAt::Text(millis.to_string()),
                        |dt| BornAt::Zoned(dt.fixed_offset()),
                    ),
            ))
        }
        Some(other) => Ok(Some(BornAt::Text(other.to_string()))),
    }
}
