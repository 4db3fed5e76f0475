//! Polymorphic field types on animal detail records.
//!
//! The upstream API is loose about `friends` and `born_at`: either may arrive
//! as a string, a list, a number or not at all. These types capture the shapes
//! once at decode time so the transformer deals with a closed set.

use chrono::{DateTime, FixedOffset, NaiveDateTime, SecondsFormat};
use serde::{Serialize, Serializer};

/// Raw `friends` value as received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FriendsField {
    /// Comma-delimited text, possibly empty.
    Delimited(String),
    /// Already a list; falsy elements were dropped at decode time.
    List(Vec<String>),
}

impl Default for FriendsField {
    fn default() -> Self {
        Self::Delimited(String::new())
    }
}

/// Raw `born_at` value as received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BornAt {
    /// Free-form text, parsed permissively by the transformer.
    Text(String),
    /// Timestamp with a known offset.
    Zoned(DateTime<FixedOffset>),
    /// Timestamp without an offset; treated as UTC.
    Naive(NaiveDateTime),
}

impl Serialize for BornAt {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Text(text) => serializer.serialize_str(text),
            Self::Zoned(dt) => {
                serializer.serialize_str(&dt.to_rfc3339_opts(SecondsFormat::AutoSi, false))
            }
            Self::Naive(dt) => serializer.serialize_str(&dt.format("%Y-%m-%dT%H:%M:%S%.f").to_string()),
        }
    }
}
