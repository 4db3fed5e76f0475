//! Animal record models.
//!
//! Unknown fields on every record are kept in `extra` and written back
//! verbatim on submission.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::fields::{BornAt, FriendsField};

/// One row of the paginated list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimalSummary {
    #[serde(deserialize_with = "crate::serde_helpers::i64_from_string_or_number")]
    pub id: i64,
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Full record from the detail endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimalDetail {
    #[serde(deserialize_with = "crate::serde_helpers::i64_from_string_or_number")]
    pub id: i64,
    pub name: String,
    #[serde(default, deserialize_with = "crate::serde_helpers::friends_from_any")]
    pub friends: FriendsField,
    #[serde(
        default,
        deserialize_with = "crate::serde_helpers::opt_born_at_from_any",
        skip_serializing_if = "Option::is_none"
    )]
    pub born_at: Option<BornAt>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AnimalDetail {
    /// Detail with no optional fields set.
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            friends: FriendsField::default(),
            born_at: None,
            extra: Map::new(),
        }
    }
}

/// Canonical record accepted by the submission endpoint.
///
/// `born_at` is always present on the wire, `null` when unknown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformedAnimal {
    pub id: i64,
    pub name: String,
    pub friends: Vec<String>,
    pub born_at: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
