//! `proptest` strategies for upstream records.

use proptest::prelude::*;
use serde_json::Map;

use crate::models::{AnimalDetail, BornAt, FriendsField};

/// Friend names without commas or surrounding whitespace.
pub fn friend_name() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9 _-]{0,11}[A-Za-z0-9]".prop_map(|s| s.trim().to_string())
}

/// Any `friends` shape the API can send.
pub fn friends_field() -> impl Strategy<Value = FriendsField> {
    prop_oneof![
        prop::collection::vec(friend_name(), 0..6).prop_map(FriendsField::List),
        prop::collection::vec(friend_name(), 0..6).prop_map(|names| {
            FriendsField::Delimited(names.join(", "))
        }),
        Just(FriendsField::Delimited(String::new())),
        Just(FriendsField::Delimited(" , ,".to_string())),
    ]
}

/// Timestamps that always parse.
pub fn valid_born_at() -> impl Strategy<Value = BornAt> {
    (1970i32..2100, 1u32..=12, 1u32..=28, 0u32..24, 0u32..60, 0u32..60).prop_flat_map(
        |(y, mo, d, h, mi, s)| {
            prop_oneof![
                Just(BornAt::Text(format!("{y:04}-{mo:02}-{d:02}T{h:02}:{mi:02}:{s:02}Z"))),
                Just(BornAt::Text(format!("{y:04}-{mo:02}-{d:02} {h:02}:{mi:02}:{s:02}"))),
                Just(BornAt::Text(format!("{y:04}-{mo:02}-{d:02}"))),
                Just(BornAt::Text(format!(
                    "{y:04}-{mo:02}-{d:02}T{h:02}:{mi:02}:{s:02}+05:30"
                ))),
                Just(BornAt::Text(format!("{y:04}{mo:02}{d:02}"))),
                Just(BornAt::Text(format!("{y:04}{mo:02}{d:02}T{h:02}{mi:02}{s:02}Z"))),
                Just(BornAt::Text(format!(
                    "{mo:02}/{d:02}/{y:04} {}:{mi:02} {}",
                    if h % 12 == 0 { 12 } else { h % 12 },
                    if h < 12 { "AM" } else { "PM" }
                ))),
            ]
        },
    )
}

/// Detail records whose fields always transform successfully.
pub fn animal_detail() -> impl Strategy<Value = AnimalDetail> {
    (
        1i64..1_000_000,
        "[A-Z][a-z]{1,10}",
        friends_field(),
        prop::option::of(valid_born_at()),
    )
        .prop_map(|(id, name, friends, born_at)| AnimalDetail {
            id,
            name,
            friends,
            born_at,
            extra: Map::new(),
        })
}
