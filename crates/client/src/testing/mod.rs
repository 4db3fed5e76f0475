//! Testing utilities for Animal API client tests.
//!
//! This module provides helpers for loading JSON fixtures and `proptest`
//! strategies for generating upstream records. Available when running tests
//! or when the `test-utils` feature is enabled.
//!
//! # Example
//! ```ignore
//! use animal_etl_client::testing::{load_fixture, strategies::animal_detail};
//!
//! let page = load_fixture("animals/list_page_1.json");
//! ```

pub mod strategies;

use std::path::Path;

use serde_json::{Value, json};

/// Load a JSON fixture file from the fixtures directory.
///
/// # Panics
/// - If the fixture file cannot be read
/// - If the file content is not valid JSON
pub fn load_fixture(fixture_path: &str) -> Value {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    let full_path = manifest_dir.join("fixtures").join(fixture_path);
    let content = std::fs::read_to_string(&full_path)
        .unwrap_or_else(|_| panic!("Failed to load fixture: {}", full_path.display()));
    serde_json::from_str(&content).expect("Invalid JSON in fixture")
}

/// Build a list page body with summaries for the given ids.
pub fn list_page_body(page: u32, total_pages: u32, ids: &[i64]) -> Value {
    let items: Vec<Value> = ids
        .iter()
        .map(|id| json!({ "id": id, "name": format!("Animal {id}") }))
        .collect();
    json!({ "page": page, "total_pages": total_pages, "items": items })
}

/// Build a detail body for one id with well-formed fields.
pub fn detail_body(id: i64) -> Value {
    json!({
        "id": id,
        "name": format!("Animal {id}"),
        "friends": "Rex, Tom",
        "born_at": "2020-01-01T00:00:00Z"
    })
}
