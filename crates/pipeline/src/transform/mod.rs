//! Record transformer.
//!
//! Reshapes [`AnimalDetail`] records into the canonical [`TransformedAnimal`]
//! submission form.
//!
//! # What this module handles:
//! - `friends` normalization ([`normalize_friends`])
//! - `born_at` parsing and UTC canonicalization ([`normalize_born_at`])
//! - Per-record and per-batch transformation
//!
//! # What this module does NOT handle:
//! - Decoding the loose wire shapes (done by the client models)
//! - Statistics (the orchestrator derives dropped counts from the output length)

mod born_at;
mod friends;

pub use born_at::{canonical_utc, normalize_born_at, parse_timestamp};
pub use friends::{normalize_friends, split_delimited};

use serde_json::Map;
use tracing::{debug, error, info, warn};

use animal_etl_client::{AnimalDetail, TransformedAnimal};

use crate::error::Result;

/// Keys owned by the canonical record; never copied from passthrough fields.
const RESERVED_KEYS: [&str; 4] = ["id", "name", "friends", "born_at"];

/// Transform one detail record.
///
/// Passthrough fields are copied unchanged. Errors are tagged with the record id.
pub fn transform_record(detail: &AnimalDetail) -> Result<TransformedAnimal> {
    debug!(id = detail.id, name = %detail.name, "Transforming animal");

    let friends = normalize_friends(Some(&detail.friends));
    let born_at = normalize_born_at(detail.born_at.as_ref()).map_err(|e| e.for_record(detail.id))?;

    let extra: Map<_, _> = detail
        .extra
        .iter()
        .filter(|(key, _)| !RESERVED_KEYS.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    Ok(TransformedAnimal {
        id: detail.id,
        name: detail.name.clone(),
        friends,
        born_at,
        extra,
    })
}

/// Transform every record independently, dropping the ones that fail.
///
/// Never fails as a whole. Each failure is logged with the record id, field
/// and value; the number dropped is `details.len() - output.len()`.
pub fn transform_batch(details: &[AnimalDetail]) -> Vec<TransformedAnimal> {
    let mut transformed = Vec::with_capacity(details.len());
    let mut failures = 0usize;

    for detail in details {
        match transform_record(detail) {
            Ok(record) => transformed.push(record),
            Err(e) => {
                failures += 1;
                error!(
                    id = detail.id,
                    field = e.field(),
                    value = e.value(),
                    error = %e,
                    "Failed to transform animal"
                );
            }
        }
    }

    if failures > 0 {
        warn!(
            failed = failures,
            total = details.len(),
            "Some animals could not be transformed"
        );
    }
    info!(
        transformed = transformed.len(),
        total = details.len(),
        "Transformation finished"
    );

    transformed
}
