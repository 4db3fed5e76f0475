//! Animal ETL pipeline.
//!
//! Extracts animals from the Animal API, reshapes them into the canonical
//! submission form and loads them back in batches.
//!
//! - [`transform`]: pure record normalization
//! - [`stats`]: run counters
//! - [`orchestrator`]: the phase state machine driving a run

pub mod error;
pub mod orchestrator;
pub mod stats;
pub mod transform;

pub use error::{Result, TransformError};
pub use orchestrator::{FailureReason, Phase, Pipeline, RunMode, RunOutcome, RunReport};
pub use stats::RunStats;
pub use transform::{normalize_born_at, normalize_friends, transform_batch, transform_record};
