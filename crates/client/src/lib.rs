//! Animal API client.
//!
//! This crate provides a typed client for the Animal API: paginated listing,
//! detail fetches and batch submission, with retry and backoff on transient
//! failures. It also hosts the shared observability setup (tracing, OTLP
//! export, metrics) used by the pipeline and the CLI.

pub mod client;
pub mod endpoints;
pub mod error;
pub mod metrics;
pub mod metrics_exporter;
pub mod models;
mod serde_helpers;
pub mod telemetry;

#[cfg(any(feature = "test-utils", test))]
pub mod testing;

pub use client::AnimalClient;
pub use client::builder::AnimalClientBuilder;
pub use endpoints::RetryPolicy;
pub use error::{ClientError, Result};
pub use metrics::{ErrorCategory, MetricsCollector};
pub use metrics_exporter::{MetricsExporter, MetricsExporterError};
pub use models::{
    AnimalDetail, AnimalSummary, BornAt, FriendsField, PaginatedListPage, TransformedAnimal,
};
pub use telemetry::{TracingConfig, TracingError, TracingGuard};
