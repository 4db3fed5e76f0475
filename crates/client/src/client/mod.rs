//! Main Animal API client.
//!
//! This module provides the [`AnimalClient`] used by the pipeline for every
//! upstream call. One client owns one `reqwest::Client`, so its connection
//! pool is shared by all calls made through it.
//!
//! # Submodules
//! - [`builder`]: Client construction and configuration
//! - `animals`: List, detail and submission methods
//!
//! # What this module does NOT handle:
//! - Direct HTTP request implementation (delegated to [`crate::endpoints`])
//! - Retry policy details (see [`crate::endpoints::request`])

pub mod builder;

mod animals;

use crate::endpoints::RetryPolicy;
use crate::metrics::MetricsCollector;
use animal_etl_config::EndpointConfig;

/// Animal API client.
///
/// Use [`AnimalClient::builder()`] to create a new client:
///
/// ```rust,ignore
/// use animal_etl_client::AnimalClient;
///
/// let client = AnimalClient::builder()
///     .base_url("http://localhost:3123".to_string())
///     .build()?;
/// let page = client.fetch_list_page(1, 20).await?;
/// ```
#[derive(Debug)]
pub struct AnimalClient {
    pub(crate) http: reqwest::Client,
    pub(crate) base_url: String,
    pub(crate) endpoints: EndpointConfig,
    pub(crate) retry: RetryPolicy,
    pub(crate) start_page: u32,
    pub(crate) page_size: u32,
    pub(crate) metrics: Option<MetricsCollector>,
}

impl AnimalClient {
    /// Create a new client builder.
    pub fn builder() -> builder::AnimalClientBuilder {
        builder::AnimalClientBuilder::new()
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Retry policy applied to every call.
    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    pub fn metrics(&self) -> Option<&MetricsCollector> {
        self.metrics.as_ref()
    }
}
