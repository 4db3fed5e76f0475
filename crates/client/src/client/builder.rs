//! Client builder for constructing [`AnimalClient`] instances.
//!
//! This module is responsible for:
//! - Providing a fluent builder API for client configuration
//! - Normalizing the base URL (removing trailing slashes)
//! - Configuring the underlying HTTP client (timeout, redirects, default headers)
//!
//! # Invariants
//! - `base_url` is required and must parse as an absolute URL
//! - The base URL is always normalized to have no trailing slashes
//! - Every request carries `Content-Type: application/json` and an `animal-etl/<version>` user agent

use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};

use crate::client::AnimalClient;
use crate::endpoints::RetryPolicy;
use crate::error::{ClientError, Result};
use crate::metrics::MetricsCollector;
use animal_etl_config::{
    Config, EndpointConfig,
    constants::{DEFAULT_MAX_REDIRECTS, DEFAULT_PAGE_SIZE, DEFAULT_START_PAGE, DEFAULT_TIMEOUT_SECS},
};

/// User agent sent with every request.
pub const USER_AGENT: &str = concat!("animal-etl/", env!("CARGO_PKG_VERSION"));

/// Builder for creating a new [`AnimalClient`].
pub struct AnimalClientBuilder {
    base_url: Option<String>,
    endpoints: EndpointConfig,
    timeout: Duration,
    retry: RetryPolicy,
    start_page: u32,
    page_size: u32,
    metrics: Option<MetricsCollector>,
}

impl Default for AnimalClientBuilder {
    fn default() -> Self {
        Self {
            base_url: None,
            endpoints: EndpointConfig::default(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            retry: RetryPolicy::default(),
            start_page: DEFAULT_START_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
            metrics: None,
        }
    }
}

impl AnimalClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URL of the Animal API, e.g. `http://localhost:3123`.
    ///
    /// Trailing slashes will be automatically removed.
    pub fn base_url(mut self, url: String) -> Self {
        self.base_url = Some(url);
        self
    }

    pub fn endpoints(mut self, endpoints: EndpointConfig) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// Set the per-request timeout. Default is 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry = policy;
        self
    }

    /// Set pagination used by `fetch_all_summaries`.
    pub fn pagination(mut self, start_page: u32, page_size: u32) -> Self {
        self.start_page = start_page;
        self.page_size = page_size;
        self
    }

    /// Set the metrics collector for API call performance tracking.
    pub fn metrics(mut self, metrics: MetricsCollector) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Create a client builder from configuration.
    pub fn from_config(mut self, config: &Config) -> Self {
        self.base_url = Some(config.connection.base_url.clone());
        self.timeout = config.connection.timeout;
        self.endpoints = config.endpoints.clone();
        self.retry = RetryPolicy::from(&config.retry);
        self.start_page = config.pipeline.start_page;
        self.page_size = config.pipeline.page_size;
        self
    }

    /// Normalize a base URL by removing trailing slashes.
    ///
    /// - `"http://localhost:3123/"` -> `"http://localhost:3123"`
    /// - `"http://localhost:3123"` -> `"http://localhost:3123"`
    fn normalize_base_url(url: String) -> String {
        url.trim().trim_end_matches('/').to_string()
    }

    /// Build the [`AnimalClient`] with the configured options.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] if `base_url` is missing or unparseable.
    /// Returns `ClientError::HttpError` if the HTTP client fails to build.
    pub fn build(self) -> Result<AnimalClient> {
        let base_url = self
            .base_url
            .ok_or_else(|| ClientError::InvalidUrl("base_url is required".to_string()))?;
        let base_url = Self::normalize_base_url(base_url);
        reqwest::Url::parse(&base_url)
            .map_err(|e| ClientError::InvalidUrl(format!("{base_url}: {e}")))?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .timeout(self.timeout)
            .redirect(reqwest::redirect::Policy::limited(DEFAULT_MAX_REDIRECTS))
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()?;

        Ok(AnimalClient {
            http,
            base_url,
            endpoints: self.endpoints,
            retry: self.retry,
            start_page: self.start_page,
            page_size: self.page_size,
            metrics: self.metrics,
        })
    }
}
