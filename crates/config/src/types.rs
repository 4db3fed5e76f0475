//! Configuration types for the Animal ETL pipeline.
//!
//! Responsibilities:
//! - Define connection, endpoint, retry and pipeline settings.
//! - Provide serialization helpers for `Duration`.
//!
//! Does NOT handle:
//! - Loading from env/.env/CLI (see `loader` module).
//! - Network access (see the client crate).
//!
//! Invariants:
//! - Timeouts serialize as whole seconds, retry delays as fractional seconds.
//! - `Config::default()` mirrors the constants in [`crate::constants`].

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::constants::{
    DEFAULT_BASE_URL, DEFAULT_BATCH_SIZE, DEFAULT_DETAIL_PATH, DEFAULT_HOME_PATH,
    DEFAULT_INITIAL_RETRY_DELAY_SECS, DEFAULT_LIST_PATH, DEFAULT_MAX_RETRIES,
    DEFAULT_MAX_RETRY_DELAY_SECS, DEFAULT_PAGE_SIZE, DEFAULT_START_PAGE, DEFAULT_TIMEOUT_SECS,
    DETAIL_ID_PLACEHOLDER,
};

/// Module for serializing Duration as seconds (integer).
mod duration_seconds {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

/// Module for serializing Duration as fractional seconds.
mod duration_secs_f64 {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_secs_f64().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs).map_err(D::Error::custom)
    }
}

/// Connection settings for the upstream API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// Base URL without trailing slash (e.g. http://localhost:3123)
    pub base_url: String,
    /// Per-request timeout (serialized as seconds)
    #[serde(with = "duration_seconds")]
    pub timeout: Duration,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Endpoint paths, relative to the base URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointConfig {
    pub list_path: String,
    /// Must contain the `{id}` placeholder.
    pub detail_path: String,
    pub home_path: String,
}

impl EndpointConfig {
    /// Resolve the detail path for one animal id.
    pub fn detail_path_for(&self, id: i64) -> String {
        self.detail_path
            .replace(DETAIL_ID_PLACEHOLDER, &id.to_string())
    }
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            list_path: DEFAULT_LIST_PATH.to_string(),
            detail_path: DEFAULT_DETAIL_PATH.to_string(),
            home_path: DEFAULT_HOME_PATH.to_string(),
        }
    }
}

/// Retry policy for transient transport failures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum attempts per logical request (including the first)
    pub max_retries: usize,
    /// Delay before the first retry; doubles on each further retry
    #[serde(with = "duration_secs_f64")]
    pub initial_delay: Duration,
    /// Upper bound on any single backoff delay
    #[serde(with = "duration_secs_f64")]
    pub max_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            initial_delay: Duration::from_secs_f64(DEFAULT_INITIAL_RETRY_DELAY_SECS),
            max_delay: Duration::from_secs_f64(DEFAULT_MAX_RETRY_DELAY_SECS),
        }
    }
}

/// Batching and pagination settings for a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Records per submitted batch (clamped to the endpoint limit at run time)
    pub batch_size: usize,
    /// Items requested per list page
    pub page_size: u32,
    /// First page requested
    pub start_page: u32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            page_size: DEFAULT_PAGE_SIZE,
            start_page: DEFAULT_START_PAGE,
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub connection: ConnectionConfig,
    pub endpoints: EndpointConfig,
    pub retry: RetryConfig,
    pub pipeline: PipelineConfig,
}
