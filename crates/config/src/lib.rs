//! Configuration management for the Animal ETL pipeline.
//!
//! This crate provides the configuration types, defaults and the loader that
//! merges `.env`, environment variables and explicit overrides.

pub mod constants;
mod loader;
pub mod types;

pub use loader::{
    ConfigError, ConfigLoader, ENV_BASE_URL, ENV_BATCH_SIZE, ENV_DETAIL_PATH, ENV_HOME_PATH,
    ENV_INITIAL_RETRY_DELAY, ENV_LIST_PATH, ENV_MAX_RETRIES, ENV_MAX_RETRY_DELAY, ENV_PAGE_SIZE,
    ENV_START_PAGE, ENV_TIMEOUT, env_var_or_none,
};
pub use types::{Config, ConnectionConfig, EndpointConfig, PipelineConfig, RetryConfig};
