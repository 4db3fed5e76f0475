//! Environment variable parsing for configuration.
//!
//! Responsibilities:
//! - Read and parse the pipeline's environment variables.
//! - Apply parsed values to a [`ConfigLoader`].
//!
//! Does NOT handle:
//! - Building or validating the final `Config` (see builder.rs).
//! - `.env` file loading (handled by `ConfigLoader::load_dotenv`).
//!
//! Invariants:
//! - Empty or whitespace-only environment variables are treated as unset.
//! - Returned values are trimmed.
//! - Unparseable numeric values return `ConfigError::InvalidValue` naming the variable.

use std::str::FromStr;
use std::time::Duration;

use super::builder::ConfigLoader;
use super::error::ConfigError;

pub const ENV_BASE_URL: &str = "API_BASE_URL";
pub const ENV_LIST_PATH: &str = "ANIMALS_LIST_ENDPOINT";
pub const ENV_DETAIL_PATH: &str = "ANIMAL_DETAIL_ENDPOINT";
pub const ENV_HOME_PATH: &str = "HOME_ENDPOINT";
pub const ENV_BATCH_SIZE: &str = "BATCH_SIZE";
pub const ENV_MAX_RETRIES: &str = "MAX_RETRIES";
pub const ENV_TIMEOUT: &str = "TIMEOUT";
pub const ENV_INITIAL_RETRY_DELAY: &str = "INITIAL_RETRY_DELAY";
pub const ENV_MAX_RETRY_DELAY: &str = "MAX_RETRY_DELAY";
pub const ENV_PAGE_SIZE: &str = "DEFAULT_PAGE_SIZE";
pub const ENV_START_PAGE: &str = "START_PAGE";

/// Read an environment variable, returning None if unset, empty, or whitespace-only.
/// Returns the trimmed value (leading/trailing whitespace removed) if present.
pub fn env_var_or_none(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == s.len() {
            Some(s)
        } else {
            Some(trimmed.to_string())
        }
    })
}

fn parse_env<T: FromStr>(key: &str, message: &str) -> Result<Option<T>, ConfigError> {
    env_var_or_none(key)
        .map(|raw| {
            raw.parse::<T>().map_err(|_| ConfigError::InvalidValue {
                var: key.to_string(),
                message: format!("{message} (got {raw:?})"),
            })
        })
        .transpose()
}

fn parse_env_secs_f64(key: &str) -> Result<Option<Duration>, ConfigError> {
    let Some(secs) = parse_env::<f64>(key, "must be a number of seconds")? else {
        return Ok(None);
    };
    Duration::try_from_secs_f64(secs)
        .map(Some)
        .map_err(|_| ConfigError::InvalidValue {
            var: key.to_string(),
            message: format!("must be a non-negative, finite number of seconds (got {secs})"),
        })
}

/// Apply environment variable configuration to the loader.
pub fn apply_env(loader: &mut ConfigLoader) -> Result<(), ConfigError> {
    if let Some(url) = env_var_or_none(ENV_BASE_URL) {
        loader.set_base_url(Some(url));
    }
    if let Some(path) = env_var_or_none(ENV_LIST_PATH) {
        loader.set_list_path(Some(path));
    }
    if let Some(path) = env_var_or_none(ENV_DETAIL_PATH) {
        loader.set_detail_path(Some(path));
    }
    if let Some(path) = env_var_or_none(ENV_HOME_PATH) {
        loader.set_home_path(Some(path));
    }
    if let Some(size) = parse_env(ENV_BATCH_SIZE, "must be a positive integer")? {
        loader.set_batch_size(Some(size));
    }
    if let Some(retries) = parse_env(ENV_MAX_RETRIES, "must be a positive integer")? {
        loader.set_max_retries(Some(retries));
    }
    if let Some(secs) = parse_env::<u64>(ENV_TIMEOUT, "must be a number of seconds")? {
        loader.set_timeout(Some(Duration::from_secs(secs)));
    }
    if let Some(delay) = parse_env_secs_f64(ENV_INITIAL_RETRY_DELAY)? {
        loader.set_initial_retry_delay(Some(delay));
    }
    if let Some(delay) = parse_env_secs_f64(ENV_MAX_RETRY_DELAY)? {
        loader.set_max_retry_delay(Some(delay));
    }
    if let Some(size) = parse_env(ENV_PAGE_SIZE, "must be a positive integer")? {
        loader.set_page_size(Some(size));
    }
    if let Some(page) = parse_env(ENV_START_PAGE, "must be a positive integer")? {
        loader.set_start_page(Some(page));
    }

    Ok(())
}
