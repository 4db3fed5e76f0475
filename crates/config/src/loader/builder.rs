//! Configuration loader builder implementation.
//!
//! Responsibilities:
//! - Provide a builder-pattern `ConfigLoader` for layered configuration merging.
//! - Build and validate the final [`Config`].
//!
//! Does NOT handle:
//! - Direct environment variable parsing logic (delegated to env.rs).
//!
//! Invariants / Assumptions:
//! - Precedence: defaults < `.env` < environment < builder methods (CLI flags).
//!   Callers get this by calling `load_dotenv()`, then `from_env()`, then `with_*`.
//! - `load_dotenv()` must be called explicitly to enable `.env` file loading.
//! - The `DOTENV_DISABLED` variable is checked before `dotenvy::dotenv()` is called.

use std::time::Duration;

use super::env::apply_env;
use super::error::ConfigError;
use crate::constants::{
    DEFAULT_BASE_URL, DEFAULT_BATCH_SIZE, DEFAULT_DETAIL_PATH, DEFAULT_HOME_PATH,
    DEFAULT_INITIAL_RETRY_DELAY_SECS, DEFAULT_LIST_PATH, DEFAULT_MAX_RETRIES,
    DEFAULT_MAX_RETRY_DELAY_SECS, DEFAULT_PAGE_SIZE, DEFAULT_START_PAGE, DEFAULT_TIMEOUT_SECS,
    DETAIL_ID_PLACEHOLDER, MAX_MAX_RETRIES, MAX_TIMEOUT_SECS,
};
use crate::types::{Config, ConnectionConfig, EndpointConfig, PipelineConfig, RetryConfig};

/// Configuration loader that builds config from `.env`, environment variables and overrides.
#[derive(Debug, Default)]
pub struct ConfigLoader {
    base_url: Option<String>,
    list_path: Option<String>,
    detail_path: Option<String>,
    home_path: Option<String>,
    timeout: Option<Duration>,
    max_retries: Option<usize>,
    initial_retry_delay: Option<Duration>,
    max_retry_delay: Option<Duration>,
    batch_size: Option<usize>,
    page_size: Option<u32>,
    start_page: Option<u32>,
}

impl ConfigLoader {
    /// Create a new configuration loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if dotenv loading is disabled via environment variable.
    fn dotenv_disabled() -> bool {
        matches!(
            std::env::var("DOTENV_DISABLED").ok().as_deref(),
            Some("true") | Some("1")
        )
    }

    /// Load environment variables from .env file if present.
    ///
    /// If `DOTENV_DISABLED` is set to "true" or "1", the .env file is not loaded.
    /// Missing `.env` files are silently ignored.
    ///
    /// # Errors
    ///
    /// - `ConfigError::DotenvParse` if the file exists but has invalid syntax
    /// - `ConfigError::DotenvIo` if the file exists but cannot be read
    pub fn load_dotenv(self) -> Result<Self, ConfigError> {
        if Self::dotenv_disabled() {
            return Ok(self);
        }

        match dotenvy::dotenv() {
            Ok(path) => {
                tracing::debug!(path = %path.display(), "Loaded .env file");
                Ok(self)
            }
            Err(e) if Self::is_not_found(&e) => Ok(self),
            Err(dotenvy::Error::LineParse(_, idx)) => {
                Err(ConfigError::DotenvParse { error_index: idx })
            }
            Err(dotenvy::Error::Io(io_err)) => Err(ConfigError::DotenvIo {
                kind: io_err.kind(),
            }),
            Err(_) => Err(ConfigError::DotenvUnknown),
        }
    }

    fn is_not_found(err: &dotenvy::Error) -> bool {
        matches!(
            err,
            dotenvy::Error::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound
        )
    }

    /// Read configuration from environment variables.
    ///
    /// Values already set through `with_*` are overwritten, so apply
    /// explicit overrides after this call.
    pub fn from_env(mut self) -> Result<Self, ConfigError> {
        apply_env(&mut self)?;
        Ok(self)
    }

    pub fn with_base_url(mut self, url: String) -> Self {
        self.base_url = Some(url);
        self
    }

    pub fn with_list_path(mut self, path: String) -> Self {
        self.list_path = Some(path);
        self
    }

    pub fn with_detail_path(mut self, path: String) -> Self {
        self.detail_path = Some(path);
        self
    }

    pub fn with_home_path(mut self, path: String) -> Self {
        self.home_path = Some(path);
        self
    }

    /// Set the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the maximum number of attempts per request.
    pub fn with_max_retries(mut self, retries: usize) -> Self {
        self.max_retries = Some(retries);
        self
    }

    pub fn with_initial_retry_delay(mut self, delay: Duration) -> Self {
        self.initial_retry_delay = Some(delay);
        self
    }

    pub fn with_max_retry_delay(mut self, delay: Duration) -> Self {
        self.max_retry_delay = Some(delay);
        self
    }

    pub fn with_batch_size(mut self, size: usize) -> Self {
        self.batch_size = Some(size);
        self
    }

    pub fn with_page_size(mut self, size: u32) -> Self {
        self.page_size = Some(size);
        self
    }

    pub fn with_start_page(mut self, page: u32) -> Self {
        self.start_page = Some(page);
        self
    }

    /// Build the final configuration.
    pub fn build(self) -> Result<Config, ConfigError> {
        let base_url =
            validate_and_normalize_base_url(self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL))?;

        let connection = ConnectionConfig {
            base_url,
            timeout: self
                .timeout
                .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
        };

        let endpoints = EndpointConfig {
            list_path: validate_path(
                "list_path",
                self.list_path.unwrap_or_else(|| DEFAULT_LIST_PATH.to_string()),
            )?,
            detail_path: validate_path(
                "detail_path",
                self.detail_path
                    .unwrap_or_else(|| DEFAULT_DETAIL_PATH.to_string()),
            )?,
            home_path: validate_path(
                "home_path",
                self.home_path.unwrap_or_else(|| DEFAULT_HOME_PATH.to_string()),
            )?,
        };
        if !endpoints.detail_path.contains(DETAIL_ID_PLACEHOLDER) {
            return Err(ConfigError::InvalidEndpoint {
                var: "detail_path".to_string(),
                message: format!("must contain the {DETAIL_ID_PLACEHOLDER} placeholder"),
            });
        }

        let retry = RetryConfig {
            max_retries: self.max_retries.unwrap_or(DEFAULT_MAX_RETRIES),
            initial_delay: self
                .initial_retry_delay
                .unwrap_or(Duration::from_secs_f64(DEFAULT_INITIAL_RETRY_DELAY_SECS)),
            max_delay: self
                .max_retry_delay
                .unwrap_or(Duration::from_secs_f64(DEFAULT_MAX_RETRY_DELAY_SECS)),
        };

        let pipeline = PipelineConfig {
            batch_size: self.batch_size.unwrap_or(DEFAULT_BATCH_SIZE),
            page_size: self.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
            start_page: self.start_page.unwrap_or(DEFAULT_START_PAGE),
        };

        Self::validate_timeout(&connection)?;
        Self::validate_retry(&retry)?;
        Self::validate_pipeline(&pipeline)?;

        Ok(Config {
            connection,
            endpoints,
            retry,
            pipeline,
        })
    }

    fn validate_timeout(connection: &ConnectionConfig) -> Result<(), ConfigError> {
        let timeout_secs = connection.timeout.as_secs();

        if timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout {
                message: "timeout must be greater than 0 seconds".to_string(),
            });
        }

        if timeout_secs > MAX_TIMEOUT_SECS {
            return Err(ConfigError::InvalidTimeout {
                message: format!(
                    "timeout exceeds maximum allowed value of {} seconds",
                    MAX_TIMEOUT_SECS
                ),
            });
        }

        Ok(())
    }

    fn validate_retry(retry: &RetryConfig) -> Result<(), ConfigError> {
        if retry.max_retries == 0 || retry.max_retries > MAX_MAX_RETRIES {
            return Err(ConfigError::InvalidMaxRetries {
                message: format!(
                    "must be between 1 and {} (got {})",
                    MAX_MAX_RETRIES, retry.max_retries
                ),
            });
        }

        if retry.initial_delay > retry.max_delay {
            return Err(ConfigError::InvalidRetryDelay {
                message: format!(
                    "initial delay ({:?}) must not exceed max delay ({:?})",
                    retry.initial_delay, retry.max_delay
                ),
            });
        }

        Ok(())
    }

    fn validate_pipeline(pipeline: &PipelineConfig) -> Result<(), ConfigError> {
        if pipeline.batch_size == 0 {
            return Err(ConfigError::InvalidBatchSize {
                message: "batch size must be greater than 0".to_string(),
            });
        }

        if pipeline.page_size == 0 {
            return Err(ConfigError::InvalidPagination {
                message: "page size must be greater than 0".to_string(),
            });
        }

        if pipeline.start_page == 0 {
            return Err(ConfigError::InvalidPagination {
                message: "start page must be 1 or greater".to_string(),
            });
        }

        Ok(())
    }

    // Internal setters for use by other loader modules

    pub(crate) fn set_base_url(&mut self, url: Option<String>) {
        self.base_url = url;
    }

    pub(crate) fn set_list_path(&mut self, path: Option<String>) {
        self.list_path = path;
    }

    pub(crate) fn set_detail_path(&mut self, path: Option<String>) {
        self.detail_path = path;
    }

    pub(crate) fn set_home_path(&mut self, path: Option<String>) {
        self.home_path = path;
    }

    pub(crate) fn set_timeout(&mut self, timeout: Option<Duration>) {
        self.timeout = timeout;
    }

    pub(crate) fn set_max_retries(&mut self, retries: Option<usize>) {
        self.max_retries = retries;
    }

    pub(crate) fn set_initial_retry_delay(&mut self, delay: Option<Duration>) {
        self.initial_retry_delay = delay;
    }

    pub(crate) fn set_max_retry_delay(&mut self, delay: Option<Duration>) {
        self.max_retry_delay = delay;
    }

    pub(crate) fn set_batch_size(&mut self, size: Option<usize>) {
        self.batch_size = size;
    }

    pub(crate) fn set_page_size(&mut self, size: Option<u32>) {
        self.page_size = size;
    }

    pub(crate) fn set_start_page(&mut self, page: Option<u32>) {
        self.start_page = page;
    }
}

/// Validate a base URL and strip trailing slashes.
fn validate_and_normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return Err(ConfigError::MissingBaseUrl);
    }

    let parsed = url::Url::parse(trimmed).map_err(|e| ConfigError::InvalidValue {
        var: "base_url".into(),
        message: format!(
            "must be an absolute http(s) URL with a host (e.g. http://localhost:3123): {e}"
        ),
    })?;

    let scheme = parsed.scheme();
    if scheme != "http" && scheme != "https" {
        return Err(ConfigError::InvalidValue {
            var: "base_url".into(),
            message: format!(
                "scheme must be http or https (e.g. http://localhost:3123), got: {scheme}"
            ),
        });
    }

    if parsed.host_str().is_none() {
        return Err(ConfigError::InvalidValue {
            var: "base_url".into(),
            message: "host is required (e.g. http://localhost:3123)".into(),
        });
    }

    Ok(parsed.as_str().trim_end_matches('/').to_string())
}

fn validate_path(var: &str, path: String) -> Result<String, ConfigError> {
    let trimmed = path.trim();
    if !trimmed.starts_with('/') {
        return Err(ConfigError::InvalidEndpoint {
            var: var.to_string(),
            message: format!("must start with '/' (got {trimmed:?})"),
        });
    }
    Ok(trimmed.to_string())
}
