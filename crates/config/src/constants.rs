//! Centralized constants for the Animal ETL workspace.
//!
//! This module contains default values used across crates to avoid
//! magic number duplication and improve maintainability.

// =============================================================================
// Upstream API
// =============================================================================

/// Default base URL of the Animal API.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3123";

/// Default path of the paginated list endpoint.
pub const DEFAULT_LIST_PATH: &str = "/animals/v1/animals";

/// Default path template of the detail endpoint. `{id}` is replaced by the animal id.
pub const DEFAULT_DETAIL_PATH: &str = "/animals/v1/animals/{id}";

/// Default path of the submission endpoint.
pub const DEFAULT_HOME_PATH: &str = "/animals/v1/home";

/// Placeholder substituted in the detail path template.
pub const DETAIL_ID_PLACEHOLDER: &str = "{id}";

// =============================================================================
// Connection & Timeout Defaults
// =============================================================================

/// Default HTTP request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Maximum allowed request timeout in seconds (1 hour).
pub const MAX_TIMEOUT_SECS: u64 = 3600;

/// Default maximum number of HTTP redirects to follow.
pub const DEFAULT_MAX_REDIRECTS: usize = 5;

// =============================================================================
// Retry Defaults
// =============================================================================

/// Default maximum number of attempts for one logical request.
pub const DEFAULT_MAX_RETRIES: usize = 3;

/// Upper bound accepted for the attempt budget.
pub const MAX_MAX_RETRIES: usize = 10;

/// Default delay before the first retry, in seconds.
pub const DEFAULT_INITIAL_RETRY_DELAY_SECS: f64 = 1.0;

/// Default cap on the backoff delay, in seconds.
pub const DEFAULT_MAX_RETRY_DELAY_SECS: f64 = 60.0;

/// HTTP status codes that are retried with backoff.
pub const RETRY_STATUS_CODES: [u16; 4] = [500, 502, 503, 504];

// =============================================================================
// Pipeline Defaults
// =============================================================================

/// Hard limit on records accepted by the submission endpoint per request.
pub const MAX_BATCH_SIZE: usize = 100;

/// Default number of records per submitted batch.
pub const DEFAULT_BATCH_SIZE: usize = MAX_BATCH_SIZE;

/// Default page size requested from the list endpoint.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// First page requested from the list endpoint.
pub const DEFAULT_START_PAGE: u32 = 1;

// =============================================================================
// Logging
// =============================================================================

/// Default log level when neither `--log-level` nor `RUST_LOG` is set.
pub const DEFAULT_LOG_LEVEL: &str = "info";
