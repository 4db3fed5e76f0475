//! Validation tests for the configuration loader builder.
//!
//! Responsibilities:
//! - Test timeout, retry, batch and pagination bounds.
//! - Test base URL and endpoint path validation.

use crate::constants::{MAX_MAX_RETRIES, MAX_TIMEOUT_SECS};
use crate::loader::builder::ConfigLoader;
use crate::loader::error::ConfigError;
use std::time::Duration;

// ============================================================================
// Timeout
// ============================================================================

#[test]
fn test_timeout_zero_invalid() {
    let result = ConfigLoader::new()
        .with_timeout(Duration::from_secs(0))
        .build();
    match result {
        Err(ConfigError::InvalidTimeout { message }) => {
            assert!(message.contains("must be greater than 0"), "got: {message}");
        }
        other => panic!("Expected InvalidTimeout for zero timeout, got {other:?}"),
    }
}

#[test]
fn test_timeout_exceeds_max_invalid() {
    let result = ConfigLoader::new()
        .with_timeout(Duration::from_secs(MAX_TIMEOUT_SECS + 1))
        .build();
    assert!(matches!(result, Err(ConfigError::InvalidTimeout { .. })));
}

#[test]
fn test_timeout_at_max_valid() {
    let config = ConfigLoader::new()
        .with_timeout(Duration::from_secs(MAX_TIMEOUT_SECS))
        .build()
        .unwrap();
    assert_eq!(config.connection.timeout.as_secs(), MAX_TIMEOUT_SECS);
}

// ============================================================================
// Retry
// ============================================================================

#[test]
fn test_max_retries_zero_invalid() {
    let result = ConfigLoader::new().with_max_retries(0).build();
    assert!(matches!(result, Err(ConfigError::InvalidMaxRetries { .. })));
}

#[test]
fn test_max_retries_bounds() {
    assert!(ConfigLoader::new().with_max_retries(1).build().is_ok());
    assert!(
        ConfigLoader::new()
            .with_max_retries(MAX_MAX_RETRIES)
            .build()
            .is_ok()
    );
    assert!(matches!(
        ConfigLoader::new()
            .with_max_retries(MAX_MAX_RETRIES + 1)
            .build(),
        Err(ConfigError::InvalidMaxRetries { .. })
    ));
}

#[test]
fn test_initial_delay_above_max_delay_invalid() {
    let result = ConfigLoader::new()
        .with_initial_retry_delay(Duration::from_secs(10))
        .with_max_retry_delay(Duration::from_secs(5))
        .build();
    assert!(matches!(result, Err(ConfigError::InvalidRetryDelay { .. })));
}

#[test]
fn test_zero_delays_are_allowed() {
    let config = ConfigLoader::new()
        .with_initial_retry_delay(Duration::ZERO)
        .with_max_retry_delay(Duration::ZERO)
        .build()
        .unwrap();
    assert_eq!(config.retry.initial_delay, Duration::ZERO);
}

// ============================================================================
// Batch size and pagination
// ============================================================================

#[test]
fn test_batch_size_zero_invalid() {
    let result = ConfigLoader::new().with_batch_size(0).build();
    assert!(matches!(result, Err(ConfigError::InvalidBatchSize { .. })));
}

#[test]
fn test_batch_size_above_endpoint_limit_is_accepted() {
    // Clamping happens at run time, not at load time.
    let config = ConfigLoader::new().with_batch_size(500).build().unwrap();
    assert_eq!(config.pipeline.batch_size, 500);
}

#[test]
fn test_page_size_and_start_page_must_be_positive() {
    assert!(matches!(
        ConfigLoader::new().with_page_size(0).build(),
        Err(ConfigError::InvalidPagination { .. })
    ));
    assert!(matches!(
        ConfigLoader::new().with_start_page(0).build(),
        Err(ConfigError::InvalidPagination { .. })
    ));
}

// ============================================================================
// Base URL and endpoints
// ============================================================================

#[test]
fn test_base_url_trailing_slash_is_stripped() {
    let config = ConfigLoader::new()
        .with_base_url("http://localhost:3123///".to_string())
        .build()
        .unwrap();
    assert_eq!(config.connection.base_url, "http://localhost:3123");
}

#[test]
fn test_base_url_blank_is_missing() {
    let result = ConfigLoader::new().with_base_url("   ".to_string()).build();
    assert!(matches!(result, Err(ConfigError::MissingBaseUrl)));
}

#[test]
fn test_base_url_rejects_other_schemes_and_relative_urls() {
    for raw in ["ftp://localhost:3123", "localhost:3123", "/animals"] {
        let result = ConfigLoader::new().with_base_url(raw.to_string()).build();
        assert!(
            matches!(result, Err(ConfigError::InvalidValue { .. })),
            "{raw} should be rejected, got {result:?}"
        );
    }
}

#[test]
fn test_detail_path_requires_placeholder() {
    let result = ConfigLoader::new()
        .with_detail_path("/animals/v1/animals".to_string())
        .build();
    assert!(matches!(result, Err(ConfigError::InvalidEndpoint { .. })));
}

#[test]
fn test_paths_must_be_absolute() {
    let result = ConfigLoader::new()
        .with_home_path("animals/v1/home".to_string())
        .build();
    match result {
        Err(ConfigError::InvalidEndpoint { var, .. }) => assert_eq!(var, "home_path"),
        other => panic!("unexpected: {other:?}"),
    }
}
