//! Tests for the configuration loader builder.
//!
//! Responsibilities:
//! - Test builder methods and defaults.
//! - Test environment variable handling and precedence.
//! - Test `.env` loading and the `DOTENV_DISABLED` gate.
//! - Test validation of every bounded setting.
//!
//! Invariants:
//! - Tests that touch process environment use `serial_test` or `env_lock()`.
//! - Temporary directories are cleaned up automatically via `tempfile`.

use std::sync::Mutex;

pub mod validation_tests;

/// Returns the global test lock for environment variable isolation.
pub fn env_lock() -> &'static Mutex<()> {
    crate::test_util::global_test_lock()
}
