//! Configuration loader for `.env` files and environment variables.
//!
//! Responsibilities:
//! - Load configuration from `.env` files and environment variables.
//! - Provide a builder-pattern `ConfigLoader` for layered configuration merging.
//! - Enforce `DOTENV_DISABLED` gate to prevent accidental dotenv loading in tests.
//!
//! Invariants / Assumptions:
//! - Environment variables take precedence over `.env` values
//!   (dotenvy never overwrites variables that are already set).
//! - Builder overrides take precedence over environment variables.

mod builder;
mod env;
mod error;

#[cfg(test)]
mod tests;

pub use builder::ConfigLoader;
pub use env::{
    ENV_BASE_URL, ENV_BATCH_SIZE, ENV_DETAIL_PATH, ENV_HOME_PATH, ENV_INITIAL_RETRY_DELAY,
    ENV_LIST_PATH, ENV_MAX_RETRIES, ENV_MAX_RETRY_DELAY, ENV_PAGE_SIZE, ENV_START_PAGE,
    ENV_TIMEOUT, env_var_or_none,
};
pub use error::ConfigError;
