//! Configuration assembly for a run.
//!
//! Precedence, lowest to highest: defaults, `.env` (loaded in `main` before
//! parsing), environment variables, CLI flags.

use std::time::Duration;

use animal_etl_config::{Config, ConfigError, ConfigLoader};

use crate::args::Cli;

fn delay_from_secs(flag: &str, secs: f64) -> Result<Duration, ConfigError> {
    Duration::try_from_secs_f64(secs).map_err(|_| ConfigError::InvalidRetryDelay {
        message: format!("{flag} must be a non-negative, finite number of seconds (got {secs})"),
    })
}

/// Build the validated run configuration from the environment and flags.
pub fn build_config(cli: &Cli) -> Result<Config, ConfigError> {
    let mut loader = ConfigLoader::new().from_env()?;

    if let Some(ref url) = cli.base_url {
        loader = loader.with_base_url(url.clone());
    }
    if let Some(size) = cli.batch_size {
        loader = loader.with_batch_size(size);
    }
    if let Some(retries) = cli.max_retries {
        loader = loader.with_max_retries(retries);
    }
    if let Some(secs) = cli.timeout {
        loader = loader.with_timeout(Duration::from_secs(secs));
    }
    if let Some(secs) = cli.initial_retry_delay {
        loader = loader.with_initial_retry_delay(delay_from_secs("--initial-retry-delay", secs)?);
    }
    if let Some(secs) = cli.max_retry_delay {
        loader = loader.with_max_retry_delay(delay_from_secs("--max-retry-delay", secs)?);
    }
    if let Some(size) = cli.page_size {
        loader = loader.with_page_size(size);
    }
    if let Some(page) = cli.start_page {
        loader = loader.with_start_page(page);
    }

    loader.build()
}
