//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//! - Read flag fallbacks from environment variables (after `.env` is loaded).
//! - Translate logging flags into a [`TracingConfig`].
//!
//! Non-responsibilities:
//! - Does not validate configuration values (see `config_loader` module).
//! - Does not run the pipeline (see `run` module).

use std::path::PathBuf;

use animal_etl_client::TracingConfig;
use animal_etl_config::{
    ENV_BASE_URL, ENV_BATCH_SIZE, ENV_INITIAL_RETRY_DELAY, ENV_MAX_RETRIES, ENV_MAX_RETRY_DELAY,
    ENV_PAGE_SIZE, ENV_START_PAGE, ENV_TIMEOUT,
};
use clap::{Parser, ValueEnum};

/// Log verbosity accepted by `--log-level`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub const fn as_str(self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Format of the end-of-run report printed to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "animal-etl")]
#[command(
    about = "Animal ETL - extract animals from the Animal API, normalize them and load them back in batches",
    long_about = None
)]
#[command(version)]
#[command(
    after_help = "Examples:\n  animal-etl\n  animal-etl --base-url http://localhost:3123 --batch-size 50\n  animal-etl --dry-run --output json\n  animal-etl --log-level debug --log-file logs/etl.log\n"
)]
pub struct Cli {
    /// Base URL of the Animal API (e.g., http://localhost:3123)
    #[arg(long, env = ENV_BASE_URL)]
    pub base_url: Option<String>,

    /// Records per submission batch (at most 100)
    #[arg(long, env = ENV_BATCH_SIZE)]
    pub batch_size: Option<usize>,

    /// Total attempts per request, including the first
    #[arg(long, env = ENV_MAX_RETRIES)]
    pub max_retries: Option<usize>,

    /// Request timeout in seconds
    #[arg(long, env = ENV_TIMEOUT)]
    pub timeout: Option<u64>,

    /// Delay before the first retry, in seconds
    #[arg(long, env = ENV_INITIAL_RETRY_DELAY, value_name = "SECONDS")]
    pub initial_retry_delay: Option<f64>,

    /// Upper bound on any retry delay, in seconds
    #[arg(long, env = ENV_MAX_RETRY_DELAY, value_name = "SECONDS")]
    pub max_retry_delay: Option<f64>,

    /// Items requested per list page
    #[arg(long, env = ENV_PAGE_SIZE)]
    pub page_size: Option<u32>,

    /// First list page to fetch
    #[arg(long, env = ENV_START_PAGE)]
    pub start_page: Option<u32>,

    /// Log verbosity (RUST_LOG takes precedence when set)
    #[arg(long, env = "LOG_LEVEL", value_enum, ignore_case = true, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Also write logs to this file
    #[arg(long, env = "ETL_LOG_FILE", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Report format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,

    /// Extract, fetch details and transform, but submit nothing
    #[arg(long)]
    pub dry_run: bool,

    /// OTLP collector endpoint for trace export (e.g., http://localhost:4317)
    #[arg(long, env = "OTEL_EXPORTER_OTLP_ENDPOINT", value_name = "URL")]
    pub otlp_endpoint: Option<String>,

    /// Service name reported with exported traces
    #[arg(long, env = "OTEL_SERVICE_NAME", default_value = "animal-etl")]
    pub otel_service_name: String,

    /// Serve Prometheus metrics at this address (e.g., 127.0.0.1:9090)
    #[arg(long, env = "ETL_METRICS_BIND", value_name = "ADDR")]
    pub metrics_bind: Option<String>,
}

impl Cli {
    /// Logging setup requested by the flags.
    pub fn tracing_config(&self) -> TracingConfig {
        let mut config = TracingConfig::new()
            .with_log_level(self.log_level.as_str())
            .with_service_name(self.otel_service_name.clone());

        if let Some(ref endpoint) = self.otlp_endpoint {
            config = config.with_otlp_endpoint(endpoint.clone());
        }
        if let Some(ref path) = self.log_file {
            config = config.with_log_file(path.clone());
        }
        config
    }
}
