//! Animal ETL - command-line entry point.
//!
//! Responsibilities:
//! - Parse command-line arguments and environment variables.
//! - Install logging, optional OTLP export and the optional metrics endpoint.
//! - Run the pipeline once and print the report.
//! - Map the outcome to the process exit code.
//!
//! Does NOT handle:
//! - Extraction, transformation or loading (see `crates/pipeline`).
//! - HTTP details (see `crates/client`).
//!
//! Invariants:
//! - `load_dotenv()` is called BEFORE CLI parsing so `.env` can provide clap env fallbacks.
//! - Exit code is 0 only for a successful run; everything else exits 1.

mod args;
mod cancellation;
mod config_loader;
mod error;
mod report;
mod run;

use animal_etl_client::{MetricsCollector, MetricsExporter};
use animal_etl_config::ConfigLoader;
use animal_etl_pipeline::RunMode;
use args::Cli;
use cancellation::{CancellationToken, is_cancelled_error, print_cancelled_message};
use clap::Parser;
use error::ExitCode;

#[tokio::main]
async fn main() {
    // Load .env file BEFORE CLI parsing so clap env defaults can read .env values
    if let Err(e) = ConfigLoader::new().load_dotenv() {
        eprintln!("Failed to load environment: {}", e);
        std::process::exit(ExitCode::ConfigError.as_i32());
    }

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = if e.use_stderr() {
                ExitCode::ConfigError
            } else {
                ExitCode::Success
            };
            let _ = e.print();
            std::process::exit(code.as_i32());
        }
    };

    let tracing_guard = match cli.tracing_config().init() {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            std::process::exit(ExitCode::ConfigError.as_i32());
        }
    };

    let exit_code = execute(&cli).await;

    // Flush pending spans and buffered file logs; process::exit skips destructors.
    tracing_guard.shutdown();
    drop(tracing_guard);

    std::process::exit(exit_code.as_i32());
}

async fn execute(cli: &Cli) -> ExitCode {
    let _metrics_exporter = match cli.metrics_bind {
        Some(ref bind_addr) => match MetricsExporter::install(bind_addr) {
            Ok(exporter) => Some(exporter),
            Err(e) => {
                eprintln!("Failed to start metrics exporter: {}", e);
                return ExitCode::ConfigError;
            }
        },
        None => None,
    };
    let metrics = if cli.metrics_bind.is_some() {
        MetricsCollector::new()
    } else {
        MetricsCollector::disabled()
    };

    let config = match config_loader::build_config(cli) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Invalid configuration");
            eprintln!("Failed to build configuration: {}", e);
            return ExitCode::ConfigError;
        }
    };

    let mode = if cli.dry_run {
        RunMode::DryRun
    } else {
        RunMode::Normal
    };

    let cancel = CancellationToken::new();
    cancel.cancel_on_ctrl_c();

    match run::run_pipeline(&config, mode, metrics, &cancel).await {
        Ok(report) => {
            match report::render(&report, cli.output) {
                Ok(rendered) => println!("{rendered}"),
                Err(e) => eprintln!("Failed to render report: {:#}", e),
            }
            ExitCode::from(&report)
        }
        Err(e) if is_cancelled_error(&e) => {
            print_cancelled_message();
            ExitCode::Interrupted
        }
        Err(e) => {
            tracing::error!(error = %format!("{e:#}"), "Run aborted");
            eprintln!("{:#}", e);
            ExitCode::RunFailed
        }
    }
}
