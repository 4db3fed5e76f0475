//! Logging and OpenTelemetry tracing initialization.
//!
//! Installs one `tracing-subscriber` registry for the process with:
//! - an `EnvFilter` (`RUST_LOG` wins over the configured level)
//! - an optional console fmt layer (stderr, so stdout stays free for reports)
//! - an optional file layer through a non-blocking `tracing-appender` writer
//! - an optional OTLP layer through `tracing-opentelemetry`
//!
//! # Usage
//!
//! ```rust,ignore
//! use animal_etl_client::telemetry::TracingConfig;
//!
//! let guard = TracingConfig::new()
//!     .with_log_level("debug")
//!     .with_otlp_endpoint("http://localhost:4317")
//!     .init()?;
//! // Run application...
//! guard.shutdown(); // Flush spans before exit
//! ```

use std::path::PathBuf;
use std::time::Duration;

use opentelemetry::trace::TracerProvider;
use opentelemetry_sdk::trace::SdkTracerProvider;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use animal_etl_config::constants::DEFAULT_LOG_LEVEL;

/// Dependency targets capped at `warn` unless `RUST_LOG` says otherwise.
const NOISY_TARGETS: [&str; 5] = ["hyper", "hyper_util", "reqwest", "h2", "tonic"];

/// Configuration for logging and OpenTelemetry tracing.
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// Level directive used when `RUST_LOG` is unset (e.g. "info")
    pub log_level: String,
    /// OTLP endpoint (e.g., "http://localhost:4317" for Jaeger/Tempo)
    pub otlp_endpoint: Option<String>,
    /// Service name for trace attribution
    pub service_name: String,
    /// Service version
    pub service_version: String,
    /// Whether to enable the console (stderr) logging layer
    pub enable_console: bool,
    /// Log file written alongside the console
    pub log_file: Option<PathBuf>,
    /// OTLP export timeout
    pub timeout: Duration,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            otlp_endpoint: None,
            service_name: "animal-etl".to_string(),
            service_version: env!("CARGO_PKG_VERSION").to_string(),
            enable_console: true,
            log_file: None,
            timeout: Duration::from_secs(5),
        }
    }
}

impl TracingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    pub fn with_otlp_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.otlp_endpoint = Some(endpoint.into());
        self
    }

    pub fn with_service_name(mut self, name: impl Into<String>) -> Self {
        self.service_name = name.into();
        self
    }

    pub fn with_console(mut self, enable: bool) -> Self {
        self.enable_console = enable;
        self
    }

    pub fn with_log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file = Some(path.into());
        self
    }

    /// Filter directives applied when `RUST_LOG` is unset.
    pub fn default_directives(&self) -> String {
        let mut directives = self.log_level.to_lowercase();
        for target in NOISY_TARGETS {
            directives.push_str(&format!(",{target}=warn"));
        }
        directives
    }

    fn env_filter(&self) -> Result<EnvFilter, TracingError> {
        match EnvFilter::try_from_default_env() {
            Ok(filter) => Ok(filter),
            Err(_) => EnvFilter::try_new(self.default_directives())
                .map_err(|e| TracingError::InvalidFilter(e.to_string())),
        }
    }

    /// Initialize the global subscriber.
    ///
    /// # Returns
    /// A guard that must be held until application shutdown so buffered log
    /// lines and pending spans are flushed.
    ///
    /// # Errors
    /// Returns an error if the filter is invalid, the log file cannot be
    /// opened, the OTLP pipeline fails, or a subscriber is already installed.
    pub fn init(&self) -> Result<TracingGuard, TracingError> {
        let env_filter = self.env_filter()?;

        let provider = match self.otlp_endpoint {
            Some(ref endpoint) => Some(self.create_tracer_provider(endpoint)?),
            None => None,
        };
        let otel_layer = provider.as_ref().map(|p| {
            tracing_opentelemetry::layer().with_tracer(p.tracer(self.service_name.clone()))
        });

        let console_layer = self
            .enable_console
            .then(|| fmt::layer().with_target(false).with_writer(std::io::stderr));

        let (file_layer, file_guard) = match self.log_file {
            Some(ref path) => {
                let (writer, guard) = self.file_writer(path)?;
                let layer = fmt::layer().with_ansi(false).with_writer(writer);
                (Some(layer), Some(guard))
            }
            None => (None, None),
        };

        tracing_subscriber::registry()
            .with(env_filter)
            .with(otel_layer)
            .with(console_layer)
            .with(file_layer)
            .try_init()
            .map_err(|e| TracingError::InitError(e.to_string()))?;

        Ok(TracingGuard {
            provider,
            _file_guard: file_guard,
        })
    }

    fn file_writer(
        &self,
        path: &std::path::Path,
    ) -> Result<(tracing_appender::non_blocking::NonBlocking, WorkerGuard), TracingError> {
        let file_name = path
            .file_name()
            .ok_or_else(|| TracingError::LogFile(format!("not a file path: {}", path.display())))?;
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&dir)
            .map_err(|e| TracingError::LogFile(format!("{}: {e}", dir.display())))?;

        let appender = tracing_appender::rolling::never(dir, file_name);
        Ok(tracing_appender::non_blocking(appender))
    }

    fn create_tracer_provider(&self, endpoint: &str) -> Result<SdkTracerProvider, TracingError> {
        use opentelemetry_otlp::{Protocol, WithExportConfig};
        use opentelemetry_sdk::trace::{BatchConfig, BatchSpanProcessor, Sampler};

        let otlp_exporter = opentelemetry_otlp::SpanExporter::builder()
            .with_tonic()
            .with_endpoint(endpoint)
            .with_timeout(self.timeout)
            .with_protocol(Protocol::Grpc)
            .build()
            .map_err(|e| TracingError::InitError(e.to_string()))?;

        let batch_processor = BatchSpanProcessor::builder(otlp_exporter)
            .with_batch_config(BatchConfig::default())
            .build();

        let resource = opentelemetry_sdk::Resource::builder()
            .with_attributes(vec![
                opentelemetry::KeyValue::new("service.name", self.service_name.clone()),
                opentelemetry::KeyValue::new("service.version", self.service_version.clone()),
                opentelemetry::KeyValue::new("telemetry.sdk.name", "opentelemetry-rust"),
                opentelemetry::KeyValue::new("telemetry.sdk.language", "rust"),
            ])
            .build();

        let provider = SdkTracerProvider::builder()
            .with_span_processor(batch_processor)
            .with_resource(resource)
            .with_sampler(Sampler::ParentBased(Box::new(Sampler::AlwaysOn)))
            .build();

        Ok(provider)
    }
}

/// Guard that holds tracer and log writer resources.
///
/// Must be kept alive until application shutdown.
pub struct TracingGuard {
    provider: Option<SdkTracerProvider>,
    _file_guard: Option<WorkerGuard>,
}

impl TracingGuard {
    /// Shutdown the tracer and flush any pending spans.
    pub fn shutdown(&self) {
        if let Some(ref provider) = self.provider {
            let _ = provider.shutdown();
        }
    }
}

/// Errors that can occur during tracing initialization.
#[derive(Debug, thiserror::Error)]
pub enum TracingError {
    #[error("Failed to initialize tracing: {0}")]
    InitError(String),

    #[error("Invalid log filter: {0}")]
    InvalidFilter(String),

    #[error("Cannot open log file: {0}")]
    LogFile(String),
}

/// Inject the current span's trace context into request headers (W3C `traceparent`).
///
/// Without an active OpenTelemetry layer the context is empty and no header is added.
pub fn inject_trace_context(builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
    use opentelemetry::propagation::TextMapPropagator;
    use opentelemetry_sdk::propagation::TraceContextPropagator;
    use std::collections::HashMap;
    use tracing_opentelemetry::OpenTelemetrySpanExt;

    let propagator = TraceContextPropagator::new();
    let mut headers = HashMap::new();

    propagator.inject_context(&tracing::Span::current().context(), &mut headers);

    let mut result = builder;
    for (key, value) in headers {
        result = result.header(key, value);
    }
    result
}
