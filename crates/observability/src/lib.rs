//! # Observability
//!
//! Tracing + Prometheus metrics for the feature pipeline.
//!
//! - Logging setup shared by the CLI and demos (stderr, `RUST_LOG` aware)
//! - Prometheus exporter
//! - Window summary metrics and run statistics
//!
//! ## Example
//!
//! ```ignore
//! use observability::{init_logging, LogFormat, LoggingConfig};
//!
//! init_logging(&LoggingConfig::from_verbosity(LogFormat::Compact, 1, false))?;
//!
//! for summary in pipeline.run(&readings)? {
//!     observability::record_window_summary(&summary);
//! }
//! ```

pub mod metrics;

use anyhow::{Context, Result};
use metrics_exporter_prometheus::PrometheusBuilder;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

// Re-exports
pub use crate::metrics::{
    record_pipeline_duration_ms, record_readings_loaded, record_summaries_dispatched,
    record_window_summary, FeatureMetricsAggregator, MetricsSummary, RunningStats, StatsSummary,
};

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Structured JSON with source locations
    Json,
    /// Human-readable multi-line
    #[default]
    Pretty,
    /// Single line
    Compact,
}

/// How the process logs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    pub format: LogFormat,
    /// Filter used when `RUST_LOG` is unset
    pub default_level: &'static str,
    /// Only warnings and errors, regardless of `RUST_LOG`
    pub quiet: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            default_level: "info",
            quiet: false,
        }
    }
}

impl LoggingConfig {
    /// Map a `-v` count and `--quiet` flag to a config
    pub fn from_verbosity(format: LogFormat, verbose: u8, quiet: bool) -> Self {
        let default_level = match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        };
        Self {
            format,
            default_level,
            quiet,
        }
    }

    fn filter(&self) -> EnvFilter {
        if self.quiet {
            return EnvFilter::new("warn");
        }
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(self.default_level))
    }
}

/// Install the global tracing subscriber
///
/// Events go to stderr; stdout is left to command output such as `--json`.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let fmt_layer = match config.format {
        LogFormat::Json => fmt::layer()
            .with_writer(std::io::stderr)
            .json()
            .with_target(true)
            .with_thread_ids(true)
            .with_thread_names(true)
            .with_file(true)
            .with_line_number(true)
            .boxed(),
        LogFormat::Pretty => fmt::layer().with_writer(std::io::stderr).pretty().boxed(),
        LogFormat::Compact => fmt::layer()
            .with_writer(std::io::stderr)
            .compact()
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(config.filter())
        .with(fmt_layer)
        .try_init()
        .context("Failed to initialize tracing subscriber")?;

    Ok(())
}

/// Install the Prometheus exporter on `0.0.0.0:port`
pub fn init_metrics_only(port: u16) -> Result<()> {
    PrometheusBuilder::new()
        .with_http_listener(([0, 0, 0, 0], port))
        .install()
        .context("Failed to install Prometheus recorder")?;

    tracing::info!(port = port, "Prometheus metrics endpoint initialized");
    Ok(())
}
