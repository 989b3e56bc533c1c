//! # IMU Features CLI
//!
//! Command-line entry point.
//!
//! - Configuration loading and validation
//! - Feature extraction from recordings or synthetic readings
//! - Summary dispatch to configured sinks

mod cli;
mod commands;
mod error;
mod pipeline;

use anyhow::Result;
use clap::Parser;
use observability::{LogFormat, LoggingConfig};
use tracing::info;

use cli::{Cli, Commands};
use commands::{run_extract, run_info, run_validate};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Initialize logging based on CLI options
    init_logging(&cli)?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "IMU Features CLI starting"
    );

    // Execute command
    let result = match &cli.command {
        Commands::Extract(args) => run_extract(args).await,
        Commands::Validate(args) => run_validate(args),
        Commands::Info(args) => run_info(args),
    };

    if let Err(ref e) = result {
        tracing::error!(error = %e, "Command failed");
    }

    result
}

/// Initialize logging based on CLI options
fn init_logging(cli: &Cli) -> Result<()> {
    let format = match cli.log_format {
        cli::LogFormat::Json => LogFormat::Json,
        cli::LogFormat::Pretty => LogFormat::Pretty,
        cli::LogFormat::Compact => LogFormat::Compact,
    };
    observability::init_logging(&LoggingConfig::from_verbosity(format, cli.verbose, cli.quiet))
}
