//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use contracts::{DegeneratePolicy, InputFormat};

/// IMU Features - sliding-window feature extraction for IMU recordings
#[derive(Parser, Debug)]
#[command(
    name = "imu-features",
    author,
    version,
    about = "Sliding-window feature extraction for IMU recordings",
    long_about = "Segments an accelerometer + gyroscope recording into overlapping,\n\
                  time-bounded windows and computes one statistics summary per window.\n\n\
                  Summaries are fanned out to the sinks named in the configuration."
)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true, env = "IMU_FEATURES_VERBOSE")]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format
    #[arg(
        long,
        value_enum,
        default_value = "pretty",
        global = true,
        env = "IMU_FEATURES_LOG_FORMAT"
    )]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract window summaries from a recording
    Extract(ExtractArgs),

    /// Validate configuration file without running
    Validate(ValidateArgs),

    /// Display configuration information
    Info(InfoArgs),
}

/// Arguments for the `extract` command
#[derive(Parser, Debug, Clone)]
pub struct ExtractArgs {
    /// Path to configuration file (TOML or JSON); defaults apply when absent
    #[arg(short, long, env = "IMU_FEATURES_CONFIG")]
    pub config: Option<PathBuf>,

    /// Recording to read, overriding `input.path` from the configuration
    #[arg(short, long, env = "IMU_FEATURES_INPUT", conflicts_with = "synthetic")]
    pub input: Option<PathBuf>,

    /// Recording format, overriding the configuration and the file extension
    #[arg(long, value_enum)]
    pub format: Option<InputFormatArg>,

    /// Generate N synthetic readings instead of reading a file
    #[arg(long, value_name = "N")]
    pub synthetic: Option<usize>,

    /// Seed for synthetic readings
    #[arg(long, requires = "synthetic", env = "IMU_FEATURES_SEED")]
    pub seed: Option<u64>,

    /// Override segmentation.sampling_rate (Hz)
    #[arg(long)]
    pub sampling_rate: Option<f64>,

    /// Override segmentation.window_duration (seconds)
    #[arg(long)]
    pub window_duration: Option<f64>,

    /// Override segmentation.overlap_fraction, in [0, 1)
    #[arg(long)]
    pub overlap_fraction: Option<f64>,

    /// Override segmentation.start_window_id
    #[arg(long)]
    pub start_window_id: Option<u64>,

    /// Override features.degenerate_policy
    #[arg(long, value_enum)]
    pub degenerate_policy: Option<PolicyArg>,

    /// Print summaries as JSON to stdout instead of the run report
    #[arg(long)]
    pub json: bool,

    /// Channel buffer size between the pipeline and the dispatcher
    #[arg(
        long,
        default_value = "100",
        env = "IMU_FEATURES_BUFFER_SIZE",
        value_parser = buffer_size_parser
    )]
    pub buffer_size: usize,

    /// Metrics server port (0 = disabled)
    #[arg(long, default_value = "0", env = "IMU_FEATURES_METRICS_PORT")]
    pub metrics_port: u16,
}

fn buffer_size_parser(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(0) => Err("buffer size must be at least 1".to_string()),
        Ok(size) => Ok(size),
        Err(e) => Err(e.to_string()),
    }
}

/// Arguments for the `validate` command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to configuration file to validate
    #[arg(short, long, default_value = "features.toml", env = "IMU_FEATURES_CONFIG")]
    pub config: PathBuf,

    /// Output validation result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `info` command
#[derive(Parser, Debug)]
pub struct InfoArgs {
    /// Path to configuration file; built-in defaults are shown when absent
    #[arg(short, long, env = "IMU_FEATURES_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Show sink parameters
    #[arg(long)]
    pub sinks: bool,
}

/// Log output format
#[derive(ValueEnum, Clone, Debug, Default)]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    #[default]
    Pretty,
    /// Compact single-line format
    Compact,
}

/// Recording format flag
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum InputFormatArg {
    Csv,
    Json,
}

impl From<InputFormatArg> for InputFormat {
    fn from(arg: InputFormatArg) -> Self {
        match arg {
            InputFormatArg::Csv => InputFormat::Csv,
            InputFormatArg::Json => InputFormat::Json,
        }
    }
}

/// Degenerate window policy flag
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum PolicyArg {
    /// Emit the summary without an angle value
    Flag,
    /// Drop the window
    Skip,
    /// Abort the run
    Fail,
}

impl From<PolicyArg> for DegeneratePolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Flag => DegeneratePolicy::Flag,
            PolicyArg::Skip => DegeneratePolicy::Skip,
            PolicyArg::Fail => DegeneratePolicy::Fail,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_flags() {
        let cli = Cli::try_parse_from([
            "imu-features",
            "-v",
            "extract",
            "--input",
            "walk.csv",
            "--window-duration",
            "5",
            "--degenerate-policy",
            "skip",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 1);
        let Commands::Extract(args) = cli.command else {
            panic!("expected extract");
        };
        assert_eq!(args.input.as_deref(), Some(std::path::Path::new("walk.csv")));
        assert_eq!(args.window_duration, Some(5.0));
        assert!(matches!(args.degenerate_policy, Some(PolicyArg::Skip)));
        assert_eq!(args.metrics_port, 0);
    }

    #[test]
    fn test_input_conflicts_with_synthetic() {
        let result = Cli::try_parse_from([
            "imu-features",
            "extract",
            "--input",
            "walk.csv",
            "--synthetic",
            "100",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_seed_requires_synthetic() {
        assert!(Cli::try_parse_from(["imu-features", "extract", "--seed", "7"]).is_err());
        assert!(
            Cli::try_parse_from(["imu-features", "extract", "--synthetic", "10", "--seed", "7"])
                .is_ok()
        );
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["imu-features", "-q", "-v", "info"]).is_err());
    }

    #[test]
    fn test_zero_buffer_size_rejected() {
        let err = Cli::try_parse_from(["imu-features", "extract", "--buffer-size", "0"])
            .unwrap_err();
        assert!(err.to_string().contains("at least 1"), "got: {err}");

        let cli = Cli::try_parse_from(["imu-features", "extract", "--buffer-size", "1"]).unwrap();
        let Commands::Extract(args) = cli.command else {
            panic!("expected extract");
        };
        assert_eq!(args.buffer_size, 1);
    }
}
