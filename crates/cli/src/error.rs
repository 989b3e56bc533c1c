//! Error types for CLI operations.

use std::path::PathBuf;

use thiserror::Error;

/// CLI-specific error types
#[derive(Error, Debug)]
pub enum CliError {
    /// Configuration file not found
    #[error("Configuration file not found: {}", path.display())]
    ConfigNotFound { path: PathBuf },

    /// Neither a recording nor synthetic generation was requested
    #[error("No input: pass --input, --synthetic or set input.path in the configuration")]
    NoInput,

    /// Configuration, input or feature extraction failure
    #[error(transparent)]
    Contract(#[from] contracts::ContractError),

    /// Source construction failure
    #[error(transparent)]
    Ingestion(#[from] ingestion::IngestionError),

    /// Sink setup failure
    #[error(transparent)]
    Dispatcher(#[from] dispatcher::DispatcherError),

    /// The dispatcher task panicked or was cancelled
    #[error("Dispatcher task failed: {0}")]
    DispatcherTask(#[from] tokio::task::JoinError),

    /// Metrics exporter or other setup failure
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CliError {
    pub fn config_not_found(path: impl Into<PathBuf>) -> Self {
        Self::ConfigNotFound { path: path.into() }
    }
}

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
