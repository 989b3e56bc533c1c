//! Ingestion error types

use std::path::PathBuf;

use contracts::ContractError;
use thiserror::Error;

/// Ingestion error
#[derive(Debug, Error)]
pub enum IngestionError {
    /// Recording could not be opened or read
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A CSV row could not be decoded
    #[error("row {row}: {message}")]
    RowParse {
        /// 1-based data row (header excluded)
        row: usize,
        message: String,
    },

    /// The JSON document could not be decoded
    #[error("invalid JSON recording: {0}")]
    Json(#[from] serde_json::Error),

    /// Neither an explicit format nor a known extension
    #[error("cannot infer input format for {0}")]
    UnknownFormat(PathBuf),
}

impl IngestionError {
    /// Attach the source id and lift into the shared error type
    pub fn into_contract(self, source_id: &str) -> ContractError {
        match self {
            Self::Read { source, .. } => ContractError::Io(source),
            other => ContractError::input_parse(source_id, other.to_string()),
        }
    }
}

/// Ingestion Result type alias
pub type Result<T> = std::result::Result<T, IngestionError>;
