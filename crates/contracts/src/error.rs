//! Layered error definitions
//!
//! Categorized by source: config / input / window / sink

use thiserror::Error;
use validator::ValidationErrors;

use crate::GyroAxis;

/// Unified error type
#[derive(Debug, Error)]
pub enum ContractError {
    // ===== Configuration Errors =====
    /// Configuration parse error
    #[error("config parse error: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration rejected before any computation
    #[error("invalid configuration at '{field}': {message}")]
    InvalidConfiguration { field: String, message: String },

    // ===== Input Errors =====
    /// The sample sequence is empty
    #[error("empty input: at least one sample is required")]
    EmptyInput,

    /// `seconds_elapsed` decreased between two consecutive samples
    #[error(
        "unordered input at sample {index}: seconds_elapsed {current} < previous {previous}"
    )]
    UnorderedInput {
        index: usize,
        previous: f64,
        current: f64,
    },

    /// A reading carries NaN or an infinity
    #[error("non-finite input at sample {index}: {channel} is {value}")]
    NonFiniteInput {
        index: usize,
        channel: &'static str,
        value: f64,
    },

    /// A sample source could not decode its input
    #[error("input parse error for source '{source_id}': {message}")]
    InputParse { source_id: String, message: String },

    // ===== Window Errors =====
    /// A calculator received a window without samples
    #[error("window {window_id} has no samples")]
    EmptyWindow { window_id: u64 },

    /// Zero-norm gyroscope channel in the orientation pass
    #[error("window {window_id} is degenerate: gyroscope {axis} channel has zero norm")]
    DegenerateWindow { window_id: u64, axis: GyroAxis },

    /// Projection attempted before every calculator pass ran
    #[error("window {window_id} is missing its {missing} features")]
    FeaturesIncomplete {
        window_id: u64,
        missing: &'static str,
    },

    // ===== Sink Errors =====
    /// Sink write error
    #[error("sink '{sink_name}' write error: {message}")]
    SinkWrite { sink_name: String, message: String },

    // ===== General Errors =====
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Other error
    #[error("{0}")]
    Other(String),
}

impl ContractError {
    /// Create configuration parse error
    pub fn config_parse(message: impl Into<String>) -> Self {
        Self::ConfigParse {
            message: message.into(),
            source: None,
        }
    }

    /// Create invalid configuration error
    pub fn invalid_configuration(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Convert `validator` rule violations into an invalid configuration error
    ///
    /// Reports the alphabetically first failing field so the message is stable.
    pub fn from_validation(prefix: &str, errors: &ValidationErrors) -> Self {
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));

        match fields.first() {
            Some((field, violations)) => {
                let message = violations
                    .iter()
                    .map(|v| v.to_string())
                    .collect::<Vec<_>>()
                    .join("; ");
                Self::invalid_configuration(format!("{prefix}.{field}"), message)
            }
            None => Self::invalid_configuration(prefix, errors.to_string()),
        }
    }

    /// Create input parse error
    pub fn input_parse(source_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InputParse {
            source_id: source_id.into(),
            message: message.into(),
        }
    }

    /// Create sink write error
    pub fn sink_write(sink_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SinkWrite {
            sink_name: sink_name.into(),
            message: message.into(),
        }
    }

    /// Whether the error aborts a whole pipeline invocation
    ///
    /// Only per-window degeneracies are recoverable.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::DegenerateWindow { .. })
    }
}
