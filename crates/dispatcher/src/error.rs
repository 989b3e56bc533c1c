//! Dispatcher error types

use thiserror::Error;

/// Errors raised while building the sink fan-out
#[derive(Debug, Error)]
pub enum DispatcherError {
    /// A sink could not be opened from its parameters
    #[error("failed to create sink '{name}': {message}")]
    SinkCreation { name: String, message: String },

    /// Two sinks share a name; metrics and logs key on it
    #[error("sink name '{0}' is used more than once")]
    DuplicateSink(String),
}

impl DispatcherError {
    pub fn sink_creation(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SinkCreation {
            name: name.into(),
            message: message.into(),
        }
    }
}
