//! SummarySink trait - dispatcher output interface
//!
//! Defines the abstract interface for sinks.

use crate::{ContractError, WindowSummary};

/// Summary output trait
///
/// All sink implementations must implement this trait.
#[trait_variant::make(SummarySink: Send)]
pub trait LocalSummarySink {
    /// Sink name (used for logging/metrics)
    fn name(&self) -> &str;

    /// Write one window summary
    ///
    /// # Errors
    /// Returns write error (should include context)
    async fn write(&mut self, summary: &WindowSummary) -> Result<(), ContractError>;

    /// Flush buffer (if any)
    async fn flush(&mut self) -> Result<(), ContractError>;

    /// Close sink
    async fn close(&mut self) -> Result<(), ContractError>;
}
