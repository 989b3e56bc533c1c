//! SampleSource trait - sample data source abstraction
//!
//! Decouples the feature engine from where readings come from
//! (recorded files, synthetic generators).

use crate::{ContractError, ImuReading};

/// Sample data source trait
///
/// The feature pipeline works on a complete, already-collected sequence, so a
/// source hands over every reading at once rather than streaming them.
///
/// # Example
///
/// ```ignore
/// let source: Box<dyn SampleSource> = Box::new(CsvSampleSource::new("walk.csv"));
/// let readings = source.load()?;
/// let summaries = pipeline.run(&readings)?;
/// ```
pub trait SampleSource: Send + Sync {
    /// Source identifier (used for logging/errors)
    fn source_id(&self) -> &str;

    /// Load every reading, ordered by `seconds_elapsed`
    ///
    /// # Errors
    /// Returns `InputParse` or `Io` when the underlying data cannot be read.
    fn load(&self) -> Result<Vec<ImuReading>, ContractError>;
}
