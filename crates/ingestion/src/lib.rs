//! # Ingestion
//!
//! IMU sample sources.
//!
//! Responsibilities:
//! - Load recorded readings from CSV or JSON files
//! - Generate synthetic readings for testing
//! - Pick a source from a path and optional explicit format
//!
//! ## Usage Example
//!
//! ```ignore
//! use contracts::SampleSource;
//! use ingestion::open_source;
//!
//! let source = open_source("walk.csv".as_ref(), None)?;
//! let readings = source.load()?;
//! ```
//!
//! ## Mock Testing
//!
//! ```ignore
//! use ingestion::MockSampleSource;
//!
//! let readings = MockSampleSource::seeded(2000, 98.0, 42).generate();
//! ```

mod csv_source;
mod error;
mod json_source;
mod mock;

use std::path::Path;

use contracts::{InputFormat, SampleSource};

// Re-exports
pub use contracts::ImuReading;
pub use csv_source::{read_csv, CsvSampleSource};
pub use error::{IngestionError, Result};
pub use json_source::{read_json, JsonSampleSource};
pub use mock::{MockSampleConfig, MockSampleSource};

/// Build a file source for `path`
///
/// `format` wins over the extension when both are present.
///
/// # Errors
/// `UnknownFormat` if no format is given and the extension is not recognised.
pub fn open_source(path: &Path, format: Option<InputFormat>) -> Result<Box<dyn SampleSource>> {
    let format = format
        .or_else(|| InputFormat::from_path(path))
        .ok_or_else(|| IngestionError::UnknownFormat(path.to_path_buf()))?;

    Ok(match format {
        InputFormat::Csv => Box::new(CsvSampleSource::new(path)),
        InputFormat::Json => Box::new(JsonSampleSource::new(path)),
    })
}
