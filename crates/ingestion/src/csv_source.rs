//! CSV recordings
//!
//! Header: `time,seconds_elapsed,accel_x,accel_y,accel_z,gyro_x,gyro_y,gyro_z`.
//! Extra columns are ignored; column order does not matter.

use std::io::Read;
use std::path::{Path, PathBuf};

use contracts::{ContractError, ImuReading, SampleSource};
use csv::{ReaderBuilder, Trim};
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::error::{IngestionError, Result};

/// One CSV row as written by the recorder
#[derive(Debug, Deserialize)]
struct CsvRow {
    time: f64,
    seconds_elapsed: f64,
    accel_x: f64,
    accel_y: f64,
    accel_z: f64,
    gyro_x: f64,
    gyro_y: f64,
    gyro_z: f64,
}

impl CsvRow {
    fn into_reading(self, row: usize) -> Result<ImuReading> {
        let reading = ImuReading::new(
            self.time,
            self.seconds_elapsed,
            self.accel_x,
            self.accel_y,
            self.accel_z,
            self.gyro_x,
            self.gyro_y,
            self.gyro_z,
        );
        match reading.first_non_finite() {
            Some((column, value)) => Err(IngestionError::RowParse {
                row,
                message: format!("{column} is not finite ({value})"),
            }),
            None => Ok(reading),
        }
    }
}

/// Decode readings from any CSV byte stream
pub fn read_csv<R: Read>(reader: R) -> Result<Vec<ImuReading>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut readings = Vec::new();
    for (idx, result) in reader.deserialize::<CsvRow>().enumerate() {
        let row = idx + 1;
        let record = result.map_err(|e| IngestionError::RowParse {
            row,
            message: e.to_string(),
        })?;
        readings.push(record.into_reading(row)?);
    }
    Ok(readings)
}

/// CSV file sample source
#[derive(Debug, Clone)]
pub struct CsvSampleSource {
    source_id: String,
    path: PathBuf,
}

impl CsvSampleSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            source_id: path.display().to_string(),
            path,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Vec<ImuReading>> {
        let file = std::fs::File::open(&self.path).map_err(|source| IngestionError::Read {
            path: self.path.clone(),
            source,
        })?;
        read_csv(std::io::BufReader::new(file))
    }
}

impl SampleSource for CsvSampleSource {
    fn source_id(&self) -> &str {
        &self.source_id
    }

    #[instrument(name = "csv_source_load", skip(self), fields(source_id = %self.source_id))]
    fn load(&self) -> std::result::Result<Vec<ImuReading>, ContractError> {
        let readings = self.read().map_err(|e| e.into_contract(&self.source_id))?;
        metrics::counter!("imu_features_readings_loaded_total", "format" => "csv")
            .increment(readings.len() as u64);
        debug!(readings = readings.len(), "csv recording loaded");
        Ok(readings)
    }
}
