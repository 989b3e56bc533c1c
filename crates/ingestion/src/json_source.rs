//! JSON recordings: a single array of readings.

use std::io::Read;
use std::path::{Path, PathBuf};

use contracts::{ContractError, ImuReading, SampleSource};
use tracing::{debug, instrument};

use crate::error::{IngestionError, Result};

/// Decode a JSON array of readings from any byte stream
pub fn read_json<R: Read>(reader: R) -> Result<Vec<ImuReading>> {
    Ok(serde_json::from_reader(reader)?)
}

/// JSON file sample source
#[derive(Debug, Clone)]
pub struct JsonSampleSource {
    source_id: String,
    path: PathBuf,
}

impl JsonSampleSource {
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
        read_json(std::io::BufReader::new(file))
    }
}

impl SampleSource for JsonSampleSource {
    fn source_id(&self) -> &str {
        &self.source_id
    }

    #[instrument(name = "json_source_load", skip(self), fields(source_id = %self.source_id))]
    fn load(&self) -> std::result::Result<Vec<ImuReading>, ContractError> {
        let readings = self.read().map_err(|e| e.into_contract(&self.source_id))?;
        metrics::counter!("imu_features_readings_loaded_total", "format" => "json")
            .increment(readings.len() as u64);
        debug!(readings = readings.len(), "json recording loaded");
        Ok(readings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const RECORDING: &str = r#"[
        {
            "time": 0.0,
            "seconds_elapsed": 0.0,
            "accelerometer": { "x": 0.0, "y": 0.0, "z": 9.8 },
            "gyroscope": { "x": 0.1, "y": 0.2, "z": 0.3 }
        },
        {
            "time": 1.0,
            "seconds_elapsed": 0.01,
            "accelerometer": { "x": 0.5, "y": 0.0, "z": 9.7 },
            "gyroscope": { "x": 0.0, "y": 0.2, "z": -0.3 }
        }
    ]"#;

    #[test]
    fn test_read_json() {
        let readings = read_json(RECORDING.as_bytes()).unwrap();
        assert_eq!(readings.len(), 2);
        assert_eq!(readings[0].accelerometer.z, 9.8);
        assert_eq!(readings[1].gyroscope.z, -0.3);
    }

    #[test]
    fn test_invalid_json() {
        let err = read_json(r#"[{ "time": 0.0 }]"#.as_bytes()).unwrap_err();
        assert!(matches!(err, IngestionError::Json(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(RECORDING.as_bytes()).unwrap();

        let readings = JsonSampleSource::new(file.path()).load().unwrap();
        assert_eq!(readings.len(), 2);
    }

    #[test]
    fn test_parse_error_names_source() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(b"{ not json").unwrap();

        let err = JsonSampleSource::new(file.path()).load().unwrap_err();
        assert!(matches!(err, ContractError::InputParse { .. }));
        assert!(err.to_string().contains(&file.path().display().to_string()));
    }
}
