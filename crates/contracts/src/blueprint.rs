//! FeatureBlueprint - Config Loader output
//!
//! Describes a complete extraction run: segmentation, feature policy, input, sink routing.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use validator::Validate;

use crate::{DegeneratePolicy, PipelineConfig, SegmentationConfig};

/// Config version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConfigVersion {
    #[default]
    V1,
}

/// Complete extraction blueprint
///
/// Every section has defaults, so an empty document is a valid blueprint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeatureBlueprint {
    /// Config version
    #[serde(default)]
    pub version: ConfigVersion,

    /// Sliding-window parameters
    #[serde(default)]
    pub segmentation: SegmentationConfig,

    /// Feature pass settings
    #[serde(default)]
    pub features: FeatureSettings,

    /// Sample input (optional, the CLI may supply it)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<InputConfig>,

    /// Output routing
    #[serde(default)]
    pub sinks: Vec<SinkConfig>,
}

impl FeatureBlueprint {
    /// Pipeline configuration described by this blueprint
    pub fn to_pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            segmentation: self.segmentation,
            degenerate_policy: self.features.degenerate_policy,
        }
    }
}

/// Feature pass settings
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct FeatureSettings {
    /// What to do with windows whose gyroscope X or Y channel is all zero
    #[serde(default)]
    pub degenerate_policy: DegeneratePolicy,
}

/// Sample input configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputConfig {
    /// Recording path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    /// Recording format; inferred from the extension when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<InputFormat>,
}

/// Recording format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputFormat {
    /// `time,seconds_elapsed,accel_x,accel_y,accel_z,gyro_x,gyro_y,gyro_z`
    Csv,
    /// JSON array of readings
    Json,
}

impl InputFormat {
    /// Infer format from file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    /// Infer format from a path's extension
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }
}

/// Sink output configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SinkConfig {
    /// Sink name
    #[validate(length(min = 1, message = "sink name cannot be empty"))]
    pub name: String,

    /// Sink type
    pub sink_type: SinkType,

    /// Queue capacity
    #[serde(default = "default_queue_capacity")]
    #[validate(range(min = 1, message = "queue_capacity must be >= 1"))]
    pub queue_capacity: usize,

    /// Type-specific parameters
    #[serde(default)]
    pub params: HashMap<String, String>,
}

fn default_queue_capacity() -> usize {
    100
}

impl SinkConfig {
    /// Log sink with default queue capacity
    pub fn log(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sink_type: SinkType::Log,
            queue_capacity: default_queue_capacity(),
            params: HashMap::new(),
        }
    }
}

impl SinkConfig {
    /// Type-specific parameter by key
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }
}

/// On-disk layout of a file sink
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryFileFormat {
    /// One JSON object per line
    #[default]
    Jsonl,
    /// Header row plus one row per summary
    Csv,
}

impl SummaryFileFormat {
    /// Parse the `format` sink parameter
    pub fn from_param(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "jsonl" | "ndjson" => Some(Self::Jsonl),
            "csv" => Some(Self::Csv),
            _ => None,
        }
    }
}

/// Sink type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SinkType {
    /// Structured log output
    Log,
    /// File output (JSON Lines or CSV)
    File,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let blueprint: FeatureBlueprint = serde_json::from_str("{}").unwrap();
        assert_eq!(blueprint.version, ConfigVersion::V1);
        assert_eq!(blueprint.segmentation, SegmentationConfig::default());
        assert_eq!(blueprint.features.degenerate_policy, DegeneratePolicy::Flag);
        assert!(blueprint.input.is_none());
        assert!(blueprint.sinks.is_empty());
    }

    #[test]
    fn test_pipeline_config_projection() {
        let mut blueprint = FeatureBlueprint::default();
        blueprint.segmentation.window_duration = 5.0;
        blueprint.features.degenerate_policy = DegeneratePolicy::Skip;

        let config = blueprint.to_pipeline_config();
        assert_eq!(config.segmentation.window_duration, 5.0);
        assert_eq!(config.degenerate_policy, DegeneratePolicy::Skip);
    }

    #[test]
    fn test_input_format_from_path() {
        assert_eq!(
            InputFormat::from_path(Path::new("run/walk.CSV")),
            Some(InputFormat::Csv)
        );
        assert_eq!(
            InputFormat::from_path(Path::new("walk.json")),
            Some(InputFormat::Json)
        );
        assert_eq!(InputFormat::from_path(Path::new("walk.parquet")), None);
        assert_eq!(InputFormat::from_path(Path::new("walk")), None);
    }

    #[test]
    fn test_sink_config_rules() {
        let mut sink = SinkConfig::log("console");
        assert!(sink.validate().is_ok());

        sink.queue_capacity = 0;
        assert!(sink.validate().is_err());

        let unnamed = SinkConfig::log("");
        assert!(unnamed.validate().is_err());
    }

    #[test]
    fn test_summary_file_format_param() {
        assert_eq!(
            SummaryFileFormat::from_param("JSONL"),
            Some(SummaryFileFormat::Jsonl)
        );
        assert_eq!(
            SummaryFileFormat::from_param("csv"),
            Some(SummaryFileFormat::Csv)
        );
        assert_eq!(SummaryFileFormat::from_param("parquet"), None);
    }
}
