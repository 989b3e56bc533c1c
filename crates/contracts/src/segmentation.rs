//! Feature pipeline configuration contracts that can be shared across crates.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::ContractError;

/// Sliding-window segmentation parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
pub struct SegmentationConfig {
    /// Nominal sampling rate (Hz)
    #[serde(default = "default_sampling_rate")]
    #[validate(range(exclusive_min = 0.0, message = "sampling_rate must be > 0"))]
    pub sampling_rate: f64,

    /// Window length in seconds of elapsed time
    #[serde(default = "default_window_duration")]
    #[validate(range(exclusive_min = 0.0, message = "window_duration must be > 0"))]
    pub window_duration: f64,

    /// Fraction of the nominal window size by which consecutive windows advance
    #[serde(default = "default_overlap_fraction")]
    #[validate(range(
        min = 0.0,
        exclusive_max = 1.0,
        message = "overlap_fraction must be in [0, 1)"
    ))]
    pub overlap_fraction: f64,

    /// Id assigned to the first emitted window
    #[serde(default)]
    pub start_window_id: u64,
}

fn default_sampling_rate() -> f64 {
    98.0
}

fn default_window_duration() -> f64 {
    20.0
}

fn default_overlap_fraction() -> f64 {
    0.5
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            sampling_rate: default_sampling_rate(),
            window_duration: default_window_duration(),
            overlap_fraction: default_overlap_fraction(),
            start_window_id: 0,
        }
    }
}

impl SegmentationConfig {
    /// Nominal number of samples in one window (`sampling_rate * window_duration`)
    pub fn window_size_samples(&self) -> f64 {
        self.sampling_rate * self.window_duration
    }

    /// Number of samples the window start advances per step
    ///
    /// Derived from the nominal sampling rate, not from the measured density.
    pub fn step_samples(&self) -> usize {
        (self.window_size_samples() * self.overlap_fraction).floor() as usize
    }

    /// Reject parameters the segmenter cannot run with
    ///
    /// # Errors
    /// `InvalidConfiguration` naming the first offending field.
    pub fn check(&self) -> Result<(), ContractError> {
        let fields = [
            ("sampling_rate", self.sampling_rate),
            ("window_duration", self.window_duration),
            ("overlap_fraction", self.overlap_fraction),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(ContractError::invalid_configuration(
                    format!("segmentation.{field}"),
                    format!("{field} must be finite, got {value}"),
                ));
            }
        }

        self.validate()
            .map_err(|errors| ContractError::from_validation("segmentation", &errors))?;

        // A zero step never advances the window start.
        if self.step_samples() == 0 {
            return Err(ContractError::invalid_configuration(
                "segmentation.overlap_fraction",
                format!(
                    "step of floor({} * {}) samples is zero; raise overlap_fraction or the window size",
                    self.window_size_samples(),
                    self.overlap_fraction
                ),
            ));
        }

        Ok(())
    }
}

/// Handling of windows whose gyroscope X or Y channel has zero norm
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DegeneratePolicy {
    /// Emit the summary with no angle value
    #[default]
    Flag,
    /// Omit the window from the output
    Skip,
    /// Abort the whole invocation
    Fail,
}

impl DegeneratePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Flag => "flag",
            Self::Skip => "skip",
            Self::Fail => "fail",
        }
    }
}

/// Complete configuration of one feature pipeline
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Segmentation parameters
    #[serde(default)]
    pub segmentation: SegmentationConfig,

    /// Degenerate window handling
    #[serde(default)]
    pub degenerate_policy: DegeneratePolicy,
}

impl PipelineConfig {
    /// Validate every parameter of the pipeline
    pub fn check(&self) -> Result<(), ContractError> {
        self.segmentation.check()
    }
}
