//! Windows and their aggregate feature blocks.

use contracts::{ContractError, GyroAxis, WindowSummary};

use crate::magnitude::Sample;

/// Contiguous, time-bounded slice of samples with attached features
///
/// A window owns its samples; overlapping neighbours hold independent copies.
#[derive(Debug, Clone, PartialEq)]
pub struct Window {
    id: u64,
    start_index: usize,
    samples: Vec<Sample>,
    /// Feature blocks filled in by the calculator passes
    pub features: WindowFeatures,
}

/// Aggregates attached to a window
///
/// Each block is written by exactly one calculator and stays `None` until it runs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WindowFeatures {
    pub statistics: Option<StatisticsFeatures>,
    pub energy: Option<EnergyFeatures>,
    pub orientation: Option<GyroAngle>,
}

/// Output of the statistics pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatisticsFeatures {
    pub mean_accel_magnitude: f64,
    pub min_accel_magnitude: f64,
    pub mean_gyro_magnitude: f64,
    pub gyro_z_mean: f64,
    /// Population standard deviation (divisor `n`)
    pub gyro_z_std_dev: f64,
}

/// Output of the energy pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnergyFeatures {
    pub mean_accel_energy: f64,
    pub mean_gyro_energy: f64,
}

/// Output of the orientation pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GyroAngle {
    /// Cosine between the gyroscope Y and X channel vectors (not an angle)
    Cosine(f64),
    /// The named channel had zero norm across the whole window
    Degenerate(GyroAxis),
}

impl Window {
    pub(crate) fn new(id: u64, start_index: usize, samples: Vec<Sample>) -> Self {
        Self {
            id,
            start_index,
            samples,
            features: WindowFeatures::default(),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    /// Index of the first sample in the segmented sequence
    pub fn start_index(&self) -> usize {
        self.start_index
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Elapsed-time span `(first, last)` covered by the window
    pub fn time_span(&self) -> Option<(f64, f64)> {
        let first = self.samples.first()?;
        let last = self.samples.last()?;
        Some((first.seconds_elapsed(), last.seconds_elapsed()))
    }

    /// Zero-norm channel reported by the orientation pass, if any
    pub fn degenerate_axis(&self) -> Option<GyroAxis> {
        match self.features.orientation {
            Some(GyroAngle::Degenerate(axis)) => Some(axis),
            _ => None,
        }
    }

    /// Project the window onto its summary, dropping the raw samples
    ///
    /// # Errors
    /// `FeaturesIncomplete` if any calculator pass has not run.
    pub fn summarize(&self) -> Result<WindowSummary, ContractError> {
        let statistics = self.features.statistics.ok_or(ContractError::FeaturesIncomplete {
            window_id: self.id,
            missing: "statistics",
        })?;
        let energy = self.features.energy.ok_or(ContractError::FeaturesIncomplete {
            window_id: self.id,
            missing: "energy",
        })?;
        let orientation = self
            .features
            .orientation
            .ok_or(ContractError::FeaturesIncomplete {
                window_id: self.id,
                missing: "orientation",
            })?;

        let gyro_angle_cosine = match orientation {
            GyroAngle::Cosine(cosine) => Some(cosine),
            GyroAngle::Degenerate(_) => None,
        };

        Ok(WindowSummary {
            window_id: self.id,
            mean_accel_magnitude: statistics.mean_accel_magnitude,
            mean_gyro_magnitude: statistics.mean_gyro_magnitude,
            min_accel_magnitude: statistics.min_accel_magnitude,
            mean_gyro_energy: energy.mean_gyro_energy,
            mean_accel_energy: energy.mean_accel_energy,
            gyro_angle_cosine,
            gyro_z_std_dev: statistics.gyro_z_std_dev,
        })
    }
}
