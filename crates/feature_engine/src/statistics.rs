//! Mean / minimum / population standard deviation pass.

use contracts::ContractError;

use crate::calculator::{non_empty, WindowCalculator};
use crate::magnitude::Sample;
use crate::window::{StatisticsFeatures, Window};

/// Fills [`StatisticsFeatures`] for each window
#[derive(Debug, Clone, Copy, Default)]
pub struct StatisticsCalculator;

impl WindowCalculator for StatisticsCalculator {
    fn name(&self) -> &'static str {
        "statistics"
    }

    fn apply(&self, window: &mut Window) -> Result<(), ContractError> {
        non_empty(window)?;
        window.features.statistics = compute_statistics(window.samples());
        Ok(())
    }
}

/// Two-pass statistics over a sample slice; `None` when it is empty
pub fn compute_statistics(samples: &[Sample]) -> Option<StatisticsFeatures> {
    if samples.is_empty() {
        return None;
    }
    let n = samples.len() as f64;

    let mut gyro_z_sum = 0.0;
    let mut accel_magnitude_sum = 0.0;
    let mut gyro_magnitude_sum = 0.0;
    let mut min_accel_magnitude = f64::INFINITY;

    for sample in samples {
        gyro_z_sum += sample.gyroscope().z;
        accel_magnitude_sum += sample.accel_magnitude();
        gyro_magnitude_sum += sample.gyro_magnitude();
        min_accel_magnitude = min_accel_magnitude.min(sample.accel_magnitude());
    }

    let gyro_z_mean = gyro_z_sum / n;

    Some(StatisticsFeatures {
        mean_accel_magnitude: accel_magnitude_sum / n,
        min_accel_magnitude,
        mean_gyro_magnitude: gyro_magnitude_sum / n,
        gyro_z_mean,
        gyro_z_std_dev: population_std_dev(samples.iter().map(|s| s.gyroscope().z), gyro_z_mean),
    })
}

/// `sqrt(Σ(v − mean)² / n)` around a precomputed mean
///
/// Returns 0.0 for an empty sequence.
pub fn population_std_dev(values: impl Iterator<Item = f64>, mean: f64) -> f64 {
    let (count, squared_deviations) = values.fold((0usize, 0.0), |(count, acc), v| {
        let deviation = v - mean;
        (count + 1, acc + deviation * deviation)
    });

    if count == 0 {
        return 0.0;
    }
    (squared_deviations / count as f64).sqrt()
}
