//! Mean signal energy pass.

use contracts::{ContractError, Vector3};

use crate::calculator::{non_empty, WindowCalculator};
use crate::magnitude::Sample;
use crate::window::{EnergyFeatures, Window};

/// Fills [`EnergyFeatures`] for each window
#[derive(Debug, Clone, Copy, Default)]
pub struct EnergyCalculator;

impl WindowCalculator for EnergyCalculator {
    fn name(&self) -> &'static str {
        "energy"
    }

    fn apply(&self, window: &mut Window) -> Result<(), ContractError> {
        non_empty(window)?;
        window.features.energy = compute_energy(window.samples());
        Ok(())
    }
}

/// Mean of the per-sample squared channel norms, from the raw axes
pub fn compute_energy(samples: &[Sample]) -> Option<EnergyFeatures> {
    if samples.is_empty() {
        return None;
    }
    let n = samples.len() as f64;

    Some(EnergyFeatures {
        mean_accel_energy: mean_energy(samples.iter().map(Sample::accelerometer), n),
        mean_gyro_energy: mean_energy(samples.iter().map(Sample::gyroscope), n),
    })
}

fn mean_energy<'a>(channel: impl Iterator<Item = &'a Vector3>, n: f64) -> f64 {
    channel.map(Vector3::sum_of_squares).sum::<f64>() / n
}
