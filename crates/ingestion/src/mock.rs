//! Synthetic sample source
//!
//! For running the pipeline without a recording.

use contracts::{ContractError, ImuReading, SampleSource};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

/// Mock sample source configuration
#[derive(Debug, Clone)]
pub struct MockSampleConfig {
    /// Source ID
    pub source_id: String,

    /// Number of readings to generate
    pub count: usize,

    /// Sampling rate (Hz) used for `seconds_elapsed`
    pub sampling_rate: f64,

    /// RNG seed; `None` draws from the OS
    pub seed: Option<u64>,
}

impl Default for MockSampleConfig {
    fn default() -> Self {
        Self {
            source_id: "mock".to_string(),
            count: 1000,
            sampling_rate: 98.0,
            seed: None,
        }
    }
}

/// Mock sample source
///
/// Reading `i` has `time = i`, `seconds_elapsed = i / sampling_rate` and every
/// axis drawn uniformly from `[-5.0, 5.0)` on a 0.1 grid.
#[derive(Debug, Clone)]
pub struct MockSampleSource {
    config: MockSampleConfig,
}

impl MockSampleSource {
    pub fn new(config: MockSampleConfig) -> Self {
        Self { config }
    }

    /// Reproducible source of `count` readings
    pub fn seeded(count: usize, sampling_rate: f64, seed: u64) -> Self {
        Self::new(MockSampleConfig {
            count,
            sampling_rate,
            seed: Some(seed),
            ..Default::default()
        })
    }

    pub fn config(&self) -> &MockSampleConfig {
        &self.config
    }

    /// Generate the readings
    pub fn generate(&self) -> Vec<ImuReading> {
        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        (0..self.config.count)
            .map(|i| {
                let t = i as f64;
                let mut axis = || rng.random_range(-50i32..50) as f64 / 10.0;
                ImuReading::new(
                    t,
                    t / self.config.sampling_rate,
                    axis(),
                    axis(),
                    axis(),
                    axis(),
                    axis(),
                    axis(),
                )
            })
            .collect()
    }
}

impl SampleSource for MockSampleSource {
    fn source_id(&self) -> &str {
        &self.config.source_id
    }

    fn load(&self) -> Result<Vec<ImuReading>, ContractError> {
        let readings = self.generate();
        debug!(
            source_id = %self.config.source_id,
            readings = readings.len(),
            seed = ?self.config.seed,
            "mock readings generated"
        );
        Ok(readings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamps() {
        let readings = MockSampleSource::seeded(50, 10.0, 1).generate();
        assert_eq!(readings.len(), 50);
        for (i, r) in readings.iter().enumerate() {
            assert_eq!(r.time, i as f64);
            assert!((r.seconds_elapsed - i as f64 / 10.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_values_on_grid() {
        let readings = MockSampleSource::seeded(200, 98.0, 42).generate();
        for r in &readings {
            for v in [
                r.accelerometer.x,
                r.accelerometer.y,
                r.accelerometer.z,
                r.gyroscope.x,
                r.gyroscope.y,
                r.gyroscope.z,
            ] {
                assert!((-5.0..5.0).contains(&v), "out of range: {v}");
                assert!(((v * 10.0).round() - v * 10.0).abs() < 1e-9, "off grid: {v}");
            }
        }
    }

    #[test]
    fn test_seed_is_reproducible() {
        let a = MockSampleSource::seeded(100, 98.0, 7).load().unwrap();
        let b = MockSampleSource::seeded(100, 98.0, 7).load().unwrap();
        let c = MockSampleSource::seeded(100, 98.0, 8).load().unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_zero_count() {
        assert!(MockSampleSource::seeded(0, 98.0, 0).load().unwrap().is_empty());
    }
}
