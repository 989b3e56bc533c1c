//! Per-sample magnitude annotation.

use contracts::{ImuReading, Vector3};

/// Annotated sample: a raw reading plus its derived channel magnitudes
///
/// Only [`annotate`] builds samples, so every sample the segmenter sees
/// carries magnitudes computed from its own reading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    reading: ImuReading,
    accel_magnitude: f64,
    gyro_magnitude: f64,
}

impl Sample {
    pub(crate) fn from_reading(reading: ImuReading) -> Self {
        Self {
            accel_magnitude: reading.accelerometer.norm(),
            gyro_magnitude: reading.gyroscope.norm(),
            reading,
        }
    }

    pub fn reading(&self) -> &ImuReading {
        &self.reading
    }

    pub fn seconds_elapsed(&self) -> f64 {
        self.reading.seconds_elapsed
    }

    pub fn accelerometer(&self) -> &Vector3 {
        &self.reading.accelerometer
    }

    pub fn gyroscope(&self) -> &Vector3 {
        &self.reading.gyroscope
    }

    /// `sqrt(ax² + ay² + az²)`
    pub fn accel_magnitude(&self) -> f64 {
        self.accel_magnitude
    }

    /// `sqrt(gx² + gy² + gz²)`
    pub fn gyro_magnitude(&self) -> f64 {
        self.gyro_magnitude
    }
}

/// Derive acceleration and gyroscope magnitudes for every reading
pub fn annotate(readings: &[ImuReading]) -> Vec<Sample> {
    readings.iter().copied().map(Sample::from_reading).collect()
}
