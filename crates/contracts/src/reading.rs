//! ImuReading - sample source output
//!
//! One raw tri-axis accelerometer + gyroscope reading.

use serde::{Deserialize, Serialize};

/// Raw IMU reading as delivered by a sample source
///
/// Units pass through unchanged; accelerometer and gyroscope unit conventions
/// are the caller's responsibility.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImuReading {
    /// Absolute device timestamp
    pub time: f64,

    /// Seconds since the start of the recording (window clock)
    pub seconds_elapsed: f64,

    /// Accelerometer triple
    pub accelerometer: Vector3,

    /// Gyroscope triple
    pub gyroscope: Vector3,
}

impl ImuReading {
    /// Build a reading from its eight scalar channels
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        time: f64,
        seconds_elapsed: f64,
        accel_x: f64,
        accel_y: f64,
        accel_z: f64,
        gyro_x: f64,
        gyro_y: f64,
        gyro_z: f64,
    ) -> Self {
        Self {
            time,
            seconds_elapsed,
            accelerometer: Vector3::new(accel_x, accel_y, accel_z),
            gyroscope: Vector3::new(gyro_x, gyro_y, gyro_z),
        }
    }

    /// First channel holding NaN or an infinity, in column order
    pub fn first_non_finite(&self) -> Option<(&'static str, f64)> {
        let (a, g) = (&self.accelerometer, &self.gyroscope);
        [
            ("time", self.time),
            ("seconds_elapsed", self.seconds_elapsed),
            ("accel_x", a.x),
            ("accel_y", a.y),
            ("accel_z", a.z),
            ("gyro_x", g.x),
            ("gyro_y", g.y),
            ("gyro_z", g.z),
        ]
        .into_iter()
        .find(|(_, v)| !v.is_finite())
    }
}

/// 3D vector
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Sum of the squared components
    pub fn sum_of_squares(&self) -> f64 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    /// Euclidean norm
    pub fn norm(&self) -> f64 {
        self.sum_of_squares().sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vector_norm() {
        let v = Vector3::new(3.0, 4.0, 12.0);
        assert!((v.sum_of_squares() - 169.0).abs() < 1e-12);
        assert!((v.norm() - 13.0).abs() < 1e-12);
    }

    #[test]
    fn test_first_non_finite_channel() {
        let clean = ImuReading::new(0.0, 0.0, 0.0, 0.0, 9.8, 0.1, 0.2, 0.3);
        assert_eq!(clean.first_non_finite(), None);

        let bad = ImuReading::new(0.0, 1.0, 0.0, f64::INFINITY, 9.8, 0.1, f64::NAN, 0.3);
        let (channel, value) = bad.first_non_finite().unwrap();
        assert_eq!(channel, "accel_y");
        assert!(value.is_infinite());
    }

    #[test]
    fn test_reading_json_shape() {
        let reading = ImuReading::new(1.0, 0.5, 0.1, 0.2, 9.8, 0.0, 0.0, 0.3);
        let json = serde_json::to_value(reading).unwrap();
        assert_eq!(json["seconds_elapsed"], 0.5);
        assert_eq!(json["accelerometer"]["z"], 9.8);
        assert_eq!(json["gyroscope"]["z"], 0.3);
    }
}
