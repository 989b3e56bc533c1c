//! WindowSummary - feature pipeline output
//!
//! Statistics-only projection of one window; raw samples never leave the engine.

use serde::{Deserialize, Serialize};

/// Gyroscope channel named by a degenerate-window report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GyroAxis {
    X,
    Y,
}

impl GyroAxis {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::X => "x",
            Self::Y => "y",
        }
    }
}

impl std::fmt::Display for GyroAxis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-window feature summary
///
/// Field order follows the downstream classifier's feature vector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowSummary {
    /// Id of the source window
    pub window_id: u64,

    /// Mean acceleration magnitude
    pub mean_accel_magnitude: f64,

    /// Mean gyroscope magnitude
    pub mean_gyro_magnitude: f64,

    /// Minimum acceleration magnitude
    pub min_accel_magnitude: f64,

    /// Mean per-sample gyroscope sum of squares
    pub mean_gyro_energy: f64,

    /// Mean per-sample accelerometer sum of squares
    pub mean_accel_energy: f64,

    /// Cosine between the gyroscope Y and X channel vectors
    ///
    /// Historically called the "gyro angle"; the value is the cosine, not an
    /// angle in radians. `None` marks a degenerate (zero-norm) window.
    pub gyro_angle_cosine: Option<f64>,

    /// Population standard deviation of the gyroscope Z channel
    pub gyro_z_std_dev: f64,
}

impl WindowSummary {
    /// Whether the orientation feature could not be computed
    pub fn is_degenerate(&self) -> bool {
        self.gyro_angle_cosine.is_none()
    }

    /// Column names matching [`WindowSummary::to_row`]
    pub const COLUMNS: [&'static str; 8] = [
        "window_id",
        "mean_accel_magnitude",
        "mean_gyro_magnitude",
        "min_accel_magnitude",
        "mean_gyro_energy",
        "mean_accel_energy",
        "gyro_angle_cosine",
        "gyro_z_std_dev",
    ];

    /// Flat text row for tabular sinks; a degenerate angle is an empty cell
    pub fn to_row(&self) -> [String; 8] {
        [
            self.window_id.to_string(),
            self.mean_accel_magnitude.to_string(),
            self.mean_gyro_magnitude.to_string(),
            self.min_accel_magnitude.to_string(),
            self.mean_gyro_energy.to_string(),
            self.mean_accel_energy.to_string(),
            self.gyro_angle_cosine
                .map(|c| c.to_string())
                .unwrap_or_default(),
            self.gyro_z_std_dev.to_string(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(angle: Option<f64>) -> WindowSummary {
        WindowSummary {
            window_id: 7,
            mean_accel_magnitude: 9.8,
            mean_gyro_magnitude: 0.5,
            min_accel_magnitude: 9.1,
            mean_gyro_energy: 0.3,
            mean_accel_energy: 96.2,
            gyro_angle_cosine: angle,
            gyro_z_std_dev: 0.05,
        }
    }

    #[test]
    fn test_degenerate_row_has_empty_angle() {
        let row = summary(None).to_row();
        assert_eq!(row[0], "7");
        assert_eq!(row[6], "");
        assert!(summary(None).is_degenerate());
        assert!(!summary(Some(0.0)).is_degenerate());
    }

    #[test]
    fn test_json_uses_null_for_degenerate_angle() {
        let json = serde_json::to_value(summary(None)).unwrap();
        assert!(json["gyro_angle_cosine"].is_null());
        assert_eq!(json["window_id"], 7);
    }
}
