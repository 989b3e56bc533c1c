//! Sink implementations
//!
//! Contains LogSink and FileSink.

mod file;
mod log;

pub use self::file::{FileSink, FileSinkConfig};
pub use self::log::LogSink;

#[cfg(test)]
pub(crate) fn test_summary(window_id: u64) -> contracts::WindowSummary {
    contracts::WindowSummary {
        window_id,
        mean_accel_magnitude: 9.81,
        mean_gyro_magnitude: 0.5,
        min_accel_magnitude: 9.5,
        mean_gyro_energy: 0.3,
        mean_accel_energy: 96.3,
        gyro_angle_cosine: Some(0.25),
        gyro_z_std_dev: 0.1,
    }
}
