//! # Feature Engine
//!
//! IMU window feature extraction.
//!
//! Stages:
//! - per-sample magnitude annotation
//! - time-bounded sliding window segmentation
//! - statistics / energy / orientation passes per window
//! - projection to `WindowSummary`
//!
//! ## Usage
//!
//! ```ignore
//! use feature_engine::{FeaturePipeline, PipelineConfig};
//!
//! let pipeline = FeaturePipeline::new(PipelineConfig::default())?;
//! for summary in pipeline.run(&readings)? {
//!     println!("{}: {:?}", summary.window_id, summary.gyro_angle_cosine);
//! }
//! ```

mod calculator;
mod energy;
mod engine;
mod magnitude;
mod orientation;
mod segmenter;
mod statistics;
mod window;

pub use calculator::{apply_all, WindowCalculator};
pub use energy::{compute_energy, EnergyCalculator};
pub use engine::{check_ordering, FeaturePipeline, PipelineReport};
pub use magnitude::{annotate, Sample};
pub use orientation::{gyro_angle, OrientationAngleCalculator};
pub use segmenter::WindowSegmenter;
pub use statistics::{compute_statistics, population_std_dev, StatisticsCalculator};
pub use window::{EnergyFeatures, GyroAngle, StatisticsFeatures, Window, WindowFeatures};

// Re-export contracts types
pub use contracts::{
    ContractError, DegeneratePolicy, GyroAxis, ImuReading, PipelineConfig, SegmentationConfig,
    Vector3, WindowSummary,
};
