//! Pipeline orchestration module.

mod orchestrator;
mod stats;

pub use orchestrator::{Pipeline, PipelineConfig, PipelineOutput, SampleInput};
pub use stats::PipelineStats;
