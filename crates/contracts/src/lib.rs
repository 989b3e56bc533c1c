//! # Contracts
//!
//! Frozen interface contracts shared by every crate in the workspace.
//! Business crates depend on this crate only; reverse dependencies are prohibited.
//!
//! ## Time Model
//! - `seconds_elapsed` (seconds since recording start, f64) drives windowing
//! - `time` is the absolute device timestamp, carried through untouched

mod blueprint;
mod error;
mod reading;
mod sample_source;
mod segmentation;
mod sink;
mod summary;

pub use blueprint::*;
pub use error::*;
pub use reading::*;
pub use sample_source::SampleSource;
pub use segmentation::*;
pub use sink::*;
pub use summary::*;
