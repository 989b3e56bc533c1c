//! # Dispatcher
//!
//! Summary fan-out.
//!
//! Responsibilities:
//! - Consume `WindowSummary` values
//! - Fan out to every configured sink
//! - Isolate slow or failing sinks behind per-sink queues

pub mod dispatcher;
pub mod error;
pub mod handle;
pub mod metrics;
pub mod sinks;

pub use contracts::{SummarySink, WindowSummary};
pub use dispatcher::{
    create_dispatcher, Dispatcher, DispatcherBuilder, DispatcherConfig,
};
pub use error::DispatcherError;
pub use handle::SinkHandle;
pub use metrics::{MetricsSnapshot, SinkMetrics};
pub use sinks::{FileSink, FileSinkConfig, LogSink};
