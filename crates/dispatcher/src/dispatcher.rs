//! Dispatcher - main loop for fan-out to sinks

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument};

use contracts::{SinkConfig, SinkType, WindowSummary};

use crate::error::DispatcherError;
use crate::handle::SinkHandle;
use crate::metrics::MetricsSnapshot;
use crate::sinks::{FileSink, LogSink};

/// Dispatcher configuration
#[derive(Debug, Clone, Default)]
pub struct DispatcherConfig {
    /// Sink configurations
    pub sinks: Vec<SinkConfig>,
}

/// Builder for creating a Dispatcher
pub struct DispatcherBuilder {
    config: DispatcherConfig,
    input_rx: mpsc::Receiver<WindowSummary>,
}

impl DispatcherBuilder {
    pub fn new(config: DispatcherConfig, input_rx: mpsc::Receiver<WindowSummary>) -> Self {
        Self { config, input_rx }
    }

    /// Build and start the dispatcher
    #[instrument(name = "dispatcher_builder_build", skip(self))]
    pub async fn build(self) -> Result<Dispatcher, DispatcherError> {
        let handles = Self::initialize_handles(&self.config).await?;

        Ok(Dispatcher {
            handles,
            input_rx: self.input_rx,
        })
    }

    #[instrument(
        name = "dispatcher_initialize_handles",
        skip(config),
        fields(sink_count = config.sinks.len())
    )]
    async fn initialize_handles(
        config: &DispatcherConfig,
    ) -> Result<Vec<SinkHandle>, DispatcherError> {
        let mut handles: Vec<SinkHandle> = Vec::with_capacity(config.sinks.len());
        for sink_config in &config.sinks {
            if handles.iter().any(|h| h.name() == sink_config.name) {
                return Err(DispatcherError::DuplicateSink(sink_config.name.clone()));
            }
            handles.push(create_sink_handle(sink_config).await?);
        }
        Ok(handles)
    }
}

/// Create a SinkHandle from configuration
#[instrument(
    name = "dispatcher_create_sink_handle",
    skip(config),
    fields(sink = %config.name, sink_type = ?config.sink_type)
)]
async fn create_sink_handle(config: &SinkConfig) -> Result<SinkHandle, DispatcherError> {
    match config.sink_type {
        SinkType::Log => {
            let sink = LogSink::new(&config.name);
            Ok(SinkHandle::spawn(sink, config.queue_capacity))
        }
        SinkType::File => {
            let sink = FileSink::from_params(&config.name, &config.params)
                .map_err(|e| DispatcherError::sink_creation(&config.name, e.to_string()))?;
            Ok(SinkHandle::spawn(sink, config.queue_capacity))
        }
    }
}

/// Fans summaries out to sinks
pub struct Dispatcher {
    handles: Vec<SinkHandle>,
    input_rx: mpsc::Receiver<WindowSummary>,
}

impl Dispatcher {
    /// Create a dispatcher with custom sink handles (for testing)
    pub fn with_handles(
        handles: Vec<SinkHandle>,
        input_rx: mpsc::Receiver<WindowSummary>,
    ) -> Self {
        Self { handles, input_rx }
    }

    /// Get metrics for all sinks
    pub fn metrics(&self) -> Vec<(String, MetricsSnapshot)> {
        Self::collect_metrics(&self.handles)
    }

    /// Run the dispatcher main loop
    ///
    /// Consumes summaries until the input channel closes, then drains and
    /// closes every sink. Returns the final per-sink metrics.
    #[instrument(name = "dispatcher_run", skip(self))]
    pub async fn run(mut self) -> Vec<(String, MetricsSnapshot)> {
        info!(sinks = self.handles.len(), "Dispatcher started");

        let mut summary_count: u64 = 0;

        while let Some(summary) = self.input_rx.recv().await {
            summary_count += 1;
            self.dispatch_summary(summary).await;

            if summary_count.is_multiple_of(100) {
                debug!(summaries = summary_count, "Dispatcher progress");
            }
        }

        info!(
            summaries = summary_count,
            "Dispatcher input closed, shutting down"
        );

        let metrics = Self::shutdown_handles(self.handles).await;

        info!("Dispatcher shutdown complete");
        metrics
    }

    /// Spawn the dispatcher as a background task
    pub fn spawn(self) -> JoinHandle<Vec<(String, MetricsSnapshot)>> {
        tokio::spawn(self.run())
    }

    /// Queue the summary on every sink, waiting on full queues
    async fn dispatch_summary(&self, summary: WindowSummary) {
        for handle in &self.handles {
            handle.send(summary).await;
        }
    }

    async fn shutdown_handles(handles: Vec<SinkHandle>) -> Vec<(String, MetricsSnapshot)> {
        let mut metrics = Vec::with_capacity(handles.len());
        for handle in handles {
            let name = handle.name().to_string();
            let sink_metrics = std::sync::Arc::clone(handle.metrics());
            handle.shutdown().await;
            metrics.push((name, sink_metrics.snapshot()));
        }
        metrics
    }

    fn collect_metrics(handles: &[SinkHandle]) -> Vec<(String, MetricsSnapshot)> {
        handles
            .iter()
            .map(|h| (h.name().to_string(), h.metrics().snapshot()))
            .collect()
    }
}

/// Convenience function to create a dispatcher from sink configs
#[instrument(name = "dispatcher_create", skip(sink_configs, input_rx))]
pub async fn create_dispatcher(
    sink_configs: Vec<SinkConfig>,
    input_rx: mpsc::Receiver<WindowSummary>,
) -> Result<Dispatcher, DispatcherError> {
    let config = DispatcherConfig {
        sinks: sink_configs,
    };
    DispatcherBuilder::new(config, input_rx).build().await
}
