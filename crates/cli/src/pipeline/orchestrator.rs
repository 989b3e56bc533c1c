//! Pipeline orchestrator - coordinates all components.
//!
//! source -> feature pipeline -> dispatcher -> sinks

use std::path::PathBuf;
use std::time::Instant;

use contracts::{FeatureBlueprint, InputFormat, SampleSource, WindowSummary};
use feature_engine::FeaturePipeline;
use ingestion::{MockSampleConfig, MockSampleSource};
use observability::{
    record_pipeline_duration_ms, record_readings_loaded, record_summaries_dispatched,
    record_window_summary,
};
use tokio::sync::mpsc;
use tracing::{info, instrument, warn};

use super::PipelineStats;
use crate::error::{CliError, Result};

/// Where readings come from
#[derive(Debug, Clone)]
pub enum SampleInput {
    /// Recording on disk; format inferred from the extension when `None`
    File {
        path: PathBuf,
        format: Option<InputFormat>,
    },
    /// Generated readings at the configured sampling rate
    Synthetic { count: usize, seed: Option<u64> },
}

/// Pipeline configuration
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Validated blueprint with CLI overrides applied
    pub blueprint: FeatureBlueprint,

    /// Reading source
    pub input: SampleInput,

    /// Channel buffer size; 0 is treated as 1
    pub buffer_size: usize,

    /// Metrics server port (None = disabled)
    pub metrics_port: Option<u16>,
}

/// Output of one run
#[derive(Debug)]
pub struct PipelineOutput {
    pub summaries: Vec<WindowSummary>,
    pub stats: PipelineStats,
}

/// Main pipeline orchestrator
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    /// Create a new pipeline with the given configuration
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Run the pipeline to completion
    ///
    /// Configuration and input errors abort before anything reaches a sink.
    #[instrument(name = "cli_pipeline_run", skip(self))]
    pub async fn run(self) -> Result<PipelineOutput> {
        let start_time = Instant::now();
        let blueprint = &self.config.blueprint;

        if let Some(port) = self.config.metrics_port {
            observability::init_metrics_only(port)?;
            info!(port, "Metrics endpoint available");
        }

        let engine = FeaturePipeline::new(blueprint.to_pipeline_config())?;

        let source = self.open_source()?;
        let readings = source.load()?;
        record_readings_loaded(source.source_id(), readings.len());
        info!(
            source = source.source_id(),
            readings = readings.len(),
            "Readings loaded"
        );

        let (summaries, report) = engine.run_with_report(&readings)?;

        let mut stats = PipelineStats {
            source_id: source.source_id().to_string(),
            report,
            ..Default::default()
        };
        for summary in &summaries {
            record_window_summary(summary);
            stats.features.update(summary);
        }

        stats.sinks = self.dispatch(&summaries).await?;
        for (name, snapshot) in &stats.sinks {
            record_summaries_dispatched(name, snapshot.write_count, snapshot.failure_count);
        }

        stats.duration = start_time.elapsed();
        record_pipeline_duration_ms(stats.duration.as_secs_f64() * 1000.0);

        info!(
            duration_secs = stats.duration.as_secs_f64(),
            windows = stats.report.windows,
            emitted = stats.report.emitted(),
            "Pipeline complete"
        );

        Ok(PipelineOutput { summaries, stats })
    }

    fn open_source(&self) -> Result<Box<dyn SampleSource>> {
        match &self.config.input {
            SampleInput::File { path, format } => {
                info!(path = %path.display(), format = ?format, "Opening recording");
                Ok(ingestion::open_source(path, *format)?)
            }
            SampleInput::Synthetic { count, seed } => {
                info!(count, seed = ?seed, "Running with SYNTHETIC readings");
                Ok(Box::new(MockSampleSource::new(MockSampleConfig {
                    source_id: "synthetic".to_string(),
                    count: *count,
                    sampling_rate: self.config.blueprint.segmentation.sampling_rate,
                    seed: *seed,
                })))
            }
        }
    }

    /// Fan summaries out to the configured sinks and wait for them to drain
    async fn dispatch(
        &self,
        summaries: &[WindowSummary],
    ) -> Result<Vec<(String, dispatcher::MetricsSnapshot)>> {
        let sinks = self.config.blueprint.sinks.clone();
        if sinks.is_empty() {
            warn!("No sinks configured - summaries are not persisted");
            return Ok(Vec::new());
        }

        let (summary_tx, summary_rx) =
            mpsc::channel::<WindowSummary>(self.config.buffer_size.max(1));
        let dispatcher = dispatcher::create_dispatcher(sinks, summary_rx).await?;
        let dispatcher_handle = dispatcher.spawn();

        for summary in summaries {
            if summary_tx.send(*summary).await.is_err() {
                warn!("Dispatcher channel closed");
                break;
            }
        }
        drop(summary_tx);

        dispatcher_handle.await.map_err(CliError::from)
    }
}
