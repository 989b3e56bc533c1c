//! Synthetic Pipeline Example
//!
//! Loads a configuration file, generates seeded synthetic IMU readings,
//! extracts window summaries and fans them out via the dispatcher.
//!
//! Run with: cargo run -p imu_features_demos --bin synthetic_pipeline [config_path]

use std::path::PathBuf;
use std::time::Duration;

use config_loader::ConfigLoader;
use contracts::{SampleSource, WindowSummary};
use dispatcher::create_dispatcher;
use feature_engine::FeaturePipeline;
use ingestion::{MockSampleConfig, MockSampleSource};
use observability::{init_logging, FeatureMetricsAggregator, LogFormat, LoggingConfig};
use tokio::sync::mpsc;
use tracing::{info, warn};

/// One minute of readings at the demo's sampling rate
const DEMO_SECONDS: f64 = 60.0;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging(&LoggingConfig::from_verbosity(LogFormat::Compact, 0, false))?;

    info!("Starting Synthetic Pipeline Demo");

    let config_path = resolve_config_path();
    info!(path = %config_path.display(), "Loading config file");
    let blueprint = ConfigLoader::load_from_path(config_path.as_path())?;

    // ==== Stage 1: Generate readings ====
    let sampling_rate = blueprint.segmentation.sampling_rate;
    let source = MockSampleSource::new(MockSampleConfig {
        source_id: "demo".to_string(),
        count: (sampling_rate * DEMO_SECONDS) as usize,
        sampling_rate,
        seed: Some(2024),
    });
    let readings = source.load()?;
    info!(readings = readings.len(), "Synthetic readings generated");

    // ==== Stage 2: Extract features ====
    let pipeline = FeaturePipeline::new(blueprint.to_pipeline_config())?;
    let (summaries, report) = pipeline.run_with_report(&readings)?;
    info!(
        windows = report.windows,
        degenerate = report.degenerate_windows,
        emitted = report.emitted(),
        "Features extracted"
    );

    // ==== Stage 3: Dispatch to configured sinks ====
    let (summary_tx, summary_rx) = mpsc::channel::<WindowSummary>(32);
    let dispatcher = create_dispatcher(blueprint.sinks.clone(), summary_rx).await?;
    let dispatcher_handle = dispatcher.spawn();

    let mut aggregator = FeatureMetricsAggregator::new();
    for summary in &summaries {
        aggregator.update(summary);
        if summary_tx.send(*summary).await.is_err() {
            warn!("Dispatcher channel closed early");
            break;
        }
    }

    // ==== Stage 4: Graceful Shutdown ====
    info!("Shutting down...");
    drop(summary_tx);

    match tokio::time::timeout(Duration::from_secs(5), dispatcher_handle).await {
        Ok(Ok(sinks)) => {
            for (name, snapshot) in sinks {
                info!(sink = %name, written = snapshot.write_count, "Sink drained");
            }
        }
        Ok(Err(e)) => warn!("Dispatcher task error: {:?}", e),
        Err(_) => warn!("Dispatcher timed out"),
    }

    println!("{}", aggregator.summary());
    info!("Synthetic Pipeline Demo finished");
    Ok(())
}

fn resolve_config_path() -> PathBuf {
    std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("demos/features.toml"))
}
