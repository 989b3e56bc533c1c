//! `extract` command implementation.

use anyhow::{Context, Result};
use contracts::FeatureBlueprint;
use tracing::{info, warn};

use super::load_blueprint;
use crate::cli::ExtractArgs;
use crate::error::CliError;
use crate::pipeline::{Pipeline, PipelineConfig, PipelineOutput, SampleInput};

/// Execute the `extract` command
pub async fn run_extract(args: &ExtractArgs) -> Result<()> {
    let mut blueprint = load_blueprint(args.config.as_deref())?;
    apply_overrides(&mut blueprint, args);

    // Flags bypass the checks done at load time.
    config_loader::validate(&blueprint).context("Invalid configuration after CLI overrides")?;

    let input = resolve_input(&blueprint, args)?;

    info!(
        sampling_rate = blueprint.segmentation.sampling_rate,
        window_duration = blueprint.segmentation.window_duration,
        overlap_fraction = blueprint.segmentation.overlap_fraction,
        policy = blueprint.features.degenerate_policy.as_str(),
        sinks = blueprint.sinks.len(),
        "Configuration loaded"
    );

    let pipeline = Pipeline::new(PipelineConfig {
        blueprint,
        input,
        buffer_size: args.buffer_size,
        metrics_port: (args.metrics_port != 0).then_some(args.metrics_port),
    });

    let output = tokio::select! {
        result = pipeline.run() => result.context("Feature extraction failed")?,
        _ = shutdown_signal() => {
            warn!("Received shutdown signal, abandoning run");
            return Ok(());
        }
    };

    report(&output, args.json)
}

fn apply_overrides(blueprint: &mut FeatureBlueprint, args: &ExtractArgs) {
    let segmentation = &mut blueprint.segmentation;
    if let Some(rate) = args.sampling_rate {
        info!(sampling_rate = rate, "Overriding sampling rate from CLI");
        segmentation.sampling_rate = rate;
    }
    if let Some(duration) = args.window_duration {
        info!(window_duration = duration, "Overriding window duration from CLI");
        segmentation.window_duration = duration;
    }
    if let Some(overlap) = args.overlap_fraction {
        info!(overlap_fraction = overlap, "Overriding overlap fraction from CLI");
        segmentation.overlap_fraction = overlap;
    }
    if let Some(id) = args.start_window_id {
        segmentation.start_window_id = id;
    }
    if let Some(policy) = args.degenerate_policy {
        blueprint.features.degenerate_policy = policy.into();
    }
}

/// `--synthetic`, then `--input`, then `input.path` from the configuration
fn resolve_input(blueprint: &FeatureBlueprint, args: &ExtractArgs) -> Result<SampleInput, CliError> {
    if let Some(count) = args.synthetic {
        return Ok(SampleInput::Synthetic {
            count,
            seed: args.seed,
        });
    }

    let configured = blueprint.input.as_ref();
    let path = args
        .input
        .clone()
        .or_else(|| configured.and_then(|input| input.path.clone()))
        .ok_or(CliError::NoInput)?;
    let format = args
        .format
        .map(Into::into)
        .or_else(|| configured.and_then(|input| input.format));

    Ok(SampleInput::File { path, format })
}

fn report(output: &PipelineOutput, json: bool) -> Result<()> {
    if json {
        let rendered = serde_json::to_string_pretty(&output.summaries)
            .context("Failed to serialize summaries")?;
        println!("{}", rendered);
    } else {
        output.stats.print_summary();
    }
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM; never resolves if no handler can be installed
async fn shutdown_signal() {
    let ctrl_c = async {
        if tokio::signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
