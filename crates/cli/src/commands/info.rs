//! `info` command implementation.

use std::collections::HashMap;

use anyhow::{Context, Result};
use contracts::FeatureBlueprint;
use serde::Serialize;

use super::load_blueprint;
use crate::cli::InfoArgs;

/// Configuration info for JSON output
#[derive(Serialize)]
struct ConfigInfo {
    version: String,
    segmentation: SegmentationInfo,
    degenerate_policy: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    input: Option<InputInfo>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    sinks: Vec<SinkInfo>,
}

#[derive(Serialize)]
struct SegmentationInfo {
    sampling_rate: f64,
    window_duration: f64,
    overlap_fraction: f64,
    start_window_id: u64,
    /// `sampling_rate * window_duration`
    nominal_window_samples: f64,
    step_samples: usize,
}

#[derive(Serialize)]
struct InputInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<String>,
    format: String,
}

#[derive(Serialize)]
struct SinkInfo {
    name: String,
    sink_type: String,
    queue_capacity: usize,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    params: HashMap<String, String>,
}

/// Execute the `info` command
pub fn run_info(args: &InfoArgs) -> Result<()> {
    let blueprint = load_blueprint(args.config.as_deref())?;
    let info = build_config_info(&blueprint, args);

    if args.json {
        let json =
            serde_json::to_string_pretty(&info).context("Failed to serialize config info")?;
        println!("{}", json);
    } else {
        print_config_info(&info);
    }

    Ok(())
}

fn build_config_info(blueprint: &FeatureBlueprint, args: &InfoArgs) -> ConfigInfo {
    let segmentation = &blueprint.segmentation;

    let input = blueprint.input.as_ref().map(|input| InputInfo {
        path: input.path.as_ref().map(|p| p.display().to_string()),
        format: input
            .format
            .or_else(|| input.path.as_deref().and_then(contracts::InputFormat::from_path))
            .map(|f| format!("{:?}", f).to_lowercase())
            .unwrap_or_else(|| "unknown".to_string()),
    });

    let sinks = blueprint
        .sinks
        .iter()
        .map(|s| SinkInfo {
            name: s.name.clone(),
            sink_type: format!("{:?}", s.sink_type),
            queue_capacity: s.queue_capacity,
            params: if args.sinks {
                s.params.clone()
            } else {
                HashMap::new()
            },
        })
        .collect();

    ConfigInfo {
        version: format!("{:?}", blueprint.version),
        segmentation: SegmentationInfo {
            sampling_rate: segmentation.sampling_rate,
            window_duration: segmentation.window_duration,
            overlap_fraction: segmentation.overlap_fraction,
            start_window_id: segmentation.start_window_id,
            nominal_window_samples: segmentation.window_size_samples(),
            step_samples: segmentation.step_samples(),
        },
        degenerate_policy: blueprint.features.degenerate_policy.as_str().to_string(),
        input,
        sinks,
    }
}

fn print_config_info(info: &ConfigInfo) {
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║               IMU Features Configuration                     ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    let seg = &info.segmentation;
    println!("🪟 Segmentation");
    println!("   ├─ Version: {}", info.version);
    println!("   ├─ Sampling rate: {} Hz", seg.sampling_rate);
    println!("   ├─ Window duration: {} s", seg.window_duration);
    println!("   ├─ Overlap fraction: {}", seg.overlap_fraction);
    println!("   ├─ Start window id: {}", seg.start_window_id);
    println!("   ├─ Nominal window size: {} samples", seg.nominal_window_samples);
    println!("   └─ Step: {} samples", seg.step_samples);

    println!("\n⚙️  Features");
    println!("   └─ Degenerate policy: {}", info.degenerate_policy);

    println!("\n📥 Input");
    match &info.input {
        Some(input) => {
            println!(
                "   ├─ Path: {}",
                input.path.as_deref().unwrap_or("(from --input)")
            );
            println!("   └─ Format: {}", input.format);
        }
        None => println!("   └─ (from --input or --synthetic)"),
    }

    if !info.sinks.is_empty() {
        println!("\n📤 Sinks ({})", info.sinks.len());
        for (i, sink) in info.sinks.iter().enumerate() {
            let is_last = i == info.sinks.len() - 1;
            let prefix = if is_last { "└─" } else { "├─" };
            let child_prefix = if is_last { "   " } else { "│  " };
            println!(
                "   {} {} ({}, queue {})",
                prefix, sink.name, sink.sink_type, sink.queue_capacity
            );
            let mut params: Vec<_> = sink.params.iter().collect();
            params.sort();
            for (key, value) in params {
                println!("   {}  {} = {}", child_prefix, key, value);
            }
        }
    }

    println!();
}
