//! Pipeline statistics and metrics.

use std::time::Duration;

use dispatcher::MetricsSnapshot;
use feature_engine::PipelineReport;
use observability::FeatureMetricsAggregator;

/// Statistics from a pipeline run
#[derive(Debug, Clone, Default)]
pub struct PipelineStats {
    /// Id of the reading source
    pub source_id: String,

    /// Feature pipeline counters
    pub report: PipelineReport,

    /// Total duration of the pipeline run
    pub duration: Duration,

    /// Final per-sink delivery counters
    pub sinks: Vec<(String, MetricsSnapshot)>,

    /// Cross-window feature aggregates
    pub features: FeatureMetricsAggregator,
}

impl PipelineStats {
    /// Readings processed per second of wall time
    pub fn readings_per_sec(&self) -> f64 {
        if self.duration.as_secs_f64() > 0.0 {
            self.report.samples as f64 / self.duration.as_secs_f64()
        } else {
            0.0
        }
    }

    /// Degenerate windows as a percentage of all windows
    pub fn degenerate_rate(&self) -> f64 {
        if self.report.windows > 0 {
            (self.report.degenerate_windows as f64 / self.report.windows as f64) * 100.0
        } else {
            0.0
        }
    }

    /// Print detailed summary
    pub fn print_summary(&self) {
        println!("\n╔══════════════════════════════════════════════════════════════╗");
        println!("║                    Pipeline Statistics                       ║");
        println!("╚══════════════════════════════════════════════════════════════╝\n");

        println!("📊 Overview");
        println!("   ├─ Source: {}", self.source_id);
        println!("   ├─ Duration: {:.3}s", self.duration.as_secs_f64());
        println!("   ├─ Readings: {}", self.report.samples);
        println!("   ├─ Readings/s: {:.0}", self.readings_per_sec());
        println!("   ├─ Windows: {}", self.report.windows);
        println!(
            "   ├─ Degenerate windows: {} ({:.2}%)",
            self.report.degenerate_windows,
            self.degenerate_rate()
        );
        println!("   ├─ Skipped windows: {}", self.report.skipped_windows);
        println!("   └─ Summaries emitted: {}", self.report.emitted());

        let summary = self.features.summary();

        println!("\n📈 Feature Aggregates");
        println!("   ├─ Mean accel magnitude: {}", summary.mean_accel_magnitude);
        println!("   ├─ Mean gyro magnitude: {}", summary.mean_gyro_magnitude);
        println!("   ├─ Mean accel energy: {}", summary.mean_accel_energy);
        println!("   ├─ Gyro angle cosine: {}", summary.gyro_angle_cosine);
        println!("   └─ Gyro z std dev: {}", summary.gyro_z_std_dev);

        if !self.sinks.is_empty() {
            println!("\n📤 Sinks");
            for (i, (name, snapshot)) in self.sinks.iter().enumerate() {
                let prefix = if i == self.sinks.len() - 1 { "└─" } else { "├─" };
                println!(
                    "   {} {}: written={}, failed={}",
                    prefix, name, snapshot.write_count, snapshot.failure_count
                );
            }
        }

        println!();
    }
}
