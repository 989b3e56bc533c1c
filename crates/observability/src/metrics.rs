//! Feature metrics
//!
//! Records per-window summaries to the `metrics` facade and aggregates them in
//! memory for run reports.

use contracts::WindowSummary;
use metrics::{counter, gauge, histogram};
use serde::Serialize;

/// Record one emitted window summary
///
/// # Example
///
/// ```ignore
/// use observability::metrics::record_window_summary;
///
/// for summary in pipeline.run(&readings)? {
///     record_window_summary(&summary);
/// }
/// ```
pub fn record_window_summary(summary: &WindowSummary) {
    counter!("imu_features_summaries_total").increment(1);
    gauge!("imu_features_last_window_id").set(summary.window_id as f64);

    histogram!("imu_features_mean_accel_magnitude").record(summary.mean_accel_magnitude);
    histogram!("imu_features_mean_gyro_magnitude").record(summary.mean_gyro_magnitude);
    histogram!("imu_features_gyro_z_std_dev").record(summary.gyro_z_std_dev);

    match summary.gyro_angle_cosine {
        Some(cosine) => histogram!("imu_features_gyro_angle_cosine").record(cosine),
        None => counter!("imu_features_summaries_without_angle_total").increment(1),
    }
}

/// Record readings loaded for one run
pub fn record_readings_loaded(source_id: &str, count: usize) {
    counter!(
        "imu_features_readings_total",
        "source" => source_id.to_string()
    )
    .increment(count as u64);
}

/// Record the final delivery counts of one sink
pub fn record_summaries_dispatched(sink_name: &str, written: u64, failed: u64) {
    for (status, count) in [("success", written), ("failure", failed)] {
        counter!(
            "imu_features_summaries_dispatched_total",
            "sink" => sink_name.to_string(),
            "status" => status
        )
        .increment(count);
    }
}

/// Record pipeline wall time
pub fn record_pipeline_duration_ms(duration_ms: f64) {
    histogram!("imu_features_pipeline_duration_ms").record(duration_ms);
}

/// Feature metrics aggregator
///
/// Aggregates summaries in memory for the end-of-run report.
#[derive(Debug, Clone, Default)]
pub struct FeatureMetricsAggregator {
    pub total_windows: u64,
    /// Summaries without an angle value
    pub degenerate_windows: u64,
    pub accel_magnitude: RunningStats,
    pub gyro_magnitude: RunningStats,
    pub accel_energy: RunningStats,
    pub gyro_angle_cosine: RunningStats,
    pub gyro_z_std_dev: RunningStats,
}

impl FeatureMetricsAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, summary: &WindowSummary) {
        self.total_windows += 1;
        self.accel_magnitude.push(summary.mean_accel_magnitude);
        self.gyro_magnitude.push(summary.mean_gyro_magnitude);
        self.accel_energy.push(summary.mean_accel_energy);
        self.gyro_z_std_dev.push(summary.gyro_z_std_dev);

        match summary.gyro_angle_cosine {
            Some(cosine) => self.gyro_angle_cosine.push(cosine),
            None => self.degenerate_windows += 1,
        }
    }

    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            total_windows: self.total_windows,
            degenerate_windows: self.degenerate_windows,
            degenerate_rate: if self.total_windows > 0 {
                self.degenerate_windows as f64 / self.total_windows as f64 * 100.0
            } else {
                0.0
            },
            mean_accel_magnitude: StatsSummary::from(&self.accel_magnitude),
            mean_gyro_magnitude: StatsSummary::from(&self.gyro_magnitude),
            mean_accel_energy: StatsSummary::from(&self.accel_energy),
            gyro_angle_cosine: StatsSummary::from(&self.gyro_angle_cosine),
            gyro_z_std_dev: StatsSummary::from(&self.gyro_z_std_dev),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Metrics summary
#[derive(Debug, Clone, Default, Serialize)]
pub struct MetricsSummary {
    pub total_windows: u64,
    pub degenerate_windows: u64,
    pub degenerate_rate: f64,
    pub mean_accel_magnitude: StatsSummary,
    pub mean_gyro_magnitude: StatsSummary,
    pub mean_accel_energy: StatsSummary,
    pub gyro_angle_cosine: StatsSummary,
    pub gyro_z_std_dev: StatsSummary,
}

impl std::fmt::Display for MetricsSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Feature Metrics Summary ===")?;
        writeln!(f, "Windows: {}", self.total_windows)?;
        writeln!(
            f,
            "Degenerate windows: {} ({:.2}%)",
            self.degenerate_windows, self.degenerate_rate
        )?;
        writeln!(f, "Mean accel magnitude: {}", self.mean_accel_magnitude)?;
        writeln!(f, "Mean gyro magnitude: {}", self.mean_gyro_magnitude)?;
        writeln!(f, "Mean accel energy: {}", self.mean_accel_energy)?;
        writeln!(f, "Gyro angle cosine: {}", self.gyro_angle_cosine)?;
        writeln!(f, "Gyro z std dev: {}", self.gyro_z_std_dev)?;
        Ok(())
    }
}

/// Statistics summary
#[derive(Debug, Clone, Default, Serialize)]
pub struct StatsSummary {
    pub count: u64,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub std_dev: f64,
}

impl From<&RunningStats> for StatsSummary {
    fn from(stats: &RunningStats) -> Self {
        Self {
            count: stats.count,
            min: stats.min,
            max: stats.max,
            mean: stats.mean(),
            std_dev: stats.std_dev(),
        }
    }
}

impl std::fmt::Display for StatsSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.count == 0 {
            write!(f, "N/A")
        } else {
            write!(
                f,
                "min={:.3}, max={:.3}, mean={:.3}, std={:.3} (n={})",
                self.min, self.max, self.mean, self.std_dev, self.count
            )
        }
    }
}

/// Online statistics (Welford's algorithm)
///
/// `variance` uses the sample divisor `n - 1`; it summarises feature values
/// across windows and is unrelated to the per-window population deviation.
#[derive(Debug, Clone, Default)]
pub struct RunningStats {
    count: u64,
    mean: f64,
    m2: f64,
    min: f64,
    max: f64,
}

impl RunningStats {
    pub fn push(&mut self, value: f64) {
        self.count += 1;

        if self.count == 1 {
            self.min = value;
            self.max = value;
            self.mean = value;
            self.m2 = 0.0;
        } else {
            self.min = self.min.min(value);
            self.max = self.max.max(value);

            let delta = value - self.mean;
            self.mean += delta / self.count as f64;
            let delta2 = value - self.mean;
            self.m2 += delta * delta2;
        }
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.mean
        }
    }

    pub fn variance(&self) -> f64 {
        if self.count < 2 {
            0.0
        } else {
            self.m2 / (self.count - 1) as f64
        }
    }

    pub fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }
}
