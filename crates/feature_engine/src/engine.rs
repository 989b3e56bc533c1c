//! End-to-end feature pipeline.

use contracts::{ContractError, DegeneratePolicy, ImuReading, PipelineConfig, WindowSummary};
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::calculator::{apply_all, WindowCalculator};
use crate::energy::EnergyCalculator;
use crate::magnitude::annotate;
use crate::orientation::OrientationAngleCalculator;
use crate::segmenter::WindowSegmenter;
use crate::statistics::StatisticsCalculator;
use crate::window::Window;

const CALCULATORS: [&dyn WindowCalculator; 3] = [
    &StatisticsCalculator,
    &EnergyCalculator,
    &OrientationAngleCalculator,
];

/// Counters for one pipeline invocation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PipelineReport {
    /// Input readings
    pub samples: usize,
    /// Windows produced by segmentation
    pub windows: usize,
    /// Windows with a zero-norm gyroscope X or Y channel
    pub degenerate_windows: usize,
    /// Degenerate windows dropped under the skip policy
    pub skipped_windows: usize,
}

impl PipelineReport {
    /// Summaries actually emitted
    pub fn emitted(&self) -> usize {
        self.windows - self.skipped_windows
    }
}

/// Annotate → segment → compute features → project
///
/// Holds only read-only configuration; one instance can process any number of
/// recordings.
#[derive(Debug, Clone)]
pub struct FeaturePipeline {
    config: PipelineConfig,
    segmenter: WindowSegmenter,
}

impl FeaturePipeline {
    /// Build a pipeline, validating the configuration up front
    ///
    /// # Errors
    /// `InvalidConfiguration` naming the offending parameter.
    pub fn new(config: PipelineConfig) -> Result<Self, ContractError> {
        config.check()?;
        let segmenter = WindowSegmenter::new(config.segmentation)?;
        debug!(
            step = segmenter.step_samples(),
            policy = config.degenerate_policy.as_str(),
            "feature pipeline configured"
        );
        Ok(Self { config, segmenter })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn segmenter(&self) -> &WindowSegmenter {
        &self.segmenter
    }

    /// Summaries for every window, in window-id order
    ///
    /// # Errors
    /// - `EmptyInput` when `readings` is empty
    /// - `NonFiniteInput` when any channel is NaN or infinite
    /// - `UnorderedInput` when `seconds_elapsed` decreases
    /// - `DegenerateWindow` under [`DegeneratePolicy::Fail`]
    pub fn run(&self, readings: &[ImuReading]) -> Result<Vec<WindowSummary>, ContractError> {
        self.run_with_report(readings).map(|(summaries, _)| summaries)
    }

    /// [`run`](Self::run) plus the invocation counters
    #[instrument(
        name = "feature_pipeline_run",
        skip(self, readings),
        fields(samples = readings.len(), policy = self.config.degenerate_policy.as_str())
    )]
    pub fn run_with_report(
        &self,
        readings: &[ImuReading],
    ) -> Result<(Vec<WindowSummary>, PipelineReport), ContractError> {
        let windows = self.extract_windows(readings)?;

        let mut report = PipelineReport {
            samples: readings.len(),
            windows: windows.len(),
            ..Default::default()
        };
        let mut summaries = Vec::with_capacity(windows.len());

        for window in &windows {
            metrics::histogram!("imu_features_window_samples").record(window.len() as f64);

            if let Some(axis) = window.degenerate_axis() {
                let policy = self.config.degenerate_policy;
                report.degenerate_windows += 1;
                metrics::counter!(
                    "imu_features_degenerate_windows_total",
                    "axis" => axis.as_str(),
                    "policy" => policy.as_str()
                )
                .increment(1);

                match policy {
                    DegeneratePolicy::Fail => {
                        return Err(ContractError::DegenerateWindow {
                            window_id: window.id(),
                            axis,
                        });
                    }
                    DegeneratePolicy::Skip => {
                        warn!(window_id = window.id(), %axis, "degenerate window skipped");
                        report.skipped_windows += 1;
                        continue;
                    }
                    DegeneratePolicy::Flag => {
                        warn!(window_id = window.id(), %axis, "degenerate window, angle omitted");
                    }
                }
            }

            summaries.push(window.summarize()?);
        }

        metrics::counter!("imu_features_windows_total").increment(summaries.len() as u64);
        info!(
            windows = report.windows,
            emitted = summaries.len(),
            degenerate = report.degenerate_windows,
            "feature extraction complete"
        );

        Ok((summaries, report))
    }

    /// Segmented windows with every feature block filled, before projection
    ///
    /// # Errors
    /// `EmptyInput`, `NonFiniteInput` or `UnorderedInput`.
    pub fn extract_windows(&self, readings: &[ImuReading]) -> Result<Vec<Window>, ContractError> {
        if readings.is_empty() {
            return Err(ContractError::EmptyInput);
        }
        check_ordering(readings)?;

        let samples = annotate(readings);
        let mut windows = self.segmenter.segment(&samples)?;

        for calculator in CALCULATORS {
            apply_all(calculator, &mut windows)?;
            debug!(pass = calculator.name(), windows = windows.len(), "calculator pass done");
        }

        Ok(windows)
    }
}

/// Reject non-finite channels and sequences whose `seconds_elapsed` ever decreases
pub fn check_ordering(readings: &[ImuReading]) -> Result<(), ContractError> {
    if let Some((index, (channel, value))) = readings
        .iter()
        .enumerate()
        .find_map(|(i, r)| r.first_non_finite().map(|bad| (i, bad)))
    {
        return Err(ContractError::NonFiniteInput {
            index,
            channel,
            value,
        });
    }

    for (i, pair) in readings.windows(2).enumerate() {
        let (previous, current) = (pair[0].seconds_elapsed, pair[1].seconds_elapsed);
        if current < previous {
            return Err(ContractError::UnorderedInput {
                index: i + 1,
                previous,
                current,
            });
        }
    }
    Ok(())
}
