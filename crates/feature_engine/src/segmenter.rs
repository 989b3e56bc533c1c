//! Time-bounded sliding window segmentation.

use contracts::{ContractError, SegmentationConfig};
use tracing::{debug, instrument, trace};

use crate::magnitude::Sample;
use crate::window::Window;

/// Splits an annotated sample sequence into overlapping windows
///
/// Window membership is decided by elapsed time (`elapsed < start + duration`),
/// while the start index advances by a fixed sample count derived from the
/// nominal sampling rate.
#[derive(Debug, Clone)]
pub struct WindowSegmenter {
    config: SegmentationConfig,
    step: usize,
}

impl WindowSegmenter {
    /// Create a segmenter from validated parameters
    ///
    /// # Errors
    /// `InvalidConfiguration` if the parameters cannot drive segmentation.
    pub fn new(config: SegmentationConfig) -> Result<Self, ContractError> {
        config.check()?;
        Ok(Self {
            step: config.step_samples(),
            config,
        })
    }

    pub fn config(&self) -> &SegmentationConfig {
        &self.config
    }

    /// Samples the window start advances per step
    pub fn step_samples(&self) -> usize {
        self.step
    }

    /// Carve `samples` into windows, in increasing id order
    ///
    /// Samples must be ordered by `seconds_elapsed`.
    ///
    /// # Errors
    /// `EmptyInput` when `samples` is empty.
    #[instrument(
        name = "segmenter_segment",
        skip(self, samples),
        fields(samples = samples.len(), step = self.step)
    )]
    pub fn segment(&self, samples: &[Sample]) -> Result<Vec<Window>, ContractError> {
        let last = samples.last().ok_or(ContractError::EmptyInput)?;
        let end_time = last.seconds_elapsed();
        let duration = self.config.window_duration;

        let mut windows = Vec::new();
        let mut window_id = self.config.start_window_id;
        let mut start = 0usize;

        while start < samples.len() {
            let window_end_time = samples[start].seconds_elapsed() + duration;
            let end = start
                + samples[start..]
                    .iter()
                    .take_while(|s| s.seconds_elapsed() < window_end_time)
                    .count();

            if end > start {
                trace!(window_id, start, end, "window emitted");
                windows.push(Window::new(window_id, start, samples[start..end].to_vec()));
                window_id += 1;
            } else {
                trace!(start, "empty scan skipped");
            }

            start += self.step;

            // No further full-length window fits before the last sample.
            if start >= samples.len() || samples[start].seconds_elapsed() + duration > end_time {
                break;
            }
        }

        debug!(windows = windows.len(), "segmentation complete");
        Ok(windows)
    }
}
