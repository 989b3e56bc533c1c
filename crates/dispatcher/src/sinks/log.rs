//! LogSink - logs window summaries via tracing

use contracts::{ContractError, SummarySink, WindowSummary};
use tracing::{info, instrument};

/// Sink that emits one structured event per summary
pub struct LogSink {
    name: String,
}

impl LogSink {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    fn log_summary(&self, summary: &WindowSummary) {
        info!(
            sink = %self.name,
            window_id = summary.window_id,
            mean_accel_magnitude = summary.mean_accel_magnitude,
            mean_gyro_magnitude = summary.mean_gyro_magnitude,
            min_accel_magnitude = summary.min_accel_magnitude,
            mean_gyro_energy = summary.mean_gyro_energy,
            mean_accel_energy = summary.mean_accel_energy,
            gyro_angle_cosine = ?summary.gyro_angle_cosine,
            gyro_z_std_dev = summary.gyro_z_std_dev,
            "WindowSummary received"
        );
    }
}

impl SummarySink for LogSink {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(
        name = "log_sink_write",
        skip(self, summary),
        fields(sink = %self.name, window_id = summary.window_id)
    )]
    async fn write(&mut self, summary: &WindowSummary) -> Result<(), ContractError> {
        self.log_summary(summary);
        Ok(())
    }

    #[instrument(name = "log_sink_flush", skip(self))]
    async fn flush(&mut self) -> Result<(), ContractError> {
        Ok(())
    }

    #[instrument(name = "log_sink_close", skip(self))]
    async fn close(&mut self) -> Result<(), ContractError> {
        info!(sink = %self.name, "LogSink closed");
        Ok(())
    }
}
