//! SinkHandle - manages a sink with isolated queue and worker task

use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, instrument};

use contracts::{SummarySink, WindowSummary};

use crate::metrics::SinkMetrics;

/// Handle to a running sink worker
pub struct SinkHandle {
    name: String,
    /// Channel to send summaries to worker
    tx: mpsc::Sender<WindowSummary>,
    metrics: Arc<SinkMetrics>,
    worker_handle: JoinHandle<()>,
}

impl SinkHandle {
    /// Create a new SinkHandle and spawn the worker task
    pub fn spawn<S: SummarySink + Send + 'static>(sink: S, queue_capacity: usize) -> Self {
        let name = sink.name().to_string();
        let (tx, rx) = mpsc::channel(queue_capacity.max(1));
        let metrics = Arc::new(SinkMetrics::new());

        let worker_metrics = Arc::clone(&metrics);
        let worker_name = name.clone();

        let worker_handle = tokio::spawn(async move {
            sink_worker(sink, rx, worker_metrics, worker_name).await;
        });

        Self {
            name,
            tx,
            metrics,
            worker_handle,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn metrics(&self) -> &Arc<SinkMetrics> {
        &self.metrics
    }

    /// Queue a summary, waiting for room if the queue is full
    ///
    /// Returns false only if the worker has stopped.
    pub async fn send(&self, summary: WindowSummary) -> bool {
        match self.tx.send(summary).await {
            Ok(()) => {
                self.metrics
                    .set_queue_len(self.tx.max_capacity() - self.tx.capacity());
                true
            }
            Err(_) => {
                error!(sink = %self.name, "Sink worker closed unexpectedly");
                false
            }
        }
    }

    /// Shutdown the sink worker gracefully
    ///
    /// Queued summaries are written before the sink is flushed and closed.
    #[instrument(name = "sink_handle_shutdown", skip(self), fields(sink = %self.name))]
    pub async fn shutdown(self) {
        drop(self.tx);
        if let Err(e) = self.worker_handle.await {
            error!(sink = %self.name, error = ?e, "Worker task panicked");
        }
        self.metrics.set_queue_len(0);
        debug!(sink = %self.name, "SinkHandle shutdown complete");
    }
}

/// Worker task that consumes summaries and writes to sink
#[instrument(
    name = "sink_worker_loop",
    skip(sink, rx, metrics),
    fields(sink = %name)
)]
async fn sink_worker<S: SummarySink>(
    mut sink: S,
    mut rx: mpsc::Receiver<WindowSummary>,
    metrics: Arc<SinkMetrics>,
    name: String,
) {
    debug!(sink = %name, "Sink worker started");

    while let Some(summary) = rx.recv().await {
        metrics.set_queue_len(rx.len());

        match sink.write(&summary).await {
            Ok(()) => {
                metrics.inc_write_count();
            }
            Err(e) => {
                metrics.inc_failure_count();
                error!(
                    sink = %name,
                    window_id = summary.window_id,
                    error = %e,
                    "Write failed"
                );
                // One bad write does not stop the worker.
            }
        }
    }

    if let Err(e) = sink.flush().await {
        error!(sink = %name, error = %e, "Flush failed on shutdown");
    }
    if let Err(e) = sink.close().await {
        error!(sink = %name, error = %e, "Close failed on shutdown");
    }

    debug!(sink = %name, "Sink worker stopped");
}
