use cobalt_dns_application::ports::MetricsSink;
use cobalt_dns_domain::MetricSample;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Producer handle for the ingestion pipeline. Cloned into every call
/// site. `collect` never blocks: when the channel is full the sample
/// is dropped and counted.
#[derive(Clone)]
pub struct MetricsRecorder {
    sender: mpsc::Sender<MetricSample>,
    dropped: Arc<AtomicU64>,
}

impl MetricsRecorder {
    pub fn collect(&self, sample: MetricSample) {
        match self.sender.try_send(sample) {
            Ok(()) => {}
            Err(mpsc::error::TrySendError::Full(_)) => {
                self.dropped.fetch_add(1, Ordering::Relaxed);
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                error!("metric channel closed, sample discarded");
            }
        }
    }

    /// Total samples dropped since startup.
    pub fn dropped_samples(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }
}

/// Owns the background flusher. Samples are batched until either the
/// batch size is reached or the flush interval fires; a failed flush is
/// logged and the batch discarded, since samples are observational, not
/// transactional.
pub struct MetricsPipeline {
    recorder: MetricsRecorder,
    shutdown: CancellationToken,
    worker: JoinHandle<()>,
}

impl MetricsPipeline {
    pub fn start(
        sink: Arc<dyn MetricsSink>,
        batch_size: usize,
        flush_interval: Duration,
    ) -> Self {
        let (sender, receiver) = mpsc::channel(batch_size * 2);
        let dropped = Arc::new(AtomicU64::new(0));
        let shutdown = CancellationToken::new();

        let worker = tokio::spawn(flush_loop(
            sink,
            receiver,
            batch_size,
            flush_interval,
            Arc::clone(&dropped),
            shutdown.clone(),
        ));

        info!(
            batch_size,
            flush_interval_secs = flush_interval.as_secs(),
            "metrics ingestion pipeline started"
        );

        Self {
            recorder: MetricsRecorder { sender, dropped },
            shutdown,
            worker,
        }
    }

    pub fn recorder(&self) -> MetricsRecorder {
        self.recorder.clone()
    }

    /// Drains whatever is buffered into a final batch, flushes it
    /// synchronously and stops the worker.
    pub async fn shutdown(self) {
        self.shutdown.cancel();
        if let Err(e) = self.worker.await {
            error!(error = %e, "metrics flush task did not shut down cleanly");
        }
    }
}

async fn flush_loop(
    sink: Arc<dyn MetricsSink>,
    mut receiver: mpsc::Receiver<MetricSample>,
    batch_size: usize,
    flush_interval: Duration,
    dropped: Arc<AtomicU64>,
    shutdown: CancellationToken,
) {
    let mut batch: Vec<MetricSample> = Vec::with_capacity(batch_size);
    let mut interval = tokio::time::interval(flush_interval);
    let mut last_reported_drops = 0u64;

    loop {
        tokio::select! {
            maybe_sample = receiver.recv() => {
                match maybe_sample {
                    Some(sample) => {
                        batch.push(sample);
                        while batch.len() < batch_size {
                            match receiver.try_recv() {
                                Ok(sample) => batch.push(sample),
                                Err(_) => break,
                            }
                        }
                        if batch.len() >= batch_size {
                            flush_batch(sink.as_ref(), &mut batch).await;
                        }
                    }
                    None => {
                        flush_batch(sink.as_ref(), &mut batch).await;
                        info!("metric channel closed, flush task exiting");
                        return;
                    }
                }
            }
            _ = interval.tick() => {
                flush_batch(sink.as_ref(), &mut batch).await;
                let total_drops = dropped.load(Ordering::Relaxed);
                if total_drops > last_reported_drops {
                    warn!(
                        dropped = total_drops - last_reported_drops,
                        total_dropped = total_drops,
                        "metric samples dropped under backpressure"
                    );
                    last_reported_drops = total_drops;
                }
            }
            _ = shutdown.cancelled() => {
                // Final drain: everything still queued goes into one
                // last synchronous flush.
                while let Ok(sample) = receiver.try_recv() {
                    batch.push(sample);
                    if batch.len() >= batch_size {
                        flush_batch(sink.as_ref(), &mut batch).await;
                    }
                }
                flush_batch(sink.as_ref(), &mut batch).await;
                info!("metrics ingestion pipeline shut down");
                return;
            }
        }
    }
}

async fn flush_batch(sink: &dyn MetricsSink, batch: &mut Vec<MetricSample>) {
    if batch.is_empty() {
        return;
    }
    let count = batch.len();
    let start = std::time::Instant::now();

    match sink.append_batch(batch).await {
        Ok(()) => {
            debug!(
                count,
                duration_ms = start.elapsed().as_millis() as u64,
                "metric batch flushed"
            );
        }
        Err(e) => {
            error!(error = %e, count, "failed to flush metric batch, discarding");
        }
    }
    batch.clear();
}
