//! Independently thresholded sinks and their worker threads.
//!
//! Each [`Sink`] owns a bounded queue and one worker thread. The worker is
//! the only code that touches the sink's [`Destination`].
//!
//! ```text
//! Logger ──accept()──► [threshold] ──► bounded queue ──► worker ──► Destination
//!                                                          │
//!                                                          └─► SinkErrorHandler
//! ```

use super::error::LoggerBuildError;
use super::progress::DeliveryProgress;
use crate::config::{Backpressure, SinkConfig};
use crate::ports::destination::{Destination, SinkKind};
use crate::ports::sink_errors::{SinkErrorHandler, SinkOperation, SinkWriteError};
use loglane_domain::{Level, SerializedRecord};
use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, SyncSender};
use std::thread::{self, JoinHandle};
use std::time::Instant;
use tracing::{debug, warn};

/// Upper bound on records appended between two flushes.
const MAX_BATCH: u64 = 256;

type Queued = Arc<SerializedRecord>;

/// A destination with its own threshold, fed asynchronously.
pub struct Sink {
    name: String,
    kind: SinkKind,
    threshold: Level,
    backpressure: Backpressure,
    tx: Option<SyncSender<Queued>>,
    progress: Arc<DeliveryProgress>,
    worker: Option<JoinHandle<()>>,
}

impl Sink {
    /// Start the worker for `config`. Sinks without their own threshold
    /// use `inherited`.
    pub(crate) fn spawn(
        config: SinkConfig,
        inherited: Level,
        capacity: usize,
        backpressure: Backpressure,
        default_errors: Arc<dyn SinkErrorHandler>,
    ) -> Result<Self, LoggerBuildError> {
        let SinkConfig {
            name,
            threshold,
            destination,
            error_handler,
        } = config;

        let kind = destination.kind();
        let threshold = threshold.unwrap_or(inherited);
        let progress = Arc::new(DeliveryProgress::default());
        let (tx, rx) = mpsc::sync_channel::<Queued>(capacity);

        let worker = SinkWorker {
            name: name.clone(),
            destination,
            progress: Arc::clone(&progress),
            errors: error_handler.unwrap_or(default_errors),
        };

        let handle = thread::Builder::new()
            .name(format!("loglane-sink-{}", name))
            .spawn(move || worker.run(rx))
            .map_err(|source| LoggerBuildError::Spawn {
                sink: name.clone(),
                source,
            })?;

        debug!(sink = %name, %kind, %threshold, capacity, "sink started");

        Ok(Self {
            name,
            kind,
            threshold,
            backpressure,
            tx: Some(tx),
            progress,
            worker: Some(handle),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> SinkKind {
        self.kind
    }

    pub fn threshold(&self) -> Level {
        self.threshold
    }

    /// Number of failed destination operations so far.
    pub fn failure_count(&self) -> u64 {
        self.progress.failures()
    }

    /// Most recent failure, if any.
    pub fn last_error(&self) -> Option<SinkWriteError> {
        self.progress.last_error()
    }

    /// Records discarded because the queue was full (`DropNewest` only).
    pub fn dropped_count(&self) -> u64 {
        self.progress.dropped()
    }

    /// Records queued but not yet appended and flushed.
    pub fn pending(&self) -> u64 {
        self.progress.pending()
    }

    /// Queue `record` if `level` clears this sink's threshold.
    ///
    /// Returns whether the record was queued. Below-threshold records are
    /// dropped here and never reach the worker.
    pub fn accept(&self, record: &Arc<SerializedRecord>, level: Level) -> bool {
        if !self.threshold.accepts(level) {
            return false;
        }
        let Some(tx) = &self.tx else {
            return false;
        };

        match self.backpressure {
            Backpressure::Block => {
                self.progress.submit();
                if tx.send(Arc::clone(record)).is_err() {
                    // Worker is gone; settle the count so drain cannot hang.
                    self.progress.complete(1);
                    warn!(sink = %self.name, "sink worker is not running, record lost");
                    return false;
                }
                true
            }
            Backpressure::DropNewest => self
                .progress
                .try_submit(|| tx.try_send(Arc::clone(record)).is_ok()),
        }
    }

    /// Wait until every record queued before this call has been appended
    /// and flushed.
    pub fn drain(&self, deadline: Option<Instant>) -> bool {
        let target = self.progress.submitted();
        self.progress.wait_until(target, deadline)
    }

    fn shutdown(&mut self) {
        // Closing the queue lets the worker finish what is queued, then close.
        self.tx.take();
        if let Some(handle) = self.worker.take()
            && handle.join().is_err()
        {
            warn!(sink = %self.name, "sink worker panicked");
        }
    }

    /// Close the queue without waiting for the worker. Used when a drain
    /// timed out and the destination may never return.
    pub(crate) fn detach(&mut self) {
        self.tx.take();
        if self.worker.take().is_some() {
            warn!(
                sink = %self.name,
                pending = self.progress.pending(),
                "sink did not drain in time, detaching worker"
            );
        }
    }
}

impl Drop for Sink {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl std::fmt::Debug for Sink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sink")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("threshold", &self.threshold)
            .field("backpressure", &self.backpressure)
            .finish()
    }
}

struct SinkWorker {
    name: String,
    destination: Box<dyn Destination>,
    progress: Arc<DeliveryProgress>,
    errors: Arc<dyn SinkErrorHandler>,
}

impl SinkWorker {
    fn run(mut self, rx: Receiver<Queued>) {
        while let Ok(first) = rx.recv() {
            self.append(&first);
            let mut batch = 1;

            while batch < MAX_BATCH {
                match rx.try_recv() {
                    Ok(record) => {
                        self.append(&record);
                        batch += 1;
                    }
                    Err(_) => break,
                }
            }

            if let Err(e) = guarded(|| self.destination.flush()) {
                self.report(SinkOperation::Flush, &e);
            }
            self.progress.complete(batch);
        }

        if let Err(e) = guarded(|| self.destination.close()) {
            self.report(SinkOperation::Close, &e);
        }
        debug!(sink = %self.name, "sink stopped");
    }

    fn append(&mut self, record: &SerializedRecord) {
        if let Err(e) = guarded(|| self.destination.append(record.as_bytes())) {
            self.report(SinkOperation::Append, &e);
        }
    }

    fn report(&self, operation: SinkOperation, error: &io::Error) {
        let error = SinkWriteError::new(&self.name, operation, error);
        self.progress.record_failure(error.clone());
        self.errors.on_error(&error);
    }
}

/// Run a destination call, turning a panic into an I/O error so the worker
/// keeps draining its queue.
fn guarded(op: impl FnOnce() -> io::Result<()>) -> io::Result<()> {
    panic::catch_unwind(AssertUnwindSafe(op)).unwrap_or_else(|payload| {
        let reason = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_string());
        Err(io::Error::other(format!("destination panicked: {}", reason)))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::testing::{
        FailingDestination, GatedDestination, PanickingDestination, RecordingDestination,
    };
    use crate::ports::sink_errors::IgnoreSinkErrors;

    fn record(text: &str) -> Arc<SerializedRecord> {
        Arc::new(SerializedRecord::from_line(text))
    }

    fn spawn(config: SinkConfig, capacity: usize, backpressure: Backpressure) -> Sink {
        Sink::spawn(
            config,
            Level::Info,
            capacity,
            backpressure,
            Arc::new(IgnoreSinkErrors),
        )
        .unwrap()
    }

    #[test]
    fn test_below_threshold_is_dropped_before_queue() {
        let dest = RecordingDestination::new();
        let sink = spawn(
            SinkConfig::new(dest.clone()).with_threshold(Level::Error),
            8,
            Backpressure::Block,
        );

        assert!(!sink.accept(&record("w"), Level::Warn));
        assert!(sink.accept(&record("e"), Level::Error));
        assert!(sink.drain(None));
        assert_eq!(dest.lines(), vec!["e"]);
        assert_eq!(sink.pending(), 0);
    }

    #[test]
    fn test_threshold_inherited_when_unset() {
        let sink = spawn(
            SinkConfig::new(RecordingDestination::new()),
            8,
            Backpressure::Block,
        );
        assert_eq!(sink.threshold(), Level::Info);
        assert_eq!(sink.kind(), SinkKind::Memory);
    }

    #[test]
    fn test_fifo_order_within_sink() {
        let dest = RecordingDestination::new();
        let sink = spawn(SinkConfig::new(dest.clone()), 4, Backpressure::Block);

        for i in 0..100 {
            sink.accept(&record(&format!("r{}", i)), Level::Info);
        }
        assert!(sink.drain(None));

        let expected: Vec<String> = (0..100).map(|i| format!("r{}", i)).collect();
        assert_eq!(dest.lines(), expected);
        assert!(dest.flush_count() >= 1);
    }

    #[test]
    fn test_failures_are_counted_every_attempt() {
        let sink = spawn(
            SinkConfig::new(FailingDestination).named("broken"),
            8,
            Backpressure::Block,
        );

        sink.accept(&record("a"), Level::Info);
        sink.accept(&record("b"), Level::Info);
        assert!(sink.drain(None));

        assert_eq!(sink.failure_count(), 2);
        let err = sink.last_error().unwrap();
        assert_eq!(err.sink, "broken");
        assert_eq!(err.operation, SinkOperation::Append);
    }

    #[test]
    fn test_panicking_destination_still_drains() {
        let sink = spawn(
            SinkConfig::new(PanickingDestination).named("panicky"),
            8,
            Backpressure::Block,
        );

        assert!(sink.accept(&record("a"), Level::Info));
        assert!(sink.accept(&record("b"), Level::Info));
        assert!(sink.drain(Some(Instant::now() + std::time::Duration::from_secs(5))));
        assert_eq!(sink.pending(), 0);

        // Appends and flushes both panic; every one is reported.
        assert!(sink.failure_count() >= 3);
        let err = sink.last_error().unwrap();
        assert_eq!(err.sink, "panicky");
        assert!(err.message.contains("destination panicked"));
    }

    #[test]
    fn test_drop_newest_when_full() {
        let (dest, gate) = GatedDestination::new();
        let recorded = dest.recorded();
        let sink = spawn(SinkConfig::new(dest), 1, Backpressure::DropNewest);

        assert!(sink.accept(&record("first"), Level::Info));
        gate.wait_entered();
        assert!(sink.accept(&record("second"), Level::Info));
        assert!(!sink.accept(&record("third"), Level::Info));
        assert_eq!(sink.dropped_count(), 1);

        gate.open();
        assert!(sink.drain(None));
        assert_eq!(recorded.lines(), vec!["first", "second"]);
    }

    #[test]
    fn test_drop_flushes_and_closes() {
        let dest = RecordingDestination::new();
        let sink = spawn(SinkConfig::new(dest.clone()), 8, Backpressure::Block);
        sink.accept(&record("last words"), Level::Info);
        drop(sink);

        assert_eq!(dest.lines(), vec!["last words"]);
        assert!(dest.is_closed());
    }
}
