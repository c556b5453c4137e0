//! Port for observing sink write failures.
//!
//! Write failures happen on a sink's worker thread, long after the `log`
//! call that produced the record has returned. They are reported here
//! instead of to the caller, one report per failed attempt.

use std::io;
use std::sync::mpsc;
use thiserror::Error;
use tracing::warn;

/// The destination operation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkOperation {
    Append,
    Flush,
    Close,
}

impl std::fmt::Display for SinkOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SinkOperation::Append => "append",
            SinkOperation::Flush => "flush",
            SinkOperation::Close => "close",
        };
        write!(f, "{}", s)
    }
}

/// I/O failure on one specific sink.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Sink '{sink}' {operation} failed: {message}")]
pub struct SinkWriteError {
    pub sink: String,
    pub operation: SinkOperation,
    pub kind: io::ErrorKind,
    pub message: String,
}

impl SinkWriteError {
    pub fn new(sink: impl Into<String>, operation: SinkOperation, error: &io::Error) -> Self {
        Self {
            sink: sink.into(),
            operation,
            kind: error.kind(),
            message: error.to_string(),
        }
    }
}

/// Receives every [`SinkWriteError`], on the failing sink's worker thread.
pub trait SinkErrorHandler: Send + Sync {
    fn on_error(&self, error: &SinkWriteError);
}

/// Default handler: reports through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSinkErrors;

impl SinkErrorHandler for TracingSinkErrors {
    fn on_error(&self, error: &SinkWriteError) {
        warn!(
            sink = %error.sink,
            operation = %error.operation,
            "{}",
            error.message
        );
    }
}

/// Discards every report. Failures are still counted on the sink.
#[derive(Debug, Clone, Copy, Default)]
pub struct IgnoreSinkErrors;

impl SinkErrorHandler for IgnoreSinkErrors {
    fn on_error(&self, _error: &SinkWriteError) {}
}

/// Forward reports to a channel; a closed receiver is ignored.
impl SinkErrorHandler for mpsc::Sender<SinkWriteError> {
    fn on_error(&self, error: &SinkWriteError) {
        let _ = self.send(error.clone());
    }
}
