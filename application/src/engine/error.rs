//! Logger construction errors

use thiserror::Error;

/// Errors raised while building a [`Logger`](super::Logger).
#[derive(Error, Debug)]
pub enum LoggerBuildError {
    #[error("Queue capacity must be at least 1")]
    ZeroCapacity,

    #[error("Duplicate sink name: {0}")]
    DuplicateSink(String),

    #[error("Failed to start worker for sink '{sink}': {source}")]
    Spawn {
        sink: String,
        #[source]
        source: std::io::Error,
    },
}
