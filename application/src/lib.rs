//! Application layer for loglane
//!
//! This crate contains the logger engine, port definitions, and logger
//! configuration. It depends only on the domain layer.

pub mod config;
pub mod engine;
pub mod ports;

// Re-export commonly used types
pub use config::{Backpressure, DEFAULT_QUEUE_CAPACITY, LoggerConfig, SinkConfig};
pub use engine::{Logger, LoggerBuildError, LoggerBuilder, MonotonicStamper, Sink};
pub use ports::{
    clock::{Clock, SystemClock},
    destination::{Destination, SinkKind},
    sink_errors::{
        IgnoreSinkErrors, SinkErrorHandler, SinkOperation, SinkWriteError, TracingSinkErrors,
    },
};
