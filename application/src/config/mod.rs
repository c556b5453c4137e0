//! Application-level configuration.
//!
//! - [`LoggerConfig`]: logger floor, format, queue bound and default fields
//! - [`SinkConfig`]: one destination with its own threshold

pub mod logger_config;
pub mod sink_config;

pub use logger_config::{Backpressure, DEFAULT_QUEUE_CAPACITY, LoggerConfig};
pub use sink_config::SinkConfig;
