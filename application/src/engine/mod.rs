//! The logger engine.
//!
//! - [`Logger`]: level check, single formatting pass, fan-out
//! - [`Sink`]: per-sink threshold, bounded queue and worker thread
//! - [`MonotonicStamper`]: non-decreasing record timestamps

mod builder;
mod error;
mod logger;
mod progress;
mod sink;
mod timestamp;

#[cfg(test)]
pub(crate) mod testing;

pub use builder::LoggerBuilder;
pub use error::LoggerBuildError;
pub use logger::Logger;
pub use sink::Sink;
pub use timestamp::MonotonicStamper;
