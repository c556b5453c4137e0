//! Infrastructure layer for loglane
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: concrete destinations, a manual clock,
//! and configuration file loading.

pub mod clock;
pub mod config;
pub mod destinations;

// Re-export commonly used types
pub use clock::ManualClock;
pub use config::{
    ConfigError, ConfigIssue, ConfigIssueCode, ConfigLoader, FileLoggingConfig, FileSinkConfig,
    FileSinkTarget, LoggerFactory, Severity,
};
pub use destinations::{
    ConsoleDestination, ConsoleStream, FileDestination, MemoryBuffer, MemoryDestination,
    NullDestination,
};
