//! Domain layer for loglane
//!
//! This crate contains the values the logger engine moves around. It has no
//! dependencies on threads, I/O or configuration sources.
//!
//! # Core Concepts
//!
//! ## Level
//!
//! A totally ordered severity scale. A threshold accepts a record when the
//! record is at least as severe as the threshold.
//!
//! ## Record
//!
//! - **LogRecord**: level + message + structured fields + timestamp
//! - **SerializedRecord**: the formatted bytes shared by every sink
//!
//! ## Format
//!
//! [`RecordFormatter`] implementations (JSON lines, simple text) turn a record
//! into its serialized form, failing fast on fields they cannot write.

pub mod core;
pub mod format;
pub mod level;
pub mod record;

// Re-export commonly used types
pub use crate::core::error::DomainError;
pub use format::{FormatKind, JsonFormatter, RecordFormatter, SimpleFormatter};
pub use level::{Level, SeverityOrdering};
pub use record::{FieldValue, Fields, LogRecord, RESERVED_KEYS, SerializedRecord};
