//! Domain error types

use thiserror::Error;

/// Domain-level errors
///
/// Both variants are raised synchronously to the caller of a log call,
/// before any sink sees the record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid level: {0}")]
    InvalidLevel(String),

    #[error("Format error: {0}")]
    FormatError(String),
}

impl DomainError {
    /// Check if this error was caused by an unrecognized level name
    pub fn is_invalid_level(&self) -> bool {
        matches!(self, DomainError::InvalidLevel(_))
    }

    /// Check if this error was raised while serializing a record
    pub fn is_format_error(&self) -> bool {
        matches!(self, DomainError::FormatError(_))
    }
}
