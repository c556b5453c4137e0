//! Structured configuration issues

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: a logger cannot be built from this configuration.
    Error,
    /// Non-fatal: the logger works but may not behave as expected.
    Warning,
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigIssueCode {
    /// A level name that is not on the severity scale.
    InvalidLevel { field: String, value: String },
    /// Two sinks resolve to the same name.
    DuplicateSinkName(String),
    /// `queue_capacity = 0`.
    ZeroQueueCapacity,
    /// No `[[sinks]]`: every record is discarded.
    NoSinks,
}

/// A detected issue in the configuration.
#[derive(Debug, Clone)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}
