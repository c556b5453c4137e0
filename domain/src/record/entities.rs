//! Record entities: the raw log call and its serialized form

use super::fields::Fields;
use crate::level::Level;
use chrono::{DateTime, SecondsFormat, Utc};

/// Field names the formatter writes itself; caller fields may not reuse them.
pub const RESERVED_KEYS: [&str; 3] = ["level", "message", "timestamp"];

/// One timestamped, leveled log entry before serialization.
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    pub level: Level,
    pub message: String,
    pub fields: Fields,
    pub timestamp: DateTime<Utc>,
}

impl LogRecord {
    pub fn new(
        level: Level,
        message: impl Into<String>,
        fields: Fields,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            level,
            message: message.into(),
            fields,
            timestamp,
        }
    }

    /// RFC 3339 UTC timestamp with millisecond precision.
    pub fn timestamp_rfc3339(&self) -> String {
        self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

/// The formatted bytes of one record, terminated by a `\n` separator.
///
/// Formatted once per emission and shared between every sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerializedRecord {
    line: String,
}

impl SerializedRecord {
    /// Wrap a formatted line. Any trailing newline is normalized to exactly
    /// one separator.
    pub fn from_line(line: impl Into<String>) -> Self {
        let mut line = line.into();
        while line.ends_with('\n') {
            line.pop();
        }
        line.push('\n');
        Self { line }
    }

    /// The record without its separator
    pub fn as_str(&self) -> &str {
        &self.line[..self.line.len() - 1]
    }

    /// The bytes to append, separator included
    pub fn as_bytes(&self) -> &[u8] {
        self.line.as_bytes()
    }
}

impl std::fmt::Display for SerializedRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
