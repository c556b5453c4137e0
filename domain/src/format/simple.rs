//! `level: message {meta}` lines

use super::traits::{RecordFormatter, check_fields};
use crate::core::error::DomainError;
use crate::record::{LogRecord, SerializedRecord};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::borrow::Cow;

/// Human-oriented formatter: `info: message {"key":"value","timestamp":"..."}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleFormatter;

struct Meta<'a> {
    record: &'a LogRecord,
    timestamp: String,
}

impl Serialize for Meta<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.record.fields.len() + 1))?;
        for (key, value) in self.record.fields.iter() {
            map.serialize_entry(key, value)?;
        }
        map.serialize_entry("timestamp", &self.timestamp)?;
        map.end()
    }
}

impl RecordFormatter for SimpleFormatter {
    fn format(&self, record: &LogRecord) -> Result<SerializedRecord, DomainError> {
        check_fields(record)?;

        let meta = Meta {
            record,
            timestamp: record.timestamp_rfc3339(),
        };
        let meta =
            serde_json::to_string(&meta).map_err(|e| DomainError::FormatError(e.to_string()))?;

        Ok(SerializedRecord::from_line(format!(
            "{}: {} {}",
            record.level,
            escape_line_breaks(&record.message),
            meta
        )))
    }
}

/// Keep a record on one line: `\n` and `\r` become their escaped forms.
fn escape_line_breaks(message: &str) -> Cow<'_, str> {
    if !message.contains(['\n', '\r']) {
        return Cow::Borrowed(message);
    }
    let mut escaped = String::with_capacity(message.len() + 8);
    for c in message.chars() {
        match c {
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            c => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}
