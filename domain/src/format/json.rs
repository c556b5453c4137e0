//! One JSON object per line

use super::traits::{RecordFormatter, check_fields};
use crate::core::error::DomainError;
use crate::record::{LogRecord, SerializedRecord};
use serde::ser::{Serialize, SerializeMap, Serializer};

/// JSON lines formatter.
///
/// Keys are written as `level`, `message`, the caller's fields in insertion
/// order, then `timestamp`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormatter;

struct JsonLine<'a> {
    record: &'a LogRecord,
    timestamp: String,
}

impl Serialize for JsonLine<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.record.fields.len() + 3))?;
        map.serialize_entry("level", self.record.level.as_str())?;
        map.serialize_entry("message", &self.record.message)?;
        for (key, value) in self.record.fields.iter() {
            map.serialize_entry(key, value)?;
        }
        map.serialize_entry("timestamp", &self.timestamp)?;
        map.end()
    }
}

impl RecordFormatter for JsonFormatter {
    fn format(&self, record: &LogRecord) -> Result<SerializedRecord, DomainError> {
        check_fields(record)?;

        let line = JsonLine {
            record,
            timestamp: record.timestamp_rfc3339(),
        };
        let json =
            serde_json::to_string(&line).map_err(|e| DomainError::FormatError(e.to_string()))?;

        Ok(SerializedRecord::from_line(json))
    }
}
