//! Formatter trait and shared field validation

use crate::core::error::DomainError;
use crate::record::{LogRecord, RESERVED_KEYS, SerializedRecord};

/// Turns a [`LogRecord`] into the bytes every sink appends.
///
/// Implementations must embed `level`, `message` and `timestamp`, keep the
/// message text intact, and fail rather than emit a record with fields
/// missing.
pub trait RecordFormatter: Send + Sync {
    fn format(&self, record: &LogRecord) -> Result<SerializedRecord, DomainError>;
}

impl<F: RecordFormatter + ?Sized> RecordFormatter for Box<F> {
    fn format(&self, record: &LogRecord) -> Result<SerializedRecord, DomainError> {
        (**self).format(record)
    }
}

/// Reject fields that would shadow a reserved key or cannot be written.
pub(crate) fn check_fields(record: &LogRecord) -> Result<(), DomainError> {
    for (key, value) in record.fields.iter() {
        if RESERVED_KEYS.contains(&key) {
            return Err(DomainError::FormatError(format!(
                "field '{}' collides with a reserved key",
                key
            )));
        }
        if !value.is_representable() {
            return Err(DomainError::FormatError(format!(
                "field '{}' has no JSON representation",
                key
            )));
        }
    }
    Ok(())
}
