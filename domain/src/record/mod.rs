//! Log records and their structured fields.

mod entities;
mod fields;

pub use entities::{LogRecord, RESERVED_KEYS, SerializedRecord};
pub use fields::{FieldValue, Fields};
