//! Record formatting.
//!
//! A [`RecordFormatter`] serializes a [`LogRecord`](crate::record::LogRecord)
//! exactly once per emission; the resulting
//! [`SerializedRecord`](crate::record::SerializedRecord) is shared by all sinks.

mod json;
mod kind;
mod simple;
mod traits;

pub use json::JsonFormatter;
pub use kind::FormatKind;
pub use simple::SimpleFormatter;
pub use traits::RecordFormatter;
