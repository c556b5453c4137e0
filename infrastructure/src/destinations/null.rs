//! Destination that discards everything

use loglane_application::ports::destination::{Destination, SinkKind};
use std::io;

#[derive(Debug, Clone, Copy, Default)]
pub struct NullDestination;

impl Destination for NullDestination {
    fn append(&mut self, _bytes: &[u8]) -> io::Result<()> {
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn kind(&self) -> SinkKind {
        SinkKind::Null
    }

    fn describe(&self) -> String {
        "null".to_string()
    }
}
