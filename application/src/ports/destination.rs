//! Port for the storage a sink appends to.
//!
//! A [`Destination`] is owned by exactly one sink worker thread, so methods
//! take `&mut self` and implementations need `Send` but not `Sync`.

use std::io;

/// Capability tag describing what backs a sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SinkKind {
    File,
    Memory,
    Console,
    Null,
    Custom,
}

impl SinkKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SinkKind::File => "file",
            SinkKind::Memory => "memory",
            SinkKind::Console => "console",
            SinkKind::Null => "null",
            SinkKind::Custom => "custom",
        }
    }
}

impl std::fmt::Display for SinkKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Append-only write target behind a sink.
pub trait Destination: Send {
    /// Append one serialized record (separator included) at the end.
    fn append(&mut self, bytes: &[u8]) -> io::Result<()>;

    /// Make everything appended so far durable.
    fn flush(&mut self) -> io::Result<()>;

    /// Flush and release the underlying resource.
    fn close(&mut self) -> io::Result<()> {
        self.flush()
    }

    fn kind(&self) -> SinkKind {
        SinkKind::Custom
    }

    /// Human-readable identity, used as the default sink name.
    fn describe(&self) -> String {
        self.kind().to_string()
    }
}

impl<D: Destination + ?Sized> Destination for Box<D> {
    fn append(&mut self, bytes: &[u8]) -> io::Result<()> {
        (**self).append(bytes)
    }

    fn flush(&mut self) -> io::Result<()> {
        (**self).flush()
    }

    fn close(&mut self) -> io::Result<()> {
        (**self).close()
    }

    fn kind(&self) -> SinkKind {
        (**self).kind()
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}
