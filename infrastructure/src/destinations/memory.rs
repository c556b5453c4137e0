//! In-memory destination with a shared read handle

use loglane_application::ports::destination::{Destination, SinkKind};
use std::io;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Cloneable view of the bytes a [`MemoryDestination`] has received.
#[derive(Debug, Clone, Default)]
pub struct MemoryBuffer {
    data: Arc<Mutex<Vec<u8>>>,
}

impl MemoryBuffer {
    fn lock(&self) -> MutexGuard<'_, Vec<u8>> {
        self.data.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.lock()).into_owned()
    }

    /// Records received so far, separators removed
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }
}

/// Destination that keeps every record in memory.
#[derive(Debug, Default)]
pub struct MemoryDestination {
    buffer: MemoryBuffer,
}

impl MemoryDestination {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle for reading what has been written; stays valid after the
    /// destination is moved into a sink.
    pub fn buffer(&self) -> MemoryBuffer {
        self.buffer.clone()
    }
}

impl Destination for MemoryDestination {
    fn append(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.buffer.lock().extend_from_slice(bytes);
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn kind(&self) -> SinkKind {
        SinkKind::Memory
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
