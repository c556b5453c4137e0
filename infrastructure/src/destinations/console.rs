//! Standard output / standard error destination

use loglane_application::ports::destination::{Destination, SinkKind};
use serde::{Deserialize, Serialize};
use std::io::{self, Write};

/// Which standard stream a console sink writes to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsoleStream {
    #[default]
    Stdout,
    Stderr,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleDestination {
    stream: ConsoleStream,
}

impl ConsoleDestination {
    pub fn new(stream: ConsoleStream) -> Self {
        Self { stream }
    }

    pub fn stream(&self) -> ConsoleStream {
        self.stream
    }
}

impl Destination for ConsoleDestination {
    fn append(&mut self, bytes: &[u8]) -> io::Result<()> {
        match self.stream {
            ConsoleStream::Stdout => io::stdout().lock().write_all(bytes),
            ConsoleStream::Stderr => io::stderr().lock().write_all(bytes),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.stream {
            ConsoleStream::Stdout => io::stdout().flush(),
            ConsoleStream::Stderr => io::stderr().flush(),
        }
    }

    fn kind(&self) -> SinkKind {
        SinkKind::Console
    }

    fn describe(&self) -> String {
        match self.stream {
            ConsoleStream::Stdout => "stdout".to_string(),
            ConsoleStream::Stderr => "stderr".to_string(),
        }
    }
}
