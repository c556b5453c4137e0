//! Append-only file destination.
//!
//! The file is opened on the first append, not at construction, and the
//! handle is kept for the lifetime of the destination. A failed open is
//! retried on every later append so the sink keeps reporting the failure.

use loglane_application::ports::destination::{Destination, SinkKind};
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Newline-delimited records appended to a file.
pub struct FileDestination {
    path: PathBuf,
    writer: Option<BufWriter<File>>,
}

impl FileDestination {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            writer: None,
        }
    }

    /// Get the path to the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the file has been opened yet.
    pub fn is_open(&self) -> bool {
        self.writer.is_some()
    }

    fn open(path: &Path) -> io::Result<BufWriter<File>> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new().create(true).append(true).open(path)?;
        debug!(path = %path.display(), "opened log file");
        Ok(BufWriter::new(file))
    }
}

impl Destination for FileDestination {
    fn append(&mut self, bytes: &[u8]) -> io::Result<()> {
        let writer = match self.writer.take() {
            Some(writer) => writer,
            None => Self::open(&self.path)?,
        };
        self.writer.insert(writer).write_all(bytes)
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.writer.as_mut() {
            Some(writer) => writer.flush(),
            None => Ok(()),
        }
    }

    fn close(&mut self) -> io::Result<()> {
        match self.writer.take() {
            Some(mut writer) => writer.flush(),
            None => Ok(()),
        }
    }

    fn kind(&self) -> SinkKind {
        SinkKind::File
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
