//! [`Destination`](loglane_application::Destination) adapters.
//!
//! - [`FileDestination`]: lazily opened, append-only file
//! - [`MemoryDestination`]: in-memory buffer with a shared [`MemoryBuffer`] reader
//! - [`ConsoleDestination`]: stdout or stderr
//! - [`NullDestination`]: discards everything

mod console;
mod file;
mod memory;
mod null;

pub use console::{ConsoleDestination, ConsoleStream};
pub use file::FileDestination;
pub use memory::{MemoryBuffer, MemoryDestination};
pub use null::NullDestination;
