//! Test doubles for the engine.

use crate::ports::clock::Clock;
use crate::ports::destination::{Destination, SinkKind};
use chrono::{DateTime, Utc};
use loglane_domain::{DomainError, JsonFormatter, LogRecord, RecordFormatter, SerializedRecord};
use std::collections::VecDeque;
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, mpsc};

#[derive(Default)]
struct Recorded {
    data: Vec<u8>,
    flushes: usize,
    closed: bool,
}

/// In-memory destination whose clones share one buffer.
#[derive(Clone, Default)]
pub(crate) struct RecordingDestination {
    state: Arc<Mutex<Recorded>>,
}

impl RecordingDestination {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn lines(&self) -> Vec<String> {
        let state = self.state.lock().unwrap();
        String::from_utf8_lossy(&state.data)
            .lines()
            .map(str::to_string)
            .collect()
    }

    pub(crate) fn flush_count(&self) -> usize {
        self.state.lock().unwrap().flushes
    }

    pub(crate) fn is_closed(&self) -> bool {
        self.state.lock().unwrap().closed
    }
}

impl Destination for RecordingDestination {
    fn append(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.state.lock().unwrap().data.extend_from_slice(bytes);
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.state.lock().unwrap().flushes += 1;
        Ok(())
    }

    fn close(&mut self) -> io::Result<()> {
        self.state.lock().unwrap().closed = true;
        Ok(())
    }

    fn kind(&self) -> SinkKind {
        SinkKind::Memory
    }

    fn describe(&self) -> String {
        "recording".to_string()
    }
}

/// Destination whose every append fails.
pub(crate) struct FailingDestination;

impl Destination for FailingDestination {
    fn append(&mut self, _bytes: &[u8]) -> io::Result<()> {
        Err(io::Error::other("disk on fire"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Destination that panics on every append and flush.
pub(crate) struct PanickingDestination;

impl Destination for PanickingDestination {
    fn append(&mut self, _bytes: &[u8]) -> io::Result<()> {
        panic!("append exploded");
    }

    fn flush(&mut self) -> io::Result<()> {
        panic!("flush exploded");
    }
}

/// Destination that blocks in `append` until its [`Gate`] is opened.
pub(crate) struct GatedDestination {
    inner: RecordingDestination,
    entered: mpsc::Sender<()>,
    release: mpsc::Receiver<()>,
}

pub(crate) struct Gate {
    entered: mpsc::Receiver<()>,
    _release: mpsc::Sender<()>,
}

impl GatedDestination {
    pub(crate) fn new() -> (Self, Gate) {
        let (entered_tx, entered_rx) = mpsc::channel();
        let (release_tx, release_rx) = mpsc::channel();
        let dest = Self {
            inner: RecordingDestination::new(),
            entered: entered_tx,
            release: release_rx,
        };
        let gate = Gate {
            entered: entered_rx,
            _release: release_tx,
        };
        (dest, gate)
    }

    pub(crate) fn recorded(&self) -> RecordingDestination {
        self.inner.clone()
    }
}

impl Gate {
    /// Wait until the worker is blocked inside `append`.
    pub(crate) fn wait_entered(&self) {
        let _ = self.entered.recv();
    }

    /// Let every pending and future append through.
    pub(crate) fn open(self) {}
}

impl Destination for GatedDestination {
    fn append(&mut self, bytes: &[u8]) -> io::Result<()> {
        let _ = self.entered.send(());
        let _ = self.release.recv();
        self.inner.append(bytes)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// Clock that replays a fixed sequence, then repeats the last value.
pub(crate) struct ScriptedClock {
    times: Mutex<VecDeque<DateTime<Utc>>>,
    last: Mutex<DateTime<Utc>>,
}

impl ScriptedClock {
    pub(crate) fn new(times: Vec<DateTime<Utc>>) -> Self {
        let last = times.last().copied().unwrap_or_else(Utc::now);
        Self {
            times: Mutex::new(times.into()),
            last: Mutex::new(last),
        }
    }
}

impl Clock for ScriptedClock {
    fn now(&self) -> DateTime<Utc> {
        match self.times.lock().unwrap().pop_front() {
            Some(t) => {
                *self.last.lock().unwrap() = t;
                t
            }
            None => *self.last.lock().unwrap(),
        }
    }
}

/// JSON formatter that counts how often it runs.
#[derive(Clone, Default)]
pub(crate) struct CountingFormatter {
    calls: Arc<AtomicUsize>,
}

impl CountingFormatter {
    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl RecordFormatter for CountingFormatter {
    fn format(&self, record: &LogRecord) -> Result<SerializedRecord, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        JsonFormatter.format(record)
    }
}
