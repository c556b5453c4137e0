//! Monotonic record timestamps

use crate::ports::clock::Clock;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

/// Reads a [`Clock`] and never hands out a time earlier than one it has
/// already handed out, even if the clock steps backwards.
pub struct MonotonicStamper {
    clock: Arc<dyn Clock>,
    last_micros: AtomicI64,
}

impl MonotonicStamper {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            last_micros: AtomicI64::new(i64::MIN),
        }
    }

    pub fn stamp(&self) -> DateTime<Utc> {
        let now = self.clock.now();
        let micros = now.timestamp_micros();
        let previous = self.last_micros.fetch_max(micros, Ordering::AcqRel);
        if previous > micros {
            DateTime::from_timestamp_micros(previous).unwrap_or(now)
        } else {
            now
        }
    }
}
