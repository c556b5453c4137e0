//! Port for reading the current time.
//!
//! Record timestamps come from a [`Clock`] so tests can pin them.

use chrono::{DateTime, Utc};

/// Source of absolute time for record timestamps.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
