//! Delivery bookkeeping shared by a sink and its worker.
//!
//! `submitted` counts records handed to the queue; `completed` counts
//! records the worker has appended (or failed to append) and flushed.
//! `completed <= submitted` holds at all times.

use crate::ports::sink_errors::SinkWriteError;
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use std::time::Instant;

#[derive(Debug, Default)]
struct Counters {
    submitted: u64,
    completed: u64,
    failures: u64,
    dropped: u64,
    last_error: Option<SinkWriteError>,
}

#[derive(Debug, Default)]
pub(crate) struct DeliveryProgress {
    counters: Mutex<Counters>,
    idle: Condvar,
}

impl DeliveryProgress {
    fn lock(&self) -> MutexGuard<'_, Counters> {
        self.counters.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Count a record that is about to be sent on a blocking queue.
    pub(crate) fn submit(&self) {
        self.lock().submitted += 1;
    }

    /// Run a non-blocking enqueue under the lock so the worker cannot
    /// complete the record before it is counted.
    pub(crate) fn try_submit(&self, enqueue: impl FnOnce() -> bool) -> bool {
        let mut counters = self.lock();
        if enqueue() {
            counters.submitted += 1;
            true
        } else {
            counters.dropped += 1;
            false
        }
    }

    pub(crate) fn complete(&self, count: u64) {
        let mut counters = self.lock();
        counters.completed += count;
        self.idle.notify_all();
    }

    pub(crate) fn record_failure(&self, error: SinkWriteError) {
        let mut counters = self.lock();
        counters.failures += 1;
        counters.last_error = Some(error);
    }

    pub(crate) fn submitted(&self) -> u64 {
        self.lock().submitted
    }

    pub(crate) fn pending(&self) -> u64 {
        let counters = self.lock();
        counters.submitted - counters.completed
    }

    pub(crate) fn failures(&self) -> u64 {
        self.lock().failures
    }

    pub(crate) fn dropped(&self) -> u64 {
        self.lock().dropped
    }

    pub(crate) fn last_error(&self) -> Option<SinkWriteError> {
        self.lock().last_error.clone()
    }

    /// Block until `completed >= target`. Returns `false` if `deadline`
    /// passes first.
    pub(crate) fn wait_until(&self, target: u64, deadline: Option<Instant>) -> bool {
        let mut counters = self.lock();
        while counters.completed < target {
            match deadline {
                None => {
                    counters = self
                        .idle
                        .wait(counters)
                        .unwrap_or_else(PoisonError::into_inner);
                }
                Some(deadline) => {
                    let now = Instant::now();
                    if now >= deadline {
                        return false;
                    }
                    let (guard, _) = self
                        .idle
                        .wait_timeout(counters, deadline - now)
                        .unwrap_or_else(PoisonError::into_inner);
                    counters = guard;
                }
            }
        }
        true
    }
}
