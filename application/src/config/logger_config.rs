//! Logger-wide settings

use loglane_domain::{DomainError, FieldValue, Fields, FormatKind, Level};
use serde::{Deserialize, Serialize};

/// Records buffered per sink before the backpressure policy applies.
pub const DEFAULT_QUEUE_CAPACITY: usize = 1024;

/// What a sink does when its queue is full.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Backpressure {
    /// The emitting caller waits for room (default; nothing is lost)
    Block,
    /// The new record is discarded and counted
    DropNewest,
}

impl Default for Backpressure {
    fn default() -> Self {
        Self::Block
    }
}

/// Settings shared by every sink of a logger.
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// Logger floor; also the threshold of sinks that do not set their own
    pub level: Level,
    pub format: FormatKind,
    /// Bounded queue length per sink
    pub queue_capacity: usize,
    pub backpressure: Backpressure,
    /// Fields merged under every record; call-site fields win on conflict
    pub default_fields: Fields,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: Level::Info,
            format: FormatKind::Json,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            backpressure: Backpressure::Block,
            default_fields: Fields::new(),
        }
    }
}

impl LoggerConfig {
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Set the level by name, rejecting unknown names.
    pub fn with_level_name(self, name: &str) -> Result<Self, DomainError> {
        Ok(self.with_level(name.parse()?))
    }

    pub fn with_format(mut self, format: FormatKind) -> Self {
        self.format = format;
        self
    }

    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity;
        self
    }

    pub fn with_backpressure(mut self, backpressure: Backpressure) -> Self {
        self.backpressure = backpressure;
        self
    }

    pub fn with_default_field(
        mut self,
        key: impl Into<String>,
        value: impl Into<FieldValue>,
    ) -> Self {
        self.default_fields.insert(key, value);
        self
    }
}
