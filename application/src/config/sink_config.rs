//! Per-sink settings

use crate::ports::destination::Destination;
use crate::ports::sink_errors::SinkErrorHandler;
use loglane_domain::Level;
use std::sync::Arc;

/// Configuration of one sink: where it writes and what it lets through.
pub struct SinkConfig {
    /// Unique within a logger; defaults to the destination's description
    pub name: String,
    /// `None` inherits the logger's level
    pub threshold: Option<Level>,
    pub destination: Box<dyn Destination>,
    /// Overrides the logger-wide error handler for this sink
    pub error_handler: Option<Arc<dyn SinkErrorHandler>>,
}

impl SinkConfig {
    pub fn new(destination: impl Destination + 'static) -> Self {
        Self::from_boxed(Box::new(destination))
    }

    pub fn from_boxed(destination: Box<dyn Destination>) -> Self {
        Self {
            name: destination.describe(),
            threshold: None,
            destination,
            error_handler: None,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_threshold(mut self, level: Level) -> Self {
        self.threshold = Some(level);
        self
    }

    pub fn with_error_handler(mut self, handler: Arc<dyn SinkErrorHandler>) -> Self {
        self.error_handler = Some(handler);
        self
    }
}

impl std::fmt::Debug for SinkConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SinkConfig")
            .field("name", &self.name)
            .field("threshold", &self.threshold)
            .field("kind", &self.destination.kind())
            .field("error_handler", &self.error_handler.is_some())
            .finish()
    }
}
