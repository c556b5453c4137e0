//! Logger construction

use super::error::LoggerBuildError;
use super::logger::Logger;
use super::sink::Sink;
use super::timestamp::MonotonicStamper;
use crate::config::{Backpressure, LoggerConfig, SinkConfig};
use crate::ports::clock::{Clock, SystemClock};
use crate::ports::sink_errors::{SinkErrorHandler, TracingSinkErrors};
use loglane_domain::{FieldValue, FormatKind, Level, RecordFormatter};
use std::collections::HashSet;
use std::sync::Arc;

/// Builder for [`Logger`].
///
/// Sinks keep the order they are added in; that order is the fan-out order.
#[derive(Default)]
pub struct LoggerBuilder {
    config: LoggerConfig,
    sinks: Vec<SinkConfig>,
    clock: Option<Arc<dyn Clock>>,
    formatter: Option<Box<dyn RecordFormatter>>,
    error_handler: Option<Arc<dyn SinkErrorHandler>>,
}

impl LoggerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all logger-wide settings at once.
    pub fn config(mut self, config: LoggerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn level(mut self, level: Level) -> Self {
        self.config.level = level;
        self
    }

    pub fn format(mut self, format: FormatKind) -> Self {
        self.config.format = format;
        self
    }

    /// Use a custom formatter instead of the configured [`FormatKind`].
    pub fn formatter(mut self, formatter: impl RecordFormatter + 'static) -> Self {
        self.formatter = Some(Box::new(formatter));
        self
    }

    pub fn queue_capacity(mut self, capacity: usize) -> Self {
        self.config.queue_capacity = capacity;
        self
    }

    pub fn backpressure(mut self, backpressure: Backpressure) -> Self {
        self.config.backpressure = backpressure;
        self
    }

    pub fn default_field(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.config.default_fields.insert(key, value);
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Handler for sinks that do not set their own.
    pub fn error_handler(mut self, handler: Arc<dyn SinkErrorHandler>) -> Self {
        self.error_handler = Some(handler);
        self
    }

    pub fn sink(mut self, sink: SinkConfig) -> Self {
        self.sinks.push(sink);
        self
    }

    /// Validate the configuration and start one worker per sink.
    pub fn build(self) -> Result<Logger, LoggerBuildError> {
        let LoggerBuilder {
            config,
            sinks,
            clock,
            formatter,
            error_handler,
        } = self;

        if config.queue_capacity == 0 {
            return Err(LoggerBuildError::ZeroCapacity);
        }

        let mut names = HashSet::new();
        for sink in &sinks {
            if !names.insert(sink.name.as_str()) {
                return Err(LoggerBuildError::DuplicateSink(sink.name.clone()));
            }
        }

        let errors = error_handler.unwrap_or_else(|| Arc::new(TracingSinkErrors));
        let sinks = sinks
            .into_iter()
            .map(|sink| {
                Sink::spawn(
                    sink,
                    config.level,
                    config.queue_capacity,
                    config.backpressure,
                    Arc::clone(&errors),
                )
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Logger::from_parts(
            config.level,
            formatter.unwrap_or_else(|| config.format.formatter()),
            MonotonicStamper::new(clock.unwrap_or_else(|| Arc::new(SystemClock))),
            config.default_fields,
            sinks,
        ))
    }
}
