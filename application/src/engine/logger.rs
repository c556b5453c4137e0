//! The logger façade.
//!
//! [`Logger::log`] runs on the caller's thread and only does cheap work:
//!
//! 1. compare the level against the logger floor (suppressed levels stop here)
//! 2. stamp and format the record once
//! 3. offer the same [`SerializedRecord`] to every sink, in configuration order
//!
//! Sink I/O happens on the sinks' worker threads. [`Logger::drain`] is the
//! only way to wait for it.

use super::builder::LoggerBuilder;
use super::sink::Sink;
use super::timestamp::MonotonicStamper;
use loglane_domain::{DomainError, Fields, Level, LogRecord, RecordFormatter};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Leveled, structured logger fanning records out to independent sinks.
pub struct Logger {
    threshold: Level,
    formatter: Box<dyn RecordFormatter>,
    stamper: MonotonicStamper,
    default_fields: Fields,
    sinks: Vec<Sink>,
}

macro_rules! level_shorthands {
    ($($level:ident => $name:ident, $name_with:ident;)*) => {
        $(
            #[doc = concat!("Log `message` at `", stringify!($name), "`.")]
            pub fn $name(&self, message: impl Into<String>) -> Result<(), DomainError> {
                self.log(Level::$level, message, Fields::new())
            }

            #[doc = concat!("Log `message` with `fields` at `", stringify!($name), "`.")]
            pub fn $name_with(
                &self,
                message: impl Into<String>,
                fields: Fields,
            ) -> Result<(), DomainError> {
                self.log(Level::$level, message, fields)
            }
        )*
    };
}

impl Logger {
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    pub(crate) fn from_parts(
        threshold: Level,
        formatter: Box<dyn RecordFormatter>,
        stamper: MonotonicStamper,
        default_fields: Fields,
        sinks: Vec<Sink>,
    ) -> Self {
        Self {
            threshold,
            formatter,
            stamper,
            default_fields,
            sinks,
        }
    }

    /// The logger floor.
    pub fn threshold(&self) -> Level {
        self.threshold
    }

    pub fn is_enabled(&self, level: Level) -> bool {
        self.threshold.accepts(level)
    }

    /// Sinks in fan-out order.
    pub fn sinks(&self) -> &[Sink] {
        &self.sinks
    }

    pub fn sink(&self, name: &str) -> Option<&Sink> {
        self.sinks.iter().find(|s| s.name() == name)
    }

    /// Emit one record.
    ///
    /// Fails only on a [`DomainError::FormatError`], in which case no sink
    /// sees the record. Sink write failures are reported through the sinks'
    /// error handlers, never here.
    pub fn log(
        &self,
        level: Level,
        message: impl Into<String>,
        fields: Fields,
    ) -> Result<(), DomainError> {
        if !self.threshold.accepts(level) {
            return Ok(());
        }

        let fields = if self.default_fields.is_empty() {
            fields
        } else {
            fields.merged_over(&self.default_fields)
        };
        let record = LogRecord::new(level, message, fields, self.stamper.stamp());
        let serialized = Arc::new(self.formatter.format(&record)?);

        for sink in &self.sinks {
            sink.accept(&serialized, level);
        }
        Ok(())
    }

    /// Emit one record at a level given by name.
    pub fn log_named(
        &self,
        level: &str,
        message: impl Into<String>,
        fields: Fields,
    ) -> Result<(), DomainError> {
        let level: Level = level.parse()?;
        self.log(level, message, fields)
    }

    level_shorthands! {
        Error => error, error_with;
        Warn => warn, warn_with;
        Info => info, info_with;
        Http => http, http_with;
        Verbose => verbose, verbose_with;
        Debug => debug, debug_with;
        Trace => trace, trace_with;
    }

    /// Block until every record accepted before this call is appended and
    /// flushed on every sink. Returns `false` if `timeout` elapses first.
    pub fn drain(&self, timeout: Option<Duration>) -> bool {
        // A timeout too large to represent waits without a deadline.
        let deadline = timeout.and_then(|t| Instant::now().checked_add(t));
        self.sinks.iter().all(|sink| sink.drain(deadline))
    }

    /// Drain, then close every destination and stop the workers.
    ///
    /// If the drain times out, the queues are closed but the workers are
    /// left running detached, so a stuck destination cannot hold up the
    /// caller past `timeout`.
    pub fn close(mut self, timeout: Option<Duration>) -> bool {
        let drained = self.drain(timeout);
        if !drained {
            for sink in &mut self.sinks {
                sink.detach();
            }
        }
        self.sinks.clear();
        drained
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("threshold", &self.threshold)
            .field("default_fields", &self.default_fields)
            .field("sinks", &self.sinks)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SinkConfig;
    use crate::engine::testing::{
        CountingFormatter, FailingDestination, GatedDestination, RecordingDestination,
        ScriptedClock,
    };
    use crate::ports::sink_errors::{SinkOperation, SinkWriteError};
    use chrono::{DateTime, TimeZone, Utc};
    use std::sync::mpsc;
    use std::thread;

    // ==================== Helper ====================

    struct TwoSinks {
        logger: Logger,
        errors: RecordingDestination,
        combined: RecordingDestination,
    }

    fn two_sinks() -> TwoSinks {
        let errors = RecordingDestination::new();
        let combined = RecordingDestination::new();
        let logger = Logger::builder()
            .level(Level::Info)
            .sink(
                SinkConfig::new(errors.clone())
                    .named("error")
                    .with_threshold(Level::Error),
            )
            .sink(SinkConfig::new(combined.clone()).named("combined"))
            .build()
            .unwrap();
        TwoSinks {
            logger,
            errors,
            combined,
        }
    }

    fn contents(dest: &RecordingDestination) -> String {
        dest.lines().join("\n")
    }

    fn parse(line: &str) -> serde_json::Value {
        serde_json::from_str(line).unwrap()
    }

    // ==================== Routing ====================

    #[test]
    fn test_routes_by_sink_threshold() {
        let t = two_sinks();
        t.logger.info("Info message").unwrap();
        t.logger.warn("Warn message").unwrap();
        t.logger.error("Error message").unwrap();
        assert!(t.logger.drain(None));

        let combined = contents(&t.combined);
        assert!(combined.contains("Info message"));
        assert!(combined.contains("Warn message"));
        assert!(combined.contains("Error message"));

        let errors = contents(&t.errors);
        assert!(errors.contains("Error message"));
        assert!(!errors.contains("Info message"));
        assert!(!errors.contains("Warn message"));
    }

    #[test]
    fn test_debug_suppressed_at_info() {
        let t = two_sinks();
        t.logger.debug("Debug message").unwrap();
        t.logger.info("Info message").unwrap();
        assert!(t.logger.drain(None));

        assert!(!contents(&t.combined).contains("Debug message"));
        assert!(!contents(&t.errors).contains("Debug message"));
        assert!(contents(&t.combined).contains("Info message"));
    }

    #[test]
    fn test_formats_once_per_accepted_emission() {
        let formatter = CountingFormatter::default();
        let a = RecordingDestination::new();
        let b = RecordingDestination::new();
        let logger = Logger::builder()
            .formatter(formatter.clone())
            .sink(SinkConfig::new(a.clone()).named("a"))
            .sink(SinkConfig::new(b.clone()).named("b"))
            .build()
            .unwrap();

        logger.debug("suppressed").unwrap();
        assert_eq!(formatter.calls(), 0);

        logger.info("shared").unwrap();
        assert!(logger.drain(None));
        assert_eq!(formatter.calls(), 1);
        assert_eq!(a.lines(), b.lines());
    }

    #[test]
    fn test_record_properties() {
        let t = two_sinks();
        t.logger.info("Test JSON message").unwrap();
        assert!(t.logger.drain(None));

        let lines = t.combined.lines();
        let value = parse(lines.last().unwrap());
        assert!(value["message"].as_str().unwrap().contains("Test JSON message"));
        assert_eq!(value["level"], "info");
        assert!(DateTime::parse_from_rfc3339(value["timestamp"].as_str().unwrap()).is_ok());
    }

    #[test]
    fn test_timestamps_non_decreasing_even_if_clock_steps_back() {
        let times = vec![
            Utc.with_ymd_and_hms(2026, 10, 19, 10, 0, 2).unwrap(),
            Utc.with_ymd_and_hms(2026, 10, 19, 10, 0, 1).unwrap(),
            Utc.with_ymd_and_hms(2026, 10, 19, 10, 0, 3).unwrap(),
        ];
        let dest = RecordingDestination::new();
        let logger = Logger::builder()
            .clock(Arc::new(ScriptedClock::new(times)))
            .sink(SinkConfig::new(dest.clone()))
            .build()
            .unwrap();

        for i in 0..3 {
            logger.info(format!("m{}", i)).unwrap();
        }
        assert!(logger.drain(None));

        let stamps: Vec<DateTime<chrono::FixedOffset>> = dest
            .lines()
            .iter()
            .map(|l| DateTime::parse_from_rfc3339(parse(l)["timestamp"].as_str().unwrap()).unwrap())
            .collect();
        assert_eq!(stamps.len(), 3);
        assert!(stamps.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_request_id_round_trip() {
        let t = two_sinks();
        t.logger
            .info_with("handled", Fields::new().with("requestId", "abc-123"))
            .unwrap();
        assert!(t.logger.drain(None));

        let value = parse(&t.combined.lines()[0]);
        assert_eq!(value["requestId"], "abc-123");
    }

    #[test]
    fn test_default_fields_merged() {
        let dest = RecordingDestination::new();
        let logger = Logger::builder()
            .default_field("service", "billing")
            .default_field("region", "eu")
            .sink(SinkConfig::new(dest.clone()))
            .build()
            .unwrap();

        logger
            .info_with("x", Fields::new().with("region", "us"))
            .unwrap();
        assert!(logger.drain(None));

        let value = parse(&dest.lines()[0]);
        assert_eq!(value["service"], "billing");
        assert_eq!(value["region"], "us");
    }

    // ==================== Drain ====================

    #[test]
    fn test_drain_is_idempotent() {
        let t = two_sinks();
        t.logger.error("once").unwrap();
        assert!(t.logger.drain(None));
        assert!(t.logger.drain(None));
        assert!(t.logger.drain(Some(Duration::from_millis(10))));

        assert_eq!(t.errors.lines().len(), 1);
        assert_eq!(t.combined.lines().len(), 1);
    }

    #[test]
    fn test_drain_times_out_on_stuck_sink() {
        let (dest, gate) = GatedDestination::new();
        let recorded = dest.recorded();
        let logger = Logger::builder()
            .sink(SinkConfig::new(dest).named("slow"))
            .build()
            .unwrap();

        logger.info("waiting").unwrap();
        gate.wait_entered();
        assert!(!logger.drain(Some(Duration::from_millis(30))));

        gate.open();
        assert!(logger.drain(None));
        assert_eq!(recorded.lines().len(), 1);
    }

    #[test]
    fn test_close_returns_on_timeout_with_stuck_sink() {
        let (dest, gate) = GatedDestination::new();
        let logger = Logger::builder()
            .sink(SinkConfig::new(dest).named("stuck"))
            .build()
            .unwrap();

        logger.info("never finishes").unwrap();
        gate.wait_entered();

        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let _ = tx.send(logger.close(Some(Duration::from_millis(50))));
        });
        let closed = rx.recv_timeout(Duration::from_secs(2));
        assert_eq!(closed, Ok(false));

        // Release the detached worker so it can exit.
        gate.open();
    }

    #[test]
    fn test_huge_timeout_means_no_deadline() {
        let t = two_sinks();
        t.logger.error("once").unwrap();
        assert!(t.logger.drain(Some(Duration::MAX)));
        assert_eq!(t.errors.lines().len(), 1);
    }

    #[test]
    fn test_drain_without_sinks() {
        let logger = Logger::builder().build().unwrap();
        logger.info("nowhere").unwrap();
        assert!(logger.drain(Some(Duration::ZERO)));
    }

    #[test]
    fn test_close_drains_and_closes() {
        let dest = RecordingDestination::new();
        let logger = Logger::builder()
            .sink(SinkConfig::new(dest.clone()))
            .build()
            .unwrap();
        logger.warn("bye").unwrap();

        assert!(logger.close(None));
        assert_eq!(dest.lines().len(), 1);
        assert!(dest.is_closed());
    }

    // ==================== Errors ====================

    #[test]
    fn test_format_error_is_synchronous_and_touches_no_sink() {
        let t = two_sinks();
        let err = t
            .logger
            .error_with("bad", Fields::new().with("ratio", f64::NAN))
            .unwrap_err();
        assert!(err.is_format_error());

        assert!(t.logger.drain(None));
        assert!(t.combined.lines().is_empty());
        assert!(t.errors.lines().is_empty());
    }

    #[test]
    fn test_log_named() {
        let t = two_sinks();
        t.logger.log_named("warn", "by name", Fields::new()).unwrap();
        let err = t
            .logger
            .log_named("shout", "nope", Fields::new())
            .unwrap_err();
        assert_eq!(err, DomainError::InvalidLevel("shout".to_string()));

        assert!(t.logger.drain(None));
        assert_eq!(t.combined.lines().len(), 1);
    }

    #[test]
    fn test_failing_sink_does_not_affect_healthy_sink() {
        let (tx, rx) = mpsc::channel::<SinkWriteError>();
        let healthy = RecordingDestination::new();
        let logger = Logger::builder()
            .error_handler(Arc::new(tx))
            .sink(SinkConfig::new(FailingDestination).named("broken"))
            .sink(SinkConfig::new(healthy.clone()).named("healthy"))
            .build()
            .unwrap();

        logger.info("first").unwrap();
        logger.error("second").unwrap();
        assert!(logger.drain(None));

        assert_eq!(healthy.lines().len(), 2);

        let reported: Vec<SinkWriteError> = rx.try_iter().collect();
        assert_eq!(reported.len(), 2);
        assert!(reported.iter().all(|e| e.sink == "broken"));
        assert!(reported.iter().all(|e| e.operation == SinkOperation::Append));
        assert_eq!(logger.sink("broken").unwrap().failure_count(), 2);
        assert_eq!(logger.sink("healthy").unwrap().failure_count(), 0);
    }

    // ==================== Concurrency ====================

    #[test]
    fn test_per_caller_order_preserved() {
        let dest = RecordingDestination::new();
        let logger = Arc::new(
            Logger::builder()
                .queue_capacity(8)
                .sink(SinkConfig::new(dest.clone()))
                .build()
                .unwrap(),
        );

        let callers: Vec<_> = (0..4)
            .map(|caller| {
                let logger = Arc::clone(&logger);
                thread::spawn(move || {
                    for seq in 0..50 {
                        logger
                            .info_with(
                                "tick",
                                Fields::new().with("caller", caller).with("seq", seq),
                            )
                            .unwrap();
                    }
                })
            })
            .collect();
        for caller in callers {
            caller.join().unwrap();
        }
        assert!(logger.drain(None));

        let lines = dest.lines();
        assert_eq!(lines.len(), 200);
        for caller in 0..4 {
            let seqs: Vec<i64> = lines
                .iter()
                .map(|l| parse(l))
                .filter(|v| v["caller"] == caller)
                .map(|v| v["seq"].as_i64().unwrap())
                .collect();
            assert_eq!(seqs, (0..50).collect::<Vec<i64>>());
        }
    }
}
