//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! Level names stay strings here and are parsed (and rejected) when a
//! logger is built, so that validation can report every bad name at once.

mod sinks;

pub use sinks::{FileSinkConfig, FileSinkTarget};

use super::validation::{ConfigIssue, ConfigIssueCode, Severity};
use loglane_application::{Backpressure, DEFAULT_QUEUE_CAPACITY, LoggerConfig};
use loglane_domain::{DomainError, FieldValue, FormatKind, Level};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// Logger floor
    pub level: String,
    /// Record format (`json` or `simple`)
    pub format: FormatKind,
    /// Bounded queue length per sink
    pub queue_capacity: usize,
    /// Full-queue policy (`block` or `drop_newest`)
    pub backpressure: Backpressure,
    /// Fields added to every record
    pub default_fields: serde_json::Map<String, serde_json::Value>,
    /// Sinks in fan-out order
    pub sinks: Vec<FileSinkConfig>,
}

impl Default for FileLoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::default().to_string(),
            format: FormatKind::default(),
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            backpressure: Backpressure::default(),
            default_fields: serde_json::Map::new(),
            sinks: Vec::new(),
        }
    }
}

impl FileLoggingConfig {
    pub fn parse_level(&self) -> Result<Level, DomainError> {
        self.level.parse()
    }

    /// Logger-wide settings, rejecting an unknown level name.
    pub fn to_logger_config(&self) -> Result<LoggerConfig, DomainError> {
        let mut config = LoggerConfig::default()
            .with_level(self.parse_level()?)
            .with_format(self.format)
            .with_queue_capacity(self.queue_capacity)
            .with_backpressure(self.backpressure);
        for (key, value) in &self.default_fields {
            config
                .default_fields
                .insert(key.clone(), FieldValue::from(value.clone()));
        }
        Ok(config)
    }

    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        // 1. Level names
        if self.parse_level().is_err() {
            issues.push(invalid_level("level", &self.level));
        }
        for (index, sink) in self.sinks.iter().enumerate() {
            if let Some(level) = &sink.level
                && sink.parse_level().is_err()
            {
                issues.push(invalid_level(&format!("sinks[{}].level", index), level));
            }
        }

        // 2. Queue bound
        if self.queue_capacity == 0 {
            issues.push(ConfigIssue {
                severity: Severity::Error,
                code: ConfigIssueCode::ZeroQueueCapacity,
                message: "queue_capacity must be at least 1".to_string(),
            });
        }

        // 3. Sink names
        let mut names = HashSet::new();
        for sink in &self.sinks {
            let name = sink.resolved_name();
            if !names.insert(name.clone()) {
                issues.push(ConfigIssue {
                    severity: Severity::Error,
                    code: ConfigIssueCode::DuplicateSinkName(name.clone()),
                    message: format!("sink name '{}' is used more than once", name),
                });
            }
        }

        // 4. Nothing to write to
        if self.sinks.is_empty() {
            issues.push(ConfigIssue {
                severity: Severity::Warning,
                code: ConfigIssueCode::NoSinks,
                message: "no [[sinks]] configured; records will be discarded".to_string(),
            });
        }

        issues
    }
}

fn invalid_level(field: &str, value: &str) -> ConfigIssue {
    ConfigIssue {
        severity: Severity::Error,
        code: ConfigIssueCode::InvalidLevel {
            field: field.to_string(),
            value: value.to_string(),
        },
        message: format!(
            "{}: unknown level '{}' (expected one of {})",
            field,
            value,
            Level::ALL.map(Level::as_str).join(", ")
        ),
    }
}
