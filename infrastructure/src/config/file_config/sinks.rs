//! Sink entries from TOML (`[[sinks]]` array)

use crate::destinations::{
    ConsoleDestination, ConsoleStream, FileDestination, NullDestination,
};
use loglane_application::{Destination, SinkConfig};
use loglane_domain::{DomainError, Level};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where a configured sink writes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum FileSinkTarget {
    File {
        path: PathBuf,
    },
    Console {
        #[serde(default)]
        stream: ConsoleStream,
    },
    Null,
}

impl FileSinkTarget {
    pub fn destination(&self) -> Box<dyn Destination> {
        match self {
            FileSinkTarget::File { path } => Box::new(FileDestination::new(path)),
            FileSinkTarget::Console { stream } => Box::new(ConsoleDestination::new(*stream)),
            FileSinkTarget::Null => Box::new(NullDestination),
        }
    }
}

/// Raw sink configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSinkConfig {
    /// Defaults to the destination description (e.g. the file path)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Threshold name; unset inherits the logger level
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(flatten)]
    pub target: FileSinkTarget,
}

impl FileSinkConfig {
    pub fn parse_level(&self) -> Result<Option<Level>, DomainError> {
        self.level.as_deref().map(str::parse::<Level>).transpose()
    }

    /// Name the sink will run under.
    pub fn resolved_name(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| self.target.destination().describe())
    }

    pub fn to_sink_config(&self) -> Result<SinkConfig, DomainError> {
        let mut sink = SinkConfig::from_boxed(self.target.destination());
        if let Some(name) = &self.name {
            sink = sink.named(name.clone());
        }
        if let Some(level) = self.parse_level()? {
            sink = sink.with_threshold(level);
        }
        Ok(sink)
    }
}
