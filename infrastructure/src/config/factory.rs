//! Build a [`Logger`] from file configuration

use super::file_config::FileLoggingConfig;
use loglane_application::{Logger, LoggerBuildError, LoggerBuilder};
use loglane_domain::DomainError;
use thiserror::Error;

/// Errors turning configuration into a running logger
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),

    #[error(transparent)]
    Invalid(#[from] DomainError),

    #[error("Failed to build logger: {0}")]
    Build(#[from] LoggerBuildError),
}

/// Wires file configuration to the engine.
pub struct LoggerFactory;

impl LoggerFactory {
    /// A builder preloaded with `config`, for callers that also want to set
    /// a clock or error handler.
    pub fn builder(config: &FileLoggingConfig) -> Result<LoggerBuilder, ConfigError> {
        let mut builder = Logger::builder().config(config.to_logger_config()?);
        for sink in &config.sinks {
            builder = builder.sink(sink.to_sink_config()?);
        }
        Ok(builder)
    }

    pub fn build(config: &FileLoggingConfig) -> Result<Logger, ConfigError> {
        Ok(Self::builder(config)?.build()?)
    }
}
