//! Configuration file loading for loglane
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `LOGLANE_*` environment variables (scalar settings only)
//! 2. `--config <path>` specified file
//! 3. Project root: `./loglane.toml` or `./.loglane.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/loglane/config.toml`
//! 5. Default values

mod factory;
mod file_config;
mod loader;
mod validation;

pub use factory::{ConfigError, LoggerFactory};
pub use file_config::{FileLoggingConfig, FileSinkConfig, FileSinkTarget};
pub use loader::ConfigLoader;
pub use validation::{ConfigIssue, ConfigIssueCode, Severity};
