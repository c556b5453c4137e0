//! CLI entrypoint for loglane
//!
//! Loads configuration, builds a logger through the infrastructure
//! factory, writes one record and waits for every sink to drain.

mod cli;

use anyhow::{Context, Result, bail};
use clap::Parser;
use cli::Cli;
use loglane_application::{Logger, SinkConfig};
use loglane_infrastructure::{
    ConfigLoader, ConsoleDestination, ConsoleStream, FileLoggingConfig, LoggerFactory,
};
use std::time::Duration;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize diagnostics based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    // Diagnostics go to stderr so they never mix with stdout records
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if cli.show_sources {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).context("Failed to load configuration")?
    };

    let logger = build_logger(&config)?;
    let fields = cli.parse_fields()?;

    logger
        .log_named(&cli.level, cli.message(), fields)
        .context("Failed to log message")?;

    let timeout = Duration::from_millis(cli.timeout_ms);
    if !logger.close(Some(timeout)) {
        bail!("Sinks did not drain within {} ms", cli.timeout_ms);
    }
    Ok(())
}

fn build_logger(config: &FileLoggingConfig) -> Result<Logger> {
    let issues = config.validate();
    for issue in &issues {
        if issue.is_error() {
            warn!("Config error: {}", issue.message);
        } else {
            debug!("Config warning: {}", issue.message);
        }
    }
    if issues.iter().any(|i| i.is_error()) {
        bail!("Invalid configuration");
    }

    let mut builder = LoggerFactory::builder(config)?;
    if config.sinks.is_empty() {
        info!("No sinks configured, writing to stdout");
        builder = builder.sink(SinkConfig::new(ConsoleDestination::new(
            ConsoleStream::Stdout,
        )));
    }
    Ok(builder.build()?)
}
