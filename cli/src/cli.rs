//! CLI argument definitions

use anyhow::{Result, bail};
use clap::Parser;
use loglane_domain::Fields;
use std::path::PathBuf;

/// CLI arguments for loglane
#[derive(Parser, Debug)]
#[command(name = "loglane")]
#[command(author, version, about = "Write one structured log record to the configured sinks")]
#[command(long_about = r#"
loglane formats a message once and fans it out to every configured sink whose
threshold admits the record's level. Sinks are written asynchronously; the
command waits for them to drain before exiting.

Configuration files are loaded from (in priority order):
1. LOGLANE_LEVEL, LOGLANE_FORMAT, ...   Environment overrides
2. --config <path>                      Explicit config file
3. ./loglane.toml                       Project-level config
4. ~/.config/loglane/config.toml        Global config

With no [[sinks]] configured, records are written to stdout.

Example:
  loglane "service started"
  loglane -l error -f requestId=abc-123 -f attempt=3 "payment declined"
"#)]
pub struct Cli {
    /// Message to log (words are joined with spaces)
    #[arg(required_unless_present = "show_sources")]
    pub message: Vec<String>,

    /// Level of the record
    #[arg(short, long, value_name = "LEVEL", default_value = "info")]
    pub level: String,

    /// Structured field; the value is parsed as JSON, falling back to a string
    #[arg(short, long = "field", value_name = "KEY=VALUE")]
    pub fields: Vec<String>,

    /// How long to wait for sinks to drain before giving up
    #[arg(long, value_name = "MS", default_value_t = 5000)]
    pub timeout_ms: u64,

    /// Verbosity of loglane's own diagnostics (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_sources: bool,
}

impl Cli {
    pub fn message(&self) -> String {
        self.message.join(" ")
    }

    /// Collect `--field` arguments in the order given.
    pub fn parse_fields(&self) -> Result<Fields> {
        let mut fields = Fields::new();
        for raw in &self.fields {
            let Some((key, value)) = raw.split_once('=') else {
                bail!("Invalid field '{}': expected KEY=VALUE", raw);
            };
            let key = key.trim();
            if key.is_empty() {
                bail!("Invalid field '{}': key is empty", raw);
            }
            let value = serde_json::from_str::<serde_json::Value>(value)
                .unwrap_or_else(|_| serde_json::Value::String(value.to_string()));
            fields.insert(key, value);
        }
        Ok(fields)
    }
}
