//! Configuration file loader with multi-source merging

use super::file_config::FileLoggingConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::env;
use std::io::{self, Write};
use std::path::PathBuf;

const PROJECT_FILES: [&str; 2] = ["loglane.toml", ".loglane.toml"];

/// Scalar settings that may be overridden from `LOGLANE_*` variables.
const ENV_KEYS: [&str; 4] = ["level", "format", "queue_capacity", "backpressure"];

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. `LOGLANE_LEVEL`, `LOGLANE_FORMAT`, `LOGLANE_QUEUE_CAPACITY`, `LOGLANE_BACKPRESSURE`
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./loglane.toml` or `./.loglane.toml`
    /// 4. XDG config: `$XDG_CONFIG_HOME/loglane/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileLoggingConfig, Box<figment::Error>> {
        let mut figment = Figment::new().merge(Serialized::defaults(FileLoggingConfig::default()));

        // Add global config (XDG or fallback)
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(&global_path));
        }

        // Add project-level config file (first name found wins)
        if let Some(path) = Self::project_config_path() {
            figment = figment.merge(Toml::file(&path));
        }

        // Add explicit config path (highest priority for files)
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment
            .merge(Env::prefixed("LOGLANE_").only(&ENV_KEYS))
            .extract()
            .map_err(Box::new)
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileLoggingConfig {
        FileLoggingConfig::default()
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/loglane/config.toml if set,
    /// otherwise falls back to ~/.config/loglane/config.toml
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("loglane").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources() {
        let mut out = io::stdout().lock();
        // Best effort: a closed stdout has nowhere to report to.
        let _ = Self::write_config_sources(&mut out);
    }

    /// Write each source with the value it contributes, highest priority first.
    pub fn write_config_sources(out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "Configuration sources (in priority order):")?;

        for key in ENV_KEYS {
            let var = format!("LOGLANE_{}", key.to_uppercase());
            match env::var(&var) {
                Ok(value) => writeln!(out, "  env      {}={}", var, value)?,
                Err(_) => writeln!(out, "  env      {} (unset)", var)?,
            }
        }

        match Self::project_config_path() {
            Some(path) => writeln!(out, "  project  {}", path.display())?,
            None => writeln!(out, "  project  {} (not found)", PROJECT_FILES.join(" or "))?,
        }

        match Self::global_config_path() {
            Some(path) if path.exists() => writeln!(out, "  global   {}", path.display())?,
            Some(path) => writeln!(out, "  global   {} (not found)", path.display())?,
            None => writeln!(out, "  global   (no config directory)")?,
        }

        let defaults = serde_json::to_value(FileLoggingConfig::default()).map_err(io::Error::other)?;
        let defaults: Vec<String> = ENV_KEYS
            .iter()
            .map(|key| format!("{}={}", key, defaults[*key]))
            .collect();
        writeln!(out, "  defaults {}", defaults.join(" "))
    }
}
