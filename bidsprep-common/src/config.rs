//! Configuration loading
//!
//! Config file resolution priority order:
//! 1. Command-line argument (highest priority)
//! 2. `BIDSPREP_CONFIG` environment variable
//! 3. User config file (`~/.config/bidsprep/config.toml` on Linux)
//! 4. System config file (`/etc/bidsprep/config.toml`, Unix only)
//! 5. Built-in defaults (fallback)
//!
//! The default locations (3, 4) may be absent. An explicitly named file (1, 2)
//! must exist, and any file that exists must parse.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "BIDSPREP_CONFIG";

/// Default value written into `B0FieldIdentifier`
pub const DEFAULT_B0_IDENTIFIER: &str = "b0map_fmap0";

/// Tool configuration loaded from TOML
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// Label for `B0FieldIdentifier` in field-map sidecars
    #[serde(default = "default_b0_identifier")]
    pub b0_identifier: String,

    /// Command prefix used to re-run the tool with elevated privileges
    ///
    /// Default: `["sudo", "-E"]`
    #[serde(default = "default_elevation_command")]
    pub elevation_command: Vec<String>,

    /// Logging configuration (optional)
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            b0_identifier: default_b0_identifier(),
            elevation_command: default_elevation_command(),
            logging: LoggingConfig::default(),
        }
    }
}

fn default_b0_identifier() -> String {
    DEFAULT_B0_IDENTIFIER.to_string()
}

fn default_elevation_command() -> Vec<String> {
    vec!["sudo".to_string(), "-E".to_string()]
}

fn default_log_level() -> String {
    "info".to_string()
}

impl TomlConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file that must exist
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Cannot read {}: {}", path.display(), e)))?;
        Self::from_toml_str(&content)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }

    fn validate(&self) -> Result<()> {
        if self.elevation_command.is_empty() {
            return Err(Error::Config(
                "elevation_command must name at least one program".to_string(),
            ));
        }
        Ok(())
    }
}

/// Locates and loads the configuration file
pub struct ConfigResolver {
    cli_path: Option<PathBuf>,
}

impl ConfigResolver {
    pub fn new(cli_path: Option<PathBuf>) -> Self {
        Self { cli_path }
    }

    /// Path of the config file to use, if any
    ///
    /// An explicit path (argument or environment) is returned even when it
    /// does not exist so that loading reports it; default locations are only
    /// returned when present.
    pub fn locate(&self) -> Option<PathBuf> {
        // Priority 1: Command-line argument
        if let Some(path) = &self.cli_path {
            return Some(path.clone());
        }

        // Priority 2: Environment variable
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            if !path.is_empty() {
                return Some(PathBuf::from(path));
            }
        }

        // Priority 3/4: default locations
        default_config_paths().into_iter().find(|p| p.exists())
    }

    /// Load the resolved config, falling back to built-in defaults
    pub fn resolve(&self) -> Result<TomlConfig> {
        match self.locate() {
            Some(path) => {
                debug!("Loading config from {}", path.display());
                TomlConfig::load(&path)
            }
            None => {
                debug!("No config file found, using built-in defaults");
                Ok(TomlConfig::default())
            }
        }
    }
}

fn default_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("bidsprep").join("config.toml"));
    }
    if cfg!(unix) {
        paths.push(PathBuf::from("/etc/bidsprep/config.toml"));
    }
    paths
}
