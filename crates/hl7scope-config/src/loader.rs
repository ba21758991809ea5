//! Configuration file loading.
//!
//! Two loaders:
//!
//! - [`load_config`] - strict, errors if the file is missing
//! - [`load_config_or_default`] - falls back to built-in defaults when the
//!   file does not exist (the console has no `init` step; a config file is
//!   optional)

use crate::{ClientConfig, TuiConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default config file name, looked up relative to the working directory.
pub const DEFAULT_CONFIG_FILENAME: &str = "hl7scope.toml";

/// Commented starter config, written by `--write-config`.
pub const DEFAULT_CONFIG: &str = r#"# hl7scope configuration

[client]
# host = "127.0.0.1"
# port = 8080

[tui]
# use_utc = false
# collapse_scope = "message"   # or "control-id"

[tui.theme]
# name = "dark"
"#;

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub client: ClientConfig,

    #[serde(default)]
    pub tui: TuiConfig,
}

/// Errors that can occur during config loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Load configuration from a TOML file. Errors if the file is missing.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound(path.to_path_buf()));
    }
    debug!(path = %path.display(), "Loading config file");
    let content = std::fs::read_to_string(path)?;
    load_config_from_str(&content)
}

/// Parse configuration from TOML text.
pub fn load_config_from_str(content: &str) -> Result<Config, ConfigError> {
    Ok(toml::from_str(content)?)
}

/// Load the config file if it exists, otherwise use defaults.
pub fn load_config_or_default(path: &Path) -> Result<Config, ConfigError> {
    match load_config(path) {
        Ok(config) => Ok(config),
        Err(ConfigError::NotFound(_)) => {
            debug!(path = %path.display(), "No config file, using defaults");
            Ok(Config::default())
        }
        Err(e) => Err(e),
    }
}
