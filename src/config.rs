use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{Result, VersionSyncError};

/// File name looked up in the working directory
pub const CONFIG_FILE: &str = "versionsync.toml";

/// Represents the complete configuration for version-sync.
///
/// Every field has a default, so an empty file is a valid configuration.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    /// Source of truth holding the bare `X.Y.Z` version
    #[serde(default = "default_version_file")]
    pub version_file: String,

    /// File whose version line is kept in sync
    #[serde(default = "default_target_file")]
    pub target_file: String,

    /// Line pattern locating the version line in `target_file`
    #[serde(default = "default_version_pattern")]
    pub version_pattern: String,

    /// Tag message template for `release`; `{version}` is substituted
    #[serde(default)]
    pub tag_message: Option<String>,
}

fn default_version_file() -> String {
    "VERSION".to_string()
}

fn default_target_file() -> String {
    "galaxy.yml".to_string()
}

fn default_version_pattern() -> String {
    r"^version:.*$".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            version_file: default_version_file(),
            target_file: default_target_file(),
            version_pattern: default_version_pattern(),
            tag_message: None,
        }
    }
}

impl Config {
    /// Render the configured tag message for `version`, if one is set.
    pub fn tag_message_for(&self, version: &str) -> Option<String> {
        self.tag_message
            .as_ref()
            .map(|template| template.replace("{version}", version))
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `versionsync.toml` in current directory
/// 3. `.versionsync.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err(Config)` - If a file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let (path, config_str) = if let Some(path) = config_path {
        (path.to_string(), read(Path::new(path))?)
    } else if Path::new(CONFIG_FILE).exists() {
        (CONFIG_FILE.to_string(), read(Path::new(CONFIG_FILE))?)
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(format!(".{}", CONFIG_FILE));
        if config_path.exists() {
            (config_path.display().to_string(), read(&config_path)?)
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    tracing::debug!(path = %path, "loading configuration");
    toml::from_str(&config_str)
        .map_err(|e| VersionSyncError::config(format!("{}: {}", path, e)))
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .map_err(|e| VersionSyncError::config(format!("{}: {}", path.display(), e)))
}
