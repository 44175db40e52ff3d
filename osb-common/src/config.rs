//! Configuration loading and data folder resolution
//!
//! Bootstrap configuration comes from an optional TOML file. Every field has
//! a built-in default, so a missing file is not an error.
//!
//! # Data Folder Priority
//!
//! 1. Command-line argument (highest priority)
//! 2. Environment variable (`OSB_DATA_FOLDER`)
//! 3. TOML `data_folder`
//! 4. Current working directory (fallback)

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable consulted for the data folder
pub const DATA_FOLDER_ENV: &str = "OSB_DATA_FOLDER";

/// Score sources read when the config file names none
pub const DEFAULT_SOURCES: [&str; 2] = ["leaderboard.json", "specialist_leaderboard.json"];

/// Bootstrap configuration loaded from TOML file
#[derive(Debug, Clone, Deserialize)]
pub struct TomlConfig {
    /// Folder holding the score sources and the translations file
    #[serde(default)]
    pub data_folder: Option<PathBuf>,

    /// Score source documents, in precedence order (earliest wins on duplicates)
    #[serde(default = "default_sources")]
    pub sources: Vec<PathBuf>,

    /// Translations document
    #[serde(default = "default_translations_file")]
    pub translations_file: PathBuf,

    /// HTTP bind host
    #[serde(default = "default_host")]
    pub host: String,

    /// HTTP server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Language used when a request carries no language cookie
    #[serde(default = "default_language")]
    pub default_language: String,

    /// Logging configuration (optional)
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
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
            data_folder: None,
            sources: default_sources(),
            translations_file: default_translations_file(),
            host: default_host(),
            port: default_port(),
            default_language: default_language(),
            logging: LoggingConfig::default(),
        }
    }
}

fn default_sources() -> Vec<PathBuf> {
    DEFAULT_SOURCES.iter().map(PathBuf::from).collect()
}

fn default_translations_file() -> PathBuf {
    PathBuf::from("translations.json")
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5001
}

fn default_language() -> String {
    "da".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl TomlConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: TomlConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    fn validate(&self) -> Result<()> {
        if self.port == 0 {
            return Err(Error::Config("port must be non-zero".to_string()));
        }
        if self.default_language.trim().is_empty() {
            return Err(Error::Config("default_language must not be empty".to_string()));
        }
        Ok(())
    }

    /// Source paths resolved against the data folder
    pub fn source_paths(&self, data_folder: &Path) -> Vec<PathBuf> {
        self.sources
            .iter()
            .map(|source| resolve_against(data_folder, source))
            .collect()
    }

    /// Translations path resolved against the data folder
    pub fn translations_path(&self, data_folder: &Path) -> PathBuf {
        resolve_against(data_folder, &self.translations_file)
    }
}

fn resolve_against(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

/// Where the configuration returned by [`load_config`] came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// No config file was found; built-in defaults apply
    Defaults,
    /// Parsed from this file
    File(PathBuf),
    /// This file was found but ignored in favor of the defaults
    Ignored { path: PathBuf, reason: String },
}

/// Load bootstrap configuration with graceful degradation
///
/// An explicit path is used as-is; otherwise the platform locations are
/// searched. A missing file yields defaults. A file that exists but cannot be
/// parsed also yields defaults and comes back as [`ConfigSource::Ignored`].
///
/// Does not log; call [`ConfigSource::log`] once tracing is installed.
pub fn load_config(explicit: Option<&Path>) -> (TomlConfig, ConfigSource) {
    let path = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => find_config_file(),
    };

    let Some(path) = path else {
        return (TomlConfig::default(), ConfigSource::Defaults);
    };

    match TomlConfig::from_file(&path) {
        Ok(config) => (config, ConfigSource::File(path)),
        Err(Error::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => (
            TomlConfig::default(),
            ConfigSource::Ignored {
                path,
                reason: "file not found".to_string(),
            },
        ),
        Err(e) => (
            TomlConfig::default(),
            ConfigSource::Ignored {
                path,
                reason: e.to_string(),
            },
        ),
    }
}

impl ConfigSource {
    /// Report the outcome of [`load_config`]
    pub fn log(&self) {
        match self {
            ConfigSource::Defaults => info!("No config file found, using built-in defaults"),
            ConfigSource::File(path) => info!("Loaded config from {}", path.display()),
            ConfigSource::Ignored { path, reason } => warn!(
                "Ignoring config file {} ({}), using built-in defaults",
                path.display(),
                reason
            ),
        }
    }
}

/// Locate the configuration file for the platform
///
/// Tries `<config dir>/osb/config.toml` first, then `/etc/osb/config.toml`
/// on Linux.
fn find_config_file() -> Option<PathBuf> {
    if let Some(user_config) = dirs::config_dir().map(|d| d.join("osb").join("config.toml")) {
        if user_config.exists() {
            return Some(user_config);
        }
    }

    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc/osb/config.toml");
        if system_config.exists() {
            return Some(system_config);
        }
    }

    None
}

/// Data folder resolution following the priority order in the module docs
pub fn resolve_data_folder(cli_arg: Option<&Path>, config: &TomlConfig) -> PathBuf {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return path.to_path_buf();
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(DATA_FOLDER_ENV) {
        if !path.trim().is_empty() {
            return PathBuf::from(path);
        }
    }

    // Priority 3: TOML config file
    if let Some(path) = &config.data_folder {
        return path.clone();
    }

    // Priority 4: working directory
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}
