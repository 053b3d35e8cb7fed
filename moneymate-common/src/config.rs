//! Bootstrap configuration loading
//!
//! Configuration is intentionally small: where the database lives, how to reach
//! the Place Lookup Service, and the log level. Sources, highest priority first:
//!
//! 1. Command-line arguments (database path only)
//! 2. Environment variables (`MONEYMATE_DATABASE`, `MONEYMATE_PLACE_API_KEY`)
//! 3. TOML configuration file
//! 4. Compiled defaults
//!
//! A missing TOML file is not an error; defaults are used and a warning logged.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

/// Environment variable overriding the database path
pub const DATABASE_ENV_VAR: &str = "MONEYMATE_DATABASE";

/// Environment variable carrying the Place Lookup Service API key
pub const PLACE_API_KEY_ENV_VAR: &str = "MONEYMATE_PLACE_API_KEY";

const DEFAULT_PLACE_API_BASE_URI: &str = "https://places.googleapis.com/";

/// Bootstrap configuration loaded from TOML
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TomlConfig {
    /// Path to the SQLite database file (optional)
    #[serde(default)]
    pub database_path: Option<PathBuf>,

    /// Place Lookup Service settings
    #[serde(default)]
    pub place_api: PlaceApiConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Place Lookup Service connection settings
///
/// These are opaque to the enrichment protocol; the host supplies them.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlaceApiConfig {
    /// Base URI that `v1/places/{id}` is appended to
    #[serde(default = "default_base_uri")]
    pub base_uri: String,

    /// API key (the environment variable takes precedence)
    #[serde(default)]
    pub api_key: Option<String>,

    /// Total timeout for a single lookup round-trip
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Connection establishment timeout
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

impl PlaceApiConfig {
    /// Reject settings that would make every lookup fail
    pub fn validate(&self) -> Result<()> {
        if self.request_timeout_secs == 0 {
            return Err(Error::Config(
                "place_api.request_timeout_secs must be greater than zero".to_string(),
            ));
        }
        if self.connect_timeout_secs == 0 {
            return Err(Error::Config(
                "place_api.connect_timeout_secs must be greater than zero".to_string(),
            ));
        }
        if self.base_uri.trim().is_empty() {
            return Err(Error::Config("place_api.base_uri must not be empty".to_string()));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

impl Default for PlaceApiConfig {
    fn default() -> Self {
        Self {
            base_uri: default_base_uri(),
            api_key: None,
            request_timeout_secs: default_request_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
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

fn default_base_uri() -> String {
    DEFAULT_PLACE_API_BASE_URI.to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_connect_timeout_secs() -> u64 {
    5
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Parse and validate a TOML configuration file
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Read TOML failed ({}): {}", path.display(), e)))?;
    let config: TomlConfig = toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse TOML failed ({}): {}", path.display(), e)))?;
    config.place_api.validate()?;
    Ok(config)
}

/// Load configuration with graceful degradation
///
/// An explicit path must exist and parse. Without one, the platform default
/// location is tried and a missing file falls back to [`TomlConfig::default`].
pub fn load_config(explicit_path: Option<&Path>) -> Result<TomlConfig> {
    if let Some(path) = explicit_path {
        let config = load_toml_config(path)?;
        info!("Loaded configuration from {}", path.display());
        return Ok(config);
    }

    match default_config_path() {
        Some(path) if path.exists() => {
            let config = load_toml_config(&path)?;
            info!("Loaded configuration from {}", path.display());
            Ok(config)
        }
        Some(path) => {
            warn!(
                "No configuration file at {}, using defaults",
                path.display()
            );
            Ok(TomlConfig::default())
        }
        None => {
            warn!("Could not determine config directory, using defaults");
            Ok(TomlConfig::default())
        }
    }
}

/// `<config_dir>/moneymate/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("moneymate").join("config.toml"))
}

/// Resolve the database file path
///
/// Priority: CLI → `MONEYMATE_DATABASE` → TOML → `<data_local_dir>/moneymate/moneymate.db`
pub fn resolve_database_path(cli_arg: Option<&Path>, toml_config: &TomlConfig) -> PathBuf {
    if let Some(path) = cli_arg {
        return path.to_path_buf();
    }

    if let Ok(path) = std::env::var(DATABASE_ENV_VAR) {
        if !path.trim().is_empty() {
            return PathBuf::from(path);
        }
    }

    if let Some(path) = &toml_config.database_path {
        return path.clone();
    }

    dirs::data_local_dir()
        .map(|d| d.join("moneymate"))
        .unwrap_or_else(|| PathBuf::from("./moneymate_data"))
        .join("moneymate.db")
}

/// Resolve the Place Lookup Service API key
///
/// Priority: `MONEYMATE_PLACE_API_KEY` → TOML `place_api.api_key`
pub fn resolve_place_api_key(toml_config: &TomlConfig) -> Result<String> {
    let env_key = std::env::var(PLACE_API_KEY_ENV_VAR)
        .ok()
        .filter(|k| is_valid_key(k));
    let toml_key = toml_config
        .place_api
        .api_key
        .as_ref()
        .filter(|k| is_valid_key(k));

    if env_key.is_some() && toml_key.is_some() {
        warn!(
            "Place API key found in both environment and TOML. Using environment (highest priority)."
        );
    }

    if let Some(key) = env_key {
        info!("Place API key loaded from environment variable");
        return Ok(key);
    }

    if let Some(key) = toml_key {
        info!("Place API key loaded from TOML config");
        return Ok(key.clone());
    }

    Err(Error::Config(format!(
        "Place API key not configured. Set {} or place_api.api_key in the TOML config",
        PLACE_API_KEY_ENV_VAR
    )))
}

/// Validate API key (non-empty, non-whitespace)
pub fn is_valid_key(key: &str) -> bool {
    !key.trim().is_empty()
}
