//! Application configuration.
//!
//! Loaded from `config.toml` in the platform data directory. Missing files and
//! missing sections fall back to defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Application version
    pub version: String,
    /// Data directory path
    #[serde(skip)]
    pub data_dir: PathBuf,
    /// Session timing
    pub execution: ExecutionSettings,
    /// Values used when building new exercises, items and rests
    pub defaults: EditorDefaults,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            data_dir: PathBuf::new(),
            execution: ExecutionSettings::default(),
            defaults: EditorDefaults::default(),
        }
    }
}

/// Session timing settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutionSettings {
    /// Length of one running tick in milliseconds
    pub tick_interval_ms: u64,
    /// Lead-in count before an autoplay session starts
    pub prestart_count: u32,
    /// Length of one lead-in tick in milliseconds
    pub prestart_interval_ms: u64,
    /// Step used by the rest +/- controls
    pub rest_adjust_step_secs: u32,
}

impl Default for ExecutionSettings {
    fn default() -> Self {
        Self {
            tick_interval_ms: 1000,
            prestart_count: 3,
            prestart_interval_ms: 800,
            rest_adjust_step_secs: 15,
        }
    }
}

/// Defaults for newly created workout entries, in seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorDefaults {
    /// Rest after each set of a new strict exercise
    pub strict_rest_secs: u32,
    /// Rest after a full superset round
    pub superset_rest_secs: u32,
    /// Length of a new strict rest exercise
    pub rest_exercise_secs: u32,
    /// Length of a new autoplay exercise item
    pub autoplay_exercise_secs: u32,
    /// Length of a new autoplay rest item
    pub autoplay_rest_secs: u32,
}

impl Default for EditorDefaults {
    fn default() -> Self {
        Self {
            strict_rest_secs: 60,
            superset_rest_secs: 90,
            rest_exercise_secs: 60,
            autoplay_exercise_secs: 30,
            autoplay_rest_secs: 10,
        }
    }
}

/// Get the application data directory.
pub fn get_data_dir() -> PathBuf {
    directories::ProjectDirs::from("com", "repflow", "RepFlow")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Get the configuration file path.
pub fn get_config_path() -> PathBuf {
    get_data_dir().join("config.toml")
}

/// Load application configuration from the default location.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let mut config = load_config_from(&get_config_path())?;
    config.data_dir = get_data_dir();
    Ok(config)
}

/// Load configuration from `path`, returning defaults when it does not exist.
pub fn load_config_from(path: &Path) -> Result<AppConfig, ConfigError> {
    if !path.exists() {
        tracing::debug!("No config at {}, using defaults", path.display());
        return Ok(AppConfig::default());
    }

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;

    let config: AppConfig = toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))?;

    tracing::info!("Loaded config from {}", path.display());
    Ok(config)
}

/// Save application configuration to the default location.
pub fn save_config(config: &AppConfig) -> Result<(), ConfigError> {
    save_config_to(config, &get_config_path())
}

/// Save configuration to `path`, creating parent directories.
pub fn save_config_to(config: &AppConfig, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| ConfigError::IoError(e.to_string()))?;
    }

    let content = toml::to_string_pretty(config).map_err(|e| ConfigError::SerializeError(e.to_string()))?;

    std::fs::write(path, content).map_err(|e| ConfigError::IoError(e.to_string()))?;

    Ok(())
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Serialize error: {0}")]
    SerializeError(String),
}
