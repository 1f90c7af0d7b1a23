//! Configuration system using TOML files.
//!
//! Config is stored in the OS-standard config directory:
//! - Windows: %APPDATA%\audio-insight\config.toml
//! - macOS: ~/Library/Application Support/audio-insight/config.toml
//! - Linux: ~/.config/audio-insight/config.toml
//!
//! Every field has a default, so a partial or missing file is fine.
//!
//! ```toml
//! [service]
//! base_url = "http://localhost:8000/api/v1"
//! timeout_secs = 30
//!
//! [analysis]
//! fallback_duration_secs = 180.0
//! duration_source = "downbeats"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::analysis::{DEFAULT_TRACK_DURATION_SECS, DurationSource, TimelineOptions};

/// Default analysis service endpoint
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api/v1";

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Analysis service connection
    pub service: ServiceConfig,

    /// View-model derivation settings
    pub analysis: AnalysisConfig,
}

/// Analysis service connection settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Base URL including the API version prefix
    pub base_url: String,

    /// Bearer token sent with every request
    pub token: Option<String>,

    /// AI backend the service should use (server default when unset)
    pub ai_service: Option<String>,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token: None,
            ai_service: None,
            timeout_secs: 30,
        }
    }
}

/// Timeline settings for analysis view models
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Track length assumed when no downbeats are reported
    pub fallback_duration_secs: f64,

    /// "downbeats" or "decoded"
    pub duration_source: DurationSource,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            fallback_duration_secs: DEFAULT_TRACK_DURATION_SECS,
            duration_source: DurationSource::Downbeats,
        }
    }
}

impl AnalysisConfig {
    /// Timeline options for the builder.
    ///
    /// A non-positive or non-finite fallback is replaced with the default.
    pub fn timeline_options(&self) -> TimelineOptions {
        let fallback = if self.fallback_duration_secs.is_finite() && self.fallback_duration_secs > 0.0
        {
            self.fallback_duration_secs
        } else {
            tracing::warn!(
                "Ignoring invalid fallback_duration_secs {}, using {}",
                self.fallback_duration_secs,
                DEFAULT_TRACK_DURATION_SECS
            );
            DEFAULT_TRACK_DURATION_SECS
        };

        TimelineOptions {
            fallback_duration_secs: fallback,
            source: self.duration_source,
            decoded_duration_secs: None,
        }
    }
}

// ============================================================================
// Config File Operations
// ============================================================================

/// Get the config directory path
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("audio-insight"))
}

/// Get the full path to the config file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load configuration from the default location
///
/// Returns default config if file doesn't exist or can't be parsed.
pub fn load() -> Config {
    match config_path() {
        Some(path) => load_from(&path),
        None => {
            tracing::warn!("Could not determine config directory, using defaults");
            Config::default()
        }
    }
}

/// Load configuration from a specific file
///
/// Logs warnings but doesn't fail - we always return a usable config.
pub fn load_from(path: &Path) -> Config {
    if !path.exists() {
        tracing::info!("No config file found at {:?}, using defaults", path);
        return Config::default();
    }

    match std::fs::read_to_string(path) {
        Ok(contents) => match toml::from_str(&contents) {
            Ok(config) => {
                tracing::info!("Loaded config from {:?}", path);
                config
            }
            Err(e) => {
                tracing::error!("Failed to parse config file {:?}: {}", path, e);
                tracing::warn!("Using default configuration");
                Config::default()
            }
        },
        Err(e) => {
            tracing::error!("Failed to read config file {:?}: {}", path, e);
            Config::default()
        }
    }
}

/// Save configuration to a specific file
///
/// Creates the parent directory if it doesn't exist.
pub fn save_to(config: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|e| ConfigError::CreateDir(dir.to_path_buf(), e))?;
    }

    let contents = toml::to_string_pretty(config).map_err(ConfigError::Serialize)?;

    // Write to temp, then rename
    let temp_path = path.with_extension("toml.tmp");
    std::fs::write(&temp_path, &contents).map_err(|e| ConfigError::Write(temp_path.clone(), e))?;
    std::fs::rename(&temp_path, path)
        .map_err(|e| ConfigError::Rename(temp_path, path.to_path_buf(), e))?;

    tracing::info!("Saved config to {:?}", path);
    Ok(())
}

// ============================================================================
// Error Types
// ============================================================================

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to create config directory {0}: {1}")]
    CreateDir(PathBuf, std::io::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(toml::ser::Error),

    #[error("Failed to write config to {0}: {1}")]
    Write(PathBuf, std::io::Error),

    #[error("Failed to rename temp file {0} to {1}: {2}")]
    Rename(PathBuf, PathBuf, std::io::Error),
}

// ============================================================================
// Tests
// ============================================================================
