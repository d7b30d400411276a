//! Configuration and settings management for Beatedit
//!
//! Provides configuration file handling and validation. Supports JSON and TOML
//! file formats stored in the platform-specific config directory.
//!
//! Configuration is organized into logical sections:
//! - Playfield extent (must match the rendering layer exactly)
//! - Scale limits
//! - History depth
//! - Beat snapping defaults
//! - Logging preferences

use crate::error::{ConfigError, SettingsError, SettingsResult};
use beatedit_core::PlayfieldBounds;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Playfield extent settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayfieldSettings {
    /// Playfield width in playfield units
    pub width: f64,
    /// Playfield height in playfield units
    pub height: f64,
}

impl Default for PlayfieldSettings {
    fn default() -> Self {
        let bounds = PlayfieldBounds::default();
        Self {
            width: bounds.width,
            height: bounds.height,
        }
    }
}

impl PlayfieldSettings {
    pub fn bounds(&self) -> PlayfieldBounds {
        PlayfieldBounds::new(self.width, self.height)
    }
}

/// Scale operation settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaleSettings {
    /// Smallest per-axis scale factor a drag may produce; keeps shapes from
    /// collapsing or inverting.
    pub min_scale: f64,
}

impl Default for ScaleSettings {
    fn default() -> Self {
        Self { min_scale: 1e-3 }
    }
}

/// Undo history settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistorySettings {
    /// Maximum number of undo states retained
    pub max_depth: usize,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self { max_depth: 100 }
    }
}

/// Beat snapping settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapSettings {
    /// Subdivisions of a beat slider lengths snap to
    pub beat_divisor: u32,
    /// Playfield units travelled per beat at velocity multiplier 1
    pub base_velocity: f64,
}

impl Default for SnapSettings {
    fn default() -> Self {
        Self {
            beat_divisor: 4,
            base_velocity: 140.0,
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default level directive; `RUST_LOG` takes precedence when set
    pub level: String,
    /// Emit JSON lines instead of human readable output
    pub json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Playfield extent
    pub playfield: PlayfieldSettings,
    /// Scale limits
    pub scale: ScaleSettings,
    /// Undo history
    pub history: HistorySettings,
    /// Beat snapping
    pub snap: SnapSettings,
    /// Logging
    pub logging: LoggingSettings,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Default config file location: `<config dir>/beatedit/config.toml`
    pub fn default_path() -> SettingsResult<PathBuf> {
        let dir = dirs::config_dir().ok_or_else(|| {
            ConfigError::UnsupportedPlatform(std::env::consts::OS.to_string())
        })?;
        Ok(dir.join("beatedit").join("config.toml"))
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SettingsError::LoadError(format!("{}: {}", path.display(), e))
        })?;

        let config: Self = match Format::of(path)? {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load config from file, falling back to defaults when the file does not exist
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            tracing::debug!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match Format::of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)
                .map_err(|e| SettingsError::SaveError(e.to_string()))?,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        if !(self.playfield.width > 0.0 && self.playfield.width.is_finite()) {
            return Err(SettingsError::invalid("playfield.width", "must be > 0"));
        }

        if !(self.playfield.height > 0.0 && self.playfield.height.is_finite()) {
            return Err(SettingsError::invalid("playfield.height", "must be > 0"));
        }

        if !(self.scale.min_scale > 0.0 && self.scale.min_scale < 1.0) {
            return Err(SettingsError::invalid(
                "scale.min_scale",
                "must be between 0 and 1 (exclusive)",
            ));
        }

        if self.history.max_depth == 0 {
            return Err(SettingsError::invalid("history.max_depth", "must be > 0"));
        }

        if self.snap.beat_divisor == 0 {
            return Err(SettingsError::invalid("snap.beat_divisor", "must be > 0"));
        }

        if !(self.snap.base_velocity > 0.0 && self.snap.base_velocity.is_finite()) {
            return Err(SettingsError::invalid("snap.base_velocity", "must be > 0"));
        }

        if !LOG_LEVELS.contains(&self.logging.level.to_ascii_lowercase().as_str()) {
            return Err(SettingsError::invalid(
                "logging.level",
                format!("unknown level '{}'", self.logging.level),
            ));
        }

        Ok(())
    }
}

enum Format {
    Json,
    Toml,
}

impl Format {
    fn of(path: &Path) -> SettingsResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            other => Err(ConfigError::UnsupportedFormat(other.unwrap_or("").to_string()).into()),
        }
    }
}
