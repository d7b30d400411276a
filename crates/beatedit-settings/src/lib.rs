//! Beatedit Settings Crate
//!
//! Handles editor configuration: playfield extent, scale limits, history
//! depth, beat snapping defaults and logging preferences.

pub mod config;
pub mod error;

pub use config::{
    Config, HistorySettings, LoggingSettings, PlayfieldSettings, ScaleSettings, SnapSettings,
};
pub use error::{ConfigError, SettingsError, SettingsResult};
