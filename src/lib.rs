//! # Beatedit
//!
//! Playfield editing primitives for rhythm game beatmap editors:
//! - Hit circles, sliders and spinners on a 512×384 playfield
//! - Observable selection with capability tracking
//! - Interactive scaling that keeps objects on the playfield and sliders valid
//! - Beat-grid snapping of slider lengths
//! - Snapshot based undo/redo
//!
//! ## Architecture
//!
//! Beatedit is organized as a workspace with multiple crates:
//!
//! 1. **beatedit-core** - Errors, playfield constants, shared-state aliases
//! 2. **beatedit-settings** - Configuration loading, saving and validation
//! 3. **beatedit-designer** - Hit objects, geometry, selection, scaling, history
//! 4. **beatedit** - This facade, plus logging setup

use std::path::Path;

use anyhow::Context;

pub use beatedit_core::{
    shared, PlayfieldBounds, ScaleError, Shared, SubscriptionId, PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH,
};
pub use beatedit_designer as designer;
pub use beatedit_designer::{
    AdjustAxis, BeatSnapProvider, ChangeHandler, EditorShape, HitCircle, HitObject,
    PathControlPoint, PathType, Point, Quad, ScaleCapabilities, ScaleHandler, SelectionListener,
    SelectionManager, ShapeStore, Slider, SliderPath, SnapProvider, Spinner, UndoRedoManager,
};
pub use beatedit_settings::{
    Config, HistorySettings, LoggingSettings, PlayfieldSettings, ScaleSettings, SettingsError,
    SnapSettings,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize logging from the logging settings
///
/// Sets up structured logging with:
/// - Console output, pretty or JSON formatted
/// - RUST_LOG environment variable support, overriding the configured level
///
/// Returns an error if a global subscriber is already installed.
pub fn init_logging(settings: &LoggingSettings) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.level))
        .with_context(|| format!("invalid log level '{}'", settings.level))?;

    if settings.json {
        let fmt_layer = fmt::layer()
            .with_writer(std::io::stdout)
            .with_target(true)
            .with_level(true)
            .json();

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()
            .context("failed to install tracing subscriber")?;
    } else {
        let fmt_layer = fmt::layer()
            .with_writer(std::io::stdout)
            .with_target(true)
            .with_level(true)
            .with_thread_names(true)
            .with_line_number(true)
            .pretty();

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()
            .context("failed to install tracing subscriber")?;
    }

    Ok(())
}

/// Loads the configuration from `path`, or from the platform default
/// location when `path` is `None`. A missing file yields the defaults.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => Config::default_path().context("could not resolve config directory")?,
    };

    let config = Config::load_or_default(&path)
        .with_context(|| format!("failed to load config from {}", path.display()))?;
    tracing::debug!("Configuration loaded from {}", path.display());
    Ok(config)
}

/// Builds a [`ScaleHandler`] wired to a fresh undo history and beat snapping,
/// all configured from `config`.
pub fn scale_handler_from_config(config: &Config) -> (ScaleHandler, Shared<UndoRedoManager>) {
    let history = shared(UndoRedoManager::from_settings(&config.history));
    let snap = std::rc::Rc::new(BeatSnapProvider::new(
        config.snap.base_velocity,
        config.snap.beat_divisor,
    ));

    let handler = ScaleHandler::from_config(config)
        .with_change_handler(history.clone())
        .with_snap_provider(snap);
    (handler, history)
}
