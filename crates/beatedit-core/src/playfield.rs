//! Playfield extent.
//!
//! The playfield is the fixed coordinate space every hit object must stay
//! inside. Its origin is the top-left corner; x grows right and y grows down.

use serde::{Deserialize, Serialize};

/// Playfield width in playfield units.
pub const PLAYFIELD_WIDTH: f64 = 512.0;

/// Playfield height in playfield units.
pub const PLAYFIELD_HEIGHT: f64 = 384.0;

/// Axis-aligned playfield rectangle spanning `(0, 0)` to `(width, height)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayfieldBounds {
    pub width: f64,
    pub height: f64,
}

impl PlayfieldBounds {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl Default for PlayfieldBounds {
    fn default() -> Self {
        Self::new(PLAYFIELD_WIDTH, PLAYFIELD_HEIGHT)
    }
}
