//! # Beatedit Core
//!
//! Core types, errors and constants shared by the Beatedit crates.
//! Provides the playfield extent every editing operation is clamped against,
//! the error types raised on misuse of stateful editing operations, and the
//! shared-state aliases used to wire collaborators together.

pub mod error;
pub mod listener;
pub mod playfield;
pub mod types;

pub use error::ScaleError;
pub use listener::SubscriptionId;
pub use playfield::{PlayfieldBounds, PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH};
pub use types::{shared, Shared};
