//! Interactive scaling of the selected hit objects.
//!
//! A drag produces a stream of scale vectors. [`ScaleHandler`] turns each one
//! into new object positions, keeping objects on the playfield and sliders
//! valid, and brackets the whole drag as a single undoable change.

pub mod capabilities;
pub mod clamp;
pub mod handler;
pub mod snapshot;

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

pub use capabilities::{ScaleCapabilities, SelectionTracker};
pub use clamp::clamp_scale_to_bounds;
pub use handler::ScaleHandler;
pub use snapshot::{OriginalState, ScaleOperation};

/// Axes a scale interaction is allowed to change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AdjustAxis {
    None,
    X,
    Y,
    #[default]
    Both,
}

impl AdjustAxis {
    pub fn adjusts_x(self) -> bool {
        matches!(self, AdjustAxis::X | AdjustAxis::Both)
    }

    pub fn adjusts_y(self) -> bool {
        matches!(self, AdjustAxis::Y | AdjustAxis::Both)
    }
}

/// Resets the components of `scale` that `axis` does not allow to 1.
pub fn clamp_scale_to_adjust_axis(scale: Vector2<f64>, axis: AdjustAxis) -> Vector2<f64> {
    Vector2::new(
        if axis.adjusts_x() { scale.x } else { 1.0 },
        if axis.adjusts_y() { scale.y } else { 1.0 },
    )
}
