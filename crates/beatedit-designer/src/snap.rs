//! Distance snapping for slider lengths.
//!
//! A slider's duration is derived from its length, so after its path is
//! edited the length is re-quantized to the active beat grid.

use crate::model::Slider;

/// Quantizes slider lengths to a timing grid.
pub trait SnapProvider {
    /// Returns the snapped length for `slider` given its unsnapped `distance`.
    fn find_snapped_distance(&self, slider: &Slider, distance: f64) -> f64;
}

/// Snaps lengths to whole beat subdivisions.
///
/// One beat covers `base_velocity × slider.velocity_multiplier` playfield
/// units; lengths are floored to a multiple of that divided by
/// `beat_divisor`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BeatSnapProvider {
    pub base_velocity: f64,
    pub beat_divisor: u32,
}

impl BeatSnapProvider {
    pub fn new(base_velocity: f64, beat_divisor: u32) -> Self {
        Self {
            base_velocity,
            beat_divisor,
        }
    }

    /// Length of one snap step for `slider`.
    pub fn step_for(&self, slider: &Slider) -> f64 {
        if self.beat_divisor == 0 {
            return 0.0;
        }
        self.base_velocity * slider.velocity_multiplier / self.beat_divisor as f64
    }
}

impl Default for BeatSnapProvider {
    fn default() -> Self {
        Self::new(140.0, 4)
    }
}

impl SnapProvider for BeatSnapProvider {
    fn find_snapped_distance(&self, slider: &Slider, distance: f64) -> f64 {
        let step = self.step_for(slider);
        if !(step > 0.0 && step.is_finite()) || !distance.is_finite() {
            return distance;
        }
        let beats = (distance / step + 1e-6).floor().max(0.0);
        beats * step
    }
}
