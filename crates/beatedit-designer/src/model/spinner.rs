use serde::{Deserialize, Serialize};

use super::{EditorShape, Point};

/// A full-duration spin marker. It sits at the playfield centre and has no
/// spatial extent, so selection transforms skip it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spinner {
    pub position: Point,
    pub start_time: f64,
    pub end_time: f64,
}

impl Spinner {
    pub fn new(position: Point, start_time: f64, end_time: f64) -> Self {
        Self {
            position,
            start_time,
            end_time,
        }
    }

    pub fn duration(&self) -> f64 {
        self.end_time - self.start_time
    }
}

impl EditorShape for Spinner {
    fn position(&self) -> Point {
        self.position
    }

    fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    fn has_spatial_extent(&self) -> bool {
        false
    }

    fn for_each_extent_point(&self, _f: &mut dyn FnMut(Point)) {}
}
