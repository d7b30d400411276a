use serde::{Deserialize, Serialize};

use super::{EditorShape, Point};

/// A single tap target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HitCircle {
    pub position: Point,
    pub start_time: f64,
}

impl HitCircle {
    pub fn new(position: Point, start_time: f64) -> Self {
        Self {
            position,
            start_time,
        }
    }
}

impl EditorShape for HitCircle {
    fn position(&self) -> Point {
        self.position
    }

    fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    fn for_each_extent_point(&self, f: &mut dyn FnMut(Point)) {
        f(self.position);
    }
}
