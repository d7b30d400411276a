use serde::{Deserialize, Serialize};

use super::{EditorShape, Point, SliderPath};
use crate::snap::SnapProvider;

/// A held target that follows a curved path.
///
/// Path control points are stored relative to `position`, so moving the
/// slider never touches the path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slider {
    pub position: Point,
    pub start_time: f64,
    pub path: SliderPath,
    /// Multiplier applied to the beatmap's base slider velocity.
    pub velocity_multiplier: f64,
}

impl Slider {
    pub fn new(position: Point, start_time: f64, path: SliderPath) -> Self {
        Self {
            position,
            start_time,
            path,
            velocity_multiplier: 1.0,
        }
    }

    pub fn with_velocity_multiplier(mut self, multiplier: f64) -> Self {
        self.velocity_multiplier = multiplier;
        self
    }

    /// World-space position of the slider tail.
    pub fn end_position(&self) -> Point {
        self.position + self.path.position_at(1.0)
    }

    /// Calls `f` with each control point in world space.
    pub fn for_each_control_point_world(&self, f: &mut dyn FnMut(Point)) {
        for point in self.path.control_points() {
            f(self.position + point.position);
        }
    }

    /// Fixes the expected path length to the snap grid. Without a provider
    /// the expected length is the calculated one.
    pub fn snap_to(&mut self, provider: Option<&dyn SnapProvider>) {
        let calculated = self.path.calculated_distance();
        let distance = match provider {
            Some(provider) => provider.find_snapped_distance(self, calculated),
            None => calculated,
        };
        self.path.set_expected_distance(Some(distance));
    }
}

impl EditorShape for Slider {
    fn position(&self) -> Point {
        self.position
    }

    fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    fn for_each_extent_point(&self, f: &mut dyn FnMut(Point)) {
        f(self.position);
        f(self.end_position());
    }
}
