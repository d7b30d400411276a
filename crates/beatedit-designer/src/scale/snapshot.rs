//! State captured when a scale operation begins.

use crate::geometry::{
    convex_hull, minimum_enclosing_circle, shapes_extent_points, surrounding_quad, Quad,
};
use crate::model::{EditorShape, HitObject, PathType, Point, Slider};
use crate::shape_store::ShapeStore;

/// Pre-operation state of one target.
///
/// Path data is only present for sliders.
#[derive(Debug, Clone, PartialEq)]
pub struct OriginalState {
    pub position: Point,
    pub path_positions: Option<Vec<Point>>,
    pub path_types: Option<Vec<Option<PathType>>>,
    pub expected_distance: Option<f64>,
}

impl OriginalState {
    pub fn capture(object: &HitObject) -> Self {
        match object.as_slider() {
            Some(slider) => Self::capture_slider(slider),
            None => Self {
                position: object.position(),
                path_positions: None,
                path_types: None,
                expected_distance: None,
            },
        }
    }

    fn capture_slider(slider: &Slider) -> Self {
        let points = slider.path.control_points();
        Self {
            position: slider.position,
            path_positions: Some(points.iter().map(|p| p.position).collect()),
            path_types: Some(points.iter().map(|p| p.kind).collect()),
            expected_distance: slider.path.expected_distance(),
        }
    }

    /// Puts `object` back exactly as it was captured.
    pub fn restore(&self, object: &mut HitObject) {
        object.set_position(self.position);
        if let Some(slider) = object.as_slider_mut() {
            self.restore_path(slider);
            slider.path.set_expected_distance(self.expected_distance);
        }
    }

    /// Writes the captured control point positions and types back into `slider`.
    pub fn restore_path(&self, slider: &mut Slider) {
        let (Some(positions), Some(types)) = (&self.path_positions, &self.path_types) else {
            return;
        };
        slider.path.edit_control_points(|points| {
            for ((point, &position), &kind) in points.iter_mut().zip(positions).zip(types) {
                point.position = position;
                point.kind = kind;
            }
        });
    }
}

/// An in-progress scale operation.
///
/// Targets are addressed by index: `targets[i]` was captured as `originals[i]`.
#[derive(Debug, Clone)]
pub struct ScaleOperation {
    pub targets: Vec<u64>,
    pub originals: Vec<OriginalState>,
    pub default_origin: Point,
    pub original_quad: Quad,
    pub original_hull: Vec<Point>,
    pub single_slider: bool,
}

impl ScaleOperation {
    /// Snapshots `eligible` from `store`. Ids missing from the store are skipped.
    pub fn capture(store: &ShapeStore, eligible: &[u64], single_slider: bool) -> Self {
        let mut targets = Vec::with_capacity(eligible.len());
        let mut originals = Vec::with_capacity(eligible.len());
        for &id in eligible {
            if let Some(object) = store.get(id) {
                targets.push(id);
                originals.push(OriginalState::capture(object));
            }
        }

        let slider = if single_slider {
            targets
                .first()
                .and_then(|&id| store.get(id))
                .and_then(HitObject::as_slider)
        } else {
            None
        };

        let points = match slider {
            Some(slider) => {
                let mut points = Vec::with_capacity(slider.path.control_points().len());
                slider.for_each_control_point_world(&mut |p| points.push(p));
                points
            }
            None => shapes_extent_points(targets.iter().filter_map(|&id| store.get(id))),
        };

        let original_quad = surrounding_quad(points.iter().copied());
        let original_hull = convex_hull(&points);
        let (default_origin, _) = minimum_enclosing_circle(&original_hull);

        Self {
            targets,
            originals,
            default_origin,
            original_quad,
            original_hull,
            single_slider: slider.is_some(),
        }
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}
