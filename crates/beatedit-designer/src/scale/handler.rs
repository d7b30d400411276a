//! Begin/update/commit lifecycle of a scale drag.

use std::fmt;
use std::rc::Rc;

use beatedit_core::{PlayfieldBounds, ScaleError, Shared};
use beatedit_settings::{Config, ScaleSettings};
use nalgebra::Vector2;

use super::capabilities::{ScaleCapabilities, SelectionTracker};
use super::clamp::clamp_scale_to_bounds;
use super::snapshot::{OriginalState, ScaleOperation};
use super::{clamp_scale_to_adjust_axis, AdjustAxis};
use crate::geometry::{scaled_position, shapes_surrounding_quad, surrounding_quad, Quad};
use crate::history::ChangeHandler;
use crate::model::{EditorShape, HitObject, Point};
use crate::selection_manager::SelectionListener;
use crate::shape_store::ShapeStore;
use crate::snap::SnapProvider;

/// Scales the selected objects in response to a drag.
///
/// The handler is idle until [`ScaleHandler::begin`] snapshots the eligible
/// selection. Every [`ScaleHandler::update`] recomputes positions from that
/// snapshot, so updates never accumulate error. [`ScaleHandler::commit`]
/// closes the undo transaction opened by `begin` and drops the snapshot.
///
/// # Examples
///
/// ```
/// use beatedit_designer::model::{HitCircle, Point};
/// use beatedit_designer::scale::{AdjustAxis, ScaleHandler};
/// use beatedit_designer::shape_store::ShapeStore;
/// use nalgebra::Vector2;
///
/// let mut store = ShapeStore::new();
/// let a = store.add(HitCircle::new(Point::new(100.0, 100.0), 0.0));
/// let b = store.add(HitCircle::new(Point::new(200.0, 200.0), 500.0));
///
/// let mut handler = ScaleHandler::default();
/// handler.update_selection(&store, &[a, b]);
/// handler.begin(&store)?;
/// handler.update(&mut store, Vector2::new(0.5, 0.5), None, AdjustAxis::Both, 0.0)?;
/// handler.commit(&store)?;
/// # Ok::<(), beatedit_core::ScaleError>(())
/// ```
pub struct ScaleHandler {
    playfield: PlayfieldBounds,
    settings: ScaleSettings,
    tracker: SelectionTracker,
    operation: Option<ScaleOperation>,
    change_handler: Option<Shared<dyn ChangeHandler>>,
    snap_provider: Option<Rc<dyn SnapProvider>>,
}

impl fmt::Debug for ScaleHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScaleHandler")
            .field("playfield", &self.playfield)
            .field("settings", &self.settings)
            .field("tracker", &self.tracker)
            .field("operation", &self.operation)
            .field("change_handler", &self.change_handler.is_some())
            .field("snap_provider", &self.snap_provider.is_some())
            .finish()
    }
}

impl Default for ScaleHandler {
    fn default() -> Self {
        Self::new(PlayfieldBounds::default(), ScaleSettings::default())
    }
}

impl ScaleHandler {
    pub fn new(playfield: PlayfieldBounds, settings: ScaleSettings) -> Self {
        Self {
            playfield,
            settings,
            tracker: SelectionTracker::new(),
            operation: None,
            change_handler: None,
            snap_provider: None,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.playfield.bounds(), config.scale)
    }

    pub fn with_change_handler(mut self, handler: Shared<dyn ChangeHandler>) -> Self {
        self.change_handler = Some(handler);
        self
    }

    pub fn with_snap_provider(mut self, provider: Rc<dyn SnapProvider>) -> Self {
        self.snap_provider = Some(provider);
        self
    }

    /// Replaces the change handler. Ignored while an operation is in
    /// progress, since `begin_change` already went to the current one.
    pub fn set_change_handler(&mut self, handler: Option<Shared<dyn ChangeHandler>>) {
        if self.is_active() {
            tracing::warn!("Cannot replace change handler during a scale operation");
            return;
        }
        self.change_handler = handler;
    }

    pub fn set_snap_provider(&mut self, provider: Option<Rc<dyn SnapProvider>>) {
        self.snap_provider = provider;
    }

    pub fn playfield(&self) -> PlayfieldBounds {
        self.playfield
    }

    pub fn min_scale(&self) -> f64 {
        self.settings.min_scale
    }

    pub fn is_active(&self) -> bool {
        self.operation.is_some()
    }

    pub fn capabilities(&self) -> ScaleCapabilities {
        self.tracker.capabilities()
    }

    /// Ids the next operation would act on.
    pub fn eligible(&self) -> &[u64] {
        self.tracker.eligible()
    }

    /// Origin used when `update` is given none. Only set while active.
    pub fn default_origin(&self) -> Option<Point> {
        self.operation.as_ref().map(|op| op.default_origin)
    }

    pub fn original_surrounding_quad(&self) -> Option<Quad> {
        self.operation.as_ref().map(|op| op.original_quad)
    }

    pub fn original_convex_hull(&self) -> Option<&[Point]> {
        self.operation.as_ref().map(|op| op.original_hull.as_slice())
    }

    /// Re-derives capabilities from a new selection.
    pub fn update_selection(&mut self, store: &ShapeStore, selected: &[u64]) {
        self.tracker.update(store, selected);
    }

    /// Starts a scale operation over the eligible selection.
    pub fn begin(&mut self, store: &ShapeStore) -> Result<(), ScaleError> {
        if self.operation.is_some() {
            return Err(ScaleError::OperationInProgress);
        }

        if let Some(handler) = &self.change_handler {
            handler.borrow_mut().begin_change(store);
        }

        let single_slider = self.tracker.capabilities().is_scaling_single_curve;
        let operation = ScaleOperation::capture(store, self.tracker.eligible(), single_slider);

        tracing::debug!(
            "Scale operation started: {} target(s), origin ({:.2}, {:.2}){}",
            operation.len(),
            operation.default_origin.x,
            operation.default_origin.y,
            if operation.single_slider { ", single slider" } else { "" }
        );

        self.operation = Some(operation);
        Ok(())
    }

    /// Applies `scale` to the snapshot and writes the result into `store`.
    ///
    /// `origin` defaults to [`ScaleHandler::default_origin`] and
    /// `axis_rotation` is in degrees.
    pub fn update(
        &mut self,
        store: &mut ShapeStore,
        scale: Vector2<f64>,
        origin: Option<Point>,
        adjust_axis: AdjustAxis,
        axis_rotation: f64,
    ) -> Result<(), ScaleError> {
        let Some(operation) = self.operation.as_ref() else {
            return Err(ScaleError::NoOperationInProgress);
        };

        let origin = origin.unwrap_or(operation.default_origin);
        let scale = clamp_scale_to_adjust_axis(scale, adjust_axis);

        tracing::trace!(
            "Scale update: ({:.4}, {:.4}) about ({:.2}, {:.2}), {:?}, {:.1} deg",
            scale.x,
            scale.y,
            origin.x,
            origin.y,
            adjust_axis,
            axis_rotation
        );

        if operation.single_slider {
            self.scale_single_slider(store, operation, scale, axis_rotation);
        } else {
            let scale =
                self.clamp_scale_to_playfield_bounds(scale, origin, adjust_axis, axis_rotation);
            for (&id, original) in operation.targets.iter().zip(&operation.originals) {
                match store.get_mut(id) {
                    Some(object) => object.set_position(scaled_position(
                        scale,
                        origin,
                        original.position,
                        axis_rotation,
                    )),
                    None => tracing::warn!("Scale target {} no longer exists", id),
                }
            }
        }

        self.move_selection_in_bounds(store, operation);
        Ok(())
    }

    /// Finishes the operation and closes its undo transaction.
    pub fn commit(&mut self, store: &ShapeStore) -> Result<(), ScaleError> {
        let Some(operation) = self.operation.take() else {
            return Err(ScaleError::NoOperationInProgress);
        };

        if let Some(handler) = &self.change_handler {
            handler.borrow_mut().end_change(store);
        }

        tracing::debug!("Scale operation committed: {} target(s)", operation.len());
        Ok(())
    }

    /// Abandons the operation, restoring every target to its snapshot before
    /// closing the undo transaction.
    pub fn cancel(&mut self, store: &mut ShapeStore) -> Result<(), ScaleError> {
        let Some(operation) = self.operation.take() else {
            return Err(ScaleError::NoOperationInProgress);
        };

        for (&id, original) in operation.targets.iter().zip(&operation.originals) {
            if let Some(object) = store.get_mut(id) {
                original.restore(object);
            }
        }

        if let Some(handler) = &self.change_handler {
            handler.borrow_mut().end_change(store);
        }

        tracing::debug!("Scale operation cancelled: {} target(s)", operation.len());
        Ok(())
    }

    /// Largest scale, no larger than `scale`, that keeps the original
    /// selection inside the playfield. Returns `scale` unchanged when idle.
    pub fn clamp_scale_to_playfield_bounds(
        &self,
        scale: Vector2<f64>,
        origin: Point,
        adjust_axis: AdjustAxis,
        axis_rotation: f64,
    ) -> Vector2<f64> {
        let Some(operation) = self.operation.as_ref() else {
            return scale;
        };

        let origin = match operation.originals.first() {
            Some(original) if operation.single_slider => original.position,
            _ => origin,
        };

        let corners = operation.original_quad.corners();
        let reference_points: &[Point] = if axis_rotation == 0.0 {
            &corners
        } else {
            &operation.original_hull
        };

        clamp_scale_to_bounds(
            scale,
            origin,
            reference_points,
            self.playfield,
            adjust_axis,
            axis_rotation,
            self.settings.min_scale,
        )
    }

    /// Scales a lone slider's path about its head, reverting to the
    /// original path when the result leaves the playfield or has no length.
    fn scale_single_slider(
        &self,
        store: &mut ShapeStore,
        operation: &ScaleOperation,
        scale: Vector2<f64>,
        axis_rotation: f64,
    ) {
        let (Some(&id), Some(original)) = (operation.targets.first(), operation.originals.first())
        else {
            return;
        };
        let Some(slider) = store.get_mut(id).and_then(HitObject::as_slider_mut) else {
            tracing::warn!("Scale target {} is no longer a slider", id);
            return;
        };
        let (Some(positions), Some(types)) = (&original.path_positions, &original.path_types)
        else {
            return;
        };

        let min_scale = self.settings.min_scale;
        let scale = Vector2::new(scale.x.max(min_scale), scale.y.max(min_scale));
        let snap = self.snap_provider.as_deref();

        slider.position = original.position;
        slider.path.edit_control_points(|points| {
            for ((point, &position), &kind) in points.iter_mut().zip(positions).zip(types) {
                point.position = scaled_position(scale, Point::ZERO, position, axis_rotation);
                // Recalculation may have coerced a degenerate arc to a bezier.
                point.kind = kind;
            }
        });
        slider.snap_to(snap);

        let head = slider.position;
        let quad = surrounding_quad(
            slider
                .path
                .control_points()
                .iter()
                .map(|point| head + point.position),
        );
        let (fits_x, fits_y) = quad.within_extent(self.playfield.width, self.playfield.height);

        if !(fits_x && fits_y && slider.path.has_valid_length()) {
            tracing::debug!("Slider scale rejected, restoring original path");
            OriginalState::restore_path(original, slider);
            slider.snap_to(snap);
        }
    }

    /// Shifts every target so the selection's extent lies on the playfield.
    fn move_selection_in_bounds(&self, store: &mut ShapeStore, operation: &ScaleOperation) {
        let quad = shapes_surrounding_quad(
            operation.targets.iter().filter_map(|&id| store.get(id)),
        );

        let mut delta = Point::ZERO;
        if quad.top_left.x < 0.0 {
            delta.x -= quad.top_left.x;
        }
        if quad.top_left.y < 0.0 {
            delta.y -= quad.top_left.y;
        }
        if quad.bottom_right.x > self.playfield.width {
            delta.x -= quad.bottom_right.x - self.playfield.width;
        }
        if quad.bottom_right.y > self.playfield.height {
            delta.y -= quad.bottom_right.y - self.playfield.height;
        }

        if delta == Point::ZERO {
            return;
        }

        tracing::trace!("Moving selection in bounds by ({:.2}, {:.2})", delta.x, delta.y);
        for &id in &operation.targets {
            if let Some(object) = store.get_mut(id) {
                object.translate(delta);
            }
        }
    }
}

impl SelectionListener for ScaleHandler {
    fn on_selection_changed(&mut self, store: &ShapeStore, selected: &[u64]) {
        self.update_selection(store, selected);
    }
}
