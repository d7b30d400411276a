use std::cell::RefCell;
use std::rc::Rc;

use beatedit_core::{shared, PlayfieldBounds, ScaleError};
use beatedit_designer::history::ChangeHandler;
use beatedit_designer::model::{
    EditorShape, HitCircle, HitObject, PathControlPoint, PathType, Point, Slider, SliderPath,
    Spinner,
};
use beatedit_designer::scale::{AdjustAxis, ScaleHandler};
use beatedit_designer::shape_store::ShapeStore;
use beatedit_designer::snap::BeatSnapProvider;
use beatedit_designer::UndoRedoManager;
use beatedit_settings::ScaleSettings;
use nalgebra::Vector2;

#[derive(Default)]
struct RecordingChangeHandler {
    begins: usize,
    ends: usize,
}

impl ChangeHandler for RecordingChangeHandler {
    fn begin_change(&mut self, _store: &ShapeStore) {
        self.begins += 1;
    }

    fn end_change(&mut self, _store: &ShapeStore) {
        self.ends += 1;
    }
}

fn position(store: &ShapeStore, id: u64) -> Point {
    store.get(id).map(|o| o.position()).unwrap_or(Point::ZERO)
}

fn slider_of(store: &ShapeStore, id: u64) -> &Slider {
    store
        .get(id)
        .and_then(HitObject::as_slider)
        .expect("object should be a slider")
}

fn assert_close(actual: Point, expected: Point) {
    assert!(
        actual.distance_to(&expected) < 1e-6,
        "expected {:?}, got {:?}",
        expected,
        actual
    );
}

fn handler_for(store: &ShapeStore, ids: &[u64]) -> ScaleHandler {
    let mut handler = ScaleHandler::default();
    handler.update_selection(store, ids);
    handler
}

#[test]
fn test_identity_update_leaves_everything_unchanged() {
    let mut store = ShapeStore::new();
    let a = store.add(HitCircle::new(Point::new(100.0, 100.0), 0.0));
    let b = store.add(HitCircle::new(Point::new(230.5, 170.25), 100.0));
    let s = store.add(Slider::new(
        Point::new(300.0, 200.0),
        200.0,
        SliderPath::linear(&[Point::ZERO, Point::new(60.0, 30.0)]),
    ));
    let before = store.clone();

    let mut handler = handler_for(&store, &[a, b, s]);
    handler.begin(&store).unwrap();
    handler
        .update(&mut store, Vector2::new(1.0, 1.0), None, AdjustAxis::Both, 0.0)
        .unwrap();
    handler
        .update(&mut store, Vector2::new(1.0, 1.0), None, AdjustAxis::Both, 37.0)
        .unwrap();
    handler.commit(&store).unwrap();

    assert_eq!(store, before);
}

#[test]
fn test_single_slider_identity_is_bit_identical() {
    let mut store = ShapeStore::new();
    let path = SliderPath::new(vec![
        PathControlPoint::new(Point::ZERO, Some(PathType::PerfectCurve)),
        PathControlPoint::new(Point::new(40.0, -30.0), None),
        PathControlPoint::new(Point::new(80.0, 0.0), None),
    ]);
    let id = store.add(Slider::new(Point::new(200.0, 200.0), 0.0, path));
    let original_points = slider_of(&store, id).path.control_points().to_vec();

    let mut handler = handler_for(&store, &[id]);
    assert!(handler.capabilities().is_scaling_single_curve);

    handler.begin(&store).unwrap();
    handler
        .update(&mut store, Vector2::new(1.0, 1.0), None, AdjustAxis::Both, 0.0)
        .unwrap();
    handler.commit(&store).unwrap();

    let slider = slider_of(&store, id);
    assert_eq!(slider.path.control_points(), original_points.as_slice());
    assert_eq!(slider.position, Point::new(200.0, 200.0));
}

#[test]
fn test_single_slider_scales_about_its_head() {
    let mut store = ShapeStore::new();
    let id = store.add(Slider::new(
        Point::new(100.0, 100.0),
        0.0,
        SliderPath::linear(&[Point::ZERO, Point::new(50.0, 20.0)]),
    ));

    let mut handler = handler_for(&store, &[id]);
    handler.begin(&store).unwrap();
    handler
        .update(&mut store, Vector2::new(2.0, 3.0), None, AdjustAxis::Both, 0.0)
        .unwrap();

    let slider = slider_of(&store, id);
    assert_eq!(slider.position, Point::new(100.0, 100.0));
    assert_close(slider.path.control_points()[1].position, Point::new(100.0, 60.0));
    assert_eq!(slider.path.expected_distance(), Some(slider.path.calculated_distance()));
}

#[test]
fn test_slider_leaving_playfield_reverts() {
    let mut store = ShapeStore::new();
    let id = store.add(Slider::new(
        Point::new(400.0, 100.0),
        0.0,
        SliderPath::linear(&[Point::ZERO, Point::new(100.0, 0.0)]),
    ));
    let original = slider_of(&store, id).clone();

    let mut handler = handler_for(&store, &[id]);
    handler.begin(&store).unwrap();
    handler
        .update(&mut store, Vector2::new(3.0, 1.0), None, AdjustAxis::X, 0.0)
        .unwrap();

    let slider = slider_of(&store, id);
    assert_eq!(slider.path.control_points(), original.path.control_points());
    assert_eq!(slider.position, original.position);
}

#[test]
fn test_slider_snapped_to_nothing_reverts() {
    let mut store = ShapeStore::new();
    let id = store.add(Slider::new(
        Point::new(100.0, 100.0),
        0.0,
        SliderPath::linear(&[Point::ZERO, Point::new(100.0, 0.0)]),
    ));
    let original_points = slider_of(&store, id).path.control_points().to_vec();

    // One snap step is 35 units, so a 20 unit slider has no length.
    let mut handler = handler_for(&store, &[id])
        .with_snap_provider(Rc::new(BeatSnapProvider::new(140.0, 4)));
    handler.begin(&store).unwrap();
    handler
        .update(&mut store, Vector2::new(0.2, 1.0), None, AdjustAxis::X, 0.0)
        .unwrap();

    let slider = slider_of(&store, id);
    assert_eq!(slider.path.control_points(), original_points.as_slice());
    assert!(slider.path.has_valid_length());
    assert_eq!(slider.path.expected_distance(), Some(70.0));
}

#[test]
fn test_flattened_arc_type_does_not_stick() {
    let mut store = ShapeStore::new();
    let path = SliderPath::new(vec![
        PathControlPoint::new(Point::ZERO, Some(PathType::PerfectCurve)),
        PathControlPoint::new(Point::new(0.5, 0.5), None),
        PathControlPoint::new(Point::new(1.0, 0.0), None),
    ]);
    let id = store.add(Slider::new(Point::new(200.0, 200.0), 0.0, path));

    let mut handler = handler_for(&store, &[id]);
    handler.begin(&store).unwrap();

    handler
        .update(&mut store, Vector2::new(1.0, 0.001), None, AdjustAxis::Y, 0.0)
        .unwrap();
    assert_eq!(
        slider_of(&store, id).path.control_points()[0].kind,
        Some(PathType::Bezier)
    );

    handler
        .update(&mut store, Vector2::new(1.0, 1.0), None, AdjustAxis::Y, 0.0)
        .unwrap();
    assert_eq!(
        slider_of(&store, id).path.control_points()[0].kind,
        Some(PathType::PerfectCurve)
    );
}

#[test]
fn test_adjust_axis_none_keeps_positions() {
    let mut store = ShapeStore::new();
    let a = store.add(HitCircle::new(Point::new(100.0, 100.0), 0.0));
    let b = store.add(HitCircle::new(Point::new(200.0, 150.0), 0.0));

    let mut handler = handler_for(&store, &[a, b]);
    handler.begin(&store).unwrap();
    handler
        .update(&mut store, Vector2::new(3.0, 3.0), None, AdjustAxis::None, 0.0)
        .unwrap();

    assert_eq!(position(&store, a), Point::new(100.0, 100.0));
    assert_eq!(position(&store, b), Point::new(200.0, 150.0));
}

#[test]
fn test_x_axis_scale_leaves_y_untouched() {
    let mut store = ShapeStore::new();
    let a = store.add(HitCircle::new(Point::new(100.0, 100.0), 0.0));
    let b = store.add(HitCircle::new(Point::new(200.0, 150.0), 0.0));

    let mut handler = handler_for(&store, &[a, b]);
    handler.begin(&store).unwrap();
    handler
        .update(
            &mut store,
            Vector2::new(2.0, 5.0),
            Some(Point::new(100.0, 100.0)),
            AdjustAxis::X,
            0.0,
        )
        .unwrap();

    assert_close(position(&store, a), Point::new(100.0, 100.0));
    assert_close(position(&store, b), Point::new(300.0, 150.0));
}

#[test]
fn test_identity_single_axis_update_on_rotated_axes_keeps_positions() {
    for (axis, rotation) in [(AdjustAxis::X, 123.5), (AdjustAxis::Y, 33.5)] {
        let mut store = ShapeStore::new();
        let a = store.add(HitCircle::new(Point::new(0.0, 369.05), 0.0));
        let b = store.add(HitCircle::new(Point::new(0.0, 382.24), 0.0));

        let mut handler = handler_for(&store, &[a, b]);
        handler.begin(&store).unwrap();
        handler
            .update(
                &mut store,
                Vector2::new(1.0, 1.0),
                Some(Point::new(356.88, 50.0)),
                axis,
                rotation,
            )
            .unwrap();

        assert_eq!(position(&store, a), Point::new(0.0, 369.05), "{:?}", axis);
        assert_eq!(position(&store, b), Point::new(0.0, 382.24), "{:?}", axis);
    }
}

#[test]
fn test_scale_is_capped_at_playfield_edge() {
    let mut store = ShapeStore::new();
    let a = store.add(HitCircle::new(Point::new(100.0, 100.0), 0.0));
    let b = store.add(HitCircle::new(Point::new(200.0, 200.0), 0.0));

    let mut handler = handler_for(&store, &[a, b]);
    handler.begin(&store).unwrap();
    handler
        .update(
            &mut store,
            Vector2::new(4.0, 4.0),
            Some(Point::new(100.0, 100.0)),
            AdjustAxis::Both,
            0.0,
        )
        .unwrap();

    assert_close(position(&store, a), Point::new(100.0, 100.0));
    assert_close(position(&store, b), Point::new(384.0, 384.0));
}

#[test]
fn test_rotated_scale_stays_in_bounds() {
    let mut store = ShapeStore::new();
    let ids: Vec<u64> = [(50.0, 60.0), (400.0, 90.0), (250.0, 330.0)]
        .iter()
        .map(|&(x, y)| store.add(HitCircle::new(Point::new(x, y), 0.0)))
        .collect();

    let mut handler = handler_for(&store, &ids);
    handler.begin(&store).unwrap();
    handler
        .update(&mut store, Vector2::new(3.0, 2.0), None, AdjustAxis::Both, 30.0)
        .unwrap();

    let bounds = PlayfieldBounds::default();
    for &id in &ids {
        let p = position(&store, id);
        assert!(p.x >= -1e-6 && p.x <= bounds.width + 1e-6, "{:?}", p);
        assert!(p.y >= -1e-6 && p.y <= bounds.height + 1e-6, "{:?}", p);
    }
}

#[test]
fn test_selection_outside_playfield_is_moved_in() {
    let mut store = ShapeStore::new();
    let a = store.add(HitCircle::new(Point::new(-10.0, 100.0), 0.0));
    let b = store.add(HitCircle::new(Point::new(50.0, 120.0), 0.0));

    let mut handler = handler_for(&store, &[a, b]);
    handler.begin(&store).unwrap();
    handler
        .update(&mut store, Vector2::new(2.0, 2.0), None, AdjustAxis::None, 0.0)
        .unwrap();

    assert_eq!(position(&store, a), Point::new(0.0, 100.0));
    assert_eq!(position(&store, b), Point::new(60.0, 120.0));
}

#[test]
fn test_spinners_are_never_moved() {
    let mut store = ShapeStore::new();
    let a = store.add(HitCircle::new(Point::new(100.0, 100.0), 0.0));
    let b = store.add(HitCircle::new(Point::new(200.0, 200.0), 0.0));
    let spinner = store.add(Spinner::new(Point::new(256.0, 192.0), 0.0, 2000.0));

    let mut handler = handler_for(&store, &[a, spinner, b]);
    assert_eq!(handler.eligible(), &[a, b]);

    handler.begin(&store).unwrap();
    handler
        .update(&mut store, Vector2::new(0.5, 0.5), None, AdjustAxis::Both, 0.0)
        .unwrap();

    assert_eq!(position(&store, spinner), Point::new(256.0, 192.0));
    assert_close(position(&store, a), Point::new(125.0, 125.0));
    assert_close(position(&store, b), Point::new(175.0, 175.0));
}

#[test]
fn test_default_origin_is_enclosing_circle_centre() {
    let mut store = ShapeStore::new();
    let a = store.add(HitCircle::new(Point::new(100.0, 100.0), 0.0));
    let b = store.add(HitCircle::new(Point::new(200.0, 200.0), 0.0));

    let mut handler = handler_for(&store, &[a, b]);
    assert_eq!(handler.default_origin(), None);

    handler.begin(&store).unwrap();
    assert_close(handler.default_origin().unwrap(), Point::new(150.0, 150.0));

    let quad = handler.original_surrounding_quad().unwrap();
    assert_eq!(quad.top_left, Point::new(100.0, 100.0));
    assert_eq!(quad.bottom_right, Point::new(200.0, 200.0));

    handler.commit(&store).unwrap();
    assert_eq!(handler.original_surrounding_quad(), None);
}

#[test]
fn test_updates_are_computed_from_snapshot() {
    let mut store = ShapeStore::new();
    let a = store.add(HitCircle::new(Point::new(100.0, 100.0), 0.0));
    let b = store.add(HitCircle::new(Point::new(200.0, 100.0), 0.0));

    let mut handler = handler_for(&store, &[a, b]);
    handler.begin(&store).unwrap();
    let origin = Some(Point::new(100.0, 100.0));
    handler
        .update(&mut store, Vector2::new(2.0, 1.0), origin, AdjustAxis::X, 0.0)
        .unwrap();
    handler
        .update(&mut store, Vector2::new(1.5, 1.0), origin, AdjustAxis::X, 0.0)
        .unwrap();

    assert_close(position(&store, b), Point::new(250.0, 100.0));
}

#[test]
fn test_lifecycle_contract_errors() {
    let mut store = ShapeStore::new();
    let a = store.add(HitCircle::new(Point::new(100.0, 100.0), 0.0));
    let mut handler = handler_for(&store, &[a]);

    assert_eq!(
        handler.update(&mut store, Vector2::new(2.0, 2.0), None, AdjustAxis::Both, 0.0),
        Err(ScaleError::NoOperationInProgress)
    );
    assert_eq!(handler.commit(&store), Err(ScaleError::NoOperationInProgress));

    handler.begin(&store).unwrap();
    assert_eq!(handler.begin(&store), Err(ScaleError::OperationInProgress));
    assert!(handler.is_active());

    handler.commit(&store).unwrap();
    assert!(!handler.is_active());
}

#[test]
fn test_change_handler_sees_one_pair_per_operation() {
    let mut store = ShapeStore::new();
    let a = store.add(HitCircle::new(Point::new(100.0, 100.0), 0.0));
    let b = store.add(HitCircle::new(Point::new(150.0, 140.0), 0.0));

    let recorder = Rc::new(RefCell::new(RecordingChangeHandler::default()));
    let mut handler = handler_for(&store, &[a, b]).with_change_handler(recorder.clone());

    handler.begin(&store).unwrap();
    let _ = handler.begin(&store);
    for i in 1..=5 {
        let s = 1.0 + i as f64 * 0.1;
        handler
            .update(&mut store, Vector2::new(s, s), None, AdjustAxis::Both, 0.0)
            .unwrap();
    }
    assert_eq!(recorder.borrow().begins, 1);
    assert_eq!(recorder.borrow().ends, 0);

    handler.commit(&store).unwrap();
    let _ = handler.commit(&store);
    assert_eq!(recorder.borrow().begins, 1);
    assert_eq!(recorder.borrow().ends, 1);
}

#[test]
fn test_committed_scale_can_be_undone() {
    let mut store = ShapeStore::new();
    let a = store.add(HitCircle::new(Point::new(100.0, 100.0), 0.0));
    let b = store.add(HitCircle::new(Point::new(200.0, 200.0), 0.0));
    let before = store.clone();

    let history = shared(UndoRedoManager::new(10));
    let mut handler = handler_for(&store, &[a, b]).with_change_handler(history.clone());

    handler.begin(&store).unwrap();
    handler
        .update(&mut store, Vector2::new(1.5, 1.5), None, AdjustAxis::Both, 0.0)
        .unwrap();
    handler.commit(&store).unwrap();
    let after = store.clone();

    assert!(history.borrow_mut().undo(&mut store));
    assert_eq!(store, before);
    assert!(history.borrow_mut().redo(&mut store));
    assert_eq!(store, after);
}

#[test]
fn test_custom_playfield_and_min_scale() {
    let mut store = ShapeStore::new();
    let a = store.add(HitCircle::new(Point::new(10.0, 10.0), 0.0));
    let b = store.add(HitCircle::new(Point::new(90.0, 10.0), 0.0));

    let mut handler = ScaleHandler::new(
        PlayfieldBounds::new(100.0, 100.0),
        ScaleSettings { min_scale: 0.25 },
    );
    handler.update_selection(&store, &[a, b]);
    handler.begin(&store).unwrap();

    let clamped = handler.clamp_scale_to_playfield_bounds(
        Vector2::new(0.01, 1.0),
        Point::new(50.0, 10.0),
        AdjustAxis::X,
        0.0,
    );
    assert_eq!(clamped, Vector2::new(0.25, 1.0));

    let clamped = handler.clamp_scale_to_playfield_bounds(
        Vector2::new(4.0, 1.0),
        Point::new(50.0, 10.0),
        AdjustAxis::X,
        0.0,
    );
    assert!((clamped.x - 1.25).abs() < 1e-9);
}

#[test]
fn test_clamp_while_idle_returns_input() {
    let handler = ScaleHandler::default();
    let scale = Vector2::new(40.0, -3.0);
    assert_eq!(
        handler.clamp_scale_to_playfield_bounds(scale, Point::ZERO, AdjustAxis::Both, 0.0),
        scale
    );
}

#[test]
fn test_cancel_restores_snapshot_and_records_nothing() {
    let mut store = ShapeStore::new();
    let a = store.add(HitCircle::new(Point::new(100.0, 100.0), 0.0));
    let s = store.add(Slider::new(
        Point::new(200.0, 150.0),
        0.0,
        SliderPath::linear(&[Point::ZERO, Point::new(80.0, 10.0)]),
    ));
    let before = store.clone();

    let history = shared(UndoRedoManager::new(10));
    let mut handler = handler_for(&store, &[a, s])
        .with_change_handler(history.clone())
        .with_snap_provider(Rc::new(BeatSnapProvider::default()));

    handler.begin(&store).unwrap();
    handler
        .update(&mut store, Vector2::new(1.7, 0.6), None, AdjustAxis::Both, 15.0)
        .unwrap();
    assert_ne!(store, before);

    handler.cancel(&mut store).unwrap();
    assert_eq!(store, before);
    assert!(!handler.is_active());
    assert!(!history.borrow().can_undo());
    assert!(!history.borrow().is_transaction_open());
    assert_eq!(handler.cancel(&mut store), Err(ScaleError::NoOperationInProgress));
}
