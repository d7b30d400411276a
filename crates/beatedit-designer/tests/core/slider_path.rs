use beatedit_designer::model::{
    EditorShape, HitObject, PathControlPoint, PathType, Point, ShapeType, Slider, SliderPath,
};
use beatedit_designer::snap::BeatSnapProvider;

fn curved_slider() -> Slider {
    Slider::new(
        Point::new(120.0, 80.0),
        1500.0,
        SliderPath::new(vec![
            PathControlPoint::new(Point::ZERO, Some(PathType::Bezier)),
            PathControlPoint::new(Point::new(60.0, 80.0), None),
            PathControlPoint::new(Point::new(140.0, 0.0), Some(PathType::Linear)),
            PathControlPoint::new(Point::new(200.0, 40.0), None),
        ]),
    )
}

#[test]
fn test_deserialized_slider_recomputes_path() {
    let slider = curved_slider();
    let json = serde_json::to_string(&HitObject::from(slider.clone())).unwrap();
    let restored: HitObject = serde_json::from_str(&json).unwrap();

    assert_eq!(restored.shape_type(), ShapeType::Slider);
    let restored = restored.as_slider().unwrap();
    assert_eq!(restored.path.calculated_path(), slider.path.calculated_path());
    assert_eq!(restored.end_position(), slider.end_position());
}

#[test]
fn test_snapping_shortens_along_the_path() {
    let mut slider = curved_slider();
    let calculated = slider.path.calculated_distance();

    slider.snap_to(Some(&BeatSnapProvider::new(100.0, 2)));
    let expected = slider.path.expected_distance().unwrap();

    assert!(expected <= calculated);
    assert_eq!(expected % 50.0, 0.0);
    assert!((slider.path.distance() - expected).abs() < 1e-12);
}

#[test]
fn test_expected_distance_extends_past_last_point() {
    let mut slider = Slider::new(
        Point::new(10.0, 10.0),
        0.0,
        SliderPath::linear(&[Point::ZERO, Point::new(30.0, 40.0)]),
    );
    slider.path.set_expected_distance(Some(100.0));

    let tail = slider.end_position();
    assert!(tail.distance_to(&Point::new(70.0, 90.0)) < 1e-9);

    let mut points = Vec::new();
    slider.for_each_extent_point(&mut |p| points.push(p));
    assert_eq!(points.len(), 2);
    assert_eq!(points[0], Point::new(10.0, 10.0));
}

#[test]
fn test_translate_moves_head_without_touching_path() {
    let mut object = HitObject::from(curved_slider());
    let before = object.as_slider().unwrap().path.clone();

    object.translate(Point::new(-20.0, 5.0));

    assert_eq!(object.position(), Point::new(100.0, 85.0));
    assert_eq!(object.as_slider().unwrap().path, before);
}
