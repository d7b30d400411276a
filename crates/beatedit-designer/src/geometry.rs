//! Geometry helpers shared by selection transforms.
//!
//! Everything here is pure: no shape is mutated and results depend only on
//! the input order where the docs say so.

use nalgebra::{Rotation2, Vector2};
use serde::{Deserialize, Serialize};

use crate::model::{EditorShape, Point};

/// Axis-aligned rectangle described by its top-left and bottom-right corners.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Quad {
    pub top_left: Point,
    pub bottom_right: Point,
}

impl Quad {
    pub fn new(top_left: Point, bottom_right: Point) -> Self {
        Self {
            top_left,
            bottom_right,
        }
    }

    pub fn top_right(&self) -> Point {
        Point::new(self.bottom_right.x, self.top_left.y)
    }

    pub fn bottom_left(&self) -> Point {
        Point::new(self.top_left.x, self.bottom_right.y)
    }

    /// Corners in top-left, top-right, bottom-left, bottom-right order.
    pub fn corners(&self) -> [Point; 4] {
        [
            self.top_left,
            self.top_right(),
            self.bottom_left(),
            self.bottom_right,
        ]
    }

    pub fn width(&self) -> f64 {
        self.bottom_right.x - self.top_left.x
    }

    pub fn height(&self) -> f64 {
        self.bottom_right.y - self.top_left.y
    }

    pub fn centre(&self) -> Point {
        self.top_left.lerp(&self.bottom_right, 0.5)
    }

    /// Whether the quad lies within `(0, 0)..=(width, height)` horizontally
    /// and vertically, reported per axis.
    pub fn within_extent(&self, width: f64, height: f64) -> (bool, bool) {
        let x = self.top_left.x >= 0.0 && self.bottom_right.x <= width;
        let y = self.top_left.y >= 0.0 && self.bottom_right.y <= height;
        (x, y)
    }
}

/// Accumulates an axis-aligned bounding quad one point at a time.
#[derive(Debug, Clone, Copy)]
struct QuadBuilder {
    min: Point,
    max: Point,
    empty: bool,
}

impl QuadBuilder {
    fn new() -> Self {
        Self {
            min: Point::new(f64::INFINITY, f64::INFINITY),
            max: Point::new(f64::NEG_INFINITY, f64::NEG_INFINITY),
            empty: true,
        }
    }

    fn push(&mut self, p: Point) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
        self.empty = false;
    }

    fn build(self) -> Quad {
        if self.empty {
            Quad::default()
        } else {
            Quad::new(self.min, self.max)
        }
    }
}

/// Bounding quad of `points`. An empty input yields the zero quad.
pub fn surrounding_quad<I>(points: I) -> Quad
where
    I: IntoIterator<Item = Point>,
{
    let mut builder = QuadBuilder::new();
    for p in points {
        builder.push(p);
    }
    builder.build()
}

/// Bounding quad of the extent points of `shapes`.
pub fn shapes_surrounding_quad<'a, S, I>(shapes: I) -> Quad
where
    S: EditorShape + ?Sized + 'a,
    I: IntoIterator<Item = &'a S>,
{
    let mut builder = QuadBuilder::new();
    for shape in shapes {
        shape.for_each_extent_point(&mut |p| builder.push(p));
    }
    builder.build()
}

/// Extent points of `shapes`, in shape order.
pub fn shapes_extent_points<'a, S, I>(shapes: I) -> Vec<Point>
where
    S: EditorShape + ?Sized + 'a,
    I: IntoIterator<Item = &'a S>,
{
    let mut points = Vec::new();
    for shape in shapes {
        shape.for_each_extent_point(&mut |p| points.push(p));
    }
    points
}

/// Convex hull using Andrew's monotone chain.
///
/// Points are sorted by x then y, so the result does not depend on input
/// order. Duplicates and collinear points are dropped. The hull is returned
/// counter-clockwise (in a y-up frame) starting from the lowest-x point.
pub fn convex_hull(points: &[Point]) -> Vec<Point> {
    let mut sorted: Vec<Point> = points.iter().copied().filter(Point::is_finite).collect();
    sorted.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
    sorted.dedup();

    if sorted.len() < 3 {
        return sorted;
    }

    let turn = |o: Point, a: Point, b: Point| (a - o).cross(&(b - o));

    let mut hull: Vec<Point> = Vec::with_capacity(sorted.len() * 2);

    for &p in &sorted {
        while hull.len() >= 2 && turn(hull[hull.len() - 2], hull[hull.len() - 1], p) <= 0.0 {
            hull.pop();
        }
        hull.push(p);
    }

    let lower_len = hull.len() + 1;
    for &p in sorted.iter().rev().skip(1) {
        while hull.len() >= lower_len && turn(hull[hull.len() - 2], hull[hull.len() - 1], p) <= 0.0
        {
            hull.pop();
        }
        hull.push(p);
    }

    // The last point repeats the first.
    hull.pop();
    hull
}

/// Smallest circle containing `points`, as `(centre, radius)`.
///
/// Incremental Welzl over the points in the given order; no randomisation,
/// so the result is reproducible. Empty input yields a zero circle at the
/// origin.
pub fn minimum_enclosing_circle(points: &[Point]) -> (Point, f64) {
    let Some(&first) = points.first() else {
        return (Point::ZERO, 0.0);
    };

    let mut circle = (first, 0.0);
    for i in 1..points.len() {
        if contains(circle, points[i]) {
            continue;
        }
        circle = (points[i], 0.0);
        for j in 0..i {
            if contains(circle, points[j]) {
                continue;
            }
            circle = circle_from_two(points[i], points[j]);
            for k in 0..j {
                if !contains(circle, points[k]) {
                    circle = circle_from_three(points[i], points[j], points[k]);
                }
            }
        }
    }
    circle
}

fn contains(circle: (Point, f64), p: Point) -> bool {
    circle.0.distance_to(&p) <= circle.1 + 1e-7 * circle.1.max(1.0)
}

fn circle_from_two(a: Point, b: Point) -> (Point, f64) {
    let centre = a.lerp(&b, 0.5);
    (centre, centre.distance_to(&a))
}

fn circle_from_three(a: Point, b: Point, c: Point) -> (Point, f64) {
    let ab = b - a;
    let ac = c - a;
    let d = 2.0 * ab.cross(&ac);
    if d.abs() < 1e-12 {
        // Collinear: the widest pair spans the others.
        let candidates = [circle_from_two(a, b), circle_from_two(a, c), circle_from_two(b, c)];
        return candidates
            .into_iter()
            .fold((Point::ZERO, f64::NEG_INFINITY), |best, candidate| {
                if candidate.1 > best.1 {
                    candidate
                } else {
                    best
                }
            });
    }
    let ab_sq = ab.dot(&ab);
    let ac_sq = ac.dot(&ac);
    let offset = Point::new(
        (ac.y * ab_sq - ab.y * ac_sq) / d,
        (ab.x * ac_sq - ac.x * ab_sq) / d,
    );
    (a + offset, offset.length())
}

/// Scales `point` about `origin` along axes rotated by `axis_rotation`
/// degrees from the playfield axes.
///
/// The point is rotated into the scale frame, scaled per axis, then rotated
/// back. Every position change made by a scale operation goes through here.
pub fn scaled_position(
    scale: Vector2<f64>,
    origin: Point,
    point: Point,
    axis_rotation: f64,
) -> Point {
    if scale.x == 1.0 && scale.y == 1.0 {
        return point;
    }

    let rotation = Rotation2::new(axis_rotation.to_radians());
    let relative = Vector2::new(point.x - origin.x, point.y - origin.y);

    let local = rotation.inverse() * relative;
    let scaled = rotation * local.component_mul(&scale);

    Point::new(origin.x + scaled.x, origin.y + scaled.y)
}
