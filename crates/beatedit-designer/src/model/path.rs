use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use super::Point;

const BEZIER_STEP_LENGTH: f64 = 2.0;
const MAX_BEZIER_STEPS: usize = 500;
const CATMULL_DETAIL: usize = 50;
const CIRCULAR_ARC_TOLERANCE: f64 = 0.1;
const MAX_ARC_POINTS: usize = 1000;
const COLLINEAR_EPSILON: f64 = 1e-3;
const MIN_VALID_LENGTH: f64 = 1e-7;

/// Curve family of a path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PathType {
    Linear,
    Bezier,
    Catmull,
    /// Circular arc through exactly three points.
    PerfectCurve,
}

/// A control point of a slider path, relative to the slider's position.
///
/// A point with a `kind` starts a new segment of that type; `None` continues
/// the current segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathControlPoint {
    pub position: Point,
    pub kind: Option<PathType>,
}

impl PathControlPoint {
    pub fn new(position: Point, kind: Option<PathType>) -> Self {
        Self { position, kind }
    }
}

/// Sampling buffers kept across recalculations of the same path.
///
/// They carry no state of the path itself, so clones start empty and every
/// pair compares equal.
#[derive(Debug, Default)]
struct SampleBuffers {
    segment: Vec<Point>,
    sampled: Vec<Point>,
    casteljau: Vec<Point>,
}

impl Clone for SampleBuffers {
    fn clone(&self) -> Self {
        Self::default()
    }
}

impl PartialEq for SampleBuffers {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl SampleBuffers {
    /// Appends the approximation of `self.segment` to `out`. Returns `false`
    /// when a perfect curve segment had to fall back to a bezier.
    fn approximate_segment(&mut self, kind: PathType, out: &mut Vec<Point>) -> bool {
        let points = &self.segment;
        let sampled = &mut self.sampled;
        sampled.clear();

        let arc_ok = match kind {
            PathType::Linear => {
                sampled.extend_from_slice(points);
                true
            }
            PathType::Bezier => {
                approximate_bezier(points, &mut self.casteljau, sampled);
                true
            }
            PathType::Catmull => {
                approximate_catmull(points, sampled);
                true
            }
            PathType::PerfectCurve => {
                if points.len() == 3 && approximate_circular_arc(points, sampled) {
                    true
                } else {
                    sampled.clear();
                    approximate_bezier(points, &mut self.casteljau, sampled);
                    false
                }
            }
        };

        for (j, &p) in sampled.iter().enumerate() {
            if j == 0 && out.last() == Some(&p) {
                continue;
            }
            out.push(p);
        }
        arc_ok
    }
}

#[derive(Serialize, Deserialize)]
struct RawSliderPath {
    control_points: Vec<PathControlPoint>,
    expected_distance: Option<f64>,
}

/// Control points of a slider plus their approximated polyline.
///
/// The polyline is recomputed whenever control points change, so callers edit
/// points through [`SliderPath::edit_control_points`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawSliderPath", into = "RawSliderPath")]
pub struct SliderPath {
    control_points: Vec<PathControlPoint>,
    expected_distance: Option<f64>,
    calculated: Vec<Point>,
    cumulative: Vec<f64>,
    buffers: SampleBuffers,
}

impl From<RawSliderPath> for SliderPath {
    fn from(raw: RawSliderPath) -> Self {
        let mut path = SliderPath::new(raw.control_points);
        path.expected_distance = raw.expected_distance;
        path
    }
}

impl From<SliderPath> for RawSliderPath {
    fn from(path: SliderPath) -> Self {
        Self {
            control_points: path.control_points,
            expected_distance: path.expected_distance,
        }
    }
}

impl SliderPath {
    pub fn new(control_points: Vec<PathControlPoint>) -> Self {
        let mut path = Self {
            control_points,
            expected_distance: None,
            calculated: Vec::new(),
            cumulative: Vec::new(),
            buffers: SampleBuffers::default(),
        };
        path.recalculate();
        path
    }

    /// Straight path through `points`.
    pub fn linear(points: &[Point]) -> Self {
        Self::new(
            points
                .iter()
                .enumerate()
                .map(|(i, p)| PathControlPoint::new(*p, (i == 0).then_some(PathType::Linear)))
                .collect(),
        )
    }

    pub fn control_points(&self) -> &[PathControlPoint] {
        &self.control_points
    }

    /// Mutates control points in place, then recomputes the approximation once.
    pub fn edit_control_points<F>(&mut self, f: F)
    where
        F: FnOnce(&mut [PathControlPoint]),
    {
        f(&mut self.control_points);
        self.recalculate();
    }

    pub fn expected_distance(&self) -> Option<f64> {
        self.expected_distance
    }

    pub fn set_expected_distance(&mut self, distance: Option<f64>) {
        self.expected_distance = distance;
    }

    /// Approximated polyline, relative to the slider's position.
    pub fn calculated_path(&self) -> &[Point] {
        &self.calculated
    }

    /// Length of the approximated polyline.
    pub fn calculated_distance(&self) -> f64 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    /// Effective length: the expected distance when one is set.
    pub fn distance(&self) -> f64 {
        match self.expected_distance {
            Some(expected) => expected.max(0.0),
            None => self.calculated_distance(),
        }
    }

    pub fn has_valid_length(&self) -> bool {
        let distance = self.distance();
        distance.is_finite() && distance > MIN_VALID_LENGTH
    }

    /// Point at `progress` (0..=1) of [`SliderPath::distance`] along the path.
    pub fn position_at(&self, progress: f64) -> Point {
        let Some(&first) = self.calculated.first() else {
            return Point::ZERO;
        };
        if self.calculated.len() == 1 {
            return first;
        }

        let d = progress.clamp(0.0, 1.0) * self.distance();
        let total = self.calculated_distance();
        let n = self.calculated.len();

        if d >= total {
            // Extend along the final segment when snapping lengthened the path.
            let last = self.calculated[n - 1];
            let prev = self.calculated[n - 2];
            let segment = last - prev;
            let length = segment.length();
            if length <= 0.0 || d == total {
                return last;
            }
            return last + segment * ((d - total) / length);
        }

        let i = self.cumulative.partition_point(|&c| c < d).max(1);
        let start = self.cumulative[i - 1];
        let span = self.cumulative[i] - start;
        if span <= 0.0 {
            return self.calculated[i];
        }
        self.calculated[i - 1].lerp(&self.calculated[i], (d - start) / span)
    }

    fn recalculate(&mut self) {
        self.calculated.clear();
        self.cumulative.clear();

        let n = self.control_points.len();
        if n == 0 {
            return;
        }
        if n == 1 {
            self.calculated.push(self.control_points[0].position);
            self.cumulative.push(0.0);
            return;
        }

        let mut buffers = std::mem::take(&mut self.buffers);
        let mut segment_type = self.control_points[0].kind.unwrap_or(PathType::Linear);
        let mut start = 0;

        for i in 1..n {
            if self.control_points[i].kind.is_none() && i != n - 1 {
                continue;
            }
            if let Some(kind) = self.control_points[start].kind {
                segment_type = kind;
            }

            buffers.segment.clear();
            buffers
                .segment
                .extend(self.control_points[start..=i].iter().map(|p| p.position));

            let approximated = buffers.approximate_segment(segment_type, &mut self.calculated);
            let flattened = segment_type == PathType::PerfectCurve
                && !approximated
                && buffers.segment.len() == 3;
            if flattened {
                // A flattened arc has no circle; keep drawing it, but as a bezier.
                self.control_points[start].kind = Some(PathType::Bezier);
                segment_type = PathType::Bezier;
            }
            start = i;
        }

        self.buffers = buffers;

        let mut total = 0.0;
        self.cumulative.push(0.0);
        for pair in self.calculated.windows(2) {
            total += pair[0].distance_to(&pair[1]);
            self.cumulative.push(total);
        }
    }
}

fn approximate_bezier(points: &[Point], work: &mut Vec<Point>, out: &mut Vec<Point>) {
    let polygon_length: f64 = points.windows(2).map(|w| w[0].distance_to(&w[1])).sum();
    let steps = if polygon_length.is_finite() {
        ((polygon_length / BEZIER_STEP_LENGTH).ceil() as usize).clamp(2, MAX_BEZIER_STEPS)
    } else {
        2
    };

    for step in 0..=steps {
        let t = step as f64 / steps as f64;
        work.clear();
        work.extend_from_slice(points);
        // de Casteljau reduction
        for level in (1..work.len()).rev() {
            for k in 0..level {
                work[k] = work[k].lerp(&work[k + 1], t);
            }
        }
        out.push(work[0]);
    }
}

fn approximate_catmull(points: &[Point], out: &mut Vec<Point>) {
    let n = points.len();
    for i in 0..n - 1 {
        let v1 = if i > 0 { points[i - 1] } else { points[i] };
        let v2 = points[i];
        let v3 = if i + 1 < n { points[i + 1] } else { v2 * 2.0 - v1 };
        let v4 = if i + 2 < n { points[i + 2] } else { v3 * 2.0 - v2 };

        for c in 0..CATMULL_DETAIL {
            out.push(catmull_point(v1, v2, v3, v4, c as f64 / CATMULL_DETAIL as f64));
        }
    }
    out.push(points[n - 1]);
}

fn catmull_point(v1: Point, v2: Point, v3: Point, v4: Point, t: f64) -> Point {
    let t2 = t * t;
    let t3 = t2 * t;
    let component = |a: f64, b: f64, c: f64, d: f64| {
        0.5 * (2.0 * b
            + (-a + c) * t
            + (2.0 * a - 5.0 * b + 4.0 * c - d) * t2
            + (-a + 3.0 * b - 3.0 * c + d) * t3)
    };
    Point::new(
        component(v1.x, v2.x, v3.x, v4.x),
        component(v1.y, v2.y, v3.y, v4.y),
    )
}

fn approximate_circular_arc(points: &[Point], out: &mut Vec<Point>) -> bool {
    let (a, b, c) = (points[0], points[1], points[2]);

    let d = 2.0 * (a.x * (b.y - c.y) + b.x * (c.y - a.y) + c.x * (a.y - b.y));
    if !d.is_finite() || ((b - a).cross(&(c - a))).abs() < COLLINEAR_EPSILON {
        return false;
    }

    let a_sq = a.dot(&a);
    let b_sq = b.dot(&b);
    let c_sq = c.dot(&c);
    let centre = Point::new(
        (a_sq * (b.y - c.y) + b_sq * (c.y - a.y) + c_sq * (a.y - b.y)) / d,
        (a_sq * (c.x - b.x) + b_sq * (a.x - c.x) + c_sq * (b.x - a.x)) / d,
    );
    let radius = a.distance_to(&centre);

    let theta_start = (a.y - centre.y).atan2(a.x - centre.x);
    let mut theta_end = (c.y - centre.y).atan2(c.x - centre.x);
    while theta_end < theta_start {
        theta_end += 2.0 * PI;
    }

    let mut direction = 1.0;
    let mut theta_range = theta_end - theta_start;

    // Draw through b: flip when b lies on the other side of ac.
    let ortho_a_to_c = Point::new((c - a).y, -(c - a).x);
    if ortho_a_to_c.dot(&(b - a)) < 0.0 {
        direction = -direction;
        theta_range = 2.0 * PI - theta_range;
    }

    let amount = if 2.0 * radius <= CIRCULAR_ARC_TOLERANCE {
        2
    } else {
        let per_step = 2.0 * (1.0 - CIRCULAR_ARC_TOLERANCE / radius).acos();
        ((theta_range / per_step).ceil() as usize).clamp(2, MAX_ARC_POINTS)
    };

    for i in 0..amount {
        let fraction = i as f64 / (amount - 1) as f64;
        let theta = theta_start + direction * fraction * theta_range;
        out.push(centre + Point::new(theta.cos(), theta.sin()) * radius);
    }
    true
}
