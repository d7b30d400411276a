//! Largest scale that keeps a set of reference points on the playfield.
//!
//! Each reference point `p` (relative to the origin) is split into its
//! components along the rotated scale axes, `a = (p·u)u` and `b = (p·v)v`,
//! so the scaled point is `a·sx + b·sy`. For every playfield corner the scale
//! at which the point would cross that boundary is solved for, and the
//! smallest positive exit wins. Points are treated independently, which
//! is exact for circles and an approximation for slider bodies.

use beatedit_core::PlayfieldBounds;
use nalgebra::Vector2;

use super::AdjustAxis;
use crate::model::Point;

/// Clamps `scale` so that every point of `reference_points`, scaled about
/// `origin` along axes rotated by `axis_rotation` degrees, stays within
/// `bounds`. The result is floored at `min_scale` per component.
///
/// `AdjustAxis::None` always yields the identity scale.
pub fn clamp_scale_to_bounds(
    scale: Vector2<f64>,
    origin: Point,
    reference_points: &[Point],
    bounds: PlayfieldBounds,
    adjust_axis: AdjustAxis,
    axis_rotation: f64,
    min_scale: f64,
) -> Vector2<f64> {
    if adjust_axis == AdjustAxis::None {
        return Vector2::new(1.0, 1.0);
    }

    let (sin, cos) = axis_rotation.to_radians().sin_cos();
    let low = Vector2::new(-origin.x, -origin.y);
    let high = Vector2::new(bounds.width - origin.x, bounds.height - origin.y);

    let mut scale = scale;
    for point in reference_points {
        let p = Vector2::new(point.x - origin.x, point.y - origin.y);
        let a = Vector2::new(
            cos * cos * p.x + sin * cos * p.y,
            sin * cos * p.x + sin * sin * p.y,
        );
        let b = Vector2::new(
            sin * sin * p.x - sin * cos * p.y,
            -sin * cos * p.x + cos * cos * p.y,
        );

        match adjust_axis {
            AdjustAxis::X => scale.x = scale.x.min(exit_scale(b, a, low, high)),
            AdjustAxis::Y => scale.y = scale.y.min(exit_scale(a, b, low, high)),
            AdjustAxis::Both => {
                for bound in [low, high] {
                    let scaled = a * scale.x + b * scale.y;
                    let t = min_positive_component(bound.component_div(&scaled));
                    scale.x = scale.x.min(scale.x * t);
                    scale.y = scale.y.min(scale.y * t);
                }
            }
            AdjustAxis::None => {}
        }
    }

    Vector2::new(scale.x.max(min_scale), scale.y.max(min_scale))
}

/// Smallest scale `t > 0` at which `fixed + scaled * t` leaves `[low, high]`.
///
/// A boundary only counts when the fixed part starts on its inner side;
/// otherwise `t` is where the point re-enters, not where it exits.
fn exit_scale(
    fixed: Vector2<f64>,
    scaled: Vector2<f64>,
    low: Vector2<f64>,
    high: Vector2<f64>,
) -> f64 {
    let mut min = f64::INFINITY;
    for i in 0..2 {
        if fixed[i] >= low[i] {
            min = min.min(positive_or_infinity((low[i] - fixed[i]) / scaled[i]));
        }
        if fixed[i] <= high[i] {
            min = min.min(positive_or_infinity((high[i] - fixed[i]) / scaled[i]));
        }
    }
    min
}

fn positive_or_infinity(t: f64) -> f64 {
    if t > 0.0 && t.is_finite() {
        t
    } else {
        f64::INFINITY
    }
}

/// Smallest strictly positive, finite component; infinity if there is none.
fn min_positive_component(v: Vector2<f64>) -> f64 {
    v.iter()
        .map(|&c| positive_or_infinity(c))
        .fold(f64::INFINITY, f64::min)
}
