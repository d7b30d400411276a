use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Mul, Neg, Sub};

mod circle;
mod path;
mod slider;
mod spinner;

pub use circle::HitCircle;
pub use path::{PathControlPoint, PathType, SliderPath};
pub use slider::Slider;
pub use spinner::Spinner;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn dot(&self, other: &Point) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// z component of the 3D cross product; positive when `other` turns
    /// counter-clockwise from `self`.
    pub fn cross(&self, other: &Point) -> f64 {
        self.x * other.y - self.y * other.x
    }

    pub fn lerp(&self, other: &Point, t: f64) -> Point {
        Point::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Point {
    fn add_assign(&mut self, rhs: Point) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Point {
    type Output = Point;

    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

/// Common behaviour of every object placed on the playfield.
pub trait EditorShape {
    fn position(&self) -> Point;
    fn set_position(&mut self, position: Point);

    /// Whether the object occupies space on the playfield. Objects without
    /// extent (spinners) cannot be moved or scaled.
    fn has_spatial_extent(&self) -> bool {
        true
    }

    /// Calls `f` with every point that defines the object's extent.
    fn for_each_extent_point(&self, f: &mut dyn FnMut(Point));

    fn translate(&mut self, delta: Point) {
        self.set_position(self.position() + delta);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShapeType {
    Circle,
    Slider,
    Spinner,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum HitObject {
    Circle(HitCircle),
    Slider(Slider),
    Spinner(Spinner),
}

impl HitObject {
    pub fn shape_type(&self) -> ShapeType {
        match self {
            HitObject::Circle(_) => ShapeType::Circle,
            HitObject::Slider(_) => ShapeType::Slider,
            HitObject::Spinner(_) => ShapeType::Spinner,
        }
    }

    pub fn as_slider(&self) -> Option<&Slider> {
        match self {
            HitObject::Slider(slider) => Some(slider),
            _ => None,
        }
    }

    pub fn as_slider_mut(&mut self) -> Option<&mut Slider> {
        match self {
            HitObject::Slider(slider) => Some(slider),
            _ => None,
        }
    }
}

impl EditorShape for HitObject {
    fn position(&self) -> Point {
        match self {
            HitObject::Circle(s) => s.position(),
            HitObject::Slider(s) => s.position(),
            HitObject::Spinner(s) => s.position(),
        }
    }

    fn set_position(&mut self, position: Point) {
        match self {
            HitObject::Circle(s) => s.set_position(position),
            HitObject::Slider(s) => s.set_position(position),
            HitObject::Spinner(s) => s.set_position(position),
        }
    }

    fn has_spatial_extent(&self) -> bool {
        match self {
            HitObject::Circle(s) => s.has_spatial_extent(),
            HitObject::Slider(s) => s.has_spatial_extent(),
            HitObject::Spinner(s) => s.has_spatial_extent(),
        }
    }

    fn for_each_extent_point(&self, f: &mut dyn FnMut(Point)) {
        match self {
            HitObject::Circle(s) => s.for_each_extent_point(f),
            HitObject::Slider(s) => s.for_each_extent_point(f),
            HitObject::Spinner(s) => s.for_each_extent_point(f),
        }
    }
}

impl From<HitCircle> for HitObject {
    fn from(circle: HitCircle) -> Self {
        HitObject::Circle(circle)
    }
}

impl From<Slider> for HitObject {
    fn from(slider: Slider) -> Self {
        HitObject::Slider(slider)
    }
}

impl From<Spinner> for HitObject {
    fn from(spinner: Spinner) -> Self {
        HitObject::Spinner(spinner)
    }
}
