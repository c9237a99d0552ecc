//! 2D vector math for laying out moves.
//!
//! Coordinates follow screen convention: the origin is the top-left, `x`
//! grows to the right and `y` grows downward. Angles follow the unit circle,
//! so a positive angle turns counter-clockwise on screen.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul, Sub};

/// A position (or displacement) in the 2D plane.
#[derive(Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// The origin, also used as the zero offset.
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Convert a polar point of `(radius, radians)` to plane coordinates.
    ///
    /// Because `y` grows downward, the sine term is negated so that angles
    /// still read counter-clockwise on screen.
    pub fn from_polar(radius: f64, radians: f64) -> Self {
        Self {
            x: radius * radians.cos(),
            y: radius * -radians.sin(),
        }
    }

    /// Length of this vector.
    pub fn magnitude(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Scale this vector to length 1, keeping its direction.
    ///
    /// Returns `None` for the zero vector, which has no direction.
    pub fn unit(self) -> Option<Self> {
        let magnitude = self.magnitude();
        if magnitude == 0.0 {
            None
        } else {
            Some(self * (1.0 / magnitude))
        }
    }

    /// Euclidean distance between two points.
    pub fn distance_to(self, other: Point) -> f64 {
        (other - self).magnitude()
    }

    pub fn midpoint(self, other: Point) -> Self {
        Self {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }

    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
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

    fn mul(self, factor: f64) -> Point {
        Point::new(self.x * factor, self.y * factor)
    }
}

impl fmt::Debug for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3})", self.x, self.y)
    }
}
