//! Positions and move vectors on the board plane.
//!
//! The board lies on the horizontal x/z plane. Height is never simulated, so points only
//! carry the two horizontal components.

use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub};

/// A point or a vector on the board plane.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    /// Horizontal axis.
    pub x: f32,
    /// Depth axis.
    pub z: f32,
}

impl Vec2 {
    /// The board center / the null vector.
    pub const ZERO: Vec2 = Vec2 { x: 0.0, z: 0.0 };

    /// Creates a new point.
    pub const fn new(x: f32, z: f32) -> Self {
        Self { x, z }
    }

    /// Euclidean length.
    pub fn length(self) -> f32 {
        self.x.hypot(self.z)
    }

    /// Euclidean distance between two points.
    pub fn distance(self, other: Vec2) -> f32 {
        (self - other).length()
    }

    /// Unit vector with the same direction, or zero when the vector is (almost) null.
    pub fn normalized_or_zero(self) -> Vec2 {
        let len = self.length();
        if len <= f32::EPSILON {
            Vec2::ZERO
        } else {
            Vec2::new(self.x / len, self.z / len)
        }
    }

    /// Clamps each component independently to `[-1, 1]`, the range of an action vector.
    /// Non-finite components become zero.
    pub fn clamp_axes(self) -> Vec2 {
        fn axis(v: f32) -> f32 {
            if v.is_finite() {
                v.clamp(-1.0, 1.0)
            } else {
                0.0
            }
        }
        Vec2::new(axis(self.x), axis(self.z))
    }

    /// True when any component is non-zero.
    pub fn is_nonzero(self) -> bool {
        self.x != 0.0 || self.z != 0.0
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.z + rhs.z)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.z += rhs.z;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.z - rhs.z)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.z * rhs)
    }
}

impl fmt::Display for Vec2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.z)
    }
}
