//! Vector math for floorplan placement
//!
//! World space is Y-up. Floorplans describe the horizontal plane only,
//! so `Vec2` carries `x` and `z` and lifts into `Vec3` at a given height.

use std::ops::{Add, Mul, Sub};
use serde::{Deserialize, Serialize};

/// 3D Vector
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 0.0 };
    pub const UP: Vec3 = Vec3 { x: 0.0, y: 1.0, z: 0.0 };

    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn dot(self, other: Vec3) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn len(self) -> f32 {
        self.dot(self).sqrt()
    }

    pub fn normalize(self) -> Vec3 {
        let l = self.len();
        if l == 0.0 {
            return Vec3::ZERO;
        }
        self.scale(1.0 / l)
    }

    pub fn scale(self, s: f32) -> Vec3 {
        Vec3 {
            x: self.x * s,
            y: self.y * s,
            z: self.z * s,
        }
    }

    /// Rotate about the vertical axis by `yaw` radians.
    ///
    /// Positive yaw turns +Z towards +X, so a box whose length runs along
    /// local Z ends up pointing along `(sin yaw, 0, cos yaw)`.
    pub fn rotate_y(self, yaw: f32) -> Vec3 {
        let (sin, cos) = yaw.sin_cos();
        Vec3 {
            x: self.x * cos + self.z * sin,
            y: self.y,
            z: -self.x * sin + self.z * cos,
        }
    }
}

impl Add for Vec3 {
    type Output = Vec3;
    fn add(self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl Sub for Vec3 {
    type Output = Vec3;
    fn sub(self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

impl Mul<f32> for Vec3 {
    type Output = Vec3;
    fn mul(self, s: f32) -> Vec3 {
        self.scale(s)
    }
}

/// Point or extent on the horizontal plane.
///
/// Serialized as a two-element tuple `(x, z)` so floorplan literals read
/// like `start: (5.0, -5.0)`. When used as a size, `x` is the width and
/// `z` the depth (or the second texture axis).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f32, f32)", into = "(f32, f32)")]
pub struct Vec2 {
    pub x: f32,
    pub z: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, z: 0.0 };

    pub fn new(x: f32, z: f32) -> Self {
        Self { x, z }
    }

    pub fn distance(self, other: Vec2) -> f32 {
        (self - other).len()
    }

    pub fn len(self) -> f32 {
        (self.x * self.x + self.z * self.z).sqrt()
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.z.is_finite()
    }

    pub fn midpoint(self, other: Vec2) -> Vec2 {
        Vec2::new((self.x + other.x) * 0.5, (self.z + other.z) * 0.5)
    }

    /// Lift onto the 3D plane at height `y`
    pub fn at_height(self, y: f32) -> Vec3 {
        Vec3::new(self.x, y, self.z)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, other: Vec2) -> Vec2 {
        Vec2::new(self.x - other.x, self.z - other.z)
    }
}

impl From<(f32, f32)> for Vec2 {
    fn from((x, z): (f32, f32)) -> Self {
        Vec2::new(x, z)
    }
}

impl From<Vec2> for (f32, f32) {
    fn from(v: Vec2) -> Self {
        (v.x, v.z)
    }
}

/// Yaw that points local +Z from `end` towards `start`.
///
/// Matches `atan2(start.x - end.x, start.z - end.z)`; the result is the
/// same for either direction modulo π, which does not matter for a box.
pub fn segment_yaw(start: Vec2, end: Vec2) -> f32 {
    (start.x - end.x).atan2(start.z - end.z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_vec3_normalize() {
        let n = Vec3::new(3.0, 0.0, 4.0).normalize();
        assert!((n.len() - 1.0).abs() < 1e-6);
        assert_eq!(Vec3::ZERO.normalize(), Vec3::ZERO);
    }

    #[test]
    fn test_rotate_y_quarter_turn_maps_z_onto_x() {
        let v = Vec3::new(0.0, 2.0, 1.0).rotate_y(FRAC_PI_2);
        assert!((v.x - 1.0).abs() < 1e-6);
        assert!((v.y - 2.0).abs() < 1e-6);
        assert!(v.z.abs() < 1e-6);
    }

    #[test]
    fn test_segment_length_and_midpoint() {
        let a = Vec2::new(5.0, -5.0);
        let b = Vec2::new(-5.0, -5.0);
        assert!((a.distance(b) - 10.0).abs() < 1e-6);
        assert_eq!(a.midpoint(b), Vec2::new(0.0, -5.0));
    }

    #[test]
    fn test_segment_yaw() {
        let yaw = segment_yaw(Vec2::new(5.0, -5.0), Vec2::new(-5.0, -5.0));
        assert!((yaw - FRAC_PI_2).abs() < 1e-6);

        // Segment along Z has no rotation
        let yaw = segment_yaw(Vec2::new(0.0, 3.0), Vec2::new(0.0, -3.0));
        assert!(yaw.abs() < 1e-6);
    }

    #[test]
    fn test_vec2_reads_as_tuple() {
        let v: Vec2 = ron::from_str("(2.0, -4.0)").unwrap();
        assert_eq!(v, Vec2::new(2.0, -4.0));
    }
}
