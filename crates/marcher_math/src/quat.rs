//! Unit quaternion for representing 3D rotations
//!
//! The camera stores its orientation as a quaternion and rotates its
//! velocity vector into world space with it every frame.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::Vec3;

/// Rotation quaternion: q = w + x*i + y*j + z*k
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Quat {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Default for Quat {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Quat {
    /// Identity quaternion (no rotation)
    pub const IDENTITY: Self = Self { x: 0.0, y: 0.0, z: 0.0, w: 1.0 };

    /// Create a quaternion rotating by `angle` radians around a unit axis
    pub fn from_axis_angle(axis: Vec3, angle: f32) -> Self {
        let half = angle * 0.5;
        let sin_h = half.sin();
        Self {
            x: axis.x * sin_h,
            y: axis.y * sin_h,
            z: axis.z * sin_h,
            w: half.cos(),
        }
    }

    /// Squared magnitude
    #[inline]
    pub fn magnitude_squared(self) -> f32 {
        self.x * self.x + self.y * self.y + self.z * self.z + self.w * self.w
    }

    /// Magnitude
    #[inline]
    pub fn magnitude(self) -> f32 {
        self.magnitude_squared().sqrt()
    }

    /// Normalize to unit magnitude
    pub fn normalized(self) -> Self {
        let mag = self.magnitude();
        if mag > 0.0 {
            let inv = 1.0 / mag;
            Self {
                x: self.x * inv,
                y: self.y * inv,
                z: self.z * inv,
                w: self.w * inv,
            }
        } else {
            Self::IDENTITY
        }
    }

    /// Conjugate (inverse for unit quaternions)
    #[inline]
    pub fn conjugate(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
            z: -self.z,
            w: self.w,
        }
    }

    /// Hamilton product: applying `self * other` rotates by `other` first
    pub fn compose(self, other: Self) -> Self {
        let v1 = Vec3::new(self.x, self.y, self.z);
        let v2 = Vec3::new(other.x, other.y, other.z);
        let v = v2 * self.w + v1 * other.w + v1.cross(v2);
        Self {
            x: v.x,
            y: v.y,
            z: v.z,
            w: self.w * other.w - v1.dot(v2),
        }
    }

    /// Rotate a vector by this quaternion
    ///
    /// Uses the expanded sandwich product q * v * q^-1, which avoids
    /// constructing the intermediate quaternions.
    pub fn rotate(self, v: Vec3) -> Vec3 {
        let qv = Vec3::new(self.x, self.y, self.z);
        let t = qv.cross(v) * 2.0;
        v + t * self.w + qv.cross(t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_vec_close(a: Vec3, b: Vec3) {
        assert!((a - b).length() < 1e-5, "{:?} != {:?}", a, b);
    }

    #[test]
    fn test_identity_rotation() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_vec_close(Quat::IDENTITY.rotate(v), v);
    }

    #[test]
    fn test_quarter_turn_about_y() {
        // +90 degrees about Y takes -Z (forward) to -X
        let q = Quat::from_axis_angle(Vec3::Y, std::f32::consts::FRAC_PI_2);
        assert_vec_close(q.rotate(-Vec3::Z), -Vec3::X);
    }

    #[test]
    fn test_compose_matches_sequential_rotation() {
        let yaw = Quat::from_axis_angle(Vec3::Y, 0.7);
        let pitch = Quat::from_axis_angle(Vec3::X, -0.3);
        let v = Vec3::new(0.2, -1.0, 0.5);
        assert_vec_close(
            yaw.compose(pitch).rotate(v),
            yaw.rotate(pitch.rotate(v)),
        );
    }

    #[test]
    fn test_conjugate_undoes_rotation() {
        let q = Quat::from_axis_angle(Vec3::new(0.0, 1.0, 0.0), 1.2);
        let v = Vec3::new(3.0, -2.0, 1.0);
        assert_vec_close(q.conjugate().rotate(q.rotate(v)), v);
    }

    #[test]
    fn test_rotation_preserves_length() {
        let q = Quat::from_axis_angle(Vec3::Y, 2.1).compose(Quat::from_axis_angle(Vec3::X, 0.4));
        let v = Vec3::new(1.0, 2.0, -3.0);
        assert!((q.rotate(v).length() - v.length()).abs() < 1e-5);
    }
}
