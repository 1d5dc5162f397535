//! Free-fly camera with quaternion orientation
//!
//! The camera holds a position, a camera-local velocity set by the input
//! controller, and an orientation quaternion rebuilt from yaw/pitch
//! accumulators. Each frame [`Camera::advance`] rotates the velocity into
//! world space and integrates it.

use marcher_input::CameraControl;
use marcher_math::{Quat, Vec3};

/// Pitch clamp in radians, just shy of straight up/down
const PITCH_LIMIT: f32 = 1.55;

/// Free-fly camera
pub struct Camera {
    /// World-space position
    pub position: Vec3,
    /// Camera-local velocity (units per second), set by the controller
    pub velocity: Vec3,
    /// Orientation as a unit quaternion
    pub orientation: Quat,

    start_position: Vec3,
    yaw: f32,
    pitch: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 0.0, 5.0))
    }
}

impl Camera {
    /// Create a camera at the given start position, looking down -Z
    pub fn new(start_position: Vec3) -> Self {
        Self {
            position: start_position,
            velocity: Vec3::ZERO,
            orientation: Quat::IDENTITY,
            start_position,
            yaw: 0.0,
            pitch: 0.0,
        }
    }

    /// Apply incremental yaw and pitch in radians
    pub fn rotate_3d(&mut self, delta_yaw: f32, delta_pitch: f32) {
        self.yaw += delta_yaw;
        self.pitch = (self.pitch + delta_pitch).clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.rebuild_orientation();
    }

    /// Integrate one frame of movement
    ///
    /// The local velocity is rotated into world space by the orientation,
    /// so "forward" always follows the view direction.
    pub fn advance(&mut self, dt: f32) {
        self.position += self.orientation.rotate(self.velocity) * dt;
    }

    /// Restore the start position and identity orientation
    pub fn reset(&mut self) {
        self.position = self.start_position;
        self.velocity = Vec3::ZERO;
        self.orientation = Quat::IDENTITY;
        self.yaw = 0.0;
        self.pitch = 0.0;
    }

    /// World-space view direction
    pub fn forward(&self) -> Vec3 {
        self.orientation.rotate(-Vec3::Z)
    }

    /// Rebuild the orientation quaternion from the yaw/pitch accumulators
    fn rebuild_orientation(&mut self) {
        let r_yaw = Quat::from_axis_angle(Vec3::Y, self.yaw);
        let r_pitch = Quat::from_axis_angle(Vec3::X, self.pitch);
        self.orientation = r_yaw.compose(r_pitch).normalized();
    }
}

impl CameraControl for Camera {
    fn set_velocity(&mut self, velocity: Vec3) {
        self.velocity = velocity;
    }

    fn rotate_3d(&mut self, delta_yaw: f32, delta_pitch: f32) {
        Camera::rotate_3d(self, delta_yaw, delta_pitch);
    }

    fn position(&self) -> Vec3 {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_looks_down_negative_z() {
        let cam = Camera::default();
        assert!((cam.forward() - (-Vec3::Z)).length() < 1e-6);
    }

    #[test]
    fn test_advance_integrates_rotated_velocity() {
        let mut cam = Camera::new(Vec3::ZERO);
        cam.velocity = Vec3::new(0.0, 0.0, -2.0);
        cam.advance(0.5);
        // No rotation: straight down -Z
        assert!((cam.position - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-6);

        // Quarter turn left, same velocity now moves along -X
        let mut cam = Camera::new(Vec3::ZERO);
        cam.rotate_3d(std::f32::consts::FRAC_PI_2, 0.0);
        cam.velocity = Vec3::new(0.0, 0.0, -2.0);
        cam.advance(0.5);
        assert!((cam.position - Vec3::new(-1.0, 0.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_advance_matches_formula_exactly() {
        let mut cam = Camera::new(Vec3::new(1.0, 2.0, 3.0));
        cam.rotate_3d(0.3, -0.2);
        cam.velocity = Vec3::new(1.5, 0.0, -3.0);

        let expected = cam.position + cam.orientation.rotate(cam.velocity) * 0.016;
        cam.advance(0.016);
        assert_eq!(cam.position, expected);
    }

    #[test]
    fn test_pitch_clamped() {
        let mut cam = Camera::default();
        // A wild pitch delta clamps just short of straight up instead of
        // wrapping past vertical (sin(10) would be negative)
        cam.rotate_3d(0.0, 10.0);
        let fwd = cam.forward();
        assert!(fwd.y > 0.9);
        assert!(fwd.z < 0.0);
    }

    #[test]
    fn test_reset_restores_start() {
        let mut cam = Camera::new(Vec3::new(0.0, 1.0, 8.0));
        cam.rotate_3d(1.0, 0.5);
        cam.velocity = Vec3::new(1.0, 0.0, 0.0);
        cam.advance(1.0);
        cam.reset();
        assert_eq!(cam.position, Vec3::new(0.0, 1.0, 8.0));
        assert_eq!(cam.orientation, Quat::IDENTITY);
        assert_eq!(cam.velocity, Vec3::ZERO);
    }
}
