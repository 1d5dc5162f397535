//! Free-fly camera controller
//!
//! Controls:
//! - W/S: Forward/backward (camera-local -Z/+Z)
//! - A/D: Left/right strafe (camera-local X)
//! - Mouse motion while captured: yaw/pitch look

use marcher_math::Vec3;
use winit::event::ElementState;
use winit::keyboard::KeyCode;

/// Camera controller for handling input
pub struct CameraController {
    // Movement state
    forward: bool,
    backward: bool,
    left: bool,
    right: bool,

    // Accumulated mouse motion since the last update
    pending_yaw: f32,
    pending_pitch: f32,

    // Input smoothing state
    smooth_yaw: f32,
    smooth_pitch: f32,

    // Configuration
    pub move_speed: f32,
    pub mouse_sensitivity: f32,
    pub smoothing_half_life: f32,
    pub smoothing_enabled: bool,
}

impl Default for CameraController {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraController {
    pub fn new() -> Self {
        Self {
            forward: false,
            backward: false,
            left: false,
            right: false,

            pending_yaw: 0.0,
            pending_pitch: 0.0,

            smooth_yaw: 0.0,
            smooth_pitch: 0.0,

            move_speed: 3.0,
            mouse_sensitivity: 0.002,
            smoothing_half_life: 0.05,
            smoothing_enabled: false,
        }
    }

    /// Process keyboard input
    ///
    /// Returns true if the key was a movement key.
    pub fn process_keyboard(&mut self, key: KeyCode, state: ElementState) -> bool {
        let pressed = state == ElementState::Pressed;

        match key {
            KeyCode::KeyW => {
                self.forward = pressed;
                true
            }
            KeyCode::KeyS => {
                self.backward = pressed;
                true
            }
            KeyCode::KeyA => {
                self.left = pressed;
                true
            }
            KeyCode::KeyD => {
                self.right = pressed;
                true
            }
            _ => false,
        }
    }

    /// Process raw mouse movement
    pub fn process_mouse_motion(&mut self, delta_x: f64, delta_y: f64) {
        self.pending_yaw += delta_x as f32;
        self.pending_pitch += delta_y as f32;
    }

    /// Push the accumulated input into the camera
    ///
    /// Sets the camera's planar velocity from the held keys and, when
    /// `cursor_captured` is true, applies the accumulated mouse motion as
    /// yaw/pitch rotation. Motion accumulated while the cursor is free is
    /// discarded.
    pub fn update<C: CameraControl>(&mut self, camera: &mut C, dt: f32, cursor_captured: bool) {
        let fwd = (self.forward as i32 - self.backward as i32) as f32;
        let rgt = (self.right as i32 - self.left as i32) as f32;

        // Camera-local planar velocity: -Z is forward
        camera.set_velocity(Vec3::new(rgt, 0.0, -fwd) * self.move_speed);

        // Exponential smoothing of mouse input when enabled
        let (yaw_input, pitch_input) = if self.smoothing_enabled && dt > 0.0 {
            // factor = 2^(-dt / half_life), so smaller half_life = faster response
            let smooth_factor = 2.0f32.powf(-dt / self.smoothing_half_life);
            self.smooth_yaw =
                self.smooth_yaw * smooth_factor + self.pending_yaw * (1.0 - smooth_factor);
            self.smooth_pitch =
                self.smooth_pitch * smooth_factor + self.pending_pitch * (1.0 - smooth_factor);
            (self.smooth_yaw, self.smooth_pitch)
        } else {
            (self.pending_yaw, self.pending_pitch)
        };

        if cursor_captured {
            // Mouse right (positive delta_x) turns the camera right,
            // mouse down (positive delta_y) looks down
            camera.rotate_3d(
                -yaw_input * self.mouse_sensitivity,
                -pitch_input * self.mouse_sensitivity,
            );
        }

        self.pending_yaw = 0.0;
        self.pending_pitch = 0.0;
    }

    /// Check if any movement keys are pressed
    pub fn is_moving(&self) -> bool {
        self.forward || self.backward || self.left || self.right
    }

    /// Toggle input smoothing on/off
    pub fn toggle_smoothing(&mut self) -> bool {
        self.smoothing_enabled = !self.smoothing_enabled;
        self.smooth_yaw = 0.0;
        self.smooth_pitch = 0.0;
        self.smoothing_enabled
    }

    /// Builder: set movement speed
    pub fn with_move_speed(mut self, speed: f32) -> Self {
        self.move_speed = speed;
        self
    }

    /// Builder: set mouse sensitivity
    pub fn with_mouse_sensitivity(mut self, sensitivity: f32) -> Self {
        self.mouse_sensitivity = sensitivity;
        self
    }

    /// Builder: set smoothing half-life (lower = more responsive)
    pub fn with_smoothing_half_life(mut self, half_life: f32) -> Self {
        self.smoothing_half_life = half_life;
        self
    }

    /// Builder: enable or disable smoothing
    pub fn with_smoothing(mut self, enabled: bool) -> Self {
        self.smoothing_enabled = enabled;
        self
    }
}

/// Trait for camera control
///
/// Lets the controller drive any camera implementation.
pub trait CameraControl {
    /// Set the camera-local velocity (integrated by the camera each frame)
    fn set_velocity(&mut self, velocity: Vec3);
    /// Apply incremental yaw and pitch in radians
    fn rotate_3d(&mut self, delta_yaw: f32, delta_pitch: f32);
    /// Current world-space position
    fn position(&self) -> Vec3;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestCamera {
        velocity: Vec3,
        yaw: f32,
        pitch: f32,
    }

    impl TestCamera {
        fn new() -> Self {
            Self { velocity: Vec3::ZERO, yaw: 0.0, pitch: 0.0 }
        }
    }

    impl CameraControl for TestCamera {
        fn set_velocity(&mut self, velocity: Vec3) {
            self.velocity = velocity;
        }
        fn rotate_3d(&mut self, delta_yaw: f32, delta_pitch: f32) {
            self.yaw += delta_yaw;
            self.pitch += delta_pitch;
        }
        fn position(&self) -> Vec3 {
            Vec3::ZERO
        }
    }

    #[test]
    fn test_wasd_sets_planar_velocity() {
        let mut controller = CameraController::new().with_move_speed(2.0);
        let mut camera = TestCamera::new();

        controller.process_keyboard(KeyCode::KeyW, ElementState::Pressed);
        controller.process_keyboard(KeyCode::KeyD, ElementState::Pressed);
        controller.update(&mut camera, 0.016, false);
        assert_eq!(camera.velocity, Vec3::new(2.0, 0.0, -2.0));

        controller.process_keyboard(KeyCode::KeyW, ElementState::Released);
        controller.process_keyboard(KeyCode::KeyD, ElementState::Released);
        controller.update(&mut camera, 0.016, false);
        assert_eq!(camera.velocity, Vec3::ZERO);
    }

    #[test]
    fn test_opposing_keys_cancel() {
        let mut controller = CameraController::new();
        let mut camera = TestCamera::new();

        controller.process_keyboard(KeyCode::KeyA, ElementState::Pressed);
        controller.process_keyboard(KeyCode::KeyD, ElementState::Pressed);
        controller.update(&mut camera, 0.016, false);
        assert_eq!(camera.velocity, Vec3::ZERO);
    }

    #[test]
    fn test_mouse_motion_ignored_while_released() {
        let mut controller = CameraController::new();
        let mut camera = TestCamera::new();

        controller.process_mouse_motion(10.0, -4.0);
        controller.update(&mut camera, 0.016, false);
        assert_eq!(camera.yaw, 0.0);
        assert_eq!(camera.pitch, 0.0);

        // The pending motion was discarded, not deferred
        controller.update(&mut camera, 0.016, true);
        assert_eq!(camera.yaw, 0.0);
    }

    #[test]
    fn test_mouse_motion_applied_while_captured() {
        let mut controller = CameraController::new().with_mouse_sensitivity(0.01);
        let mut camera = TestCamera::new();

        controller.process_mouse_motion(10.0, 5.0);
        controller.update(&mut camera, 0.016, true);
        assert!((camera.yaw - (-0.1)).abs() < 1e-6);
        assert!((camera.pitch - (-0.05)).abs() < 1e-6);
    }
}
