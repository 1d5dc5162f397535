//! Input handling for the free-fly camera
//!
//! Translates winit keyboard and raw mouse events into camera commands.

mod camera_controller;

pub use camera_controller::{CameraControl, CameraController};
