//! Marcher - host harness for a ray-marching fragment shader
//!
//! The binary opens a window, uploads one full-screen quad, loads the
//! vertex and fragment shaders from disk, and feeds the shader per-frame
//! uniforms (aspect scale, camera position, camera look direction) while
//! printing frame-time statistics once per second.

pub mod config;
pub mod systems;
