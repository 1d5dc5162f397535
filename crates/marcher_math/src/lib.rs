//! Math types for the ray-marching viewer
//!
//! ## Core Types
//!
//! - [`Vec3`] - 3D vector with x, y, z components
//! - [`Quat`] - unit quaternion for camera orientation

mod quat;
mod vec3;

pub use quat::Quat;
pub use vec3::Vec3;
