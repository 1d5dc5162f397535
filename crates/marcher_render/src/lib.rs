//! wgpu rendering for the ray-marching viewer
//!
//! The host side is deliberately thin: one static full-screen quad, one
//! shader program loaded from disk, one uniform buffer refreshed per frame.
//! The actual ray-marching lives in the fragment shader.
//!
//! ## Key Components
//!
//! - [`context::RenderContext`] - WGPU device, queue, and surface management
//! - [`camera::Camera`] - free-fly camera with quaternion orientation
//! - [`pipeline::QuadPipeline`] - full-screen quad + disk-loaded shaders
//! - [`stats::FrameStats`] - once-per-second frame-time reporting

pub mod camera;
pub mod context;
pub mod pipeline;
pub mod stats;
pub mod viewport;

pub use camera::Camera;
pub use context::{ContextError, RenderContext};
pub use pipeline::{QuadPipeline, ShaderError, Uniforms};
pub use stats::{FrameReport, FrameStats};
pub use viewport::viewport_scale;
