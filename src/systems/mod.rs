//! Application systems
//!
//! Window management lives here; rendering is provided by `marcher_render`.

pub mod window;

pub use window::{CursorCapture, CursorHost, WindowError, WindowSystem};
