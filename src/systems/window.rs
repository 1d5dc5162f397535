//! Window management system
//!
//! Handles window creation, cursor capture/release, and fullscreen toggle.

use crate::config::WindowConfig;
use std::sync::Arc;
use winit::{
    event_loop::ActiveEventLoop,
    window::{CursorGrabMode, Fullscreen, Window},
};

/// Operations the capture state machine needs from a window
///
/// Lets the capture/release logic run against a fake in tests, the same
/// way `CameraControl` decouples the controller from the camera.
pub trait CursorHost {
    /// Try to grab the cursor; returns false if the platform refuses
    fn grab(&self) -> bool;
    /// Release any cursor grab
    fn ungrab(&self);
    /// Show or hide the cursor
    fn set_visible(&self, visible: bool);
}

impl CursorHost for Window {
    fn grab(&self) -> bool {
        // Locked is best for free look; some platforms only do Confined
        self.set_cursor_grab(CursorGrabMode::Locked)
            .or_else(|_| self.set_cursor_grab(CursorGrabMode::Confined))
            .is_ok()
    }

    fn ungrab(&self) {
        let _ = self.set_cursor_grab(CursorGrabMode::None);
    }

    fn set_visible(&self, visible: bool) {
        self.set_cursor_visible(visible);
    }
}

/// Cursor capture state machine
///
/// Capture grabs and hides the cursor; release restores both, so toggling
/// twice leaves the visibility mode where it started.
#[derive(Debug, Default)]
pub struct CursorCapture {
    captured: bool,
}

impl CursorCapture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if cursor is captured
    pub fn is_captured(&self) -> bool {
        self.captured
    }

    /// Capture the cursor for free-look controls
    pub fn capture<H: CursorHost>(&mut self, host: &H) -> bool {
        if host.grab() {
            host.set_visible(false);
            self.captured = true;
            log::info!("Cursor captured - click or Escape to release");
            true
        } else {
            log::warn!("Failed to capture cursor");
            false
        }
    }

    /// Release the cursor, restoring visibility
    pub fn release<H: CursorHost>(&mut self, host: &H) {
        host.ungrab();
        host.set_visible(true);
        self.captured = false;
        log::info!("Cursor released - click to capture");
    }

    /// Toggle capture (left click behavior)
    pub fn toggle<H: CursorHost>(&mut self, host: &H) {
        if self.captured {
            self.release(host);
        } else {
            self.capture(host);
        }
    }
}

/// Manages the application window and cursor state
pub struct WindowSystem {
    window: Arc<Window>,
    cursor: CursorCapture,
}

impl WindowSystem {
    /// Create window from config
    pub fn create(
        event_loop: &ActiveEventLoop,
        config: &WindowConfig,
    ) -> Result<Self, WindowError> {
        let mut attrs = Window::default_attributes()
            .with_title(&config.title)
            .with_inner_size(winit::dpi::LogicalSize::new(config.width, config.height));

        if config.fullscreen {
            attrs = attrs.with_fullscreen(Some(Fullscreen::Borderless(None)));
        }

        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .map_err(|e| WindowError::CreationFailed(e.to_string()))?,
        );

        Ok(Self {
            window,
            cursor: CursorCapture::new(),
        })
    }

    /// Get window reference (for RenderContext creation)
    pub fn window(&self) -> &Arc<Window> {
        &self.window
    }

    /// Check if cursor is captured
    pub fn is_cursor_captured(&self) -> bool {
        self.cursor.is_captured()
    }

    /// Release cursor, restoring visibility
    pub fn release_cursor(&mut self) {
        self.cursor.release(&*self.window);
    }

    /// Toggle cursor capture (left click behavior)
    pub fn toggle_cursor_capture(&mut self) {
        self.cursor.toggle(&*self.window);
    }

    /// Toggle fullscreen mode
    pub fn toggle_fullscreen(&self) {
        let new_fullscreen = if self.window.fullscreen().is_some() {
            None
        } else {
            Some(Fullscreen::Borderless(None))
        };
        self.window.set_fullscreen(new_fullscreen);
    }

    /// Request a redraw
    pub fn request_redraw(&self) {
        self.window.request_redraw();
    }
}

#[derive(Debug)]
pub enum WindowError {
    CreationFailed(String),
}

impl std::fmt::Display for WindowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WindowError::CreationFailed(msg) => write!(f, "Window creation failed: {}", msg),
        }
    }
}

impl std::error::Error for WindowError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    /// Fake window recording grab and visibility state
    struct FakeHost {
        grabbed: Cell<bool>,
        visible: Cell<bool>,
        refuse_grab: bool,
    }

    impl FakeHost {
        fn new() -> Self {
            Self {
                grabbed: Cell::new(false),
                visible: Cell::new(true),
                refuse_grab: false,
            }
        }
    }

    impl CursorHost for FakeHost {
        fn grab(&self) -> bool {
            if self.refuse_grab {
                return false;
            }
            self.grabbed.set(true);
            true
        }
        fn ungrab(&self) {
            self.grabbed.set(false);
        }
        fn set_visible(&self, visible: bool) {
            self.visible.set(visible);
        }
    }

    #[test]
    fn test_toggle_twice_restores_visibility() {
        let host = FakeHost::new();
        let mut cursor = CursorCapture::new();

        cursor.toggle(&host);
        assert!(cursor.is_captured());
        assert!(host.grabbed.get());
        assert!(!host.visible.get());

        cursor.toggle(&host);
        assert!(!cursor.is_captured());
        assert!(!host.grabbed.get());
        assert!(host.visible.get());
    }

    #[test]
    fn test_refused_grab_leaves_cursor_alone() {
        let mut host = FakeHost::new();
        host.refuse_grab = true;
        let mut cursor = CursorCapture::new();

        assert!(!cursor.capture(&host));
        assert!(!cursor.is_captured());
        assert!(host.visible.get());
    }

    #[test]
    fn test_release_without_capture_is_safe() {
        let host = FakeHost::new();
        let mut cursor = CursorCapture::new();

        cursor.release(&host);
        assert!(!cursor.is_captured());
        assert!(host.visible.get());
    }
}
