// src/display/driver.rs
//! DisplayDriver trait - minimal interface for platform-specific display primitives.
//!
//! This trait defines the minimal set of platform-specific operations the
//! frame loop needs: open a window, read its events, blit a frame into it.
//! All frame pacing and event policy lives in `FrameRunner`; drivers stay
//! dumb.
//!
//! ## Lifecycle
//! 1. `open(&config)` - Connect to the window system, create and map the window
//! 2. `poll_events` / `present` loop - driven by `FrameRunner`
//! 3. `Drop` - Cleanup (no explicit shutdown method)

use crate::display::messages::{DisplayEvent, DriverConfig};
use crate::framebuffer::Framebuffer;
use anyhow::Result;

/// Minimal platform-specific display driver interface.
///
/// Implementations provide only the primitives their platform needs; the
/// common loop logic lives in `FrameRunner`.
pub trait DisplayDriver {
    /// Connects to the window system and creates a visible surface of the
    /// requested size.
    ///
    /// On X11: open the display, create and map the window, register for
    /// WM_DELETE_WINDOW. Headless: record the geometry, nothing else.
    fn open(config: &DriverConfig) -> Result<Self>
    where
        Self: Sized;

    /// Drains every native event queued since the last call and returns
    /// their platform-agnostic translations. Never blocks.
    fn poll_events(&mut self) -> Result<Vec<DisplayEvent>>;

    /// Copies the frame's visible pixels to the window surface.
    ///
    /// The frame geometry is the renderer's, not necessarily the window's;
    /// a mismatched surface clips or letterboxes, it never errors.
    fn present(&mut self, frame: &Framebuffer) -> Result<()>;

    /// Replaces the window title. Titles the platform cannot represent are
    /// dropped silently.
    fn set_title(&mut self, title: &str);

    /// Current surface size in pixels, as last reported by the platform.
    fn surface_size(&self) -> (u32, u32);

    // Drop trait handles cleanup - no explicit shutdown method needed
}
