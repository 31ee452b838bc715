// src/renderer.rs

//! This module defines the `Renderer` trait and the shell's built-in
//! gradient renderer.
//!
//! A `Renderer` is the thing that produces pixels. It is backend-agnostic:
//! it draws through the [`Framebuffer`] view and never sees a window, a
//! display connection, or any other platform detail. The platform side hands
//! it a validated view once per frame and blits whatever it wrote.

use crate::framebuffer::{pack_argb, Framebuffer};

use log::trace;

/// Produces the pixel content of each frame.
///
/// `init` runs once before the first frame; `render` runs once per frame
/// and must leave every visible pixel of the view written. Both are
/// infallible: a `Framebuffer` that exists has already had its geometry
/// validated, so there is nothing left to fail on.
pub trait Renderer {
    /// One-time setup before the first frame. Calling it again is a no-op.
    fn init(&mut self);

    /// Fills one frame. Overwrites every visible pixel; row padding, if any,
    /// is left untouched.
    fn render(&mut self, frame: &mut Framebuffer);
}

/// The built-in test-pattern renderer.
///
/// Every pixel becomes `0xFF000000 | ((y % 256) << 8) | (x % 256)`: green
/// climbs down the frame, blue climbs across it, and both wrap every 256
/// pixels. The output depends only on the frame geometry, so rendering the
/// same frame twice produces identical bytes.
pub struct GradientRenderer {
    // Stateless; the struct exists so callers hold a Renderer by value.
}

impl GradientRenderer {
    /// Creates a new `GradientRenderer` instance.
    pub fn new() -> Self {
        Self {}
    }
}

impl Renderer for GradientRenderer {
    fn init(&mut self) {
        trace!("GradientRenderer: init (nothing to set up)");
    }

    fn render(&mut self, frame: &mut Framebuffer) {
        for y in 0..frame.height() {
            let green = y as u8;
            for (x, px) in frame.row_mut(y).iter_mut().enumerate() {
                *px = pack_argb(0, green, x as u8);
            }
        }
    }
}

impl Default for GradientRenderer {
    fn default() -> Self {
        Self::new()
    }
}
