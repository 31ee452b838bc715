// src/display/messages.rs
//! Types crossing the display-driver boundary.
//!
//! Drivers translate native windowing events into `DisplayEvent`s; everything
//! the frame loop reacts to arrives through this one enum, so the loop itself
//! stays platform-free.

use crate::keys::{KeySymbol, Modifiers};

/// Everything a driver needs to open its window.
#[derive(Debug, Clone)]
pub struct DriverConfig {
    /// Requested surface width in pixels.
    pub width_px: u32,
    /// Requested surface height in pixels.
    pub height_px: u32,
    /// Initial window title.
    pub title: String,
}

/// Platform-agnostic display events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayEvent {
    /// Key press event.
    Key {
        symbol: KeySymbol,
        modifiers: Modifiers,
    },

    /// Window/surface resize.
    Resize { width_px: u32, height_px: u32 },

    /// The window system invalidated (part of) the surface and wants it
    /// redrawn. The frame loop redraws every frame anyway, so this is
    /// informational.
    Expose,

    /// User requested window close.
    CloseRequested,
}
