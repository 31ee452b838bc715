// src/error.rs

//! Defines `ShellError`, the typed failure cases of the rendering shell.
//!
//! Everything that can go wrong inside the shell itself is one of these
//! variants; OS-level failures (display connection, window creation) are
//! reported through `anyhow` at the driver boundary instead.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShellError {
    /// A buffer was requested with a zero width or height.
    #[error("invalid framebuffer dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// A framebuffer view was constructed over storage that does not satisfy
    /// its own geometry (pitch too small, pitch not pixel-aligned, or the
    /// backing slice shorter than `pitch * height`).
    #[error("framebuffer precondition violated: {0}")]
    PreconditionViolation(&'static str),

    /// Backing storage for the requested geometry could not be allocated.
    #[error("failed to allocate {width}x{height} framebuffer with pitch {pitch}")]
    AllocationFailure { width: u32, height: u32, pitch: usize },
}
