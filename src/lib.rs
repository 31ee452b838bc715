// src/lib.rs

//! Softblit library crate.
//!
//! This exposes the internal modules for testing and library usage.

/// Configuration management.
pub mod config;
/// Display driver interfaces and implementations.
pub mod display;
/// Error taxonomy for framebuffer construction and allocation.
pub mod error;
/// Pixel storage: the borrowed framebuffer view and its owned backing.
pub mod framebuffer;
/// Keyboard input handling.
pub mod keys;
/// Rendering subsystem.
pub mod renderer;
/// Frame loop orchestration.
pub mod runner;
