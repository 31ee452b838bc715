// src/display/drivers/mod.rs
//! Platform-specific display driver implementations.

pub mod headless;

#[cfg(target_os = "linux")]
pub mod x11;

pub use headless::HeadlessDisplayDriver;

#[cfg(target_os = "linux")]
pub use x11::X11DisplayDriver;
