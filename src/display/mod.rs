// src/display/mod.rs
//! Display system: the driver trait, its implementations, and the event
//! types that cross the boundary.
//!
//! - DisplayDriver: platform-specific primitives (X11, headless)
//! - Messages: the events drivers report and the config they open with

pub mod driver;
pub mod drivers;
pub mod messages;

pub use driver::DisplayDriver;
pub use drivers::HeadlessDisplayDriver;
pub use messages::{DisplayEvent, DriverConfig};

#[cfg(target_os = "linux")]
pub use drivers::X11DisplayDriver;

use crate::config::DriverKind;
use anyhow::Result;
use log::info;

/// Opens the display driver selected by `kind`.
///
/// `DriverKind::X11` only exists on Linux builds; elsewhere the selection
/// fails so the caller can report a usable message instead of a missing
/// symbol.
pub fn open_driver(kind: DriverKind, config: &DriverConfig) -> Result<Box<dyn DisplayDriver>> {
    info!("display: opening {:?} driver", kind);
    match kind {
        DriverKind::X11 => {
            #[cfg(target_os = "linux")]
            {
                Ok(Box::new(X11DisplayDriver::open(config)?))
            }
            #[cfg(not(target_os = "linux"))]
            {
                anyhow::bail!("the x11 display driver is only available on Linux")
            }
        }
        DriverKind::Headless => Ok(Box::new(HeadlessDisplayDriver::open(config)?)),
    }
}
