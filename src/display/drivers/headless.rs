// src/display/drivers/headless.rs
//! Headless display driver implementation.
//!
//! Accepts frames without a window system. It backs automated tests (which
//! inspect what was presented) and lets the binary run in environments with
//! no display at all.

use crate::display::driver::DisplayDriver;
use crate::display::messages::{DisplayEvent, DriverConfig};
use crate::framebuffer::Framebuffer;

use anyhow::Result;
use log::{info, trace};
use std::collections::VecDeque;

pub struct HeadlessDisplayDriver {
    width_px: u32,
    height_px: u32,
    title: String,
    /// Events handed out by the next `poll_events` call.
    pending_events: VecDeque<DisplayEvent>,
    /// Number of frames accepted so far.
    presented: u64,
    /// Visible pixels of the most recent frame, row-major, padding stripped.
    last_frame: Option<CapturedFrame>,
}

/// A presented frame as the headless driver saw it.
#[derive(Debug, Clone)]
pub struct CapturedFrame {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u32>,
}

impl DisplayDriver for HeadlessDisplayDriver {
    fn open(config: &DriverConfig) -> Result<Self> {
        info!(
            "HeadlessDisplayDriver: open {}x{} '{}'",
            config.width_px, config.height_px, config.title
        );
        Ok(Self {
            width_px: config.width_px,
            height_px: config.height_px,
            title: config.title.clone(),
            pending_events: VecDeque::new(),
            presented: 0,
            last_frame: None,
        })
    }

    fn poll_events(&mut self) -> Result<Vec<DisplayEvent>> {
        Ok(self.pending_events.drain(..).collect())
    }

    fn present(&mut self, frame: &Framebuffer) -> Result<()> {
        trace!("HeadlessDisplayDriver: present frame {}", self.presented);
        let mut pixels = Vec::with_capacity(frame.width() as usize * frame.height() as usize);
        for y in 0..frame.height() {
            pixels.extend_from_slice(frame.row(y));
        }
        self.last_frame = Some(CapturedFrame {
            width: frame.width(),
            height: frame.height(),
            pixels,
        });
        self.presented += 1;
        Ok(())
    }

    fn set_title(&mut self, title: &str) {
        info!("HeadlessDisplayDriver: set_title '{}'", title);
        self.title = title.to_string();
    }

    fn surface_size(&self) -> (u32, u32) {
        (self.width_px, self.height_px)
    }
}

impl HeadlessDisplayDriver {
    /// Queues an event for the next `poll_events` call.
    pub fn inject_event(&mut self, event: DisplayEvent) {
        self.pending_events.push_back(event);
    }

    /// Frames accepted since open.
    pub fn presented_count(&self) -> u64 {
        self.presented
    }

    /// The most recently presented frame, if any.
    pub fn last_frame(&self) -> Option<&CapturedFrame> {
        self.last_frame.as_ref()
    }

    /// Current window title.
    pub fn title(&self) -> &str {
        &self.title
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framebuffer::BackBuffer;
    use crate::keys::{KeySymbol, Modifiers};

    fn config() -> DriverConfig {
        DriverConfig {
            width_px: 4,
            height_px: 3,
            title: "test".to_string(),
        }
    }

    #[test]
    fn test_poll_drains_injected_events() {
        let mut driver = HeadlessDisplayDriver::open(&config()).unwrap();
        driver.inject_event(DisplayEvent::Expose);
        driver.inject_event(DisplayEvent::Key {
            symbol: KeySymbol::Escape,
            modifiers: Modifiers::empty(),
        });

        let events = driver.poll_events().unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0], DisplayEvent::Expose);
        assert!(driver.poll_events().unwrap().is_empty());
    }

    #[test]
    fn test_present_captures_visible_pixels() {
        // Padded pitch: captured frame must contain only the visible 2x2.
        let mut driver = HeadlessDisplayDriver::open(&config()).unwrap();
        let mut buf = BackBuffer::with_pitch(2, 2, 16).unwrap();
        buf.view_mut().clear(0xFF01_0203);
        driver.present(&buf.view_mut()).unwrap();

        let captured = driver.last_frame().unwrap();
        assert_eq!(captured.width, 2);
        assert_eq!(captured.height, 2);
        assert_eq!(captured.pixels, vec![0xFF01_0203; 4]);
        assert_eq!(driver.presented_count(), 1);
    }

    #[test]
    fn test_surface_size_reflects_config() {
        let driver = HeadlessDisplayDriver::open(&config()).unwrap();
        assert_eq!(driver.surface_size(), (4, 3));
    }

    #[test]
    fn test_set_title_replaces_the_stored_title() {
        let mut driver = HeadlessDisplayDriver::open(&config()).unwrap();
        assert_eq!(driver.title(), "test");
        driver.set_title("renamed");
        assert_eq!(driver.title(), "renamed");
    }
}
