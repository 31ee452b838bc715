// src/runner.rs
//! Drives the frame loop, coordinating the renderer and the display driver.
//! Each cycle drains driver events, lets the renderer repaint the back
//! buffer, and presents the result. The loop policy (close request or
//! Escape ends the run) lives here so it can be tested against the
//! headless driver without opening a window.

use crate::display::{DisplayDriver, DisplayEvent};
use crate::framebuffer::BackBuffer;
use crate::keys::KeySymbol;
use crate::renderer::Renderer;
use anyhow::{Context, Result};
use log::{debug, info, trace};

/// Represents the status of the runner after processing one frame cycle.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum RunnerStatus {
    /// The cycle completed and the loop should continue running.
    Running,
    /// A shutdown signal was received (close request from the window
    /// manager, or Escape). The application should terminate gracefully.
    Shutdown,
}

/// Owns the back buffer and coordinates one renderer with one display driver.
///
/// This struct uses trait objects for its dependencies (`Renderer`,
/// `DisplayDriver`) to allow for mocking in tests and flexibility in
/// choosing concrete implementations. The back buffer is allocated once,
/// sized to the driver's surface, and reused for every frame.
pub struct FrameRunner<'a> {
    renderer: &'a mut dyn Renderer,
    driver: &'a mut dyn DisplayDriver,
    buffer: BackBuffer,
}

impl<'a> FrameRunner<'a> {
    /// Creates a new `FrameRunner` whose back buffer matches the driver's
    /// surface size, then gives the renderer its one-time `init` call.
    pub fn new(
        renderer: &'a mut dyn Renderer,
        driver: &'a mut dyn DisplayDriver,
    ) -> Result<Self> {
        let (width_px, height_px) = driver.surface_size();
        let buffer = BackBuffer::new(width_px, height_px)
            .context("failed to allocate the back buffer")?;
        renderer.init();
        info!(
            "FrameRunner: back buffer allocated at {}x{} ({} bytes per row)",
            width_px,
            height_px,
            buffer.pitch()
        );
        Ok(FrameRunner {
            renderer,
            driver,
            buffer,
        })
    }

    /// Runs one frame cycle: drain driver events, then render and present.
    ///
    /// A shutdown event short-circuits the cycle, so nothing is drawn after
    /// it. Returns `RunnerStatus::Running` when the caller should keep
    /// looping.
    pub fn process_frame(&mut self) -> Result<RunnerStatus> {
        if self.process_driver_events()? == RunnerStatus::Shutdown {
            return Ok(RunnerStatus::Shutdown);
        }
        self.draw_frame()?;
        Ok(RunnerStatus::Running)
    }

    /// Drains all pending driver events and applies the loop policy.
    pub fn process_driver_events(&mut self) -> Result<RunnerStatus> {
        trace!("FrameRunner: Processing available driver events...");
        let events = self
            .driver
            .poll_events()
            .context("driver event polling failed")?;

        for event in events {
            debug!("FrameRunner: Handling DisplayEvent: {:?}", event);
            match event {
                DisplayEvent::CloseRequested => {
                    info!("FrameRunner: CloseRequested event received. Signaling shutdown.");
                    return Ok(RunnerStatus::Shutdown);
                }
                DisplayEvent::Key {
                    symbol: KeySymbol::Escape,
                    ..
                } => {
                    info!("FrameRunner: Escape pressed. Signaling shutdown.");
                    return Ok(RunnerStatus::Shutdown);
                }
                DisplayEvent::Key { symbol, modifiers } => {
                    trace!(
                        "FrameRunner: Ignoring key {:?} (modifiers: {:?})",
                        symbol,
                        modifiers
                    );
                }
                DisplayEvent::Resize {
                    width_px,
                    height_px,
                } => {
                    // The back buffer keeps its startup geometry; present()
                    // blits it at the origin whatever size the window
                    // manager picked.
                    info!(
                        "FrameRunner: Window resized to {}x{} px, keeping {}x{} back buffer",
                        width_px,
                        height_px,
                        self.buffer.width(),
                        self.buffer.height()
                    );
                }
                DisplayEvent::Expose => {
                    // The next draw_frame repaints everything anyway.
                    trace!("FrameRunner: Expose event.");
                }
            }
        }
        Ok(RunnerStatus::Running)
    }

    fn draw_frame(&mut self) -> Result<()> {
        trace!("FrameRunner: Rendering and presenting frame.");
        let mut frame = self.buffer.view_mut();
        self.renderer.render(&mut frame);
        self.driver
            .present(&frame)
            .context("driver presentation failed")
    }
}
