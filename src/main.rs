// src/main.rs

//! Main entry point for the `softblit` application.

use softblit::config::CONFIG;
use softblit::display::{open_driver, DriverConfig};
use softblit::renderer::GradientRenderer;
use softblit::runner::{FrameRunner, RunnerStatus};

use anyhow::Context;
use log::{error, info};

fn main() -> anyhow::Result<()> {
    // Initialize the logger. Default filter is "info" if RUST_LOG is not set.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_micros()
        .init();

    info!("Starting softblit...");

    let window = &CONFIG.window;
    let driver_config = DriverConfig {
        width_px: window.width_px,
        height_px: window.height_px,
        title: window.title.clone(),
    };
    info!(
        "Configuration loaded: {}x{} px window, {:?} driver",
        driver_config.width_px, driver_config.height_px, CONFIG.display.driver
    );

    let mut driver = open_driver(CONFIG.display.driver, &driver_config)
        .context("Failed to open display driver")?;

    let mut renderer = GradientRenderer::new();

    let mut runner = FrameRunner::new(&mut renderer, &mut *driver)
        .context("Failed to initialize frame runner")?;
    info!("FrameRunner created and initialized.");

    info!("Starting main event loop...");
    loop {
        match runner.process_frame() {
            Ok(RunnerStatus::Running) => {
                std::thread::sleep(std::time::Duration::from_millis(
                    CONFIG.performance.min_draw_latency_ms as u64,
                ));
            }
            Ok(RunnerStatus::Shutdown) => {
                info!("Runner requested shutdown. Exiting main loop.");
                break;
            }
            Err(e) => {
                error!(
                    "Error in frame cycle: {:#}. Root cause: {:?}. Exiting.",
                    e,
                    e.root_cause()
                );
                break;
            }
        }
    }

    info!("softblit exited successfully.");

    Ok(())
}
