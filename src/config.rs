// src/config.rs

//! Defines the configuration structures for the rendering shell.
//!
//! This module provides a set of structs that can be deserialized from a
//! JSON configuration file to customize the window, the display driver, and
//! frame pacing. Every field carries a default, so an empty (or absent) file
//! is a complete configuration.
//!
//! The file is looked up through the `SOFTBLIT_CONFIG` environment variable;
//! a missing or unparseable file falls back to the defaults with a warning
//! rather than refusing to start.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use log::{info, warn};
use once_cell::sync::Lazy;

/// Process-wide configuration, loaded once on first access.
pub static CONFIG: Lazy<Config> = Lazy::new(Config::load);

// --- Top-Level Configuration Structure ---

/// Represents the complete configuration for the shell.
///
/// This struct is the root of the configuration and is intended to be
/// deserialized from a configuration file. It groups settings into logical
/// categories.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)] // Apply default values for the entire struct if a field is missing.
pub struct Config {
    /// Window geometry and title.
    pub window: WindowConfig,
    /// Display driver selection.
    pub display: DisplayConfig,
    /// Frame pacing settings.
    pub performance: PerformanceConfig,
}

impl Config {
    /// Loads the configuration from the file named by `SOFTBLIT_CONFIG`,
    /// falling back to defaults when the variable is unset or the file is
    /// unusable.
    pub fn load() -> Self {
        match std::env::var_os("SOFTBLIT_CONFIG") {
            Some(path) => {
                let path = Path::new(&path);
                match Self::load_from_file(path) {
                    Ok(config) => {
                        info!("Loaded configuration from {}", path.display());
                        config
                    }
                    Err(e) => {
                        warn!(
                            "Could not load configuration from {}: {:#}. Using defaults.",
                            path.display(),
                            e
                        );
                        Config::default()
                    }
                }
            }
            None => Config::default(),
        }
    }

    fn load_from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("parsing config file {}", path.display()))
    }
}

// --- Window Configuration ---

/// Defines the requested window surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window width in pixels.
    pub width_px: u32,
    /// Window height in pixels.
    pub height_px: u32,
    /// Window title.
    pub title: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        WindowConfig {
            width_px: 1280,
            height_px: 720,
            title: "softblit".to_string(),
        }
    }
}

// --- Display Configuration ---

/// Which display driver presents the frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DriverKind {
    /// Real window via Xlib. Linux only.
    X11,
    /// No window system; frames are accepted and recorded.
    Headless,
}

impl Default for DriverKind {
    fn default() -> Self {
        if cfg!(target_os = "linux") {
            DriverKind::X11
        } else {
            DriverKind::Headless
        }
    }
}

/// Display driver selection.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DisplayConfig {
    /// The driver to open at startup.
    pub driver: DriverKind,
}

// --- Performance Configuration ---

/// Defines settings related to frame pacing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PerformanceConfig {
    /// Minimum draw latency in milliseconds; the loop sleeps this long
    /// between frames. Lower values increase responsiveness at the cost of
    /// CPU.
    pub min_draw_latency_ms: f64,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        PerformanceConfig {
            min_draw_latency_ms: 2.0, // Inspired by st
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.window.width_px, 1280);
        assert_eq!(config.window.height_px, 720);
        assert_eq!(config.window.title, "softblit");
        assert_eq!(config.performance.min_draw_latency_ms, 2.0);
        if cfg!(target_os = "linux") {
            assert_eq!(config.display.driver, DriverKind::X11);
        } else {
            assert_eq!(config.display.driver, DriverKind::Headless);
        }
    }

    #[test]
    fn test_partial_file_fills_in_defaults() {
        // A file that only overrides one field keeps the rest at defaults.
        let config: Config = serde_json::from_str(r#"{"window": {"width_px": 640}}"#).unwrap();
        assert_eq!(config.window.width_px, 640);
        assert_eq!(config.window.height_px, 720);
        assert_eq!(config.window.title, "softblit");
    }

    #[test]
    fn test_driver_kind_parses_lowercase() {
        let config: Config =
            serde_json::from_str(r#"{"display": {"driver": "headless"}}"#).unwrap();
        assert_eq!(config.display.driver, DriverKind::Headless);
        let config: Config = serde_json::from_str(r#"{"display": {"driver": "x11"}}"#).unwrap();
        assert_eq!(config.display.driver, DriverKind::X11);
    }

    #[test]
    fn test_empty_object_is_a_complete_config() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config.window.width_px, Config::default().window.width_px);
    }

    #[test]
    fn it_should_load_overrides_from_a_config_file() -> Result<()> {
        let path = std::env::temp_dir().join("softblit_config_test.json");
        fs::write(&path, r#"{"performance": {"min_draw_latency_ms": 8.0}}"#)?;
        let config = Config::load_from_file(&path)?;
        fs::remove_file(&path)?;
        assert_eq!(config.performance.min_draw_latency_ms, 8.0);
        Ok(())
    }

    #[test]
    fn it_should_report_an_error_for_a_missing_config_file() {
        assert!(Config::load_from_file(Path::new("/nonexistent/softblit.json")).is_err());
    }
}
