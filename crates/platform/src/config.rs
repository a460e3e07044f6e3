//! Application configuration and constants
//!
//! This module defines central configuration values used across the application.
//! All branding, naming, and mount points should reference these constants
//! rather than hardcoding values.

/// The application name
pub const APP_NAME: &str = "Chipclock";

/// One-line description shown on the About screen
pub const APP_TAGLINE: &str = "Video Game Music Player\nAlarm Clock";

/// Application version (synchronized with Cargo.toml)
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Mount point of the SD card
pub const SD_ROOT: &str = "/sdcard";

/// Development mode banner
pub const fn dev_banner() -> &'static str {
    "Chipclock - Simulator"
}
