//! Hardware Abstraction Layer (HAL) for the Chipclock alarm clock
//!
//! This crate provides trait-based abstractions for every device the menu
//! talks to, enabling development and testing without physical hardware.
//!
//! # Architecture Layers
//!
//! ```text
//! Application Layer (simulator / firmware binary)
//!         ↓
//! Menu Layer (menu crate: navigator, file browser, screens)
//!         ↓
//! Platform HAL (this crate - trait abstractions)
//!         ↓
//! Drivers (RTC, keypad, panel, SD card, Wi-Fi, sound chip)
//! ```
//!
//! # Abstractions
//!
//! - [`MenuDisplay`] - Text-level panel rendering
//! - [`InputDevice`] - Keypad and touch pad input
//! - [`Storage`] - SD card directory listing
//! - [`Rtc`] / [`TickHandler`] - Wall clock and the periodic tick
//! - [`Settings`] - Persisted user preferences
//! - [`AudioPlayer`] - VGM playback and sound effects
//! - [`Network`] / [`TimeSync`] - Wi-Fi station and SNTP
//! - [`ZoneDb`] - Time zone database
//! - [`Sensors`] - Touch, light and volume readings
//!
//! A [`Board`] ties one implementation of each together.
//!
//! # Features
//!
//! - `std`: Enable standard library support, the host filesystem storage and
//!   the mock implementations
//! - `defmt`: Enable `defmt::Format` derives
//!
//! # Example
//!
//! ```no_run
//! use platform::{InputDevice, InputEvent, Button};
//!
//! async fn wait_for_a<I: InputDevice>(input: &mut I) {
//!     while input.wait_for_event().await != InputEvent::ButtonPress(Button::A) {}
//! }
//! ```

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::panic)] // no panic!() in production code
#![deny(clippy::unreachable)] // no unreachable!() that isn't documented
#![deny(unused_must_use)]
// all Results must be handled
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(unsafe_op_in_unsafe_fn)] // unsafe fn body is not implicitly unsafe block
#![warn(clippy::print_stdout)] // prefer tracing/defmt over println! in lib code
#![allow(clippy::doc_markdown)]
#![allow(clippy::must_use_candidate)] // driver accessors, callers decide
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(async_fn_in_trait)] // Embassy no_std: single-threaded, Send bounds not needed

extern crate alloc;

pub mod audio;
pub mod clock;
pub mod config;
pub mod display;
pub mod input;
pub mod network;
pub mod sensors;
pub mod settings;
pub mod storage;
pub mod zoneinfo;

#[cfg(feature = "std")]
pub mod storage_local;

#[cfg(any(test, feature = "std"))]
pub mod mocks;

pub use audio::{AudioPlayer, PlayerError, SoundEffect, TrackTags};
pub use clock::{AlarmFlags, ClockState, Rtc, RtcError, TickHandler, TimeSync, WallTime};
pub use display::{MenuDisplay, TimeField};
pub use input::{Button, InputDevice, InputEvent};
pub use network::{
    AccessPoint, AuthMode, Ipv4Info, Network, NetworkError, NetworkInfo, PASSWORD_MAX_LEN, SSID_MAX_LEN,
};
pub use sensors::{volume_percent, LightGain, SensorError, Sensors};
pub use settings::{RtcTrim, Settings, SettingsError};
pub use storage::{DirEntry, EntryKind, Storage, StorageError};
pub use zoneinfo::ZoneDb;

/// One concrete implementation of every device the menu uses.
///
/// The menu crate is generic over a `Board` so that the same screens run on
/// hardware, in the simulator and against the mocks.
pub trait Board {
    /// Keypad
    type Input: InputDevice;
    /// Front panel
    type Display: MenuDisplay;
    /// SD card
    type Storage: Storage;
    /// Real-time clock
    type Rtc: Rtc;
    /// SNTP client
    type TimeSync: TimeSync;
    /// Settings store
    type Settings: Settings;
    /// Music player
    type Player: AudioPlayer;
    /// Wi-Fi station
    type Network: Network;
    /// Time zone database
    type Zones: ZoneDb;
    /// Analog sensors
    type Sensors: Sensors;
}
