//! Menu engine of the Chipclock front panel.
//!
//! The engine is `no_std` + `alloc` and executor-agnostic: it only awaits
//! keypad events (bounded by `embassy_time::with_timeout`), storage and the
//! player. A separate context delivers the RTC tick to the [`IdleClock`],
//! which shares the display with the menu under one lock.
//!
//! ```text
//! MenuTask ── idle face / key dispatch
//!    │
//!    └─ screens ── Navigator ── IdleClock ── MenuDisplay
//!          │           │
//!          │           └─ list codec (Screen options)
//!          └─ FileBrowser ── Storage
//! ```

#![cfg_attr(not(test), no_std)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]
#![deny(clippy::expect_used)]
#![allow(async_fn_in_trait)] // Embassy no_std: single-threaded, Send bounds not needed

extern crate alloc;

#[macro_use]
mod fmt;

pub mod browser;
pub mod clock;
pub mod config;
pub mod list;
pub mod navigator;
pub mod screen;
pub mod screens;
pub mod task;

pub use browser::{Browse, FileBrowser, FileHandler, PickFile};
pub use clock::IdleClock;
pub use config::MenuConfig;
pub use list::{Ordinal, OptionList, MAX_OPTIONS};
pub use navigator::{Choice, MenuState, Navigator, TimedOut};
pub use screen::{Screen, ScreenId};
pub use task::{Devices, MenuTask};
