//! Idle clock coordinator.
//!
//! The display is shared between two contexts: the menu task and the RTC
//! tick. Both go through one blocking mutex that guards the display, the
//! "menu visible" flag and the [`ClockState`] together, so the tick can never
//! draw over a menu and never observes a half-updated clock.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;
use platform::{AlarmFlags, ClockState, MenuDisplay, TickHandler, WallTime};

struct Shared<D> {
    menu_visible: bool,
    clock: ClockState,
    display: D,
}

/// Owner of the display and the clock face.
///
/// Place it in a `static` (or a `StaticCell`) so that the RTC tick and the
/// menu task can both reach it.
pub struct IdleClock<M: RawMutex, D> {
    shared: Mutex<M, RefCell<Shared<D>>>,
}

impl<M: RawMutex, D: MenuDisplay> IdleClock<M, D> {
    /// Wrap `display`; the menu starts hidden and the alarm disarmed.
    pub const fn new(display: D, twenty_four: bool) -> Self {
        Self {
            shared: Mutex::new(RefCell::new(Shared {
                menu_visible: false,
                clock: ClockState::new(twenty_four),
                display,
            })),
        }
    }

    fn with<R>(&self, f: impl FnOnce(&mut Shared<D>) -> R) -> R {
        self.shared.lock(|cell| f(&mut cell.borrow_mut()))
    }

    /// Leave the menu: hide it, clear the panel and draw the face.
    ///
    /// With no time available the panel stays blank until the next tick.
    pub fn show_idle(&self, now: Option<WallTime>) {
        self.with(|s| {
            s.menu_visible = false;
            s.display.clear();
            if let Some(now) = now {
                s.clock.set_time(now);
                s.display.draw_clock(&s.clock);
            }
        });
    }

    /// Mark a menu session active; ticks stop drawing from here on.
    pub fn enter_menu(&self) {
        self.with(|s| s.menu_visible = true);
    }

    /// Whether a menu session owns the display.
    pub fn is_menu_visible(&self) -> bool {
        self.with(|s| s.menu_visible)
    }

    /// Snapshot of the clock face state.
    pub fn state(&self) -> ClockState {
        self.with(|s| s.clock)
    }

    /// Switch between 12- and 24-hour display.
    pub fn set_twenty_four(&self, twenty_four: bool) {
        self.with(|s| s.clock.twenty_four = twenty_four);
    }

    /// Update the alarm indicator.
    pub fn set_alarm_armed(&self, armed: bool) {
        self.with(|s| s.clock.alarm_armed = armed);
    }

    /// Run one render call against the display under the lock.
    pub fn render<R>(&self, f: impl FnOnce(&mut D) -> R) -> R {
        self.with(|s| f(&mut s.display))
    }
}

impl<M, D> TickHandler for IdleClock<M, D>
where
    M: RawMutex + Sync,
    D: MenuDisplay + Send,
{
    fn on_tick(&self, alarms: AlarmFlags, now: Option<WallTime>) {
        let Some(now) = now else {
            trace!("tick without a valid time");
            return;
        };
        if alarms.alarm0 || alarms.alarm1 {
            debug!("alarm flags {} {}", alarms.alarm0, alarms.alarm1);
        }
        self.with(|s| {
            s.clock.set_time(now);
            if !s.menu_visible {
                s.display.draw_clock(&s.clock);
            }
        });
    }
}
