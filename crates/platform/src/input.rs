//! Input device abstraction

/// Input device trait for the keypad and touch pad
pub trait InputDevice {
    /// Wait for next input event (async, power-efficient)
    ///
    /// Never times out on its own; callers bound the wait with
    /// `embassy_time::with_timeout` when they need a deadline.
    fn wait_for_event(&mut self) -> impl core::future::Future<Output = InputEvent>;

    /// Poll for event (non-blocking)
    fn poll_event(&mut self) -> Option<InputEvent>;

    /// Drop every queued event
    fn clear_events(&mut self) {
        while self.poll_event().is_some() {}
    }
}

/// Input events from the keypad
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputEvent {
    /// Button pressed
    ButtonPress(Button),
    /// Button released
    ButtonRelease(Button),
}

impl InputEvent {
    /// Return the button if this event is a press edge.
    pub fn pressed(self) -> Option<Button> {
        match self {
            Self::ButtonPress(button) => Some(button),
            Self::ButtonRelease(_) => None,
        }
    }
}

/// Physical buttons (NES-style pad plus the capacitive touch pad)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    /// D-pad up
    Up,
    /// D-pad down
    Down,
    /// D-pad left
    Left,
    /// D-pad right
    Right,
    /// Confirm
    A,
    /// Back / cancel
    B,
    /// Start (arms the alarm from the idle face)
    Start,
    /// Select (disarms the alarm from the idle face)
    Select,
    /// Capacitive touch pad on top of the case
    Touch,
}

impl Button {
    /// Short label used in logs.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
            Self::A => "a",
            Self::B => "b",
            Self::Start => "start",
            Self::Select => "select",
            Self::Touch => "touch",
        }
    }
}
