//! Menu navigator: the interactive screen loop.
//!
//! Every primitive renders through the [`IdleClock`] lock, then blocks on the
//! keypad with the session timeout. A timeout is reported as its own value
//! ([`Choice::Timeout`] or [`TimedOut`]) so callers unwind with `?` all the
//! way back to the idle face.
//!
//! Screens form an implicit stack through nested loops. The navigator keeps
//! a bounded trail of the screens entered so far, only to report
//! [`MenuState`].

use alloc::string::String;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_time::{with_timeout, Duration};
use heapless::Vec;
use platform::{Button, InputDevice, MenuDisplay, TimeField, WallTime};

use crate::clock::IdleClock;
use crate::list::{self, Ordinal};
use crate::screen::{Screen, ScreenId};

/// Nesting tracked by [`Navigator::state`]; deeper screens still work, they
/// just report their nearest tracked ancestor.
const TRAIL_DEPTH: usize = 32;

/// First and last characters of the text entry wheel (printable ASCII).
const WHEEL_FIRST: u8 = b' ';
const WHEEL_LAST: u8 = b'~';
const WHEEL_START: char = 'a';

/// The session timed out without input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror_no_std::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[error("menu input timed out")]
pub struct TimedOut;

/// Outcome of presenting a list or message box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Choice {
    /// The user accepted this option.
    Selected(Ordinal),
    /// The user backed out.
    Cancel,
    /// Nobody pressed anything for the session timeout.
    Timeout,
}

impl Choice {
    /// `Ok(Some(_))` for a selection, `Ok(None)` for back, `Err` on timeout.
    pub fn into_selection(self) -> Result<Option<Ordinal>, TimedOut> {
        match self {
            Self::Selected(ordinal) => Ok(Some(ordinal)),
            Self::Cancel => Ok(None),
            Self::Timeout => Err(TimedOut),
        }
    }
}

/// Where the navigator is in a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MenuState {
    /// No session; the idle face owns the display.
    Idle,
    /// A screen's handler is running.
    ScreenActive(ScreenId),
    /// Blocked waiting for a key on this screen.
    AwaitingInput(ScreenId),
}

/// Drives menu screens from keypad input.
pub struct Navigator<'c, I, M: RawMutex, D> {
    input: I,
    clock: &'c IdleClock<M, D>,
    timeout: Duration,
    state: MenuState,
    trail: Vec<ScreenId, TRAIL_DEPTH>,
}

impl<'c, I, M, D> Navigator<'c, I, M, D>
where
    I: InputDevice,
    M: RawMutex,
    D: MenuDisplay,
{
    /// Create a navigator that gives up after `timeout` without a key press.
    pub fn new(input: I, clock: &'c IdleClock<M, D>, timeout: Duration) -> Self {
        Self { input, clock, timeout, state: MenuState::Idle, trail: Vec::new() }
    }

    /// Current session state.
    pub fn state(&self) -> MenuState {
        self.state
    }

    /// Number of screens entered and not yet left.
    pub fn depth(&self) -> usize {
        self.trail.len()
    }

    /// The coordinator this navigator renders through.
    pub fn clock(&self) -> &'c IdleClock<M, D> {
        self.clock
    }

    /// Direct keypad access, for screens that wait on other events too.
    pub fn input(&mut self) -> &mut I {
        &mut self.input
    }

    /// Session timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// End the session.
    pub fn reset(&mut self) {
        self.trail.clear();
        self.state = MenuState::Idle;
    }

    fn enter(&mut self, id: ScreenId) {
        if let Some(pos) = self.trail.iter().rposition(|&s| s == id) {
            self.trail.truncate(pos.saturating_add(1));
        } else {
            // full trail: deeper levels go untracked
            let _ = self.trail.push(id);
        }
    }

    fn resume(&mut self) {
        self.state = self.trail.last().copied().map_or(MenuState::Idle, MenuState::ScreenActive);
    }

    fn leave(&mut self) {
        self.trail.pop();
        self.resume();
    }

    /// A wait ran out. The screens stay entered: the caller decides whether
    /// the session ends, and [`Self::reset`] closes it.
    fn expire(&mut self) {
        debug!("menu input timed out");
        self.resume();
    }

    async fn next_press(&mut self, wait: Duration) -> Option<Button> {
        let input = &mut self.input;
        with_timeout(wait, async move {
            loop {
                if let Some(button) = input.wait_for_event().await.pressed() {
                    return button;
                }
            }
        })
        .await
        .ok()
    }

    async fn dialog_press(&mut self) -> Result<Button, TimedOut> {
        self.state = MenuState::AwaitingInput(ScreenId::Dialog);
        match self.next_press(self.timeout).await {
            Some(button) => {
                self.state = MenuState::ScreenActive(ScreenId::Dialog);
                Ok(button)
            }
            None => {
                self.expire();
                Err(TimedOut)
            }
        }
    }

    /// Present a selection list starting at `initial` (clamped into range).
    ///
    /// Up/Down move the highlight and stop at the ends, A selects, B backs
    /// out. An empty list backs out immediately.
    pub async fn present(&mut self, screen: &Screen<'_>, initial: u16) -> Choice {
        self.enter(screen.id);
        let count = list::count(screen.options);
        if count == 0 {
            self.leave();
            return Choice::Cancel;
        }

        let mut highlighted = initial.clamp(1, count);
        loop {
            self.clock.render(|d| d.draw_selection_list(screen.title, screen.options, highlighted));
            self.state = MenuState::AwaitingInput(screen.id);
            let Some(button) = self.next_press(self.timeout).await else {
                self.trail.pop();
                self.expire();
                return Choice::Timeout;
            };
            self.state = MenuState::ScreenActive(screen.id);
            trace!("{}: {}", screen.id.name(), button.name());

            match button {
                Button::Up => highlighted = highlighted.saturating_sub(1).max(1),
                Button::Down => highlighted = highlighted.saturating_add(1).min(count),
                Button::A => {
                    if let Some(ordinal) = Ordinal::new(highlighted) {
                        return Choice::Selected(ordinal);
                    }
                }
                Button::B => {
                    self.leave();
                    return Choice::Cancel;
                }
                _ => {}
            }
        }
    }

    /// Show a message box with a row of buttons (`'\n'`-separated).
    ///
    /// Left/Right move between buttons, A picks one, B backs out.
    pub async fn message(
        &mut self,
        title: &str,
        subtitle: Option<&str>,
        body: &str,
        buttons: &str,
    ) -> Choice {
        let count = list::count(buttons);
        let first = count.min(1);
        let mut highlighted = first;
        let choice = loop {
            self.clock.render(|d| d.draw_message(title, subtitle, body, buttons, highlighted));
            match self.dialog_press().await {
                Err(TimedOut) => return Choice::Timeout,
                Ok(Button::Left) => highlighted = highlighted.saturating_sub(1).max(first),
                Ok(Button::Right) => highlighted = highlighted.saturating_add(1).min(count),
                Ok(Button::A) => {
                    break Ordinal::new(highlighted).map_or(Choice::Cancel, Choice::Selected)
                }
                Ok(Button::B) => break Choice::Cancel,
                Ok(_) => {}
            }
        };
        self.resume();
        choice
    }

    /// Message box with a single OK button.
    pub async fn notify(&mut self, title: &str, body: &str) -> Result<(), TimedOut> {
        self.message(title, None, body, "OK").await.into_selection().map(|_| ())
    }

    /// Numeric entry between `min` and `max`.
    ///
    /// Up/Down step by one, Right/Left by ten. A accepts, B cancels.
    pub async fn input_value(
        &mut self,
        title: &str,
        value: u8,
        min: u8,
        max: u8,
    ) -> Result<Option<u8>, TimedOut> {
        let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
        let mut value = value.clamp(lo, hi);
        loop {
            self.clock.render(|d| d.draw_value_input(title, value));
            match self.dialog_press().await? {
                Button::Up => value = value.saturating_add(1).min(hi),
                Button::Down => value = value.saturating_sub(1).max(lo),
                Button::Right => value = value.saturating_add(10).min(hi),
                Button::Left => value = value.saturating_sub(10).max(lo),
                Button::A => {
                    self.resume();
                    return Ok(Some(value));
                }
                Button::B => {
                    self.resume();
                    return Ok(None);
                }
                _ => {}
            }
        }
    }

    /// `HH:MM` entry. Left/Right pick the field, Up/Down wrap around.
    pub async fn input_time(
        &mut self,
        title: &str,
        initial: WallTime,
    ) -> Result<Option<WallTime>, TimedOut> {
        let WallTime { mut hour, mut minute } = initial;
        let mut field = TimeField::Hour;
        loop {
            self.clock.render(|d| d.draw_time_input(title, hour, minute, field));
            match (self.dialog_press().await?, field) {
                (Button::Left, _) => field = TimeField::Hour,
                (Button::Right, _) => field = TimeField::Minute,
                (Button::Up, TimeField::Hour) => hour = wrap_up(hour, 23),
                (Button::Down, TimeField::Hour) => hour = wrap_down(hour, 23),
                (Button::Up, TimeField::Minute) => minute = wrap_up(minute, 59),
                (Button::Down, TimeField::Minute) => minute = wrap_down(minute, 59),
                (Button::A, _) => {
                    self.resume();
                    return Ok(WallTime::new(hour, minute));
                }
                (Button::B, _) => {
                    self.resume();
                    return Ok(None);
                }
                _ => {}
            }
        }
    }

    /// Free text entry of at most `max_len` bytes.
    ///
    /// Up/Down turn the character wheel, Right appends the character under
    /// it, Left deletes the last one. A accepts (possibly empty), B cancels.
    pub async fn input_text(
        &mut self,
        title: &str,
        initial: &str,
        max_len: usize,
    ) -> Result<Option<String>, TimedOut> {
        let mut text = String::new();
        for c in initial.chars() {
            if text.len().saturating_add(c.len_utf8()) > max_len {
                break;
            }
            text.push(c);
        }
        let mut pending = WHEEL_START;
        loop {
            self.clock.render(|d| d.draw_text_input(title, &text, pending));
            match self.dialog_press().await? {
                Button::Up => pending = wheel_step(pending, true),
                Button::Down => pending = wheel_step(pending, false),
                Button::Right => {
                    if text.len() < max_len && text.try_reserve(1).is_ok() {
                        text.push(pending);
                    }
                }
                Button::Left => {
                    text.pop();
                }
                Button::A => {
                    self.resume();
                    return Ok(Some(text));
                }
                Button::B => {
                    self.resume();
                    return Ok(None);
                }
                _ => {}
            }
        }
    }

    /// Draw a non-interactive screen and return at once.
    pub fn show_static(&mut self, title: &str, body: &str) {
        self.clock.render(|d| {
            d.clear();
            d.draw_static_list(title, body);
        });
    }

    /// Wait for any key, with the session timeout.
    pub async fn wait_for_press(&mut self) -> Result<Button, TimedOut> {
        let button = self.dialog_press().await?;
        self.resume();
        Ok(button)
    }

    /// Short wait for live screens that redraw on their own.
    ///
    /// `idle` accumulates time spent without a press and is reset by any
    /// press; once it reaches the session timeout the session ends.
    pub async fn poll_press(
        &mut self,
        period: Duration,
        idle: &mut Duration,
    ) -> Result<Option<Button>, TimedOut> {
        self.state = MenuState::AwaitingInput(ScreenId::Dialog);
        let press = self.next_press(period).await;
        self.resume();
        match press {
            Some(button) => {
                *idle = Duration::from_ticks(0);
                Ok(Some(button))
            }
            None => {
                *idle = Duration::from_ticks(idle.as_ticks().saturating_add(period.as_ticks()));
                if *idle >= self.timeout {
                    self.expire();
                    Err(TimedOut)
                } else {
                    Ok(None)
                }
            }
        }
    }

    /// Drop queued key events.
    pub fn clear_events(&mut self) {
        self.input.clear_events();
    }
}

fn wrap_up(value: u8, max: u8) -> u8 {
    if value >= max {
        0
    } else {
        value.saturating_add(1)
    }
}

fn wrap_down(value: u8, max: u8) -> u8 {
    value.checked_sub(1).map_or(max, |v| v.min(max))
}

fn wheel_step(c: char, forward: bool) -> char {
    let b = u8::try_from(c)
        .ok()
        .filter(|b| (WHEEL_FIRST..=WHEEL_LAST).contains(b))
        .unwrap_or(WHEEL_FIRST);
    let next = match (forward, b) {
        (true, WHEEL_LAST) => WHEEL_FIRST,
        (true, b) => b.saturating_add(1),
        (false, WHEEL_FIRST) => WHEEL_LAST,
        (false, b) => b.saturating_sub(1),
    };
    char::from(next)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
    use platform::mocks::{DisplayCall, MockDisplay, MockInput};
    use platform::Button::*;

    type Clock = IdleClock<CriticalSectionRawMutex, MockDisplay>;
    type Nav<'c> = Navigator<'c, MockInput, CriticalSectionRawMutex, MockDisplay>;

    const LIST: Screen<'static> = Screen::new(ScreenId::MainMenu, "Menu", "one\ntwo\nthree");
    const SHORT: Duration = Duration::from_millis(40);

    fn navigator<'c>(clock: &'c Clock, presses: &[Button]) -> Nav<'c> {
        Navigator::new(MockInput::with_presses(presses), clock, SHORT)
    }

    fn highlights(clock: &Clock) -> std::vec::Vec<u16> {
        clock.render(|d| {
            d.calls()
                .iter()
                .filter_map(|c| match c {
                    DisplayCall::SelectionList { highlighted, .. } => Some(*highlighted),
                    _ => None,
                })
                .collect()
        })
    }

    #[tokio::test]
    async fn test_present_selects_highlighted() {
        let clock = Clock::new(MockDisplay::new(), false);
        let mut nav = navigator(&clock, &[Down, Down, A]);
        let choice = nav.present(&LIST, 1).await;
        assert_eq!(choice, Choice::Selected(Ordinal::new(3).unwrap()));
        assert_eq!(nav.state(), MenuState::ScreenActive(ScreenId::MainMenu));
        assert_eq!(highlights(&clock), [1, 2, 3]);
    }

    #[tokio::test]
    async fn test_present_clamps_at_both_ends() {
        let clock = Clock::new(MockDisplay::new(), false);
        let mut nav = navigator(&clock, &[Up, Down, Down, Down, A]);
        assert_eq!(nav.present(&LIST, 1).await, Choice::Selected(Ordinal::new(3).unwrap()));
        assert_eq!(highlights(&clock), [1, 1, 2, 3, 3]);
    }

    #[tokio::test]
    async fn test_present_clamps_initial_ordinal() {
        let clock = Clock::new(MockDisplay::new(), false);
        let mut nav = navigator(&clock, &[A]);
        assert_eq!(nav.present(&LIST, 99).await, Choice::Selected(Ordinal::new(3).unwrap()));
        let mut nav = navigator(&clock, &[A]);
        assert_eq!(nav.present(&LIST, 0).await, Choice::Selected(Ordinal::FIRST));
    }

    #[tokio::test]
    async fn test_present_back_cancels() {
        let clock = Clock::new(MockDisplay::new(), false);
        let mut nav = navigator(&clock, &[Down, B]);
        assert_eq!(nav.present(&LIST, 1).await, Choice::Cancel);
        assert_eq!(nav.state(), MenuState::Idle);
        assert_eq!(nav.depth(), 0);
    }

    #[tokio::test]
    async fn test_present_times_out_to_idle() {
        let clock = Clock::new(MockDisplay::new(), false);
        let mut nav = navigator(&clock, &[]);
        assert_eq!(nav.present(&LIST, 1).await, Choice::Timeout);
        assert_eq!(nav.state(), MenuState::Idle);
    }

    #[tokio::test]
    async fn test_present_ignores_releases_and_other_keys() {
        let clock = Clock::new(MockDisplay::new(), false);
        let mut input = MockInput::new();
        input.click(Down);
        input.click(Start);
        input.click(A);
        let mut nav = Navigator::new(input, &clock, SHORT);
        assert_eq!(nav.present(&LIST, 1).await, Choice::Selected(Ordinal::new(2).unwrap()));
    }

    #[tokio::test]
    async fn test_empty_list_cancels_without_waiting() {
        let clock = Clock::new(MockDisplay::new(), false);
        let mut nav = navigator(&clock, &[A]);
        let empty = Screen::new(ScreenId::Setup, "Empty", "");
        assert_eq!(nav.present(&empty, 1).await, Choice::Cancel);
        assert!(clock.render(|d| d.calls().is_empty()));
        assert_eq!(nav.input().pending(), 1);
    }

    #[tokio::test]
    async fn test_trail_follows_nesting() {
        let clock = Clock::new(MockDisplay::new(), false);
        let child = Screen::new(ScreenId::Setup, "Child", "x");
        let mut nav = navigator(&clock, &[A, B, A]);
        assert!(matches!(nav.present(&LIST, 1).await, Choice::Selected(_)));
        assert_eq!(nav.present(&child, 1).await, Choice::Cancel);
        assert_eq!(nav.state(), MenuState::ScreenActive(ScreenId::MainMenu));
        assert!(matches!(nav.present(&LIST, 1).await, Choice::Selected(_)));
        assert_eq!(nav.depth(), 1);
    }

    #[test]
    fn test_into_selection() {
        assert_eq!(Choice::Cancel.into_selection(), Ok(None));
        assert_eq!(Choice::Timeout.into_selection(), Err(TimedOut));
        assert_eq!(Choice::Selected(Ordinal::FIRST).into_selection(), Ok(Some(Ordinal::FIRST)));
    }

    #[tokio::test]
    async fn test_message_buttons() {
        let clock = Clock::new(MockDisplay::new(), false);
        let mut nav = navigator(&clock, &[Right, Right, Left, A]);
        let choice = nav.message("T", None, "body", "One\nTwo\nThree").await;
        assert_eq!(choice, Choice::Selected(Ordinal::new(2).unwrap()));
    }

    #[tokio::test]
    async fn test_notify_times_out() {
        let clock = Clock::new(MockDisplay::new(), false);
        let mut nav = navigator(&clock, &[]);
        assert_eq!(nav.notify("Error", "No files found").await, Err(TimedOut));
        assert_eq!(nav.state(), MenuState::Idle);
    }

    #[tokio::test]
    async fn test_dialog_timeout_keeps_entered_screens() {
        let clock = Clock::new(MockDisplay::new(), false);
        let child = Screen::new(ScreenId::Setup, "Child", "x");
        let mut nav = navigator(&clock, &[A, A]);
        assert!(matches!(nav.present(&LIST, 1).await, Choice::Selected(_)));
        assert!(matches!(nav.present(&child, 1).await, Choice::Selected(_)));
        assert_eq!(nav.wait_for_press().await, Err(TimedOut));
        assert_eq!(nav.state(), MenuState::ScreenActive(ScreenId::Setup));
        assert_eq!(nav.depth(), 2);

        // a list that times out is left, its parent stays
        let mut nav = navigator(&clock, &[A]);
        assert!(matches!(nav.present(&LIST, 1).await, Choice::Selected(_)));
        assert_eq!(nav.present(&child, 1).await, Choice::Timeout);
        assert_eq!(nav.state(), MenuState::ScreenActive(ScreenId::MainMenu));
        nav.reset();
        assert_eq!(nav.state(), MenuState::Idle);
    }

    #[tokio::test]
    async fn test_input_value_steps_and_clamps() {
        let clock = Clock::new(MockDisplay::new(), false);
        let mut nav = navigator(&clock, &[Right, Right, Up, Right, A]);
        assert_eq!(nav.input_value("Trim", 110, 0, 127).await, Ok(Some(127)));
        let mut nav = navigator(&clock, &[Down, Left, A]);
        assert_eq!(nav.input_value("Trim", 5, 0, 127).await, Ok(Some(0)));
        let mut nav = navigator(&clock, &[Up, B]);
        assert_eq!(nav.input_value("Trim", 5, 0, 127).await, Ok(None));
    }

    #[tokio::test]
    async fn test_input_time_wraps_fields() {
        let clock = Clock::new(MockDisplay::new(), false);
        let mut nav = navigator(&clock, &[Up, Right, Down, A]);
        let start = WallTime::new(23, 0).unwrap();
        assert_eq!(nav.input_time("Alarm", start).await, Ok(WallTime::new(0, 59)));
    }

    #[tokio::test]
    async fn test_input_text_wheel() {
        let clock = Clock::new(MockDisplay::new(), false);
        let mut nav = navigator(&clock, &[Up, Right, Right, Left, Down, Down, Right, A]);
        // wheel to 'b', append twice, delete one, turn back past 'a' to '`'
        let text = nav.input_text("Host", "n", 8).await.unwrap().unwrap();
        assert_eq!(text, "nb`");
    }

    #[tokio::test]
    async fn test_input_text_respects_max_len() {
        let clock = Clock::new(MockDisplay::new(), false);
        let mut nav = navigator(&clock, &[Right, Right, A]);
        assert_eq!(nav.input_text("Pw", "abc", 4).await, Ok(Some("abca".into())));
    }

    #[tokio::test]
    async fn test_poll_press_accumulates_idle_time() {
        let clock = Clock::new(MockDisplay::new(), false);
        let mut nav = navigator(&clock, &[]);
        let mut idle = Duration::from_ticks(0);
        let period = Duration::from_millis(15);
        assert_eq!(nav.poll_press(period, &mut idle).await, Ok(None));
        assert_eq!(nav.poll_press(period, &mut idle).await, Ok(None));
        assert_eq!(nav.poll_press(period, &mut idle).await, Err(TimedOut));
    }

    #[test]
    fn test_wheel_wraps() {
        assert_eq!(wheel_step('~', true), ' ');
        assert_eq!(wheel_step(' ', false), '~');
        assert_eq!(wheel_step('a', true), 'b');
        assert_eq!(wrap_up(59, 59), 0);
        assert_eq!(wrap_down(0, 23), 23);
    }
}
