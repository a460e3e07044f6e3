//! Text rendering of the front panel.
//!
//! Every draw call repaints the whole terminal, like the panel's full
//! framebuffer flush.

use std::io::Write;

use platform::{ClockState, MenuDisplay, TimeField, WallTime};

/// Rows of a selection list visible at once.
const LIST_ROWS: usize = 6;
/// Panel width in characters.
const WIDTH: usize = 32;
const HOME: &str = "\x1b[2J\x1b[H";

pub struct TerminalDisplay<W: Write> {
    out: W,
    contrast: u8,
}

impl<W: Write> TerminalDisplay<W> {
    pub fn new(out: W) -> Self {
        Self { out, contrast: 0x80 }
    }

    fn frame(&mut self, body: &str) {
        let result = write!(self.out, "{HOME}{body}").and_then(|()| self.out.flush());
        if let Err(err) = result {
            tracing::warn!(%err, "terminal write failed");
        }
    }

    #[cfg(test)]
    fn output(&self) -> &W {
        &self.out
    }
}

fn header(title: &str) -> String {
    let mut text = String::new();
    for line in title.lines() {
        text.push_str(&format!("{line:^WIDTH$}\n"));
    }
    text.push_str(&"=".repeat(WIDTH));
    text.push('\n');
    text
}

/// Labels around `highlighted` (1-based), with the cursor marked.
fn list_window(options: &str, highlighted: u16) -> String {
    let labels: Vec<&str> = options.split('\n').collect();
    let cursor = usize::from(highlighted.max(1)).saturating_sub(1);
    let first = cursor.saturating_sub(LIST_ROWS.saturating_sub(1));
    let mut text = String::new();
    for (i, label) in labels.iter().enumerate().skip(first).take(LIST_ROWS) {
        let marker = if i == cursor { '>' } else { ' ' };
        text.push_str(&format!("{marker} {label}\n"));
    }
    text
}

fn button_row(buttons: &str, highlighted: u16) -> String {
    buttons
        .split('\n')
        .zip(1u16..)
        .map(|(label, n)| if n == highlighted { format!("<{label}>") } else { format!(" {label} ") })
        .collect::<Vec<_>>()
        .join(" ")
}

/// `12:05` or ` 7:05 PM`, plus the alarm indicator.
pub fn clock_face(state: &ClockState) -> String {
    let time = if state.twenty_four {
        format!("{:02}:{:02}", state.hour, state.minute)
    } else {
        let (hour, pm) = WallTime { hour: state.hour, minute: state.minute }.twelve_hour();
        let meridiem = if pm { "PM" } else { "AM" };
        format!("{hour:2}:{:02} {meridiem}", state.minute)
    };
    let alarm = if state.alarm_armed { "(alarm)" } else { "" };
    format!("\n\n{time:^WIDTH$}\n{alarm:^WIDTH$}\n")
}

impl<W: Write> MenuDisplay for TerminalDisplay<W> {
    fn clear(&mut self) {
        self.frame("");
    }

    fn draw_selection_list(&mut self, title: &str, options: &str, highlighted: u16) {
        let body = format!("{}{}", header(title), list_window(options, highlighted));
        self.frame(&body);
    }

    fn draw_message(&mut self, title: &str, subtitle: Option<&str>, body: &str, buttons: &str, highlighted: u16) {
        let mut text = header(title);
        if let Some(subtitle) = subtitle {
            text.push_str(&format!("{subtitle:^WIDTH$}\n\n"));
        }
        for line in body.lines() {
            text.push_str(&format!("{line:^WIDTH$}\n"));
        }
        text.push('\n');
        text.push_str(&button_row(buttons, highlighted));
        text.push('\n');
        self.frame(&text);
    }

    fn draw_static_list(&mut self, title: &str, body: &str) {
        let body = format!("{}{body}\n", header(title));
        self.frame(&body);
    }

    fn draw_value_input(&mut self, title: &str, value: u8) {
        let body = format!("{}\n{:^WIDTH$}\n", header(title), format!("< {value:3} >"));
        self.frame(&body);
    }

    fn draw_time_input(&mut self, title: &str, hour: u8, minute: u8, field: TimeField) {
        let time = match field {
            TimeField::Hour => format!("[{hour:02}]:{minute:02}"),
            TimeField::Minute => format!("{hour:02}:[{minute:02}]"),
        };
        let body = format!("{}\n{time:^WIDTH$}\n", header(title));
        self.frame(&body);
    }

    fn draw_text_input(&mut self, title: &str, text: &str, pending: char) {
        let body = format!("{}\n{text}[{pending}]\n", header(title));
        self.frame(&body);
    }

    fn draw_clock(&mut self, state: &ClockState) {
        let body = clock_face(state);
        self.frame(&body);
    }

    fn draw_test_pattern(&mut self, inverted: bool) {
        let (on, off) = if inverted { (' ', '#') } else { ('#', ' ') };
        let mut body = String::new();
        for row in 0..8usize {
            let line: String = (0..WIDTH).map(|col| if row.wrapping_add(col >> 1) & 1 == 0 { on } else { off }).collect();
            body.push_str(&line);
            body.push('\n');
        }
        self.frame(&body);
    }

    fn draw_logo(&mut self) {
        let body = format!("\n\n{:^WIDTH$}\n{:^WIDTH$}\n", platform::config::APP_NAME, "~ ~ ~");
        self.frame(&body);
    }

    fn contrast(&self) -> u8 {
        self.contrast
    }

    fn set_contrast(&mut self, contrast: u8) {
        self.contrast = contrast;
        tracing::debug!(contrast, "panel contrast");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(display: &TerminalDisplay<Vec<u8>>) -> String {
        String::from_utf8_lossy(display.output()).into_owned()
    }

    #[test]
    fn test_list_window_follows_cursor() {
        let options = "a\nb\nc\nd\ne\nf\ng\nh";
        assert!(list_window(options, 1).starts_with("> a\n"));
        let window = list_window(options, 8);
        assert!(window.starts_with("  c\n"));
        assert!(window.ends_with("> h\n"));
    }

    #[test]
    fn test_buttons_mark_highlight() {
        assert_eq!(button_row("Connect\nCancel", 2), " Connect  <Cancel>");
    }

    #[test]
    fn test_clock_face_formats() {
        let mut state = ClockState::new(false);
        state.hour = 0;
        state.minute = 7;
        assert!(clock_face(&state).contains("12:07 AM"));
        state.hour = 19;
        state.twenty_four = true;
        state.alarm_armed = true;
        let face = clock_face(&state);
        assert!(face.contains("19:07"));
        assert!(face.contains("(alarm)"));
    }

    #[test]
    fn test_every_draw_repaints() {
        let mut display = TerminalDisplay::new(Vec::new());
        display.draw_static_list("Network Info", "MAC: 02:00:5E:00:00:01");
        display.draw_value_input("Trim Value", 7);
        let out = rendered(&display);
        assert_eq!(out.matches(HOME).count(), 2);
        assert!(out.ends_with(&format!("{:^WIDTH$}\n", "<   7 >")));
    }
}
