//! Keypad on stdin.
//!
//! Each line typed is a burst of key clicks, one per recognized character.

use platform::{Button, InputDevice, InputEvent};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::{mpsc, oneshot};

/// Key for one typed character.
pub fn button_for(c: char) -> Option<Button> {
    match c.to_ascii_lowercase() {
        'w' => Some(Button::Up),
        's' => Some(Button::Down),
        'a' => Some(Button::Left),
        'd' => Some(Button::Right),
        'j' => Some(Button::A),
        'k' => Some(Button::B),
        'm' => Some(Button::Start),
        'n' => Some(Button::Select),
        't' => Some(Button::Touch),
        _ => None,
    }
}

/// Press and release events for one line of input.
pub fn line_events(line: &str) -> Vec<InputEvent> {
    let line = line.trim();
    let buttons: Vec<Button> = if line.is_empty() {
        vec![Button::A]
    } else {
        line.chars().filter_map(button_for).collect()
    };
    buttons
        .into_iter()
        .flat_map(|b| [InputEvent::ButtonPress(b), InputEvent::ButtonRelease(b)])
        .collect()
}

/// Keypad fed by a stdin reader task.
pub struct KeyboardInput {
    events: mpsc::UnboundedReceiver<InputEvent>,
}

impl KeyboardInput {
    /// Input fed from `events`.
    pub fn new(events: mpsc::UnboundedReceiver<InputEvent>) -> Self {
        Self { events }
    }
}

/// Start reading stdin. The receiver fires once stdin is closed.
pub fn spawn_reader() -> (KeyboardInput, oneshot::Receiver<()>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let (closed_tx, closed_rx) = oneshot::channel();
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    for event in line_events(&line) {
                        if tx.send(event).is_err() {
                            return;
                        }
                    }
                }
                Ok(None) => break,
                Err(err) => {
                    tracing::warn!(%err, "stdin");
                    break;
                }
            }
        }
        let _ = closed_tx.send(());
    });
    (KeyboardInput::new(rx), closed_rx)
}

impl InputDevice for KeyboardInput {
    async fn wait_for_event(&mut self) -> InputEvent {
        match self.events.recv().await {
            Some(event) => event,
            None => std::future::pending().await,
        }
    }

    fn poll_event(&mut self) -> Option<InputEvent> {
        self.events.try_recv().ok()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_line_is_a() {
        assert_eq!(line_events("  "), [InputEvent::ButtonPress(Button::A), InputEvent::ButtonRelease(Button::A)]);
    }

    #[test]
    fn test_unknown_characters_are_ignored() {
        let pressed: Vec<Button> = line_events("sS?j").into_iter().filter_map(InputEvent::pressed).collect();
        assert_eq!(pressed, [Button::Down, Button::Down, Button::A]);
    }

    #[tokio::test]
    async fn test_queued_events_drain_in_order() {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut input = KeyboardInput::new(rx);
        for event in line_events("wk") {
            tx.send(event).ok();
        }
        assert_eq!(input.wait_for_event().await, InputEvent::ButtonPress(Button::Up));
        input.clear_events();
        assert_eq!(input.poll_event(), None);
    }
}
