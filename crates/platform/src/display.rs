//! Display abstraction layer
//!
//! The menu engine never touches pixels. It hands text and layout hints to a
//! [`MenuDisplay`], which owns fonts, scrolling and the framebuffer. Every
//! method is synchronous and short so that it can run inside the clock lock.

use crate::clock::ClockState;

/// Which field of a time entry screen has the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimeField {
    /// Hours column
    Hour,
    /// Minutes column
    Minute,
}

/// Text-level rendering primitives of the front panel display
pub trait MenuDisplay {
    /// Blank the whole screen
    fn clear(&mut self);

    /// Draw a scrolling selection list.
    ///
    /// `options` is a serialized option list (`'\n'`-separated labels) and
    /// `highlighted` is the 1-based ordinal under the cursor.
    fn draw_selection_list(&mut self, title: &str, options: &str, highlighted: u16);

    /// Draw a message box with a row of buttons.
    ///
    /// `buttons` is a serialized option list; `highlighted` is 1-based.
    fn draw_message(
        &mut self,
        title: &str,
        subtitle: Option<&str>,
        body: &str,
        buttons: &str,
        highlighted: u16,
    );

    /// Draw a non-interactive list of lines
    fn draw_static_list(&mut self, title: &str, body: &str);

    /// Draw a numeric entry field
    fn draw_value_input(&mut self, title: &str, value: u8);

    /// Draw an `HH:MM` entry field with the cursor on `field`
    fn draw_time_input(&mut self, title: &str, hour: u8, minute: u8, field: TimeField);

    /// Draw a text entry field; `pending` is the character under the wheel
    fn draw_text_input(&mut self, title: &str, text: &str, pending: char);

    /// Draw the idle clock face
    fn draw_clock(&mut self, state: &ClockState);

    /// Draw the diagnostic test pattern
    fn draw_test_pattern(&mut self, inverted: bool);

    /// Draw the product logo
    fn draw_logo(&mut self);

    /// Current panel contrast
    fn contrast(&self) -> u8;

    /// Set panel contrast
    fn set_contrast(&mut self, contrast: u8);
}
