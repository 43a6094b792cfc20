//! Six-cell code input with focus handling.

use domain::OTP_LENGTH;

/// Keys the input reacts to besides digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKey {
    Digit(char),
    Backspace,
    ArrowLeft,
    ArrowRight,
}

/// One digit per cell, with a single focused cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OtpInput {
    cells: [Option<char>; OTP_LENGTH],
    focus: usize,
}

impl OtpInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn cells(&self) -> &[Option<char>; OTP_LENGTH] {
        &self.cells
    }

    pub fn is_complete(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// The full code, once every cell is filled.
    pub fn code(&self) -> Option<String> {
        self.cells.iter().copied().collect()
    }

    /// Move focus to a cell; out-of-range indices are clamped.
    pub fn focus_cell(&mut self, index: usize) {
        self.focus = index.min(OTP_LENGTH - 1);
    }

    /// Apply a key press to the focused cell.
    ///
    /// Non-digit characters are ignored. A digit fills the focused cell and
    /// advances focus. Backspace clears the focused cell, or, when it is
    /// already empty, moves back and clears the previous one.
    pub fn press(&mut self, key: InputKey) {
        match key {
            InputKey::Digit(c) if c.is_ascii_digit() => {
                self.cells[self.focus] = Some(c);
                if self.focus + 1 < OTP_LENGTH {
                    self.focus += 1;
                }
            }
            InputKey::Digit(_) => {}
            InputKey::Backspace => {
                if self.cells[self.focus].is_some() {
                    self.cells[self.focus] = None;
                } else if self.focus > 0 {
                    self.focus -= 1;
                    self.cells[self.focus] = None;
                }
            }
            InputKey::ArrowLeft => self.focus = self.focus.saturating_sub(1),
            InputKey::ArrowRight => self.focus_cell(self.focus + 1),
        }
    }

    /// Fill every cell from pasted text.
    ///
    /// Only a paste that is exactly six digits (after trimming) is accepted;
    /// anything else leaves the input untouched. Returns whether it applied.
    pub fn paste(&mut self, text: &str) -> bool {
        let text = text.trim();
        if text.len() != OTP_LENGTH || !text.chars().all(|c| c.is_ascii_digit()) {
            return false;
        }

        for (cell, c) in self.cells.iter_mut().zip(text.chars()) {
            *cell = Some(c);
        }
        self.focus = OTP_LENGTH - 1;
        true
    }

    /// Type a line of text: a six-digit paste if it is one, otherwise
    /// each character as a key press from the focused cell.
    pub fn type_text(&mut self, text: &str) {
        if self.paste(text) {
            return;
        }
        for c in text.trim().chars() {
            self.press(InputKey::Digit(c));
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
