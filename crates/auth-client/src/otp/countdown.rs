//! Resend countdown.

use std::fmt;

/// Seconds remaining before a new code may be requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    seconds_left: u32,
    total: u32,
}

impl Countdown {
    pub fn new(total: u32) -> Self {
        Self {
            seconds_left: total,
            total,
        }
    }

    pub fn seconds_left(&self) -> u32 {
        self.seconds_left
    }

    pub fn is_finished(&self) -> bool {
        self.seconds_left == 0
    }

    /// One second elapsed; saturates at zero.
    pub fn tick(&mut self) {
        self.seconds_left = self.seconds_left.saturating_sub(1);
    }

    pub fn reset(&mut self) {
        self.seconds_left = self.total;
    }
}

/// `M:SS`
impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:02}", self.seconds_left / 60, self.seconds_left % 60)
    }
}
