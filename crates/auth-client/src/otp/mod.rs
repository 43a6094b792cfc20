//! Client-side OTP entry: cells, countdown and the state machine tying them together.

mod countdown;
mod input;
mod machine;
mod ticker;

pub use countdown::Countdown;
pub use input::{InputKey, OtpInput};
pub use machine::{OtpEntry, OtpState};
pub use ticker::{IntervalTicker, Ticker};
