//! OTP entry state machine.
//!
//! ```text
//! Entering --submit--> Verifying --ok--> Verified
//!    ^                     |
//!    +------failure--------+   (attempts += 1)
//!                          |
//!                          +--failure, attempts >= max--> Locked
//!
//! Entering | Locked --resend ok (countdown at 0)--> Entering (attempts = 0, countdown reset)
//! ```
//!
//! The machine never reads a clock. Callers feed it one `tick` per second
//! and report the outcome of each request they make on its behalf.

use tracing::{debug, info};

use super::countdown::Countdown;
use super::input::{InputKey, OtpInput};
use common::{AppError, AppResult, OtpConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OtpState {
    Entering,
    Verifying,
    Verified,
    Locked,
}

#[derive(Debug, Clone)]
pub struct OtpEntry {
    state: OtpState,
    input: OtpInput,
    countdown: Countdown,
    attempts: u32,
    max_attempts: u32,
    resend_in_flight: bool,
}

impl OtpEntry {
    pub fn new(config: OtpConfig) -> Self {
        Self {
            state: OtpState::Entering,
            input: OtpInput::new(),
            countdown: Countdown::new(config.ttl_seconds),
            attempts: 0,
            max_attempts: config.max_attempts,
            resend_in_flight: false,
        }
    }

    pub fn state(&self) -> OtpState {
        self.state
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn attempts_remaining(&self) -> u32 {
        self.max_attempts.saturating_sub(self.attempts)
    }

    pub fn seconds_left(&self) -> u32 {
        self.countdown.seconds_left()
    }

    pub fn countdown(&self) -> &Countdown {
        &self.countdown
    }

    pub fn input(&self) -> &OtpInput {
        &self.input
    }

    /// Resend is offered once the countdown ran out and nothing is in flight.
    pub fn can_resend(&self) -> bool {
        self.countdown.is_finished()
            && !self.resend_in_flight
            && matches!(self.state, OtpState::Entering | OtpState::Locked)
    }

    // =========================================================================
    // Messages
    // =========================================================================

    /// One second elapsed. Ignored once verified.
    pub fn tick(&mut self) {
        if self.state != OtpState::Verified {
            self.countdown.tick();
        }
    }

    /// Keystrokes only reach the cells while entering.
    pub fn press(&mut self, key: InputKey) {
        if self.state == OtpState::Entering {
            self.input.press(key);
        }
    }

    pub fn type_text(&mut self, text: &str) {
        if self.state == OtpState::Entering {
            self.input.type_text(text);
        }
    }

    /// Start a verification; returns the code to send.
    pub fn submit(&mut self) -> AppResult<String> {
        match self.state {
            OtpState::Entering => {}
            OtpState::Verifying => {
                return Err(AppError::validation("Verification already in progress"))
            }
            OtpState::Verified => return Err(AppError::validation("Email already verified")),
            OtpState::Locked => {
                return Err(AppError::validation(
                    "Too many failed attempts. Please request a new code.",
                ))
            }
        }

        let code = self
            .input
            .code()
            .ok_or_else(|| AppError::validation("Please enter the complete 6-digit code"))?;

        self.state = OtpState::Verifying;
        debug!(attempt = self.attempts + 1, "verifying code");
        Ok(code)
    }

    /// The backend rejected the code (or the request failed).
    pub fn verification_failed(&mut self) {
        if self.state != OtpState::Verifying {
            return;
        }

        self.attempts += 1;
        if self.attempts >= self.max_attempts {
            self.input.clear();
            self.state = OtpState::Locked;
            info!(attempts = self.attempts, "code entry locked");
        } else {
            self.state = OtpState::Entering;
            debug!(remaining = self.attempts_remaining(), "verification failed");
        }
    }

    pub fn verification_succeeded(&mut self) {
        if self.state == OtpState::Verifying {
            self.state = OtpState::Verified;
        }
    }

    /// Claim the resend slot before issuing the request.
    pub fn begin_resend(&mut self) -> AppResult<()> {
        if !self.can_resend() {
            return Err(AppError::validation(format!(
                "You can request a new code in {}",
                self.countdown
            )));
        }
        self.resend_in_flight = true;
        Ok(())
    }

    /// A new code is on its way: fresh countdown, fresh attempts, empty cells.
    pub fn resend_succeeded(&mut self) {
        self.resend_in_flight = false;
        self.countdown.reset();
        self.attempts = 0;
        self.input.clear();
        self.state = OtpState::Entering;
        info!("code re-sent, entry reset");
    }

    /// The gate stays open so the user can try again.
    pub fn resend_failed(&mut self) {
        self.resend_in_flight = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry() -> OtpEntry {
        OtpEntry::new(OtpConfig::default())
    }

    fn fail_once(entry: &mut OtpEntry, code: &str) {
        entry.type_text(code);
        entry.submit().unwrap();
        entry.verification_failed();
    }

    #[test]
    fn test_submit_requires_complete_code() {
        let mut entry = entry();
        entry.type_text("123");
        let err = entry.submit().unwrap_err();
        assert!(err.is_validation());
        assert_eq!(entry.state(), OtpState::Entering);
    }

    #[test]
    fn test_successful_verification() {
        let mut entry = entry();
        entry.type_text("123456");
        assert_eq!(entry.submit().unwrap(), "123456");
        assert_eq!(entry.state(), OtpState::Verifying);

        entry.verification_succeeded();
        assert_eq!(entry.state(), OtpState::Verified);
    }

    #[test]
    fn test_no_double_submit_while_verifying() {
        let mut entry = entry();
        entry.type_text("123456");
        entry.submit().unwrap();
        assert!(entry.submit().is_err());
    }

    #[test]
    fn test_failure_keeps_code_below_limit() {
        let mut entry = entry();
        fail_once(&mut entry, "123456");
        assert_eq!(entry.state(), OtpState::Entering);
        assert_eq!(entry.attempts(), 1);
        assert_eq!(entry.input().code().as_deref(), Some("123456"));
    }

    #[test]
    fn test_third_failure_locks_and_clears() {
        let mut entry = entry();
        fail_once(&mut entry, "111111");
        fail_once(&mut entry, "222222");

        entry.type_text("123456");
        entry.submit().unwrap();
        entry.verification_failed();

        assert_eq!(entry.state(), OtpState::Locked);
        assert_eq!(entry.attempts(), 3);
        assert_eq!(entry.input().code(), None);
        assert!(entry.submit().is_err());

        // Keystrokes are ignored while locked
        entry.type_text("999999");
        assert_eq!(entry.input().code(), None);
    }

    #[test]
    fn test_resend_after_lock_resets_attempts_and_timer() {
        let mut entry = entry();
        for code in ["111111", "222222", "123456"] {
            fail_once(&mut entry, code);
        }
        assert_eq!(entry.state(), OtpState::Locked);
        assert!(entry.begin_resend().is_err());

        for _ in 0..120 {
            entry.tick();
        }
        entry.begin_resend().unwrap();
        entry.resend_succeeded();

        assert_eq!(entry.state(), OtpState::Entering);
        assert_eq!(entry.attempts(), 0);
        assert_eq!(entry.seconds_left(), 120);
    }

    #[test]
    fn test_countdown_gates_resend() {
        let mut entry = entry();
        assert_eq!(entry.seconds_left(), 120);

        for _ in 0..119 {
            assert!(!entry.can_resend());
            entry.tick();
        }
        assert_eq!(entry.seconds_left(), 1);
        assert!(!entry.can_resend());

        entry.tick();
        assert_eq!(entry.seconds_left(), 0);
        assert!(entry.can_resend());
    }

    #[test]
    fn test_resend_in_flight_blocks_second_resend() {
        let mut entry = entry();
        for _ in 0..120 {
            entry.tick();
        }
        entry.begin_resend().unwrap();
        assert!(!entry.can_resend());

        entry.resend_failed();
        assert!(entry.can_resend());
        assert_eq!(entry.seconds_left(), 0);
    }

    #[test]
    fn test_tick_stops_after_verified() {
        let mut entry = entry();
        entry.type_text("123456");
        entry.submit().unwrap();
        entry.verification_succeeded();

        entry.tick();
        assert_eq!(entry.seconds_left(), 120);
        assert!(!entry.can_resend());
    }

    #[test]
    fn test_custom_limits() {
        let mut entry = OtpEntry::new(OtpConfig {
            ttl_seconds: 30,
            max_attempts: 1,
        });
        assert_eq!(entry.countdown().to_string(), "0:30");
        fail_once(&mut entry, "000000");
        assert_eq!(entry.state(), OtpState::Locked);
    }
}
