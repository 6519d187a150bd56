//! Simulated one-time-password challenge backing the OVD verification flag.
//! No SMS leaves the system: any six-digit code is accepted once a challenge
//! is open, matching the demo behavior of the front end.

use chrono::{DateTime, Utc};
use std::time::Duration;

use super::validation::valid_mobile;

/// Seconds the applicant must wait before a resend is offered.
pub const RESEND_WINDOW_SECONDS: i64 = 120;
/// Simulated delivery delay for the initial send and every resend.
pub const SEND_DELAY: Duration = Duration::from_millis(1000);
/// Simulated upstream check before a code is accepted.
pub const VERIFY_DELAY: Duration = Duration::from_millis(1500);

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum OtpError {
    #[error("Please enter a valid 10-digit mobile number")]
    InvalidMobile,
    #[error("Please enter all 6 digits of the OTP")]
    IncompleteCode,
    #[error("OTP must be 6 digits only")]
    NonNumericCode,
    #[error("Resend becomes available once the current window expires")]
    ResendNotReady,
    #[error("No OTP has been sent yet")]
    NoChallenge,
}

/// An open challenge for one mobile number. Dropping the challenge (closing
/// the modal) discards it without marking anything verified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpChallenge {
    mobile: String,
    issued_at: DateTime<Utc>,
}

impl OtpChallenge {
    pub fn send(mobile: &str, now: DateTime<Utc>) -> Result<Self, OtpError> {
        if !valid_mobile(mobile.trim()) {
            return Err(OtpError::InvalidMobile);
        }
        Ok(Self {
            mobile: mobile.trim().to_owned(),
            issued_at: now,
        })
    }

    pub fn mobile(&self) -> &str {
        &self.mobile
    }

    /// Seconds left on the resend window, clamped at zero.
    pub fn seconds_remaining(&self, now: DateTime<Utc>) -> i64 {
        let elapsed = (now - self.issued_at).num_seconds();
        (RESEND_WINDOW_SECONDS - elapsed).max(0)
    }

    pub fn can_resend(&self, now: DateTime<Utc>) -> bool {
        self.seconds_remaining(now) == 0
    }

    /// Restart the window for a fresh code on the same number.
    pub fn resend(&mut self, now: DateTime<Utc>) -> Result<(), OtpError> {
        if !self.can_resend(now) {
            return Err(OtpError::ResendNotReady);
        }
        self.issued_at = now;
        Ok(())
    }

    /// Accept any six-digit code; the shape is checked, the value is not.
    pub fn verify(&self, code: &str) -> Result<(), OtpError> {
        let code = code.trim();
        if code.len() != 6 {
            return Err(OtpError::IncompleteCode);
        }
        if !code.bytes().all(|b| b.is_ascii_digit()) {
            return Err(OtpError::NonNumericCode);
        }
        Ok(())
    }
}
