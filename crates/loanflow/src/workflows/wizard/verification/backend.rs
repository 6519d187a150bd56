//! Hook between a pending session and whatever performs the actual check.
//! The bundled backend is a stand-in: it waits a fixed delay and always
//! verifies. A real integration would return failures and timeouts through
//! the same outcome type.

use std::time::Duration;

use rand::Rng;

use super::super::documents::DocumentKind;

/// Delay before a submitted document flips to verified.
pub const SIMULATED_VERIFICATION_DELAY: Duration = Duration::from_millis(2000);

/// Result delivered for a pending verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationOutcome {
    Verified { verification_id: String },
    Failed { reason: String },
    TimedOut,
}

pub trait VerificationBackend: Send + Sync {
    /// How long the caller should wait before asking for the outcome.
    fn latency(&self) -> Duration;

    /// Produce the outcome for a submitted document.
    fn verify(&self, kind: DocumentKind) -> VerificationOutcome;
}

/// Kind prefix plus a zero-padded random six-digit number, e.g. `BS042917`.
pub fn generate_verification_id(kind: DocumentKind) -> String {
    let suffix: u32 = rand::thread_rng().gen_range(0..1_000_000);
    format!("{}{suffix:06}", kind.verification_prefix())
}

/// Backend that verifies everything after a fixed pause.
#[derive(Debug, Clone)]
pub struct SimulatedBackend {
    latency: Duration,
}

impl SimulatedBackend {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }
}

impl Default for SimulatedBackend {
    fn default() -> Self {
        Self::new(SIMULATED_VERIFICATION_DELAY)
    }
}

impl VerificationBackend for SimulatedBackend {
    fn latency(&self) -> Duration {
        self.latency
    }

    fn verify(&self, kind: DocumentKind) -> VerificationOutcome {
        VerificationOutcome::Verified {
            verification_id: generate_verification_id(kind),
        }
    }
}
