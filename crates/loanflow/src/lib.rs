//! Loan application wizard engine.
//!
//! The wizard domain lives under [`workflows::wizard`]: an owned session object
//! tracks the applicant's classification, the per-step form state, simulated
//! OTP and document verification, and the step machine that gates progress.
//! Everything derived from the classification (form shapes, required
//! documents) is recomputed through pure resolver functions rather than
//! cached, so callers can never observe stale visibility.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
