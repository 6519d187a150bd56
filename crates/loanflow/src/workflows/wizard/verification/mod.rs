//! Per-document verification sessions.
//!
//! Each required document runs its own little workflow: pick a method where
//! the kind offers more than one, fill the method's metadata, attach a PDF
//! (or credentials for fetch-based methods), submit, and wait out the
//! simulated check. Sessions are independent; the owning wizard session keeps
//! at most one open at a time.

pub mod backend;
pub mod methods;

pub use backend::{
    generate_verification_id, SimulatedBackend, VerificationBackend, VerificationOutcome,
    SIMULATED_VERIFICATION_DELAY,
};
pub use methods::{CarCondition, FuelType, IncomeProofMethod, MethodSelection};

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use chrono::{DateTime, Utc};

use super::classification::CustomerCategory;
use super::documents::{DocumentKind, DocumentRecord, UploadedFile};
use methods::required_fields;

/// Upload ceiling enforced on attach.
pub const MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;
/// Only PDF uploads are accepted.
pub const PDF_CONTENT_TYPE: &str = "application/pdf";
/// Message shown when a pre-owned dealer invoice ends the session.
pub const PRE_OWNED_REFERRAL: &str =
    "For pre-owned cars, please contact your nearest branch for further assistance.";

const FETCHED_ITR_FILE_NAME: &str = "ITR_Fetched_Data.pdf";

static PENDING_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_pending_token() -> u64 {
    PENDING_SEQUENCE.fetch_add(1, Ordering::Relaxed)
}

/// Where the session currently sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Collecting,
    Pending { token: u64 },
}

/// Errors from method selection and data entry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("{method:?} is not offered to this applicant")]
    MethodNotOffered { method: IncomeProofMethod },
    #[error("this selection does not apply to a {kind:?} session")]
    WrongKind { kind: DocumentKind },
    #[error("fuel type only applies to new cars")]
    FuelNotApplicable,
    #[error("verification is already in progress")]
    VerificationInProgress,
}

/// Errors from attaching a file; the session state is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AttachError {
    #[error("File size should not exceed 5MB")]
    TooLarge { size_bytes: u64 },
    #[error("Please upload a PDF file only")]
    UnsupportedType { content_type: String },
    #[error("verification is already in progress")]
    VerificationInProgress,
}

/// Errors from submitting for verification.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    #[error("Please select a car type (Pre-owned or New Car)")]
    CarConditionRequired,
    #[error("Please select a fuel type")]
    FuelTypeRequired,
    #[error("Please select an income proof method")]
    MethodRequired,
    #[error("Please upload a PDF file first")]
    FileRequired,
    #[error("Please fill all required fields")]
    MissingFields { fields: Vec<&'static str> },
    #[error("verification is already in progress")]
    AlreadyPending,
}

/// A successful submission: the caller schedules the backend after `delay`
/// and resolves with the token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingVerification {
    pub kind: DocumentKind,
    pub token: u64,
    pub delay: Duration,
}

/// What a submission produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Pending(PendingVerification),
    /// Pre-owned dealer invoices end here: the session closes with a referral
    /// message and no record is ever produced.
    BranchReferral {
        message: &'static str,
    },
}

/// What resolving a pending verification produced.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolveOutcome {
    Completed(DocumentRecord),
    Rejected { reason: String },
    /// The token no longer matches an open pending submission; the completion
    /// arrived after a cancel and is ignored.
    Stale,
}

/// Workflow state for one document kind.
#[derive(Debug, Clone, PartialEq)]
pub struct VerificationSession {
    kind: DocumentKind,
    category: CustomerCategory,
    method: Option<MethodSelection>,
    fields: BTreeMap<String, String>,
    file: Option<UploadedFile>,
    phase: SessionPhase,
}

impl VerificationSession {
    /// Open a session. Kinds with a single verification path start with the
    /// method already selected.
    pub fn open(kind: DocumentKind, category: CustomerCategory) -> Self {
        let method = match kind {
            DocumentKind::BankStatement | DocumentKind::Gst => Some(MethodSelection::Standard),
            DocumentKind::IncomeProof | DocumentKind::DealerInvoice => None,
        };
        Self {
            kind,
            category,
            method,
            fields: BTreeMap::new(),
            file: None,
            phase: SessionPhase::Collecting,
        }
    }

    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn method(&self) -> Option<&MethodSelection> {
        self.method.as_ref()
    }

    pub fn attached_file(&self) -> Option<&UploadedFile> {
        self.file.as_ref()
    }

    /// Income methods offered to this applicant.
    pub fn offered_income_methods(&self) -> Vec<IncomeProofMethod> {
        IncomeProofMethod::offered_for(self.category)
    }

    pub fn choose_income_method(&mut self, method: IncomeProofMethod) -> Result<(), SessionError> {
        self.ensure_collecting()?;
        if self.kind != DocumentKind::IncomeProof {
            return Err(SessionError::WrongKind { kind: self.kind });
        }
        if !IncomeProofMethod::offered_for(self.category).contains(&method) {
            return Err(SessionError::MethodNotOffered { method });
        }
        self.method = Some(MethodSelection::Income(method));
        Ok(())
    }

    /// Picking a condition clears any fuel choice, mirroring the radio reset
    /// when the applicant flips between new and pre-owned.
    pub fn choose_car_condition(&mut self, condition: CarCondition) -> Result<(), SessionError> {
        self.ensure_collecting()?;
        if self.kind != DocumentKind::DealerInvoice {
            return Err(SessionError::WrongKind { kind: self.kind });
        }
        self.method = Some(MethodSelection::Dealer {
            condition,
            fuel: None,
        });
        Ok(())
    }

    pub fn choose_fuel_type(&mut self, fuel: FuelType) -> Result<(), SessionError> {
        self.ensure_collecting()?;
        match self.method {
            Some(MethodSelection::Dealer {
                condition: CarCondition::New,
                ..
            }) => {
                self.method = Some(MethodSelection::Dealer {
                    condition: CarCondition::New,
                    fuel: Some(fuel),
                });
                Ok(())
            }
            _ => Err(SessionError::FuelNotApplicable),
        }
    }

    pub fn set_field(&mut self, name: &str, value: &str) -> Result<(), SessionError> {
        self.ensure_collecting()?;
        self.fields.insert(name.to_owned(), value.to_owned());
        Ok(())
    }

    /// Attach the document file. Oversized or non-PDF files abort the attach
    /// and leave any previously attached file in place.
    pub fn attach_file(&mut self, file: UploadedFile) -> Result<(), AttachError> {
        if matches!(self.phase, SessionPhase::Pending { .. }) {
            return Err(AttachError::VerificationInProgress);
        }
        if file.size_bytes > MAX_UPLOAD_BYTES {
            return Err(AttachError::TooLarge {
                size_bytes: file.size_bytes,
            });
        }
        if file.content_type != PDF_CONTENT_TYPE {
            return Err(AttachError::UnsupportedType {
                content_type: file.content_type,
            });
        }
        self.file = Some(file);
        Ok(())
    }

    /// Submit for verification. On success the session parks in the pending
    /// phase until [`VerificationSession::resolve`] is called with the token.
    pub fn submit(&mut self) -> Result<SubmitOutcome, SubmitError> {
        if matches!(self.phase, SessionPhase::Pending { .. }) {
            return Err(SubmitError::AlreadyPending);
        }

        let method = match self.method {
            Some(method) => method,
            None if self.kind == DocumentKind::DealerInvoice => {
                return Err(SubmitError::CarConditionRequired)
            }
            None => return Err(SubmitError::MethodRequired),
        };

        if let MethodSelection::Dealer { condition, fuel } = method {
            if condition == CarCondition::PreOwned {
                return Ok(SubmitOutcome::BranchReferral {
                    message: PRE_OWNED_REFERRAL,
                });
            }
            if fuel.is_none() {
                return Err(SubmitError::FuelTypeRequired);
            }
        }

        if method.requires_file() && self.file.is_none() {
            return Err(SubmitError::FileRequired);
        }

        let missing: Vec<&'static str> = required_fields(self.kind, &method, self.category)
            .iter()
            .copied()
            .filter(|field| {
                !self
                    .fields
                    .get(*field)
                    .is_some_and(|value| !value.trim().is_empty())
            })
            .collect();
        if !missing.is_empty() {
            return Err(SubmitError::MissingFields { fields: missing });
        }

        let token = next_pending_token();
        self.phase = SessionPhase::Pending { token };
        Ok(SubmitOutcome::Pending(PendingVerification {
            kind: self.kind,
            token,
            delay: SIMULATED_VERIFICATION_DELAY,
        }))
    }

    /// Apply the backend outcome for a pending submission. Completions whose
    /// token no longer matches are reported stale and change nothing.
    pub fn resolve(
        &mut self,
        token: u64,
        outcome: VerificationOutcome,
        now: DateTime<Utc>,
    ) -> ResolveOutcome {
        match self.phase {
            SessionPhase::Pending { token: current } if current == token => {}
            _ => return ResolveOutcome::Stale,
        }

        match outcome {
            VerificationOutcome::Verified { verification_id } => {
                let record = self.build_record(verification_id, now);
                ResolveOutcome::Completed(record)
            }
            VerificationOutcome::Failed { reason } => {
                self.phase = SessionPhase::Collecting;
                ResolveOutcome::Rejected { reason }
            }
            VerificationOutcome::TimedOut => {
                self.phase = SessionPhase::Collecting;
                ResolveOutcome::Rejected {
                    reason: "verification timed out".to_owned(),
                }
            }
        }
    }

    fn ensure_collecting(&self) -> Result<(), SessionError> {
        match self.phase {
            SessionPhase::Collecting => Ok(()),
            SessionPhase::Pending { .. } => Err(SessionError::VerificationInProgress),
        }
    }

    fn build_record(&self, verification_id: String, now: DateTime<Utc>) -> DocumentRecord {
        let mut metadata = self.fields.clone();
        match self.method {
            Some(MethodSelection::Income(method)) => {
                metadata.insert("method".to_owned(), method.label().to_owned());
            }
            Some(MethodSelection::Dealer { condition, fuel }) => {
                metadata.insert("car_condition".to_owned(), condition.label().to_owned());
                if let Some(fuel) = fuel {
                    metadata.insert("fuel_type".to_owned(), fuel.label().to_owned());
                }
            }
            _ => {}
        }

        // Fetch-based methods never attached a file; the record carries a
        // synthetic reference to the fetched statement instead.
        let file = self.file.clone().unwrap_or(UploadedFile {
            name: FETCHED_ITR_FILE_NAME.to_owned(),
            size_bytes: 1024,
            content_type: PDF_CONTENT_TYPE.to_owned(),
        });

        DocumentRecord {
            kind: self.kind,
            verified: true,
            verification_id,
            uploaded_at: now,
            file,
            metadata,
        }
    }
}
