//! The owned wizard session: one applicant's classification, form state,
//! offer, documents, and step position, plus the transient OTP challenge and
//! the single open verification session. All derived state (visibility,
//! required documents) is recomputed on demand so mutations can never leave a
//! stale descriptor behind.

use chrono::{DateTime, Utc};

use super::classification::{
    CategorySwitch, Classification, ClassificationError, CustomerCategory, EmploymentSubType,
    LoanProduct,
};
use super::documents::{
    all_required_satisfied, missing_documents, required_documents, DocumentKind, DocumentRecord,
};
use super::forms::{
    BasicDetailsForm, BusinessIncomeForm, CompanyPersonalForm, IndividualIncomeForm,
    IndividualPersonalForm,
};
use super::navigator::WizardStep;
use super::offer::{LoanOffer, OfferQuote};
use super::otp::{OtpChallenge, OtpError};
use super::snapshot::{FormSnapshot, SnapshotError, SnapshotStore, STORAGE_KEY};
use super::validation::ValidationReport;
use super::verification::{
    ResolveOutcome, SubmitError, SubmitOutcome, VerificationOutcome, VerificationSession,
};
use super::visibility::{visibility, FormShape, VisibilityDescriptor};

use std::collections::BTreeMap;

/// A step advance that could not happen.
#[derive(Debug, thiserror::Error)]
pub enum AdvanceError {
    #[error("the current step has unresolved validation errors")]
    Blocked(ValidationReport),
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum OpenSessionError {
    #[error("{} is not required for this application", .kind.label())]
    NotRequired { kind: DocumentKind },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VerificationFlowError {
    #[error("no verification session is open")]
    NoOpenSession,
    #[error(transparent)]
    Submit(#[from] SubmitError),
}

#[derive(Debug, Default)]
pub struct WizardSession {
    state: FormSnapshot,
    open_verification: Option<VerificationSession>,
    otp: Option<OtpChallenge>,
}

impl WizardSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a session from a stored snapshot. Field values come back as
    /// saved; an out-of-category sub-type is coerced to the first offered
    /// option and the walk restarts at the opening screen, with every derived
    /// descriptor recomputed from the restored classification.
    pub fn restore(mut snapshot: FormSnapshot) -> Self {
        if !snapshot
            .classification
            .sub_type
            .valid_for(snapshot.classification.category)
        {
            snapshot.classification.sub_type =
                EmploymentSubType::first_valid(snapshot.classification.category);
        }
        snapshot.step = WizardStep::LoanSelection;
        Self {
            state: snapshot,
            open_verification: None,
            otp: None,
        }
    }

    /// Load the stored snapshot under the fixed key, or start fresh.
    pub fn load_or_default(store: &dyn SnapshotStore) -> Result<Self, SnapshotError> {
        Ok(match store.load(STORAGE_KEY)? {
            Some(snapshot) => Self::restore(snapshot),
            None => Self::new(),
        })
    }

    pub fn snapshot(&self) -> &FormSnapshot {
        &self.state
    }

    pub fn persist(&self, store: &dyn SnapshotStore) -> Result<(), SnapshotError> {
        store.save(STORAGE_KEY, &self.state)
    }

    /// Clear stored state and return every field to its starting value.
    pub fn reset(&mut self, store: &dyn SnapshotStore) -> Result<(), SnapshotError> {
        store.clear(STORAGE_KEY)?;
        self.state = FormSnapshot::default();
        self.open_verification = None;
        self.otp = None;
        Ok(())
    }

    // --- classification -----------------------------------------------------

    pub fn classification(&self) -> &Classification {
        &self.state.classification
    }

    pub fn product(&self) -> Option<LoanProduct> {
        self.state.product
    }

    pub fn select_product(&mut self, product: LoanProduct) {
        self.state.product = Some(product);
    }

    pub fn set_customer_category(&mut self, category: CustomerCategory) -> CategorySwitch {
        self.state.classification.set_category(category)
    }

    pub fn set_employment_sub_type(
        &mut self,
        sub_type: EmploymentSubType,
    ) -> Result<(), ClassificationError> {
        self.state.classification.set_sub_type(sub_type)
    }

    // --- derived descriptors ------------------------------------------------

    pub fn visibility(&self) -> VisibilityDescriptor {
        visibility(&self.state.classification)
    }

    pub fn required_documents(&self) -> Vec<DocumentKind> {
        required_documents(&self.state.classification)
    }

    pub fn missing_documents(&self) -> Vec<DocumentKind> {
        missing_documents(&self.state.classification, &self.state.documents)
    }

    pub fn all_required_satisfied(&self) -> bool {
        all_required_satisfied(&self.state.classification, &self.state.documents)
    }

    // --- form access --------------------------------------------------------

    /// The basic-details form for the currently visible shape.
    pub fn basic_form_mut(&mut self) -> &mut BasicDetailsForm {
        let shape = self.visibility().basic_form;
        self.state.basic.active_mut(shape)
    }

    pub fn personal_individual_mut(&mut self) -> &mut IndividualPersonalForm {
        &mut self.state.personal_individual
    }

    pub fn personal_company_mut(&mut self) -> &mut CompanyPersonalForm {
        &mut self.state.personal_company
    }

    pub fn income_individual_mut(&mut self) -> &mut IndividualIncomeForm {
        &mut self.state.income_individual
    }

    pub fn income_business_mut(&mut self) -> &mut BusinessIncomeForm {
        &mut self.state.income_business
    }

    pub fn offer_mut(&mut self) -> &mut LoanOffer {
        &mut self.state.offer
    }

    pub fn offer_quote(&self) -> OfferQuote {
        self.state.offer.quote()
    }

    pub fn documents(&self) -> &BTreeMap<DocumentKind, DocumentRecord> {
        &self.state.documents
    }

    pub fn documents_mut(&mut self) -> &mut BTreeMap<DocumentKind, DocumentRecord> {
        &mut self.state.documents
    }

    // --- OTP / consent flags ------------------------------------------------

    pub fn ovd_verified(&self) -> bool {
        self.state.ovd_verified
    }

    /// Open an OTP challenge for the mobile number on the visible basic form.
    pub fn request_otp(&mut self, now: DateTime<Utc>) -> Result<&OtpChallenge, OtpError> {
        let shape = self.visibility().basic_form;
        let mobile = self.state.basic.active(shape).mobile.clone();
        let challenge = OtpChallenge::send(&mobile, now)?;
        Ok(self.otp.insert(challenge))
    }

    pub fn otp_challenge(&self) -> Option<&OtpChallenge> {
        self.otp.as_ref()
    }

    pub fn resend_otp(&mut self, now: DateTime<Utc>) -> Result<(), OtpError> {
        self.otp
            .as_mut()
            .ok_or(OtpError::NoChallenge)?
            .resend(now)
    }

    /// A correct code marks the applicant's OVD details verified and closes
    /// the challenge.
    pub fn verify_otp(&mut self, code: &str) -> Result<(), OtpError> {
        self.otp
            .as_ref()
            .ok_or(OtpError::NoChallenge)?
            .verify(code)?;
        self.otp = None;
        self.state.ovd_verified = true;
        Ok(())
    }

    /// Closing the OTP modal abandons the challenge without setting the flag.
    pub fn dismiss_otp(&mut self) {
        self.otp = None;
    }

    pub fn acknowledge_institution_consent(&mut self) {
        self.state.institution_consent_acknowledged = true;
    }

    // --- step navigation ----------------------------------------------------

    pub fn step(&self) -> WizardStep {
        self.state.step
    }

    /// Validate the current step, persist, and move forward. Entering the
    /// offer screen refreshes the quote from the requested loan amount with
    /// defaults substituted for anything missing or invalid.
    pub fn advance(&mut self, store: &dyn SnapshotStore) -> Result<WizardStep, AdvanceError> {
        let report = self.validate_current_step();
        if !report.is_valid() {
            return Err(AdvanceError::Blocked(report));
        }
        self.persist(store)?;
        let next = self.state.step.next();
        if next == WizardStep::Offer {
            self.refresh_offer();
        }
        self.state.step = next;
        Ok(next)
    }

    /// Move back one step with no validation, stopping at the opening screen.
    pub fn retreat(&mut self) -> WizardStep {
        self.state.step = self.state.step.previous();
        self.state.step
    }

    /// Outside navigation link: jump ahead to document upload, never backward.
    pub fn jump_to_document_upload(&mut self) -> WizardStep {
        if self.state.step < WizardStep::DocumentUpload {
            self.state.step = WizardStep::DocumentUpload;
        }
        self.state.step
    }

    /// Outside navigation link: land on the final approval screen.
    pub fn jump_to_final_approval(&mut self) -> WizardStep {
        self.state.step = WizardStep::FinalApproval;
        self.state.step
    }

    pub fn validate_current_step(&self) -> ValidationReport {
        let mut report = ValidationReport::default();
        let shapes = self.visibility();
        match self.state.step {
            WizardStep::LoanSelection => {
                if self.state.product.is_none() {
                    report.form("Please select a loan type to continue");
                }
            }
            WizardStep::BasicDetails => {
                self.state
                    .basic
                    .active(shapes.basic_form)
                    .validate(self.state.ovd_verified, &mut report);
            }
            WizardStep::PersonalDetails => match shapes.personal_form {
                FormShape::Individual => self
                    .state
                    .personal_individual
                    .validate(self.state.institution_consent_acknowledged, &mut report),
                FormShape::NonIndividual => self
                    .state
                    .personal_company
                    .validate(self.state.institution_consent_acknowledged, &mut report),
            },
            WizardStep::IncomeDetails => match shapes.income_form {
                FormShape::Individual => self.state.income_individual.validate(&mut report),
                FormShape::NonIndividual => self.state.income_business.validate(&mut report),
            },
            WizardStep::Offer => {}
            WizardStep::DocumentUpload => {
                let missing = self.missing_documents();
                if !missing.is_empty() {
                    let names: Vec<&str> =
                        missing.iter().map(|kind| kind.label()).collect();
                    report.form(format!(
                        "Please verify all required documents. Missing: {}",
                        names.join(", ")
                    ));
                }
            }
            WizardStep::FinalApproval | WizardStep::ThankYou => {}
        }
        report
    }

    fn refresh_offer(&mut self) {
        let shape = self.visibility().basic_form;
        if let Some(amount) = self.state.basic.active(shape).loan_amount {
            self.state.offer.principal = amount;
        }
        self.state.offer = self.state.offer.sanitized();
    }

    // --- document verification ----------------------------------------------

    /// Open a verification session for a required document kind. Any other
    /// open session is closed first and its partial state discarded; only one
    /// verification popup exists at a time.
    pub fn open_document_verification(
        &mut self,
        kind: DocumentKind,
    ) -> Result<&mut VerificationSession, OpenSessionError> {
        if !self.required_documents().contains(&kind) {
            return Err(OpenSessionError::NotRequired { kind });
        }
        let session = VerificationSession::open(kind, self.state.classification.category);
        Ok(self.open_verification.insert(session))
    }

    pub fn open_session(&self) -> Option<&VerificationSession> {
        self.open_verification.as_ref()
    }

    pub fn open_session_mut(&mut self) -> Option<&mut VerificationSession> {
        self.open_verification.as_mut()
    }

    /// Closing the popup discards any attached file, chosen method, and
    /// entered metadata. A record verified earlier for the same kind stays.
    pub fn cancel_verification(&mut self) {
        self.open_verification = None;
    }

    /// Submit the open session. A pre-owned dealer invoice closes the session
    /// with a branch referral and never produces a record.
    pub fn submit_verification(&mut self) -> Result<SubmitOutcome, VerificationFlowError> {
        let session = self
            .open_verification
            .as_mut()
            .ok_or(VerificationFlowError::NoOpenSession)?;
        let outcome = session.submit()?;
        if matches!(outcome, SubmitOutcome::BranchReferral { .. }) {
            self.open_verification = None;
        }
        Ok(outcome)
    }

    /// Deliver a backend outcome for a pending submission. A completion whose
    /// token no longer matches (the popup was closed in the meantime) is
    /// stale and changes nothing.
    pub fn resolve_verification(
        &mut self,
        token: u64,
        outcome: VerificationOutcome,
        now: DateTime<Utc>,
    ) -> ResolveOutcome {
        let Some(session) = self.open_verification.as_mut() else {
            return ResolveOutcome::Stale;
        };
        let resolved = session.resolve(token, outcome, now);
        if let ResolveOutcome::Completed(record) = &resolved {
            self.state.documents.insert(record.kind, record.clone());
            self.open_verification = None;
        }
        resolved
    }
}
