//! The loan application wizard: classification, document requirements,
//! visibility, step navigation, and simulated verification flows.

pub mod classification;
pub mod documents;
pub mod forms;
pub mod navigator;
pub mod offer;
pub mod otp;
pub mod session;
pub mod snapshot;
pub mod validation;
pub mod verification;
pub mod visibility;

#[cfg(test)]
mod tests;

pub use classification::{
    CategorySwitch, Classification, ClassificationError, CustomerCategory, EmploymentSubType,
    LoanProduct,
};
pub use documents::{
    all_required_satisfied, missing_documents, required_documents, DocumentKind, DocumentRecord,
    UploadedFile,
};
pub use forms::{
    BasicDetailsForm, BusinessIncomeForm, CompanyPersonalForm, DirectorEntry,
    IndividualIncomeForm, IndividualPersonalForm, ShapePair,
};
pub use navigator::WizardStep;
pub use offer::{format_inr, LoanOffer, OfferQuote};
pub use otp::{OtpChallenge, OtpError};
pub use session::{
    AdvanceError, OpenSessionError, VerificationFlowError, WizardSession,
};
pub use snapshot::{FormSnapshot, SnapshotError, SnapshotStore, STORAGE_KEY};
pub use validation::{FieldError, ValidationReport};
pub use verification::{
    generate_verification_id, CarCondition, FuelType, IncomeProofMethod, PendingVerification,
    ResolveOutcome, SimulatedBackend, SubmitError, SubmitOutcome, VerificationBackend,
    VerificationOutcome, VerificationSession,
};
pub use visibility::{
    personal_form_shape, progress_stepper_visible, visibility, FormShape, VisibilityDescriptor,
};
