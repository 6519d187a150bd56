//! Serializable image of the whole wizard and the storage contract it rides
//! on. One snapshot lives under one fixed key; saving happens on every
//! successful step advance and restoring reapplies everything, then derives
//! visibility from scratch.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::classification::{Classification, LoanProduct};
use super::documents::{DocumentKind, DocumentRecord};
use super::forms::{
    BasicDetailsForm, BusinessIncomeForm, CompanyPersonalForm, IndividualIncomeForm,
    IndividualPersonalForm, ShapePair,
};
use super::navigator::WizardStep;
use super::offer::LoanOffer;

/// The one key every snapshot is stored under.
pub const STORAGE_KEY: &str = "loan_application_data";

/// Full session image. Unknown fields in stored data are ignored and missing
/// fields fall back to defaults, so older snapshots keep loading.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormSnapshot {
    pub product: Option<LoanProduct>,
    pub classification: Classification,
    pub basic: ShapePair<BasicDetailsForm>,
    pub personal_individual: IndividualPersonalForm,
    pub personal_company: CompanyPersonalForm,
    pub income_individual: IndividualIncomeForm,
    pub income_business: BusinessIncomeForm,
    pub offer: LoanOffer,
    pub ovd_verified: bool,
    pub institution_consent_acknowledged: bool,
    pub documents: BTreeMap<DocumentKind, DocumentRecord>,
    pub step: WizardStep,
}

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("snapshot serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("snapshot store unavailable: {0}")]
    Unavailable(String),
}

/// Storage abstraction so the wizard can be exercised against an in-memory
/// store in tests and the service alike.
pub trait SnapshotStore: Send + Sync {
    fn save(&self, key: &str, snapshot: &FormSnapshot) -> Result<(), SnapshotError>;
    fn load(&self, key: &str) -> Result<Option<FormSnapshot>, SnapshotError>;
    fn clear(&self, key: &str) -> Result<(), SnapshotError>;
}
