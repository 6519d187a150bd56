use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::classification::{Classification, CustomerCategory};

/// Proof kinds the wizard can ask for, in their fixed presentation order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    BankStatement,
    DealerInvoice,
    IncomeProof,
    Gst,
}

impl DocumentKind {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::BankStatement,
            Self::DealerInvoice,
            Self::IncomeProof,
            Self::Gst,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::BankStatement => "Bank Statement",
            Self::DealerInvoice => "Dealer Invoice",
            Self::IncomeProof => "Income Proof Document",
            Self::Gst => "GST Certificate",
        }
    }

    /// Prefix carried by the synthetic verification identifier for this kind.
    pub const fn verification_prefix(self) -> &'static str {
        match self {
            Self::BankStatement => "BS",
            Self::DealerInvoice => "DI",
            Self::IncomeProof => "IP",
            Self::Gst => "GST",
        }
    }
}

/// File accepted by a verification session. Fetch-based methods synthesize one
/// so every verified record carries a file reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFile {
    pub name: String,
    pub size_bytes: u64,
    pub content_type: String,
}

/// Outcome of a successful verification session for one document kind.
///
/// Records exist only once verification has completed; an uploaded-but-pending
/// document never satisfies a requirement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub kind: DocumentKind,
    pub verified: bool,
    pub verification_id: String,
    pub uploaded_at: DateTime<Utc>,
    pub file: UploadedFile,
    pub metadata: BTreeMap<String, String>,
}

/// Resolve the ordered set of documents the classification requires.
///
/// Bank statement and dealer invoice are unconditional. Income proof follows
/// the customer category alone; GST follows the employment sub-type alone,
/// which is why an individual self-business applicant still owes a GST
/// certificate.
pub fn required_documents(classification: &Classification) -> Vec<DocumentKind> {
    let mut required = vec![DocumentKind::BankStatement, DocumentKind::DealerInvoice];
    if classification.category == CustomerCategory::Individual {
        required.push(DocumentKind::IncomeProof);
    }
    if classification.sub_type.requires_gst() {
        required.push(DocumentKind::Gst);
    }
    required
}

/// Required kinds that have no verified record yet, in presentation order.
pub fn missing_documents(
    classification: &Classification,
    records: &BTreeMap<DocumentKind, DocumentRecord>,
) -> Vec<DocumentKind> {
    required_documents(classification)
        .into_iter()
        .filter(|kind| !records.get(kind).is_some_and(|record| record.verified))
        .collect()
}

/// True when every required kind has a verified record. Must be re-evaluated
/// after every document change and every classification change.
pub fn all_required_satisfied(
    classification: &Classification,
    records: &BTreeMap<DocumentKind, DocumentRecord>,
) -> bool {
    missing_documents(classification, records).is_empty()
}
