//! Method selection rules and metadata field requirements per document kind.
//! The concrete widgets are a front-end concern; the session only cares which
//! method is chosen, whether it takes a file or credentials, and which fields
//! must be non-empty before submission.

use serde::{Deserialize, Serialize};

use super::super::classification::CustomerCategory;
use super::super::documents::DocumentKind;

/// Income proof can be satisfied several ways; the offered set depends on the
/// customer category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncomeProofMethod {
    SalarySlip,
    ItrUpload,
    ItrFetch,
    FinancialStatements,
    CaCertificate,
}

impl IncomeProofMethod {
    pub const fn label(self) -> &'static str {
        match self {
            Self::SalarySlip => "Salary Slip (3 months)",
            Self::ItrUpload => "ITR Upload (3 years)",
            Self::ItrFetch => "Fetch ITR from Portal",
            Self::FinancialStatements => "Financial Statements",
            Self::CaCertificate => "CA Certificate & Balance Sheet",
        }
    }

    pub fn offered_for(category: CustomerCategory) -> Vec<Self> {
        match category {
            CustomerCategory::Individual => {
                vec![Self::SalarySlip, Self::ItrUpload, Self::ItrFetch]
            }
            CustomerCategory::NonIndividual => vec![
                Self::ItrUpload,
                Self::ItrFetch,
                Self::FinancialStatements,
                Self::CaCertificate,
            ],
        }
    }

    /// Fetch-based methods take portal credentials instead of a file.
    pub const fn requires_file(self) -> bool {
        !matches!(self, Self::ItrFetch)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CarCondition {
    PreOwned,
    New,
}

impl CarCondition {
    pub const fn label(self) -> &'static str {
        match self {
            Self::PreOwned => "Pre-owned",
            Self::New => "New Car",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FuelType {
    PetrolDiesel,
    Electric,
}

impl FuelType {
    pub const fn label(self) -> &'static str {
        match self {
            Self::PetrolDiesel => "Petrol/Diesel",
            Self::Electric => "EV (Electric Vehicle)",
        }
    }
}

/// The resolved method for an open session. Bank statement and GST have a
/// single implicit path, so they start out already selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodSelection {
    Standard,
    Income(IncomeProofMethod),
    Dealer {
        condition: CarCondition,
        fuel: Option<FuelType>,
    },
}

impl MethodSelection {
    pub fn requires_file(&self) -> bool {
        match self {
            Self::Standard => true,
            Self::Income(method) => method.requires_file(),
            Self::Dealer { .. } => true,
        }
    }
}

/// Metadata fields that must be non-empty before the session may submit, for
/// the given kind, method, and customer category.
pub fn required_fields(
    kind: DocumentKind,
    method: &MethodSelection,
    category: CustomerCategory,
) -> &'static [&'static str] {
    match (kind, method) {
        (DocumentKind::BankStatement, _) => {
            &["account_number", "bank_name", "ifsc_code", "account_type"]
        }
        (DocumentKind::Gst, _) => &[
            "gst_number",
            "business_name",
            "registration_date",
            "business_type",
        ],
        (DocumentKind::DealerInvoice, _) => &[
            "dealer_address",
            "invoice_date",
            "ex_showroom_cost",
            "registration",
            "insurance",
            "discount",
            "exchange_amount",
            "accessories",
            "other_taxes",
            "installation_fee",
            "total_invoice_value",
        ],
        (DocumentKind::IncomeProof, MethodSelection::Income(method)) => match method {
            IncomeProofMethod::SalarySlip | IncomeProofMethod::ItrUpload => match category {
                CustomerCategory::Individual => &["gross_annual_income", "net_annual_income"],
                CustomerCategory::NonIndividual => &[
                    "business_turnover",
                    "net_business_income",
                    "business_type",
                    "years_in_business",
                ],
            },
            IncomeProofMethod::ItrFetch => match category {
                CustomerCategory::Individual => &["user_id", "password"],
                CustomerCategory::NonIndividual => &["user_id", "password", "assessment_year"],
            },
            IncomeProofMethod::FinancialStatements => &["financial_year"],
            IncomeProofMethod::CaCertificate => &["ca_registration_number", "certificate_date"],
        },
        // An income-proof session without an income method never reaches the
        // field check; submit rejects it first.
        (DocumentKind::IncomeProof, _) => &[],
    }
}
