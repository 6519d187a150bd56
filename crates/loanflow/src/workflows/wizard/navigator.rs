use serde::{Deserialize, Serialize};

/// The eight wizard screens in walk order. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    LoanSelection,
    BasicDetails,
    PersonalDetails,
    IncomeDetails,
    Offer,
    DocumentUpload,
    FinalApproval,
    ThankYou,
}

impl Default for WizardStep {
    fn default() -> Self {
        Self::LoanSelection
    }
}

impl WizardStep {
    pub const fn ordered() -> [Self; 8] {
        [
            Self::LoanSelection,
            Self::BasicDetails,
            Self::PersonalDetails,
            Self::IncomeDetails,
            Self::Offer,
            Self::DocumentUpload,
            Self::FinalApproval,
            Self::ThankYou,
        ]
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ordered().get(index).copied()
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::LoanSelection => "Loan Selection",
            Self::BasicDetails => "Basic Details",
            Self::PersonalDetails => "Personal Details",
            Self::IncomeDetails => "Income Details",
            Self::Offer => "Loan Offer",
            Self::DocumentUpload => "Document Upload",
            Self::FinalApproval => "Final Approval",
            Self::ThankYou => "Thank You",
        }
    }

    /// Next step in walk order, saturating on the final screen.
    pub fn next(self) -> Self {
        Self::from_index(self.index() + 1).unwrap_or(self)
    }

    /// Previous step in walk order, saturating on the opening screen.
    pub fn previous(self) -> Self {
        match self.index() {
            0 => self,
            index => Self::from_index(index - 1).unwrap_or(self),
        }
    }
}
