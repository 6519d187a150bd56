use serde::{Deserialize, Serialize};

/// Whether the applicant borrows as a person or as a registered entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CustomerCategory {
    Individual,
    NonIndividual,
}

impl CustomerCategory {
    pub const fn ordered() -> [Self; 2] {
        [Self::Individual, Self::NonIndividual]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Individual => "Individual",
            Self::NonIndividual => "Non-Individual",
        }
    }
}

/// Employment sub-type offered on the selection screen. Which options are
/// offered depends on the customer category; see [`EmploymentSubType::valid_for`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentSubType {
    Salaried,
    SelfEmployed,
    SelfBusiness,
    LlpPartnership,
    PrivateLimited,
}

impl EmploymentSubType {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Salaried,
            Self::SelfEmployed,
            Self::SelfBusiness,
            Self::LlpPartnership,
            Self::PrivateLimited,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Salaried => "Salaried",
            Self::SelfEmployed => "Self-Employed",
            Self::SelfBusiness => "Self-Business",
            Self::LlpPartnership => "LLP/Partnership",
            Self::PrivateLimited => "Private Limited",
        }
    }

    /// Entity sub-types belong to non-individual customers; everything else
    /// belongs to individuals.
    pub const fn valid_for(self, category: CustomerCategory) -> bool {
        let entity = matches!(self, Self::LlpPartnership | Self::PrivateLimited);
        match category {
            CustomerCategory::Individual => !entity,
            CustomerCategory::NonIndividual => entity,
        }
    }

    /// First option shown for the category, adopted whenever a category switch
    /// filters out the active selection.
    pub const fn first_valid(category: CustomerCategory) -> Self {
        match category {
            CustomerCategory::Individual => Self::Salaried,
            CustomerCategory::NonIndividual => Self::LlpPartnership,
        }
    }

    pub fn options_for(category: CustomerCategory) -> Vec<Self> {
        Self::ordered()
            .into_iter()
            .filter(|sub_type| sub_type.valid_for(category))
            .collect()
    }

    /// True for the sub-types that run a GST-registered business.
    pub const fn requires_gst(self) -> bool {
        matches!(
            self,
            Self::SelfBusiness | Self::LlpPartnership | Self::PrivateLimited
        )
    }
}

/// Product chosen on the opening screen. Only the vehicle product reveals the
/// employment sub-type selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanProduct {
    Vehicle,
    Personal,
    Business,
}

impl LoanProduct {
    pub const fn ordered() -> [Self; 3] {
        [Self::Vehicle, Self::Personal, Self::Business]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Vehicle => "Vehicle Loan",
            Self::Personal => "Personal Loan",
            Self::Business => "Business Loan",
        }
    }

    pub const fn reveals_sub_type(self) -> bool {
        matches!(self, Self::Vehicle)
    }
}

/// The two orthogonal choices every downstream derivation keys off.
///
/// The struct itself is plain data and can represent any pairing, so the pure
/// resolvers stay total; the mutators enforce the category/sub-type pairing
/// rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub category: CustomerCategory,
    pub sub_type: EmploymentSubType,
}

impl Default for Classification {
    fn default() -> Self {
        Self {
            category: CustomerCategory::Individual,
            sub_type: EmploymentSubType::Salaried,
        }
    }
}

/// Result of a category switch, reporting whether the active sub-type had to
/// be replaced by the first option valid for the new category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategorySwitch {
    pub category: CustomerCategory,
    pub coerced_sub_type: Option<EmploymentSubType>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ClassificationError {
    #[error("{} is not offered for {} customers", .sub_type.label(), .category.label())]
    SubTypeNotOffered {
        category: CustomerCategory,
        sub_type: EmploymentSubType,
    },
}

impl Classification {
    pub fn new(category: CustomerCategory, sub_type: EmploymentSubType) -> Self {
        Self { category, sub_type }
    }

    /// Switch the customer category. An active sub-type that the new category
    /// does not offer is replaced by [`EmploymentSubType::first_valid`]; the
    /// replacement is surfaced so a caller can notify the user.
    pub fn set_category(&mut self, category: CustomerCategory) -> CategorySwitch {
        self.category = category;
        let coerced_sub_type = if self.sub_type.valid_for(category) {
            None
        } else {
            let fallback = EmploymentSubType::first_valid(category);
            self.sub_type = fallback;
            Some(fallback)
        };
        CategorySwitch {
            category,
            coerced_sub_type,
        }
    }

    /// Select an employment sub-type. Selections outside the category's
    /// offered set are rejected and leave the classification unchanged.
    pub fn set_sub_type(&mut self, sub_type: EmploymentSubType) -> Result<(), ClassificationError> {
        if !sub_type.valid_for(self.category) {
            return Err(ClassificationError::SubTypeNotOffered {
                category: self.category,
                sub_type,
            });
        }
        self.sub_type = sub_type;
        Ok(())
    }
}
