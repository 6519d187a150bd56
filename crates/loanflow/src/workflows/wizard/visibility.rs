use serde::Serialize;

use super::classification::{Classification, CustomerCategory, EmploymentSubType};
use super::documents::{required_documents, DocumentKind};
use super::navigator::WizardStep;

/// Which of the two field layouts a form region renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormShape {
    Individual,
    NonIndividual,
}

/// Everything the front end needs to know about which regions, options, and
/// document slots apply to a classification. Derived, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VisibilityDescriptor {
    pub basic_form: FormShape,
    pub personal_form: FormShape,
    pub income_form: FormShape,
    pub sub_type_options: Vec<EmploymentSubType>,
    pub document_list: Vec<DocumentKind>,
}

const fn category_shape(category: CustomerCategory) -> FormShape {
    match category {
        CustomerCategory::Individual => FormShape::Individual,
        CustomerCategory::NonIndividual => FormShape::NonIndividual,
    }
}

/// Shape of the personal-details form.
///
/// This is the one region that does not follow the plain category split:
/// individual customers who are partners or directors fill the company-shaped
/// personal form while remaining individual for income and document purposes.
pub const fn personal_form_shape(classification: &Classification) -> FormShape {
    match classification.category {
        CustomerCategory::NonIndividual => FormShape::NonIndividual,
        CustomerCategory::Individual => match classification.sub_type {
            EmploymentSubType::LlpPartnership | EmploymentSubType::PrivateLimited => {
                FormShape::NonIndividual
            }
            _ => FormShape::Individual,
        },
    }
}

/// Compute the full visibility descriptor for a classification.
///
/// Pure and idempotent: the same classification always yields the same
/// descriptor, and basic/income forms key off the category alone while the
/// personal form applies the compound rule above.
pub fn visibility(classification: &Classification) -> VisibilityDescriptor {
    let shape = category_shape(classification.category);
    VisibilityDescriptor {
        basic_form: shape,
        personal_form: personal_form_shape(classification),
        income_form: shape,
        sub_type_options: EmploymentSubType::options_for(classification.category),
        document_list: required_documents(classification),
    }
}

/// The progress stepper only accompanies the four data-entry steps; the
/// opening selection screen and everything from document upload onward hide it.
pub const fn progress_stepper_visible(step: WizardStep) -> bool {
    matches!(
        step,
        WizardStep::BasicDetails
            | WizardStep::PersonalDetails
            | WizardStep::IncomeDetails
            | WizardStep::Offer
    )
}
