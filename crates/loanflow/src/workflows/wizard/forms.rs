//! Typed field state for each wizard form region, with the per-step
//! required-field rules. Individual and company layouts keep separate values
//! so switching the classification back and forth never loses input.

use serde::{Deserialize, Serialize};

use super::validation::{
    valid_aadhaar, valid_email, valid_gstin, valid_mobile, valid_pan, valid_pin_code,
    ValidationReport,
};
use super::visibility::FormShape;

/// One value per form shape, addressed through the visibility engine's
/// resolved [`FormShape`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShapePair<T> {
    pub individual: T,
    pub non_individual: T,
}

impl<T> ShapePair<T> {
    pub fn active(&self, shape: FormShape) -> &T {
        match shape {
            FormShape::Individual => &self.individual,
            FormShape::NonIndividual => &self.non_individual,
        }
    }

    pub fn active_mut(&mut self, shape: FormShape) -> &mut T {
        match shape {
            FormShape::Individual => &mut self.individual,
            FormShape::NonIndividual => &mut self.non_individual,
        }
    }
}

/// Basic-details entry. The individual and company layouts carry the same
/// field set, so one struct backs both shapes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BasicDetailsForm {
    pub full_name: String,
    pub mobile: String,
    pub loan_amount: Option<f64>,
    pub pan: String,
    pub ovd_consent: bool,
    pub terms_accepted: bool,
    pub communications_consent: bool,
}

impl BasicDetailsForm {
    /// Field presence/format rules plus the externally verified OVD flag and
    /// the two consent checkboxes.
    pub fn validate(&self, ovd_verified: bool, report: &mut ValidationReport) {
        if self.full_name.trim().is_empty() {
            report.field("full_name", "Please enter your full name");
        }
        if !valid_mobile(self.mobile.trim()) {
            report.field("mobile", "Please enter a valid 10-digit mobile number");
        }
        if !self.loan_amount.is_some_and(|amount| amount > 0.0) {
            report.field("loan_amount", "Please enter a valid loan amount");
        }
        if !valid_pan(self.pan.trim()) {
            report.field("pan", "Please enter a valid PAN number (e.g., ABCDE1234F)");
        }
        if !ovd_verified {
            report.form("Please verify your OVD details first");
        }
        if !self.ovd_consent {
            report.form("Please agree to validate OVD details");
        }
        if !self.terms_accepted {
            report.form("Please agree to the Terms & Conditions and Privacy Policy");
        }
        if !self.communications_consent {
            report.form("Please provide consent for communication");
        }
    }
}

/// Personal details for an individual applicant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndividualPersonalForm {
    pub address_line1: String,
    pub address_line2: String,
    pub city: String,
    pub state: String,
    pub pin_code: String,
    pub date_of_birth: String,
    pub father_name: String,
    pub aadhaar: String,
    pub email: String,
    pub gender: String,
    pub existing_customer: Option<bool>,
    pub cif_number: String,
    pub residence_type: String,
    pub years_at_residence: Option<f64>,
    pub institution_consent: bool,
}

impl IndividualPersonalForm {
    pub fn validate(&self, consent_acknowledged: bool, report: &mut ValidationReport) {
        if self.address_line1.trim().is_empty() {
            report.field("address_line1", "Please enter your address line 1");
        }
        if self.city.trim().is_empty() {
            report.field("city", "Please enter your city");
        }
        if self.state.is_empty() {
            report.field("state", "Please select your state");
        }
        if !valid_pin_code(self.pin_code.trim()) {
            report.field("pin_code", "Please enter a valid 6-digit PIN code");
        }
        if self.date_of_birth.is_empty() {
            report.field("date_of_birth", "Please select your date of birth");
        }
        if self.father_name.trim().is_empty() {
            report.field("father_name", "Please enter your father's name");
        }
        if !valid_aadhaar(self.aadhaar.trim()) {
            report.field("aadhaar", "Please enter a valid 12-digit Aadhar number");
        }
        if !valid_email(self.email.trim()) {
            report.field("email", "Please enter a valid email address");
        }
        if self.gender.is_empty() {
            report.field("gender", "Please select your gender");
        }
        match self.existing_customer {
            None => {
                report.field(
                    "existing_customer",
                    "Please specify if you are an existing customer",
                );
            }
            Some(true) if self.cif_number.trim().is_empty() => {
                report.field("cif_number", "Please enter your CIF number");
            }
            _ => {}
        }
        if self.residence_type.is_empty() {
            report.field("residence_type", "Please select your residence type");
        }
        if !self.years_at_residence.is_some_and(|years| years >= 0.0) {
            report.field(
                "years_at_residence",
                "Please enter valid years at current residence",
            );
        }
        if !self.institution_consent || !consent_acknowledged {
            report.form("Please read and agree to the bank information consent terms");
        }
    }
}

/// One director or partner row on the company personal form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectorEntry {
    pub name: String,
    pub din: String,
}

impl DirectorEntry {
    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty() && !self.din.trim().is_empty()
    }
}

/// Personal details for the company-shaped layout, also used by individual
/// partners/directors per the visibility engine's compound rule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanyPersonalForm {
    pub company_name: String,
    pub address_line1: String,
    pub address_line2: String,
    pub city: String,
    pub state: String,
    pub pin_code: String,
    pub gst_number: String,
    pub pan: String,
    pub cin_llp_number: String,
    pub directors: Vec<DirectorEntry>,
    pub existing_customer: Option<bool>,
    pub cif_number: String,
    pub institution_consent: bool,
}

impl CompanyPersonalForm {
    pub fn validate(&self, consent_acknowledged: bool, report: &mut ValidationReport) {
        if self.company_name.trim().is_empty() {
            report.field("company_name", "Please enter company name");
        }
        if self.address_line1.trim().is_empty() {
            report.field("address_line1", "Please enter company address line 1");
        }
        if self.city.trim().is_empty() {
            report.field("city", "Please enter city");
        }
        if self.state.is_empty() {
            report.field("state", "Please select state");
        }
        if !valid_pin_code(self.pin_code.trim()) {
            report.field("pin_code", "Please enter a valid 6-digit PIN code");
        }
        if !valid_gstin(self.gst_number.trim()) {
            report.field("gst_number", "Please enter a valid GST number");
        }
        if !valid_pan(self.pan.trim()) {
            report.field("pan", "Please enter a valid PAN number");
        }
        if self.cin_llp_number.trim().is_empty() {
            report.field("cin_llp_number", "Please enter CIN/LLP number");
        }
        if !self.directors.iter().any(DirectorEntry::is_complete) {
            report.field(
                "directors",
                "Please enter at least one director/partner name and DIN/LLP number",
            );
        }
        match self.existing_customer {
            None => {
                report.field("existing_customer", "Please specify if existing customer");
            }
            Some(true) if self.cif_number.trim().is_empty() => {
                report.field("cif_number", "Please enter CIF number");
            }
            _ => {}
        }
        if !self.institution_consent || !consent_acknowledged {
            report.form("Please read and agree to the bank information consent terms");
        }
    }
}

/// Income details for an individual applicant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndividualIncomeForm {
    pub employer_name: String,
    pub gross_monthly_income: Option<f64>,
    pub total_monthly_obligation: Option<f64>,
    pub years_at_employer: Option<f64>,
    pub official_email: String,
}

impl IndividualIncomeForm {
    pub fn validate(&self, report: &mut ValidationReport) {
        if self.employer_name.trim().is_empty() {
            report.field("employer_name", "Please enter your employer name");
        }
        if !self.gross_monthly_income.is_some_and(|income| income > 0.0) {
            report.field(
                "gross_monthly_income",
                "Please enter a valid gross monthly income",
            );
        }
        if !self
            .total_monthly_obligation
            .is_some_and(|amount| amount >= 0.0)
        {
            report.field(
                "total_monthly_obligation",
                "Please enter valid total monthly obligation",
            );
        }
        if !self.years_at_employer.is_some_and(|years| years >= 0.0) {
            report.field(
                "years_at_employer",
                "Please enter valid years at current employer",
            );
        }
        if !valid_email(self.official_email.trim()) {
            report.field(
                "official_email",
                "Please enter a valid official email address",
            );
        }
    }
}

/// Income details for the company-shaped layout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BusinessIncomeForm {
    pub gst_annual_turnover: Option<f64>,
    pub gross_annual_income: Option<f64>,
    pub other_annual_income: Option<f64>,
    pub current_emi: Option<f64>,
    pub years_in_business: Option<f64>,
}

impl BusinessIncomeForm {
    pub fn validate(&self, report: &mut ValidationReport) {
        if !self.gst_annual_turnover.is_some_and(|amount| amount > 0.0) {
            report.field(
                "gst_annual_turnover",
                "Please enter valid GST annual turnover",
            );
        }
        if !self.gross_annual_income.is_some_and(|amount| amount > 0.0) {
            report.field(
                "gross_annual_income",
                "Please enter a valid gross annual income",
            );
        }
        if !self.current_emi.is_some_and(|amount| amount >= 0.0) {
            report.field("current_emi", "Please enter valid current EMI");
        }
        if !self.years_in_business.is_some_and(|years| years >= 0.0) {
            report.field("years_in_business", "Please enter valid years in business");
        }
    }
}
