use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, TimeZone, Utc};

use crate::workflows::wizard::{
    generate_verification_id, BasicDetailsForm, BusinessIncomeForm, CarCondition,
    CompanyPersonalForm, CustomerCategory, DirectorEntry, DocumentKind, FormSnapshot, FuelType,
    IncomeProofMethod, IndividualIncomeForm, IndividualPersonalForm, LoanProduct, ResolveOutcome,
    SnapshotError, SnapshotStore, SubmitOutcome, UploadedFile, VerificationOutcome, WizardSession,
};

/// Keyed JSON store mirroring what the service wires in, so session tests can
/// assert the persisted round trip.
#[derive(Default)]
pub(super) struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub(super) fn raw(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .expect("store mutex poisoned")
            .get(key)
            .cloned()
    }

    pub(super) fn insert_raw(&self, key: &str, json: &str) {
        self.entries
            .lock()
            .expect("store mutex poisoned")
            .insert(key.to_owned(), json.to_owned());
    }
}

impl SnapshotStore for MemoryStore {
    fn save(&self, key: &str, snapshot: &FormSnapshot) -> Result<(), SnapshotError> {
        let json = serde_json::to_string(snapshot)?;
        self.entries
            .lock()
            .expect("store mutex poisoned")
            .insert(key.to_owned(), json);
        Ok(())
    }

    fn load(&self, key: &str) -> Result<Option<FormSnapshot>, SnapshotError> {
        self.entries
            .lock()
            .expect("store mutex poisoned")
            .get(key)
            .map(|json| serde_json::from_str(json).map_err(SnapshotError::from))
            .transpose()
    }

    fn clear(&self, key: &str) -> Result<(), SnapshotError> {
        self.entries
            .lock()
            .expect("store mutex poisoned")
            .remove(key);
        Ok(())
    }
}

pub(super) fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 15, 10, 30, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn pdf_file() -> UploadedFile {
    UploadedFile {
        name: "statement.pdf".to_string(),
        size_bytes: 300_000,
        content_type: "application/pdf".to_string(),
    }
}

pub(super) fn filled_basic() -> BasicDetailsForm {
    BasicDetailsForm {
        full_name: "Arjun Mehta".to_string(),
        mobile: "9876543210".to_string(),
        loan_amount: Some(500_000.0),
        pan: "ABCDE1234F".to_string(),
        ovd_consent: true,
        terms_accepted: true,
        communications_consent: true,
    }
}

pub(super) fn filled_individual_personal() -> IndividualPersonalForm {
    IndividualPersonalForm {
        address_line1: "14 Lake View Road".to_string(),
        address_line2: String::new(),
        city: "Thane".to_string(),
        state: "Maharashtra".to_string(),
        pin_code: "400601".to_string(),
        date_of_birth: "1990-06-12".to_string(),
        father_name: "Ramesh Mehta".to_string(),
        aadhaar: "1234 5678 9012".to_string(),
        email: "arjun@example.com".to_string(),
        gender: "male".to_string(),
        existing_customer: Some(false),
        cif_number: String::new(),
        residence_type: "owned".to_string(),
        years_at_residence: Some(6.0),
        institution_consent: true,
    }
}

pub(super) fn filled_company_personal() -> CompanyPersonalForm {
    CompanyPersonalForm {
        company_name: "Meridian Auto Components LLP".to_string(),
        address_line1: "Plot 7, MIDC Phase II".to_string(),
        address_line2: String::new(),
        city: "Pune".to_string(),
        state: "Maharashtra".to_string(),
        pin_code: "411057".to_string(),
        gst_number: "27ABCDE1234F1Z5".to_string(),
        pan: "ABCDE1234F".to_string(),
        cin_llp_number: "AAB-1234".to_string(),
        directors: vec![DirectorEntry {
            name: "Sunita Rao".to_string(),
            din: "07114512".to_string(),
        }],
        existing_customer: Some(false),
        cif_number: String::new(),
        institution_consent: true,
    }
}

pub(super) fn filled_individual_income() -> IndividualIncomeForm {
    IndividualIncomeForm {
        employer_name: "Crestline Software".to_string(),
        gross_monthly_income: Some(95_000.0),
        total_monthly_obligation: Some(12_000.0),
        years_at_employer: Some(4.5),
        official_email: "arjun.mehta@crestline.in".to_string(),
    }
}

pub(super) fn filled_business_income() -> BusinessIncomeForm {
    BusinessIncomeForm {
        gst_annual_turnover: Some(24_000_000.0),
        gross_annual_income: Some(3_600_000.0),
        other_annual_income: None,
        current_emi: Some(85_000.0),
        years_in_business: Some(8.0),
    }
}

/// Mark the applicant's OVD details verified through the OTP flow.
pub(super) fn pass_otp(session: &mut WizardSession) {
    session.request_otp(now()).expect("challenge opens");
    session.verify_otp("482917").expect("six digits accepted");
}

/// Drive one document kind through its whole verification session, resolving
/// the pending delay as the simulated backend would.
pub(super) fn verify_document(session: &mut WizardSession, kind: DocumentKind) {
    let category = session.classification().category;
    let open = session
        .open_document_verification(kind)
        .expect("kind is required");

    match kind {
        DocumentKind::BankStatement => {
            open.set_field("account_number", "004501234567").expect("collecting");
            open.set_field("bank_name", "TJSB Sahakari Bank").expect("collecting");
            open.set_field("ifsc_code", "TJSB0000045").expect("collecting");
            open.set_field("account_type", "savings").expect("collecting");
            open.attach_file(pdf_file()).expect("pdf accepted");
        }
        DocumentKind::DealerInvoice => {
            open.choose_car_condition(CarCondition::New).expect("dealer session");
            open.choose_fuel_type(FuelType::PetrolDiesel).expect("new car");
            for field in [
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
            ] {
                open.set_field(field, "1").expect("collecting");
            }
            open.attach_file(pdf_file()).expect("pdf accepted");
        }
        DocumentKind::IncomeProof => {
            let method = match category {
                CustomerCategory::Individual => IncomeProofMethod::SalarySlip,
                CustomerCategory::NonIndividual => IncomeProofMethod::ItrUpload,
            };
            open.choose_income_method(method).expect("method offered");
            match category {
                CustomerCategory::Individual => {
                    open.set_field("gross_annual_income", "1140000").expect("collecting");
                    open.set_field("net_annual_income", "960000").expect("collecting");
                }
                CustomerCategory::NonIndividual => {
                    open.set_field("business_turnover", "24000000").expect("collecting");
                    open.set_field("net_business_income", "3600000").expect("collecting");
                    open.set_field("business_type", "manufacturing").expect("collecting");
                    open.set_field("years_in_business", "8").expect("collecting");
                }
            }
            open.attach_file(pdf_file()).expect("pdf accepted");
        }
        DocumentKind::Gst => {
            open.set_field("gst_number", "27ABCDE1234F1Z5").expect("collecting");
            open.set_field("business_name", "Meridian Auto Components").expect("collecting");
            open.set_field("registration_date", "2019-04-01").expect("collecting");
            open.set_field("business_type", "partnership").expect("collecting");
            open.attach_file(pdf_file()).expect("pdf accepted");
        }
    }

    let outcome = session.submit_verification().expect("submission accepted");
    let SubmitOutcome::Pending(pending) = outcome else {
        panic!("expected a pending verification for {kind:?}");
    };
    let resolved = session.resolve_verification(
        pending.token,
        VerificationOutcome::Verified {
            verification_id: generate_verification_id(kind),
        },
        now(),
    );
    assert!(matches!(resolved, ResolveOutcome::Completed(_)));
}

/// A session walked up to the document-upload step as an individual salaried
/// applicant, with every earlier form filled.
pub(super) fn individual_session_at_documents(store: &MemoryStore) -> WizardSession {
    let mut session = WizardSession::new();
    session.select_product(LoanProduct::Vehicle);
    session.advance(store).expect("loan selection passes");

    *session.basic_form_mut() = filled_basic();
    pass_otp(&mut session);
    session.advance(store).expect("basic details pass");

    *session.personal_individual_mut() = filled_individual_personal();
    session.acknowledge_institution_consent();
    session.advance(store).expect("personal details pass");

    *session.income_individual_mut() = filled_individual_income();
    session.advance(store).expect("income details pass");

    session.advance(store).expect("offer always passes");
    session
}
