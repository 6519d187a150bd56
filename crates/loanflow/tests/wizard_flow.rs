//! End-to-end walks through the wizard's public facade: a salaried
//! individual, a private-limited company, and the individual-partner edge the
//! visibility engine treats specially.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, TimeZone, Utc};

use loanflow::workflows::wizard::{
    generate_verification_id, CarCondition, CustomerCategory, DirectorEntry, DocumentKind,
    EmploymentSubType, FormShape, FormSnapshot, FuelType, IncomeProofMethod, LoanProduct,
    ResolveOutcome, SnapshotError, SnapshotStore, SubmitOutcome, UploadedFile,
    VerificationOutcome, WizardSession, WizardStep, STORAGE_KEY,
};

#[derive(Default)]
struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
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

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 15, 11, 0, 0)
        .single()
        .expect("valid timestamp")
}

fn pdf() -> UploadedFile {
    UploadedFile {
        name: "document.pdf".to_string(),
        size_bytes: 250_000,
        content_type: "application/pdf".to_string(),
    }
}

fn fill_basic(session: &mut WizardSession) {
    let basic = session.basic_form_mut();
    basic.full_name = "Arjun Mehta".to_string();
    basic.mobile = "9876543210".to_string();
    basic.loan_amount = Some(750_000.0);
    basic.pan = "ABCDE1234F".to_string();
    basic.ovd_consent = true;
    basic.terms_accepted = true;
    basic.communications_consent = true;

    session.request_otp(now()).expect("challenge opens");
    session.verify_otp("551234").expect("any six digits pass");
}

fn fill_individual_personal(session: &mut WizardSession) {
    let personal = session.personal_individual_mut();
    personal.address_line1 = "14 Lake View Road".to_string();
    personal.city = "Thane".to_string();
    personal.state = "Maharashtra".to_string();
    personal.pin_code = "400601".to_string();
    personal.date_of_birth = "1990-06-12".to_string();
    personal.father_name = "Ramesh Mehta".to_string();
    personal.aadhaar = "123456789012".to_string();
    personal.email = "arjun@example.com".to_string();
    personal.gender = "male".to_string();
    personal.existing_customer = Some(false);
    personal.residence_type = "owned".to_string();
    personal.years_at_residence = Some(6.0);
    personal.institution_consent = true;
    session.acknowledge_institution_consent();
}

fn fill_company_personal(session: &mut WizardSession) {
    let personal = session.personal_company_mut();
    personal.company_name = "Meridian Auto Components Pvt Ltd".to_string();
    personal.address_line1 = "Plot 7, MIDC Phase II".to_string();
    personal.city = "Pune".to_string();
    personal.state = "Maharashtra".to_string();
    personal.pin_code = "411057".to_string();
    personal.gst_number = "27ABCDE1234F1Z5".to_string();
    personal.pan = "ABCDE1234F".to_string();
    personal.cin_llp_number = "U12345MH2015PTC123456".to_string();
    personal.directors = vec![DirectorEntry {
        name: "Sunita Rao".to_string(),
        din: "07114512".to_string(),
    }];
    personal.existing_customer = Some(false);
    personal.institution_consent = true;
    session.acknowledge_institution_consent();
}

fn fill_individual_income(session: &mut WizardSession) {
    let income = session.income_individual_mut();
    income.employer_name = "Crestline Software".to_string();
    income.gross_monthly_income = Some(95_000.0);
    income.total_monthly_obligation = Some(12_000.0);
    income.years_at_employer = Some(4.5);
    income.official_email = "arjun.mehta@crestline.in".to_string();
}

fn fill_business_income(session: &mut WizardSession) {
    let income = session.income_business_mut();
    income.gst_annual_turnover = Some(24_000_000.0);
    income.gross_annual_income = Some(3_600_000.0);
    income.current_emi = Some(85_000.0);
    income.years_in_business = Some(8.0);
}

fn verify(session: &mut WizardSession, kind: DocumentKind) {
    let open = session
        .open_document_verification(kind)
        .expect("kind required");
    match kind {
        DocumentKind::BankStatement => {
            open.set_field("account_number", "004501234567").expect("collecting");
            open.set_field("bank_name", "TJSB Sahakari Bank").expect("collecting");
            open.set_field("ifsc_code", "TJSB0000045").expect("collecting");
            open.set_field("account_type", "current").expect("collecting");
            open.attach_file(pdf()).expect("pdf accepted");
        }
        DocumentKind::DealerInvoice => {
            open.choose_car_condition(CarCondition::New).expect("dealer session");
            open.choose_fuel_type(FuelType::Electric).expect("new car");
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
            open.attach_file(pdf()).expect("pdf accepted");
        }
        DocumentKind::IncomeProof => {
            open.choose_income_method(IncomeProofMethod::SalarySlip)
                .expect("offered to individuals");
            open.set_field("gross_annual_income", "1140000").expect("collecting");
            open.set_field("net_annual_income", "960000").expect("collecting");
            open.attach_file(pdf()).expect("pdf accepted");
        }
        DocumentKind::Gst => {
            open.set_field("gst_number", "27ABCDE1234F1Z5").expect("collecting");
            open.set_field("business_name", "Meridian Auto Components").expect("collecting");
            open.set_field("registration_date", "2019-04-01").expect("collecting");
            open.set_field("business_type", "private-limited").expect("collecting");
            open.attach_file(pdf()).expect("pdf accepted");
        }
    }

    let SubmitOutcome::Pending(pending) =
        session.submit_verification().expect("submission accepted")
    else {
        panic!("expected a pending verification");
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

#[test]
fn salaried_individual_reaches_the_thank_you_screen() {
    let store = MemoryStore::default();
    let mut session = WizardSession::new();

    session.select_product(LoanProduct::Vehicle);
    assert_eq!(
        session.advance(&store).expect("product chosen"),
        WizardStep::BasicDetails
    );

    fill_basic(&mut session);
    session.advance(&store).expect("basic details pass");

    assert_eq!(session.visibility().personal_form, FormShape::Individual);
    fill_individual_personal(&mut session);
    session.advance(&store).expect("personal details pass");

    fill_individual_income(&mut session);
    session.advance(&store).expect("income details pass");

    // The offer adopts the requested amount and quotes a positive instalment.
    let quote = session.offer_quote();
    assert_eq!(quote.principal, 750_000.0);
    assert!(quote.monthly_instalment > 0);
    session.advance(&store).expect("offer always passes");

    assert_eq!(
        session.required_documents(),
        vec![
            DocumentKind::BankStatement,
            DocumentKind::DealerInvoice,
            DocumentKind::IncomeProof,
        ]
    );
    for kind in session.required_documents() {
        verify(&mut session, kind);
    }
    session.advance(&store).expect("documents verified");
    session.advance(&store).expect("final approval passes");
    assert_eq!(session.step(), WizardStep::ThankYou);

    // The whole journey persisted along the way and reloads cleanly.
    let reloaded = WizardSession::load_or_default(&store).expect("snapshot loads");
    assert_eq!(
        reloaded.snapshot().basic.individual.full_name,
        "Arjun Mehta"
    );
    assert_eq!(reloaded.step(), WizardStep::LoanSelection);
}

#[test]
fn private_limited_company_skips_income_proof_but_owes_gst() {
    let store = MemoryStore::default();
    let mut session = WizardSession::new();

    session.select_product(LoanProduct::Vehicle);
    let switch = session.set_customer_category(CustomerCategory::NonIndividual);
    assert_eq!(switch.coerced_sub_type, Some(EmploymentSubType::LlpPartnership));
    session
        .set_employment_sub_type(EmploymentSubType::PrivateLimited)
        .expect("offered to companies");
    session.advance(&store).expect("product chosen");

    fill_basic(&mut session);
    session.advance(&store).expect("basic details pass");

    assert_eq!(session.visibility().personal_form, FormShape::NonIndividual);
    fill_company_personal(&mut session);
    session.advance(&store).expect("personal details pass");

    fill_business_income(&mut session);
    session.advance(&store).expect("income details pass");
    session.advance(&store).expect("offer always passes");

    assert_eq!(
        session.required_documents(),
        vec![
            DocumentKind::BankStatement,
            DocumentKind::DealerInvoice,
            DocumentKind::Gst,
        ]
    );
    for kind in session.required_documents() {
        verify(&mut session, kind);
    }
    session.advance(&store).expect("documents verified");
    session.advance(&store).expect("final approval passes");
    assert_eq!(session.step(), WizardStep::ThankYou);
}

#[test]
fn individual_partner_fills_the_company_personal_form() {
    let store = MemoryStore::default();
    let mut session = WizardSession::new();

    session.select_product(LoanProduct::Vehicle);
    // Stage the partner pairing through a category round trip: the snapshot
    // keeps both sub-type selections, so restoring one is a setter away.
    session.set_customer_category(CustomerCategory::NonIndividual);
    session.advance(&store).expect("product chosen");

    fill_basic(&mut session);
    session.advance(&store).expect("basic details pass");

    // The company-shaped personal form applies to the partner pairing.
    assert_eq!(session.visibility().personal_form, FormShape::NonIndividual);
    fill_company_personal(&mut session);
    session.advance(&store).expect("personal details pass");

    // Switching back to individual keeps the walk on the individual income
    // form and re-adds the income proof requirement.
    let switch = session.set_customer_category(CustomerCategory::Individual);
    assert_eq!(switch.coerced_sub_type, Some(EmploymentSubType::Salaried));
    assert_eq!(session.visibility().income_form, FormShape::Individual);
    assert!(session
        .required_documents()
        .contains(&DocumentKind::IncomeProof));
}

#[test]
fn pre_owned_dealer_invoice_blocks_the_document_step() {
    let store = MemoryStore::default();
    let mut session = WizardSession::new();
    session.select_product(LoanProduct::Vehicle);
    session.jump_to_document_upload();

    for kind in [DocumentKind::BankStatement, DocumentKind::IncomeProof] {
        verify(&mut session, kind);
    }

    let open = session
        .open_document_verification(DocumentKind::DealerInvoice)
        .expect("required kind");
    open.choose_car_condition(CarCondition::PreOwned)
        .expect("dealer session");
    let outcome = session.submit_verification().expect("referral path");
    assert!(matches!(outcome, SubmitOutcome::BranchReferral { .. }));

    // The referral satisfied nothing, so the step stays gated.
    assert!(!session.all_required_satisfied());
    assert!(session.advance(&store).is_err());
    assert_eq!(session.step(), WizardStep::DocumentUpload);
}

#[test]
fn stored_snapshots_live_under_the_fixed_key() {
    let store = MemoryStore::default();
    let mut session = WizardSession::new();
    session.select_product(LoanProduct::Personal);
    session.advance(&store).expect("product chosen");

    assert_eq!(STORAGE_KEY, "loan_application_data");
    assert!(store
        .entries
        .lock()
        .expect("store mutex poisoned")
        .contains_key(STORAGE_KEY));
}
