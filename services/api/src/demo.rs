//! End-to-end CLI walk through the wizard engine: classification, every form
//! step, the simulated OTP and document verifications, and the final offer
//! summary. Useful for stakeholder demos and as living documentation of the
//! flow.

use chrono::Utc;
use clap::Args;

use loanflow::error::AppError;
use loanflow::workflows::wizard::otp::{SEND_DELAY, VERIFY_DELAY};
use loanflow::workflows::wizard::{
    format_inr, AdvanceError, CarCondition, CustomerCategory, DirectorEntry, DocumentKind,
    EmploymentSubType, FormShape, FuelType, IncomeProofMethod, LoanProduct, ResolveOutcome,
    SimulatedBackend, SubmitOutcome, UploadedFile, VerificationBackend, WizardSession,
};

use crate::infra::InMemorySnapshotStore;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Run the walk as a non-individual (company) applicant
    #[arg(long)]
    pub(crate) non_individual: bool,
    /// Employment sub-type, e.g. salaried, self-business, private-limited
    #[arg(long, value_parser = parse_sub_type)]
    pub(crate) sub_type: Option<EmploymentSubType>,
    /// Stop before the document verification portion of the walk
    #[arg(long)]
    pub(crate) skip_documents: bool,
}

fn parse_sub_type(raw: &str) -> Result<EmploymentSubType, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "salaried" => Ok(EmploymentSubType::Salaried),
        "self-employed" => Ok(EmploymentSubType::SelfEmployed),
        "self-business" => Ok(EmploymentSubType::SelfBusiness),
        "llp-partnership" => Ok(EmploymentSubType::LlpPartnership),
        "private-limited" => Ok(EmploymentSubType::PrivateLimited),
        other => Err(format!(
            "unknown employment sub-type '{other}' (expected salaried, self-employed, \
             self-business, llp-partnership, or private-limited)"
        )),
    }
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let store = InMemorySnapshotStore::default();
    let mut session = WizardSession::new();

    println!("Digital loan application demo");
    session.select_product(LoanProduct::Vehicle);

    if args.non_individual {
        let switch = session.set_customer_category(CustomerCategory::NonIndividual);
        if let Some(coerced) = switch.coerced_sub_type {
            println!(
                "  category switched to non-individual; employment sub-type moved to {}",
                coerced.label()
            );
        }
    }
    if let Some(sub_type) = args.sub_type {
        match session.set_employment_sub_type(sub_type) {
            Ok(()) => println!("  employment sub-type: {}", sub_type.label()),
            Err(error) => {
                println!("  {error}");
                return Ok(());
            }
        }
    }

    let visibility = session.visibility();
    println!(
        "  forms: basic={:?} personal={:?} income={:?}",
        visibility.basic_form, visibility.personal_form, visibility.income_form
    );
    println!(
        "  required documents: {}",
        visibility
            .document_list
            .iter()
            .map(|kind| kind.label())
            .collect::<Vec<_>>()
            .join(", ")
    );

    if !advance(&mut session, &store, "loan selection")? {
        return Ok(());
    }

    fill_basic(&mut session);
    println!("\nBasic details");
    match session.request_otp(Utc::now()) {
        Ok(challenge) => {
            let mobile = challenge.mobile().to_string();
            tokio::time::sleep(SEND_DELAY).await;
            println!("  OTP sent to {mobile}");
        }
        Err(error) => {
            println!("  {error}");
            return Ok(());
        }
    }
    tokio::time::sleep(VERIFY_DELAY).await;
    if let Err(error) = session.verify_otp("493817") {
        println!("  {error}");
        return Ok(());
    }
    println!("  mobile number verified");
    if !advance(&mut session, &store, "basic details")? {
        return Ok(());
    }

    println!("\nPersonal details");
    match session.visibility().personal_form {
        FormShape::Individual => fill_individual_personal(&mut session),
        FormShape::NonIndividual => fill_company_personal(&mut session),
    }
    session.acknowledge_institution_consent();
    if !advance(&mut session, &store, "personal details")? {
        return Ok(());
    }

    println!("\nIncome details");
    match session.visibility().income_form {
        FormShape::Individual => fill_individual_income(&mut session),
        FormShape::NonIndividual => fill_business_income(&mut session),
    }
    if !advance(&mut session, &store, "income details")? {
        return Ok(());
    }

    let quote = session.offer_quote();
    println!("\nLoan offer");
    println!("  principal: Rs {}", format_inr(quote.principal as u64));
    println!("  rate: {:.2}% | tenure: {} months", quote.annual_rate_percent, quote.tenure_months);
    println!(
        "  instalment: Rs {} per month",
        format_inr(quote.monthly_instalment)
    );
    if !advance(&mut session, &store, "offer")? {
        return Ok(());
    }

    if args.skip_documents {
        println!("\nStopping before document verification as requested");
        return Ok(());
    }

    println!("\nDocument verification");
    let backend = SimulatedBackend::default();
    for kind in session.required_documents() {
        verify_document(&mut session, &backend, kind).await;
    }

    if !advance(&mut session, &store, "document upload")? {
        return Ok(());
    }
    if !advance(&mut session, &store, "final approval")? {
        return Ok(());
    }

    println!("\nApplication complete: {}", session.step().label());
    for (kind, record) in session.documents() {
        println!("  {}: {}", kind.label(), record.verification_id);
    }
    Ok(())
}

/// Advance one step, printing any validation block instead of failing.
fn advance(
    session: &mut WizardSession,
    store: &InMemorySnapshotStore,
    step_name: &str,
) -> Result<bool, AppError> {
    match session.advance(store) {
        Ok(next) => {
            println!("  {step_name} complete, now at: {}", next.label());
            Ok(true)
        }
        Err(AdvanceError::Blocked(report)) => {
            println!("  {step_name} blocked:");
            for error in &report.form_errors {
                println!("    - {error}");
            }
            for error in &report.field_errors {
                println!("    - {}: {}", error.field, error.message);
            }
            Ok(false)
        }
        Err(AdvanceError::Snapshot(error)) => Err(AppError::from(error)),
    }
}

async fn verify_document(
    session: &mut WizardSession,
    backend: &SimulatedBackend,
    kind: DocumentKind,
) {
    let category = session.classification().category;
    let Ok(open) = session.open_document_verification(kind) else {
        return;
    };

    match kind {
        DocumentKind::BankStatement => {
            let _ = open.set_field("account_number", "004501234567");
            let _ = open.set_field("bank_name", "TJSB Sahakari Bank");
            let _ = open.set_field("ifsc_code", "TJSB0000045");
            let _ = open.set_field("account_type", "savings");
            let _ = open.attach_file(demo_pdf("bank-statement.pdf"));
        }
        DocumentKind::DealerInvoice => {
            let _ = open.choose_car_condition(CarCondition::New);
            let _ = open.choose_fuel_type(FuelType::PetrolDiesel);
            for (field, value) in [
                ("dealer_address", "72 Service Road, Thane"),
                ("invoice_date", "2025-03-10"),
                ("ex_showroom_cost", "815000"),
                ("registration", "42000"),
                ("insurance", "31000"),
                ("discount", "25000"),
                ("exchange_amount", "0"),
                ("accessories", "18000"),
                ("other_taxes", "9500"),
                ("installation_fee", "2500"),
                ("total_invoice_value", "893000"),
            ] {
                let _ = open.set_field(field, value);
            }
            let _ = open.attach_file(demo_pdf("dealer-invoice.pdf"));
        }
        DocumentKind::IncomeProof => {
            let method = match category {
                CustomerCategory::Individual => IncomeProofMethod::SalarySlip,
                CustomerCategory::NonIndividual => IncomeProofMethod::ItrUpload,
            };
            let _ = open.choose_income_method(method);
            match category {
                CustomerCategory::Individual => {
                    let _ = open.set_field("gross_annual_income", "1140000");
                    let _ = open.set_field("net_annual_income", "960000");
                }
                CustomerCategory::NonIndividual => {
                    let _ = open.set_field("business_turnover", "24000000");
                    let _ = open.set_field("net_business_income", "3600000");
                    let _ = open.set_field("business_type", "manufacturing");
                    let _ = open.set_field("years_in_business", "8");
                }
            }
            let _ = open.attach_file(demo_pdf("salary-slips.pdf"));
        }
        DocumentKind::Gst => {
            let _ = open.set_field("gst_number", "27ABCDE1234F1Z5");
            let _ = open.set_field("business_name", "Meridian Auto Components");
            let _ = open.set_field("registration_date", "2019-04-01");
            let _ = open.set_field("business_type", "partnership");
            let _ = open.attach_file(demo_pdf("gst-certificate.pdf"));
        }
    }

    match session.submit_verification() {
        Ok(SubmitOutcome::Pending(pending)) => {
            println!("  {} submitted, verifying...", kind.label());
            tokio::time::sleep(backend.latency()).await;
            let outcome = backend.verify(kind);
            match session.resolve_verification(pending.token, outcome, Utc::now()) {
                ResolveOutcome::Completed(record) => {
                    println!("  {} verified: {}", kind.label(), record.verification_id);
                }
                ResolveOutcome::Rejected { reason } => {
                    println!("  {} rejected: {reason}", kind.label());
                }
                ResolveOutcome::Stale => {}
            }
        }
        Ok(SubmitOutcome::BranchReferral { message }) => {
            println!("  {}: {message}", kind.label());
        }
        Err(error) => {
            println!("  {}: {error}", kind.label());
        }
    }
}

fn demo_pdf(name: &str) -> UploadedFile {
    UploadedFile {
        name: name.to_string(),
        size_bytes: 240_000,
        content_type: "application/pdf".to_string(),
    }
}

fn fill_basic(session: &mut WizardSession) {
    let basic = session.basic_form_mut();
    basic.full_name = "Arjun Mehta".to_string();
    basic.mobile = "9876543210".to_string();
    basic.loan_amount = Some(500_000.0);
    basic.pan = "ABCDE1234F".to_string();
    basic.ovd_consent = true;
    basic.terms_accepted = true;
    basic.communications_consent = true;
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
}

fn fill_company_personal(session: &mut WizardSession) {
    let personal = session.personal_company_mut();
    personal.company_name = "Meridian Auto Components LLP".to_string();
    personal.address_line1 = "Plot 7, MIDC Phase II".to_string();
    personal.city = "Pune".to_string();
    personal.state = "Maharashtra".to_string();
    personal.pin_code = "411057".to_string();
    personal.gst_number = "27ABCDE1234F1Z5".to_string();
    personal.pan = "ABCDE1234F".to_string();
    personal.cin_llp_number = "AAB-1234".to_string();
    personal.directors = vec![DirectorEntry {
        name: "Sunita Rao".to_string(),
        din: "07114512".to_string(),
    }];
    personal.existing_customer = Some(false);
    personal.institution_consent = true;
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
