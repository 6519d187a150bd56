use super::common::{filled_basic, individual_session_at_documents, MemoryStore};
use crate::workflows::wizard::{
    CustomerCategory, EmploymentSubType, FormSnapshot, LoanProduct, SnapshotStore, WizardSession,
    WizardStep, STORAGE_KEY,
};

#[test]
fn snapshots_round_trip_through_json() {
    let store = MemoryStore::default();
    let session = individual_session_at_documents(&store);
    session.persist(&store).expect("snapshot saves");

    let loaded = store
        .load(STORAGE_KEY)
        .expect("snapshot parses")
        .expect("snapshot present");
    assert_eq!(&loaded, session.snapshot());
}

#[test]
fn restore_reapplies_values_and_restarts_the_walk() {
    let store = MemoryStore::default();
    let mut session = WizardSession::new();
    session.select_product(LoanProduct::Vehicle);
    *session.basic_form_mut() = filled_basic();
    session.advance(&store).expect("loan selection passes");
    assert_eq!(session.step(), WizardStep::BasicDetails);
    session.persist(&store).expect("snapshot saves");

    let reloaded = WizardSession::load_or_default(&store).expect("snapshot loads");
    assert_eq!(reloaded.product(), Some(LoanProduct::Vehicle));
    assert_eq!(
        reloaded.snapshot().basic.individual.full_name,
        "Arjun Mehta"
    );
    // A reload always lands on the opening screen, whatever was saved.
    assert_eq!(reloaded.step(), WizardStep::LoanSelection);
}

#[test]
fn restore_coerces_an_out_of_category_sub_type() {
    let mut snapshot = FormSnapshot::default();
    snapshot.classification.category = CustomerCategory::NonIndividual;
    snapshot.classification.sub_type = EmploymentSubType::Salaried;

    let session = WizardSession::restore(snapshot);
    assert_eq!(
        session.classification().sub_type,
        EmploymentSubType::LlpPartnership
    );
}

#[test]
fn unknown_fields_in_stored_data_are_ignored() {
    let store = MemoryStore::default();
    store.insert_raw(
        STORAGE_KEY,
        r#"{"product":"vehicle","legacy_field":"ignored","classification":{"category":"individual","sub_type":"self_business"}}"#,
    );

    let session = WizardSession::load_or_default(&store).expect("snapshot loads");
    assert_eq!(session.product(), Some(LoanProduct::Vehicle));
    assert_eq!(
        session.classification().sub_type,
        EmploymentSubType::SelfBusiness
    );
    // Missing sections fall back to their defaults.
    assert_eq!(session.offer_quote().tenure_months, 84);
}

#[test]
fn reset_clears_the_store_and_every_field() {
    let store = MemoryStore::default();
    let mut session = individual_session_at_documents(&store);
    assert!(store.raw(STORAGE_KEY).is_some());

    session.reset(&store).expect("reset clears the store");
    assert!(store.raw(STORAGE_KEY).is_none());
    assert_eq!(session.step(), WizardStep::LoanSelection);
    assert_eq!(session.product(), None);
    assert!(session.documents().is_empty());
    assert!(!session.ovd_verified());
    assert_eq!(session.offer_quote().principal, 1_000_000.0);
    assert_eq!(session.snapshot().basic.individual.full_name, "");
}

#[test]
fn missing_key_loads_a_fresh_session() {
    let store = MemoryStore::default();
    let session = WizardSession::load_or_default(&store).expect("empty store is fine");
    assert_eq!(session.step(), WizardStep::LoanSelection);
    assert_eq!(session.product(), None);
}
