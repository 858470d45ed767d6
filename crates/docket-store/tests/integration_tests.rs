//! Integration tests for docket-store
//!
//! These tests verify the prediction lifecycle: insert, lookup, and the
//! one-time attachment of ground truth.

use docket_domain::traits::{KnownIds, PredictionStore};
use docket_domain::{ObservationId, PredictionRecord, DEFAULT_THRESHOLD};
use docket_store::{SqliteStore, StoreError};

fn prediction(id: i64, proba: f64) -> PredictionRecord {
    PredictionRecord::new(
        ObservationId::new(id),
        format!(r#"{{"id": {}}}"#, id),
        proba,
    )
}

#[test]
fn test_store_initialization() {
    let store = SqliteStore::open(":memory:");
    assert!(store.is_ok(), "Store should initialize successfully");
    assert!(store.unwrap().is_empty().unwrap());
}

#[test]
fn test_insert_and_get_prediction() {
    let mut store = SqliteStore::open(":memory:").unwrap();

    store.insert_prediction(prediction(1, 0.72)).unwrap();

    let retrieved = store.get_prediction(ObservationId::new(1)).unwrap();
    let record = retrieved.expect("Should retrieve the prediction");
    assert_eq!(record.observation_id, ObservationId::new(1));
    assert_eq!(record.observation, r#"{"id": 1}"#);
    assert_eq!(record.proba, 0.72);
    assert_eq!(record.true_class, None);
    assert!(record.predicted_outcome(DEFAULT_THRESHOLD));

    assert!(store.get_prediction(ObservationId::new(2)).unwrap().is_none());
    assert_eq!(store.len().unwrap(), 1);
}

#[test]
fn test_known_ids() {
    let mut store = SqliteStore::open(":memory:").unwrap();
    assert!(!store.is_known(ObservationId::new(5)).unwrap());

    store.insert_prediction(prediction(5, 0.1)).unwrap();
    assert!(store.is_known(ObservationId::new(5)).unwrap());
}

#[test]
fn test_duplicate_insert_rejected() {
    let mut store = SqliteStore::open(":memory:").unwrap();

    assert!(store.insert_prediction(prediction(1, 0.3)).is_ok());

    let result = store.insert_prediction(prediction(1, 0.9));
    assert!(matches!(result, Err(StoreError::Duplicate(id)) if id.value() == 1));

    // The original row is untouched
    let record = store.get_prediction(ObservationId::new(1)).unwrap().unwrap();
    assert_eq!(record.proba, 0.3);
}

#[test]
fn test_record_outcome_once() {
    let mut store = SqliteStore::open(":memory:").unwrap();
    store.insert_prediction(prediction(7, 0.65)).unwrap();

    let updated = store.record_outcome(ObservationId::new(7), true).unwrap();
    assert_eq!(updated.true_class, Some(true));
    assert_eq!(updated.proba, 0.65);

    let second = store.record_outcome(ObservationId::new(7), false);
    assert!(matches!(second, Err(StoreError::OutcomeAlreadySet(_))));

    let stored = store.get_prediction(ObservationId::new(7)).unwrap().unwrap();
    assert_eq!(stored.true_class, Some(true));
}

#[test]
fn test_record_outcome_unknown_id() {
    let mut store = SqliteStore::open(":memory:").unwrap();

    let result = store.record_outcome(ObservationId::new(404), true);
    match result {
        Err(StoreError::NotFound(id)) => {
            assert_eq!(id.value(), 404);
        }
        other => panic!("Expected NotFound, got {:?}", other.map(|r| r.observation_id)),
    }

    // No record is created as a side effect
    assert!(store.is_empty().unwrap());
}

#[test]
fn test_false_outcome_persists() {
    let mut store = SqliteStore::open(":memory:").unwrap();
    store.insert_prediction(prediction(8, 0.2)).unwrap();
    store.record_outcome(ObservationId::new(8), false).unwrap();

    let stored = store.get_prediction(ObservationId::new(8)).unwrap().unwrap();
    assert_eq!(stored.true_class, Some(false));
}

#[test]
fn test_concurrent_connections_accept_one_insert() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("predictions.db");

    let mut first = SqliteStore::open(&path).unwrap();
    let mut second = SqliteStore::open(&path).unwrap();

    // Both connections see the id as unseen
    assert!(!first.is_known(ObservationId::new(1)).unwrap());
    assert!(!second.is_known(ObservationId::new(1)).unwrap());

    assert!(first.insert_prediction(prediction(1, 0.5)).is_ok());
    assert!(matches!(
        second.insert_prediction(prediction(1, 0.6)),
        Err(StoreError::Duplicate(_))
    ));
}

#[test]
fn test_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("predictions.db");

    {
        let mut store = SqliteStore::open(&path).unwrap();
        store.insert_prediction(prediction(11, 0.61)).unwrap();
    }

    let store = SqliteStore::open(&path).unwrap();
    assert!(store.is_known(ObservationId::new(11)).unwrap());
}
