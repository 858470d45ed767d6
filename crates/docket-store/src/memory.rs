//! In-memory prediction store

use std::collections::HashMap;

use docket_domain::traits::{KnownIds, PredictionStore};
use docket_domain::{ObservationId, PredictionRecord};

use crate::StoreError;

/// HashMap-backed store with the same semantics as [`crate::SqliteStore`]
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: HashMap<ObservationId, PredictionRecord>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored predictions
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no predictions
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl KnownIds for MemoryStore {
    type Error = StoreError;

    fn is_known(&self, id: ObservationId) -> Result<bool, Self::Error> {
        Ok(self.records.contains_key(&id))
    }
}

impl PredictionStore for MemoryStore {
    fn insert_prediction(&mut self, record: PredictionRecord) -> Result<(), Self::Error> {
        let id = record.observation_id;
        if self.records.contains_key(&id) {
            return Err(StoreError::Duplicate(id));
        }
        self.records.insert(id, record);
        Ok(())
    }

    fn get_prediction(&self, id: ObservationId) -> Result<Option<PredictionRecord>, Self::Error> {
        Ok(self.records.get(&id).cloned())
    }

    fn record_outcome(
        &mut self,
        id: ObservationId,
        outcome: bool,
    ) -> Result<PredictionRecord, Self::Error> {
        let record = self.records.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        if record.true_class.is_some() {
            return Err(StoreError::OutcomeAlreadySet(id));
        }
        record.true_class = Some(outcome);
        Ok(record.clone())
    }
}
