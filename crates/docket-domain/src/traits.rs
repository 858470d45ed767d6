//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the pipeline and its
//! collaborators. Infrastructure implementations live in other crates.

use std::collections::HashSet;
use std::convert::Infallible;

use crate::{FeatureVector, ObservationId, PredictionRecord};

/// Membership check over every previously accepted observation id
///
/// Implementations must answer from a consistent snapshot; making the
/// check-and-insert atomic is the owning store's job.
pub trait KnownIds {
    /// Error type for lookups
    type Error;

    /// Whether `id` was already accepted
    fn is_known(&self, id: ObservationId) -> Result<bool, Self::Error>;
}

impl KnownIds for HashSet<ObservationId> {
    type Error = Infallible;

    fn is_known(&self, id: ObservationId) -> Result<bool, Self::Error> {
        Ok(self.contains(&id))
    }
}

/// Trait for persisting predictions and their later outcomes
///
/// Implemented by the infrastructure layer (docket-store)
pub trait PredictionStore: KnownIds {
    /// Store a new prediction
    ///
    /// Must fail if a prediction with the same id exists; the existence
    /// check and the insert are a single atomic operation.
    fn insert_prediction(&mut self, record: PredictionRecord) -> Result<(), Self::Error>;

    /// Get a prediction by id
    fn get_prediction(&self, id: ObservationId) -> Result<Option<PredictionRecord>, Self::Error>;

    /// Attach the ground-truth outcome to an existing prediction
    ///
    /// Fails for unknown ids and for predictions whose outcome is already set.
    fn record_outcome(
        &mut self,
        id: ObservationId,
        outcome: bool,
    ) -> Result<PredictionRecord, Self::Error>;
}

/// Trait for the pre-fit classifier
///
/// Implemented by the model layer (docket-model)
pub trait RiskClassifier {
    /// Error type for scoring
    type Error;

    /// Probability in [0, 1] of the positive class
    fn predict_probability(&self, features: &FeatureVector) -> Result<f64, Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_set_known_ids() {
        let mut ids = HashSet::new();
        ids.insert(ObservationId::new(1));

        assert_eq!(ids.is_known(ObservationId::new(1)), Ok(true));
        assert_eq!(ids.is_known(ObservationId::new(2)), Ok(false));
    }
}
