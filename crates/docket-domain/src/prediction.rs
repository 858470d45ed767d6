//! Prediction module - what the caller persists after scoring

use crate::{decide, ObservationId};

/// A stored prediction and its optional ground truth
///
/// Created at prediction time with `true_class` unset. The outcome is
/// attached at most once by a later correction call.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionRecord {
    /// Unique key
    pub observation_id: ObservationId,

    /// The normalized observation, serialized as JSON
    pub observation: String,

    /// Predicted probability in [0, 1]
    pub proba: f64,

    /// Ground-truth outcome, once supplied
    pub true_class: Option<bool>,
}

impl PredictionRecord {
    /// Create a fresh prediction with no outcome yet
    pub fn new(observation_id: ObservationId, observation: String, proba: f64) -> Self {
        Self {
            observation_id,
            observation,
            proba,
            true_class: None,
        }
    }

    /// Label the stored probability maps to under `threshold`
    pub fn predicted_outcome(&self, threshold: f64) -> bool {
        decide(self.proba, threshold)
    }
}
