//! The scoring pipeline shared by every request.
//!
//! A [`Pipeline`] is built once at startup from the validator settings, the
//! race reference table, the loaded classifier and the decision threshold.
//! It is immutable afterwards and shared through an `Arc`.

use std::fmt::Display;

use docket_domain::traits::{KnownIds, RiskClassifier};
use docket_domain::{decide, FeatureVector, NormalizedRecord, PredictionRecord};
use docket_features::{feature_vector_json, FeatureTransformer, RaceReferenceCounts};
use docket_gatekeeper::{observation_json, Gatekeeper, GatekeeperError, RejectionReason};
use thiserror::Error;
use tracing::{debug, error};

/// Why a prediction request produced no outcome
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Caller-caused: the record failed validation
    #[error("{0}")]
    Rejected(RejectionReason),

    /// The id registry could not be consulted
    #[error("{0}")]
    Store(String),

    /// A validated record could not be transformed or scored
    #[error("Classifier failure: {0}")]
    ClassifierFailure(String),
}

impl From<GatekeeperError> for PipelineError {
    fn from(e: GatekeeperError) -> Self {
        match e {
            GatekeeperError::Rejected(reason) => PipelineError::Rejected(reason),
            GatekeeperError::Store(msg) => PipelineError::Store(msg),
        }
    }
}

/// A record that made it through every stage
#[derive(Debug, Clone)]
pub struct Scored {
    /// The validated record
    pub record: NormalizedRecord,
    /// Its derived features
    pub features: FeatureVector,
    /// Positive-class probability
    pub probability: f64,
    /// Thresholded label
    pub outcome: bool,
}

impl Scored {
    /// The row to persist for this prediction
    pub fn prediction_record(&self) -> PredictionRecord {
        PredictionRecord::new(
            self.record.id,
            observation_json(&self.record).to_string(),
            self.probability,
        )
    }
}

/// Validator, transformer, classifier and threshold
pub struct Pipeline<C> {
    gatekeeper: Gatekeeper,
    transformer: FeatureTransformer,
    classifier: C,
    threshold: f64,
}

impl<C> Pipeline<C>
where
    C: RiskClassifier,
    C::Error: Display,
{
    /// Assemble a pipeline
    pub fn new(
        gatekeeper: Gatekeeper,
        reference: RaceReferenceCounts,
        classifier: C,
        threshold: f64,
    ) -> Self {
        Self {
            gatekeeper,
            transformer: FeatureTransformer::new(reference),
            classifier,
            threshold,
        }
    }

    /// The loaded classifier
    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    /// Probability cutoff shared by the prediction and outcome routes
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Label a probability under this pipeline's threshold
    pub fn decide(&self, probability: f64) -> bool {
        decide(probability, self.threshold)
    }

    /// Run a raw request body through validation, transformation and scoring
    pub fn score<K>(&self, body: &[u8], known_ids: &K) -> Result<Scored, PipelineError>
    where
        K: KnownIds + ?Sized,
        K::Error: Display,
    {
        let record = self.gatekeeper.validate_bytes(body, known_ids)?;
        self.score_record(record)
    }

    /// Transform and score an already validated record
    pub fn score_record(&self, record: NormalizedRecord) -> Result<Scored, PipelineError> {
        let features = self.transformer.transform(&record).map_err(|e| {
            error!(id = %record.id, error = %e, "feature transform failed");
            PipelineError::ClassifierFailure(e.to_string())
        })?;

        let probability = self
            .classifier
            .predict_probability(&features)
            .map_err(|e| {
                error!(id = %record.id, error = %e, "classifier failed");
                PipelineError::ClassifierFailure(e.to_string())
            })?;

        let outcome = self.decide(probability);
        debug!(
            id = %record.id,
            features = %feature_vector_json(&features),
            probability,
            outcome,
            "record scored"
        );

        Ok(Scored {
            record,
            features,
            probability,
            outcome,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docket_domain::{ObservationId, Sex};
    use std::collections::HashSet;
    use std::convert::Infallible;

    /// Returns a fixed probability regardless of input
    struct FixedClassifier(f64);

    impl RiskClassifier for FixedClassifier {
        type Error = Infallible;

        fn predict_probability(&self, _features: &FeatureVector) -> Result<f64, Self::Error> {
            Ok(self.0)
        }
    }

    struct FailingClassifier;

    impl RiskClassifier for FailingClassifier {
        type Error = String;

        fn predict_probability(&self, _features: &FeatureVector) -> Result<f64, Self::Error> {
            Err("weights unavailable".to_string())
        }
    }

    fn pipeline<C: RiskClassifier>(classifier: C) -> Pipeline<C>
    where
        C::Error: Display,
    {
        Pipeline::new(
            Gatekeeper::default_config(),
            RaceReferenceCounts::default(),
            classifier,
            0.6,
        )
    }

    #[test]
    fn test_score_accepts_and_thresholds() {
        let pipeline = pipeline(FixedClassifier(0.6));
        let known = HashSet::<ObservationId>::new();

        let scored = pipeline
            .score(br#"{"id": 4, "sex": "Female", "priors_count": 1}"#, &known)
            .unwrap();

        assert_eq!(scored.record.id, ObservationId::new(4));
        assert_eq!(scored.features.sex.as_present(), Some(&Sex::Female));
        assert_eq!(scored.probability, 0.6);
        assert!(scored.outcome);
    }

    #[test]
    fn test_score_below_threshold() {
        let pipeline = pipeline(FixedClassifier(0.59));
        let scored = pipeline
            .score(br#"{"id": 1}"#, &HashSet::<ObservationId>::new())
            .unwrap();
        assert!(!scored.outcome);
    }

    #[test]
    fn test_score_rejects_duplicate() {
        let pipeline = pipeline(FixedClassifier(0.9));
        let mut known = HashSet::<ObservationId>::new();
        known.insert(ObservationId::new(9));

        let result = pipeline.score(br#"{"id": 9}"#, &known);
        assert!(matches!(
            result,
            Err(PipelineError::Rejected(RejectionReason::DuplicateId { id: 9 }))
        ));
    }

    #[test]
    fn test_classifier_failure_is_not_a_rejection() {
        let pipeline = pipeline(FailingClassifier);
        let result = pipeline.score(br#"{"id": 2}"#, &HashSet::<ObservationId>::new());
        match result {
            Err(PipelineError::ClassifierFailure(msg)) => assert!(msg.contains("weights")),
            other => panic!("Expected ClassifierFailure, got {:?}", other.map(|s| s.outcome)),
        }
    }

    #[test]
    fn test_prediction_record_carries_observation() {
        let pipeline = pipeline(FixedClassifier(0.25));
        let scored = pipeline
            .score(br#"{"id": 12, "race": "Asian"}"#, &HashSet::<ObservationId>::new())
            .unwrap();

        let record = scored.prediction_record();
        assert_eq!(record.observation_id, ObservationId::new(12));
        assert_eq!(record.proba, 0.25);
        assert_eq!(record.true_class, None);

        let observation: serde_json::Value = serde_json::from_str(&record.observation).unwrap();
        assert_eq!(observation["id"], 12);
        assert_eq!(observation["race"], "Asian");
    }
}
