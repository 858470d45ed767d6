//! Logistic regression over one-hot encoded features

use std::path::Path;

use docket_domain::traits::RiskClassifier;
use docket_domain::{FeatureValue, FeatureVector, Field};
use tracing::info;

use crate::{ModelArtifact, ModelError};

/// A compiled term, one per feature column
#[derive(Debug, Clone, PartialEq)]
enum Term {
    Numeric {
        column: &'static str,
        coef: f64,
        impute: f64,
    },
    Categorical {
        column: &'static str,
        coefs: Vec<f64>,
    },
}

/// Pre-fit logistic classifier
///
/// Built once from a [`ModelArtifact`] that has passed the contract check;
/// scoring is a pure function of the feature vector.
#[derive(Debug, Clone, PartialEq)]
pub struct LogisticModel {
    intercept: f64,
    terms: Vec<Term>,
}

impl LogisticModel {
    /// Load and contract-check an artifact file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ModelError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let model = Self::from_json_str(&contents)?;
        info!(path = %path.display(), terms = model.terms.len(), "model artifact loaded");
        Ok(model)
    }

    /// Parse and contract-check an artifact from JSON text
    pub fn from_json_str(json: &str) -> Result<Self, ModelError> {
        let artifact: ModelArtifact = serde_json::from_str(json)?;
        Self::from_artifact(artifact)
    }

    /// Contract-check an artifact and compile it
    pub fn from_artifact(artifact: ModelArtifact) -> Result<Self, ModelError> {
        if artifact.columns.len() != FeatureVector::COLUMNS.len()
            || artifact
                .columns
                .iter()
                .zip(FeatureVector::COLUMNS)
                .any(|(have, want)| have != want)
        {
            return Err(ModelError::Contract(format!(
                "columns {:?} do not match feature columns {:?}",
                artifact.columns,
                FeatureVector::COLUMNS
            )));
        }
        check_finite("intercept", artifact.intercept)?;

        let mut terms = Vec::with_capacity(FeatureVector::COLUMNS.len());
        for column in FeatureVector::COLUMNS {
            let term = match FeatureVector::domain_of(column) {
                Some(domain) => {
                    if artifact.numeric.contains_key(column) {
                        return Err(ModelError::Contract(format!(
                            "categorical column '{}' has a numeric term",
                            column
                        )));
                    }
                    let term = artifact.categorical.get(column).ok_or_else(|| {
                        ModelError::Contract(format!("missing categorical term for '{}'", column))
                    })?;
                    if term.categories.len() != domain.len()
                        || term.categories.iter().zip(domain).any(|(have, want)| have != want)
                    {
                        return Err(ModelError::Contract(format!(
                            "categories {:?} for '{}' do not match domain {:?}",
                            term.categories, column, domain
                        )));
                    }
                    if term.coefs.len() != domain.len() {
                        return Err(ModelError::Contract(format!(
                            "'{}' has {} coefficients for {} categories",
                            column,
                            term.coefs.len(),
                            domain.len()
                        )));
                    }
                    for coef in &term.coefs {
                        check_finite(column, *coef)?;
                    }
                    Term::Categorical {
                        column,
                        coefs: term.coefs.clone(),
                    }
                }
                None => {
                    if artifact.categorical.contains_key(column) {
                        return Err(ModelError::Contract(format!(
                            "numeric column '{}' has a categorical term",
                            column
                        )));
                    }
                    let term = artifact.numeric.get(column).ok_or_else(|| {
                        ModelError::Contract(format!("missing numeric term for '{}'", column))
                    })?;
                    check_finite(column, term.coef)?;
                    check_finite(column, term.impute)?;
                    Term::Numeric {
                        column,
                        coef: term.coef,
                        impute: term.impute,
                    }
                }
            };
            terms.push(term);
        }

        let extra: Vec<&String> = artifact
            .numeric
            .keys()
            .chain(artifact.categorical.keys())
            .filter(|k| !FeatureVector::COLUMNS.contains(&k.as_str()))
            .collect();
        if !extra.is_empty() {
            return Err(ModelError::Contract(format!(
                "terms for unknown columns: {:?}",
                extra
            )));
        }

        Ok(Self {
            intercept: artifact.intercept,
            terms,
        })
    }

    /// Feature columns in the order the model consumes them
    pub fn columns(&self) -> Vec<&'static str> {
        self.terms
            .iter()
            .map(|term| match term {
                Term::Numeric { column, .. } | Term::Categorical { column, .. } => *column,
            })
            .collect()
    }

    /// Linear score before the logistic link
    pub fn decision_function(&self, features: &FeatureVector) -> Result<f64, ModelError> {
        let mut score = self.intercept;

        for term in &self.terms {
            match term {
                Term::Numeric {
                    column,
                    coef,
                    impute,
                } => match features.get(column) {
                    Some(FeatureValue::Numeric(value)) => {
                        score += coef * value.present_or(*impute);
                    }
                    other => return Err(shape_mismatch(column, other)),
                },
                Term::Categorical { column, coefs } => match features.get(column) {
                    Some(FeatureValue::Categorical { position, .. }) => {
                        if let Field::Present(idx) = position {
                            let coef = coefs.get(idx).ok_or_else(|| {
                                ModelError::Contract(format!(
                                    "position {} out of range for '{}'",
                                    idx, column
                                ))
                            })?;
                            score += coef;
                        }
                    }
                    other => return Err(shape_mismatch(column, other)),
                },
            }
        }

        Ok(score)
    }
}

impl RiskClassifier for LogisticModel {
    type Error = ModelError;

    fn predict_probability(&self, features: &FeatureVector) -> Result<f64, Self::Error> {
        let score = self.decision_function(features)?;
        let probability = 1.0 / (1.0 + (-score).exp());
        if !probability.is_finite() {
            return Err(ModelError::NonFinite(score));
        }
        Ok(probability.clamp(0.0, 1.0))
    }
}

fn check_finite(column: &str, value: f64) -> Result<(), ModelError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ModelError::Contract(format!(
            "non-finite coefficient for '{}'",
            column
        )))
    }
}

fn shape_mismatch(column: &str, value: Option<FeatureValue>) -> ModelError {
    ModelError::Contract(format!(
        "feature '{}' has unexpected shape {:?}",
        column, value
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CategoricalTerm, NumericTerm};
    use docket_domain::{Categorical, ChargeCategory, ChargeDegree, Race, Sex};
    use std::collections::BTreeMap;

    fn artifact() -> ModelArtifact {
        let mut numeric = BTreeMap::new();
        for column in [
            "juv_fel_count",
            "juv_misd_count",
            "juv_other_count",
            "priors_count",
            "dob_year",
            "c_jail_year",
            "c_jail_month",
        ] {
            numeric.insert(
                column.to_string(),
                NumericTerm {
                    coef: 0.0,
                    impute: 0.0,
                },
            );
        }
        numeric.insert(
            "priors_count".to_string(),
            NumericTerm {
                coef: 0.5,
                impute: 1.0,
            },
        );

        let mut categorical = BTreeMap::new();
        categorical.insert("sex".to_string(), term(Sex::DOMAIN, &[0.0, 1.0]));
        categorical.insert("c_charge_degree".to_string(), term(ChargeDegree::DOMAIN, &[0.0, 0.0]));
        categorical.insert(
            "c_charge_desc".to_string(),
            term(ChargeCategory::DOMAIN, &[2.0, 0.0, 0.0, 0.0, 0.0]),
        );
        categorical.insert("race_grouped".to_string(), term(Race::DOMAIN, &[0.0; 6]));

        ModelArtifact {
            columns: FeatureVector::COLUMNS.iter().map(|c| c.to_string()).collect(),
            intercept: -1.0,
            numeric,
            categorical,
        }
    }

    fn term(domain: &[&str], coefs: &[f64]) -> CategoricalTerm {
        CategoricalTerm {
            categories: domain.iter().map(|c| c.to_string()).collect(),
            coefs: coefs.to_vec(),
        }
    }

    fn features() -> FeatureVector {
        FeatureVector {
            sex: Field::Present(Sex::Female),
            juv_fel_count: Field::Present(0.0),
            juv_misd_count: Field::Present(0.0),
            juv_other_count: Field::Present(0.0),
            priors_count: Field::Present(2.0),
            c_charge_degree: Field::Present(ChargeDegree::Felony),
            c_charge_desc: ChargeCategory::Robbery,
            race_grouped: Race::Caucasian,
            dob_year: Field::Present(1990),
            c_jail_year: Field::Present(2020),
            c_jail_month: Field::Present(1),
        }
    }

    #[test]
    fn test_score_one_hot_by_position() {
        let model = LogisticModel::from_artifact(artifact()).unwrap();

        // -1 + 0.5 * 2 = 0
        let score = model.decision_function(&features()).unwrap();
        assert!((score - 0.0).abs() < 1e-12);
        let p = model.predict_probability(&features()).unwrap();
        assert!((p - 0.5).abs() < 1e-12);

        let mut male_violent = features();
        male_violent.sex = Field::Present(Sex::Male);
        male_violent.c_charge_desc = ChargeCategory::Violence;
        let score = model.decision_function(&male_violent).unwrap();
        assert!((score - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_absent_values() {
        let model = LogisticModel::from_artifact(artifact()).unwrap();
        let mut vector = features();
        vector.priors_count = Field::Absent;
        vector.sex = Field::Absent;

        // absent priors imputes 1.0, absent sex contributes nothing
        let score = model.decision_function(&vector).unwrap();
        assert!((score - (-0.5)).abs() < 1e-12);
    }

    #[test]
    fn test_probability_in_unit_interval() {
        let mut art = artifact();
        art.intercept = 800.0;
        let model = LogisticModel::from_artifact(art).unwrap();
        let p = model.predict_probability(&features()).unwrap();
        assert!((0.0..=1.0).contains(&p));
    }

    #[test]
    fn test_column_order_mismatch() {
        let mut art = artifact();
        art.columns.swap(0, 1);
        assert!(matches!(
            LogisticModel::from_artifact(art),
            Err(ModelError::Contract(msg)) if msg.contains("columns")
        ));
    }

    #[test]
    fn test_category_order_mismatch() {
        let mut art = artifact();
        art.categorical
            .insert("sex".to_string(), term(&["Male", "Female"], &[1.0, 0.0]));
        assert!(matches!(
            LogisticModel::from_artifact(art),
            Err(ModelError::Contract(msg)) if msg.contains("sex")
        ));
    }

    #[test]
    fn test_missing_and_extra_terms() {
        let mut art = artifact();
        art.numeric.remove("dob_year");
        assert!(matches!(
            LogisticModel::from_artifact(art),
            Err(ModelError::Contract(msg)) if msg.contains("dob_year")
        ));

        let mut art = artifact();
        art.numeric.insert(
            "age".to_string(),
            NumericTerm {
                coef: 1.0,
                impute: 0.0,
            },
        );
        assert!(matches!(
            LogisticModel::from_artifact(art),
            Err(ModelError::Contract(msg)) if msg.contains("age")
        ));
    }

    #[test]
    fn test_coefficient_count_mismatch() {
        let mut art = artifact();
        art.categorical
            .insert("c_charge_degree".to_string(), term(ChargeDegree::DOMAIN, &[0.1]));
        assert!(LogisticModel::from_artifact(art).is_err());
    }

    #[test]
    fn test_json_roundtrip_and_file() {
        let json = serde_json::to_string(&artifact()).unwrap();
        let model = LogisticModel::from_json_str(&json).unwrap();
        assert_eq!(model.columns(), FeatureVector::COLUMNS.to_vec());

        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), &json).unwrap();
        assert_eq!(LogisticModel::from_file(file.path()).unwrap(), model);

        assert!(matches!(
            LogisticModel::from_json_str("{}"),
            Err(ModelError::Parse(_))
        ));
        assert!(matches!(
            LogisticModel::from_file("/nonexistent/model.json"),
            Err(ModelError::Io(_))
        ));
    }
}
