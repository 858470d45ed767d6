//! On-disk model artifact format

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Coefficients exported by the training run
///
/// ```json
/// {
///   "columns": ["sex", "juv_fel_count", "..."],
///   "intercept": -1.9,
///   "numeric": { "priors_count": { "coef": 0.15, "impute": 0.0 } },
///   "categorical": {
///     "sex": { "categories": ["Female", "Male"], "coefs": [-0.2, 0.2] }
///   }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    /// Column names in the order the model was fit on
    pub columns: Vec<String>,

    /// Linear intercept
    pub intercept: f64,

    /// Terms for numeric columns
    #[serde(default)]
    pub numeric: BTreeMap<String, NumericTerm>,

    /// One-hot terms for categorical columns
    #[serde(default)]
    pub categorical: BTreeMap<String, CategoricalTerm>,
}

/// Weight of a numeric column
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumericTerm {
    /// Linear coefficient
    pub coef: f64,

    /// Value substituted when the column is absent
    #[serde(default)]
    pub impute: f64,
}

/// Per-category weights of a one-hot encoded column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoricalTerm {
    /// Category labels in positional order
    pub categories: Vec<String>,

    /// One coefficient per category, same order
    pub coefs: Vec<f64>,
}
