//! Gatekeeper configuration

use serde::{Deserialize, Serialize};

/// Configuration for validation rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Inclusive lower bound for the juvenile and prior counts
    #[serde(default = "default_count_min")]
    pub count_min: f64,

    /// Inclusive upper bound for the juvenile and prior counts
    #[serde(default = "default_count_max")]
    pub count_max: f64,

    /// Reject ids the registry already knows
    #[serde(default = "default_check_duplicate_ids")]
    pub check_duplicate_ids: bool,
}

fn default_count_min() -> f64 {
    0.0
}

fn default_count_max() -> f64 {
    50.0
}

fn default_check_duplicate_ids() -> bool {
    true
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            count_min: default_count_min(),
            count_max: default_count_max(),
            check_duplicate_ids: default_check_duplicate_ids(),
        }
    }
}

impl ValidationConfig {
    /// Configuration for offline re-scoring of already stored observations
    ///
    /// Skips the uniqueness check; every other rule stays in force.
    pub fn rescoring() -> Self {
        Self {
            check_duplicate_ids: false,
            ..Self::default()
        }
    }

    /// Whether `value` lies in the configured count bounds
    pub fn count_in_bounds(&self, value: f64) -> bool {
        self.count_min <= value && value <= self.count_max
    }
}
