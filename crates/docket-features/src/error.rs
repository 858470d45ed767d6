//! Feature pipeline error types

use thiserror::Error;

/// A validated record that still cannot be typed into the classifier's domains
///
/// Reaching one of these means the validator and the feature contract
/// disagree; it is a system fault, not a caller error.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransformError {
    /// Charge degree outside `{F, M}` after stripping parentheses
    #[error("Charge degree '{value}' does not map to a known category")]
    ChargeDegree {
        /// Value as stored in the record
        value: String,
    },
}

/// Errors loading the race reference table
#[derive(Error, Debug)]
pub enum ReferenceError {
    /// Failed to read the table file
    #[error("Failed to read race reference counts: {0}")]
    Io(#[from] std::io::Error),

    /// Table is not a JSON object of non-negative integer counts
    #[error("Failed to parse race reference counts: {0}")]
    Parse(#[from] serde_json::Error),
}
