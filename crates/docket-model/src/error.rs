//! Model error types

use thiserror::Error;

/// Errors that can occur loading or evaluating the classifier
#[derive(Error, Debug)]
pub enum ModelError {
    /// Failed to read the artifact file
    #[error("Failed to read model artifact: {0}")]
    Io(#[from] std::io::Error),

    /// Artifact is not valid JSON of the expected shape
    #[error("Failed to parse model artifact: {0}")]
    Parse(#[from] serde_json::Error),

    /// Artifact disagrees with the feature-vector contract
    #[error("Model contract violation: {0}")]
    Contract(String),

    /// Scoring produced NaN or infinity
    #[error("Model produced a non-finite score: {0}")]
    NonFinite(f64),
}
