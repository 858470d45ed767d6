//! Docket Model
//!
//! The pre-fit classifier behind the risk pipeline. A model artifact is
//! loaded once at startup, checked against the feature-vector contract and
//! then shared read-only.
//!
//! The contract check is strict: the artifact's column list must equal
//! `FeatureVector::COLUMNS` and every categorical domain must match the
//! domain enum position by position, because categories are one-hot encoded
//! by position.
//!
//! # Examples
//!
//! ```no_run
//! use docket_model::LogisticModel;
//!
//! let model = LogisticModel::from_file("models/recidivism.json").unwrap();
//! println!("{} columns", model.columns().len());
//! ```

#![warn(missing_docs)]

mod artifact;
mod error;
mod logistic;

pub use artifact::{CategoricalTerm, ModelArtifact, NumericTerm};
pub use error::ModelError;
pub use logistic::LogisticModel;
