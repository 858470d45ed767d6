//! Docket Domain Layer
//!
//! Core value types and trait interfaces for the recidivism risk pipeline.
//! Like the rest of the domain layer it carries no external dependencies:
//! parsing, persistence and scoring live in the infrastructure crates.
//!
//! ## Key Concepts
//!
//! - **Field**: an explicit `Present(value) | Absent` marker for every schema column
//! - **NormalizedRecord**: a raw input that passed every validation rule
//! - **FeatureVector**: the typed, closed-domain row the classifier was fit on
//! - **Decision**: the fixed probability-to-label threshold
//! - **PredictionRecord**: what the caller persists after scoring
//!
//! ## Architecture
//!
//! - No external crate dependencies
//! - Trait definitions for the collaborators (store, classifier)
//! - Infrastructure implementations live in other crates

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod category;
pub mod decision;
pub mod features;
pub mod field;
pub mod prediction;
pub mod record;
pub mod traits;

// Re-exports for convenience
pub use category::{Categorical, ChargeCategory, ChargeDegree, Race, Sex};
pub use decision::{decide, DEFAULT_THRESHOLD};
pub use features::{FeatureValue, FeatureVector};
pub use field::Field;
pub use prediction::PredictionRecord;
pub use record::{CalendarDate, NormalizedRecord, ObservationId};
