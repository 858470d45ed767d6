//! Docket Features
//!
//! Derives the classifier-facing feature vector from a validated record.
//!
//! The transformer is a pure function of the record, a fixed race reference
//! table and the fixed keyword taxonomy. Each step is guarded against the
//! absent marker, so a record with missing optional columns never fails:
//!
//! - strip parenthesis noise from the charge degree
//! - bucket the charge description into five categories
//! - collapse rare races into `Other`
//! - decompose `dob` and `c_jail_in` into year and month integers
//! - drop identity, free-text and unused-date columns
//!
//! # Examples
//!
//! ```
//! use docket_domain::{ChargeCategory, NormalizedRecord, ObservationId, Race};
//! use docket_features::{FeatureTransformer, RaceReferenceCounts};
//!
//! let reference = RaceReferenceCounts::from_counts([("Caucasian", 2103)]);
//! let transformer = FeatureTransformer::new(reference);
//!
//! let record = NormalizedRecord::with_id(ObservationId::new(1));
//! let features = transformer.transform(&record).unwrap();
//! assert_eq!(features.c_charge_desc, ChargeCategory::Other);
//! assert_eq!(features.race_grouped, Race::Other);
//! ```

#![warn(missing_docs)]

mod error;
mod json;
mod reference;
mod taxonomy;
mod transformer;

pub use error::{ReferenceError, TransformError};
pub use json::feature_vector_json;
pub use reference::{RaceReferenceCounts, DEFAULT_MIN_COUNT};
pub use taxonomy::{bucket_charge_description, bucket_field, KEYWORD_RULES};
pub use transformer::{transform, FeatureTransformer};
