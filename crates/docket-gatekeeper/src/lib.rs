//! Docket Gatekeeper
//!
//! Validates raw, untrusted input records before they reach the feature
//! pipeline.
//!
//! The Gatekeeper provides:
//! - Envelope decoding (JSON object or reject)
//! - Observation id presence and uniqueness checks
//! - Schema enforcement over the fixed 15-field set
//! - Categorical, numeric-range and calendar-date validation
//!
//! Checks run in a fixed order and the first failure wins; rejections are
//! never accumulated.
//!
//! # Examples
//!
//! ```
//! use std::collections::HashSet;
//! use docket_domain::ObservationId;
//! use docket_gatekeeper::Gatekeeper;
//!
//! let gatekeeper = Gatekeeper::default_config();
//! let known_ids: HashSet<ObservationId> = HashSet::new();
//!
//! let record = gatekeeper
//!     .validate_bytes(br#"{"id": 1, "sex": "Male", "priors_count": 2}"#, &known_ids)
//!     .unwrap();
//! assert_eq!(record.id.value(), 1);
//! ```

#![warn(missing_docs)]

mod config;
mod dates;
mod error;
mod record;
mod validator;

pub use config::ValidationConfig;
pub use dates::parse_calendar_date;
pub use error::{GatekeeperError, RejectionReason};
pub use record::{observation_json, RawRecord, EXPECTED_FIELDS};
pub use validator::Gatekeeper;
