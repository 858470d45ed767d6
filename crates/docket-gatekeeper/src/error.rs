//! Gatekeeper error types

use thiserror::Error;

/// Why a record was rejected
///
/// Every variant is caller-caused and terminal for the request. Messages
/// name the first failing field or rule.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RejectionReason {
    /// Envelope is not a decodable JSON object
    #[error("Failed to decode JSON object: {0}")]
    MalformedInput(String),

    /// No `id`, or `id` is null
    #[error("Missing observation_id")]
    MissingId,

    /// `id` was already accepted
    #[error("Observation ID already exists")]
    DuplicateId {
        /// The offending id
        id: i64,
    },

    /// Fields outside the expected schema, sorted by name
    #[error("Unexpected fields: {}", fields.join(", "))]
    UnexpectedFields {
        /// Every offending field
        fields: Vec<String>,
    },

    /// Categorical value outside its closed domain
    #[error("Invalid value '{value}' for '{field}'")]
    InvalidCategory {
        /// Field name
        field: String,
        /// Value as received
        value: String,
    },

    /// Numeric value outside its bounds
    #[error("Value '{value}' for '{field}' out of range [{min}, {max}]")]
    OutOfRange {
        /// Field name
        field: String,
        /// Value as received
        value: f64,
        /// Inclusive lower bound
        min: f64,
        /// Inclusive upper bound
        max: f64,
    },

    /// Value of the wrong JSON type
    #[error("Invalid value '{value}' for '{field}': expected {expected}")]
    InvalidType {
        /// Field name
        field: String,
        /// Value as received, JSON-encoded
        value: String,
        /// What the field accepts
        expected: String,
    },

    /// Date string a calendar parser does not accept
    #[error("Invalid datetime format for '{field}'")]
    InvalidDate {
        /// Field name
        field: String,
        /// Value as received
        value: String,
    },
}

impl RejectionReason {
    /// Stable name of the failure kind, for logs and metrics labels
    pub fn kind(&self) -> &'static str {
        match self {
            RejectionReason::MalformedInput(_) => "malformed_input",
            RejectionReason::MissingId => "missing_id",
            RejectionReason::DuplicateId { .. } => "duplicate_id",
            RejectionReason::UnexpectedFields { .. } => "unexpected_fields",
            RejectionReason::InvalidCategory { .. } => "invalid_category",
            RejectionReason::OutOfRange { .. } => "out_of_range",
            RejectionReason::InvalidType { .. } => "invalid_type",
            RejectionReason::InvalidDate { .. } => "invalid_date",
        }
    }

    /// Field the rejection is about, when it concerns a single field
    pub fn field(&self) -> Option<&str> {
        match self {
            RejectionReason::MissingId | RejectionReason::DuplicateId { .. } => Some("id"),
            RejectionReason::InvalidCategory { field, .. }
            | RejectionReason::OutOfRange { field, .. }
            | RejectionReason::InvalidType { field, .. }
            | RejectionReason::InvalidDate { field, .. } => Some(field),
            RejectionReason::MalformedInput(_) | RejectionReason::UnexpectedFields { .. } => None,
        }
    }
}

/// Errors that can occur during gatekeeper operations
#[derive(Error, Debug)]
pub enum GatekeeperError {
    /// The record failed validation
    #[error("{0}")]
    Rejected(#[from] RejectionReason),

    /// The id registry could not be consulted
    #[error("Store error: {0}")]
    Store(String),
}

impl GatekeeperError {
    /// The rejection, if this is a caller-caused failure
    pub fn rejection(&self) -> Option<&RejectionReason> {
        match self {
            GatekeeperError::Rejected(reason) => Some(reason),
            GatekeeperError::Store(_) => None,
        }
    }
}
