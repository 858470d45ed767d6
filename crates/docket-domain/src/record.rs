//! Record module - the validated, strongly-typed form of an input row

use std::fmt;

use crate::{Field, Race, Sex};

/// Caller-supplied observation identifier, unique across accepted records
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObservationId(i64);

impl ObservationId {
    /// Wrap a raw integer id
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Get the raw integer value
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl From<i64> for ObservationId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for ObservationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A calendar date that has already been checked for validity
///
/// Produced by the validator's date parser; the domain layer never parses
/// date strings itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate {
    year: i32,
    month: u32,
    day: u32,
}

impl CalendarDate {
    /// Build a date from components that a calendar parser already accepted
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Self {
        Self { year, month, day }
    }

    /// Calendar year
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Month of year, 1-12
    pub fn month(&self) -> u32 {
        self.month
    }

    /// Day of month, 1-31
    pub fn day(&self) -> u32 {
        self.day
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// A record that passed every per-field validation rule
///
/// Every expected column is present, either with a validated value or with
/// the explicit `Field::Absent` marker. The `id` is the only column that is
/// never absent: a record without one is rejected before normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRecord {
    /// Observation identifier
    pub id: ObservationId,

    /// Person's name (free text, unused downstream)
    pub name: Field<String>,

    /// Sex, within the closed domain
    pub sex: Field<Sex>,

    /// Date of birth
    pub dob: Field<CalendarDate>,

    /// Race, within the closed domain
    pub race: Field<Race>,

    /// Juvenile felony count, in configured bounds
    pub juv_fel_count: Field<f64>,

    /// Juvenile misdemeanor count, in configured bounds
    pub juv_misd_count: Field<f64>,

    /// Other juvenile offense count, in configured bounds
    pub juv_other_count: Field<f64>,

    /// Prior offense count, in configured bounds
    pub priors_count: Field<f64>,

    /// Case number (free text, unused downstream)
    pub c_case_number: Field<String>,

    /// Charge degree as received; valid once parenthesis noise is removed
    pub c_charge_degree: Field<String>,

    /// Free-text charge description
    pub c_charge_desc: Field<String>,

    /// Offense date (validated, unused downstream)
    pub c_offense_date: Field<CalendarDate>,

    /// Arrest date (validated, unused downstream)
    pub c_arrest_date: Field<CalendarDate>,

    /// Jail intake date
    pub c_jail_in: Field<CalendarDate>,
}

impl NormalizedRecord {
    /// A record carrying only an id, every other column absent
    pub fn with_id(id: ObservationId) -> Self {
        Self {
            id,
            name: Field::Absent,
            sex: Field::Absent,
            dob: Field::Absent,
            race: Field::Absent,
            juv_fel_count: Field::Absent,
            juv_misd_count: Field::Absent,
            juv_other_count: Field::Absent,
            priors_count: Field::Absent,
            c_case_number: Field::Absent,
            c_charge_degree: Field::Absent,
            c_charge_desc: Field::Absent,
            c_offense_date: Field::Absent,
            c_arrest_date: Field::Absent,
            c_jail_in: Field::Absent,
        }
    }
}
