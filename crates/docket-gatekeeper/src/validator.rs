//! Record validation logic

use docket_domain::traits::KnownIds;
use docket_domain::{
    CalendarDate, Categorical, ChargeDegree, Field, NormalizedRecord, ObservationId, Race, Sex,
};
use serde_json::Value;
use tracing::{debug, info};

use crate::record::json_type_name;
use crate::{parse_calendar_date, GatekeeperError, RawRecord, RejectionReason, ValidationConfig};

/// The Gatekeeper validates raw records before feature derivation
#[derive(Debug, Clone, Default)]
pub struct Gatekeeper {
    config: ValidationConfig,
}

impl Gatekeeper {
    /// Create a new Gatekeeper with the given configuration
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Create a Gatekeeper with default configuration
    pub fn default_config() -> Self {
        Self::new(ValidationConfig::default())
    }

    /// Active configuration
    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Decode a JSON envelope and validate it
    pub fn validate_bytes<K>(
        &self,
        body: &[u8],
        known_ids: &K,
    ) -> Result<NormalizedRecord, GatekeeperError>
    where
        K: KnownIds + ?Sized,
        K::Error: std::fmt::Display,
    {
        let raw = RawRecord::from_slice(body).inspect_err(log_rejection)?;
        self.validate(&raw, known_ids)
    }

    /// Validate a raw record against the fixed schema
    ///
    /// Checks run in order and the first failure wins:
    ///
    /// 1. `id` present
    /// 2. `id` not already known (delegated to `known_ids`)
    /// 3. no fields outside the schema
    /// 4. categorical domains (`sex`, `c_charge_degree`, `race`)
    /// 5. numeric ranges (juvenile and prior counts)
    /// 6. calendar dates (`dob`, `c_offense_date`, `c_arrest_date`, `c_jail_in`)
    /// 7. free-text fields are strings
    ///
    /// Missing and null fields become `Field::Absent` and pass every
    /// per-field check.
    pub fn validate<K>(
        &self,
        raw: &RawRecord,
        known_ids: &K,
    ) -> Result<NormalizedRecord, GatekeeperError>
    where
        K: KnownIds + ?Sized,
        K::Error: std::fmt::Display,
    {
        let id = parse_id(raw).inspect_err(log_rejection)?;

        if self.config.check_duplicate_ids {
            let known = known_ids
                .is_known(id)
                .map_err(|e| GatekeeperError::Store(format!("Failed to check id {}: {}", id, e)))?;
            if known {
                let reason = RejectionReason::DuplicateId { id: id.value() };
                log_rejection(&reason);
                return Err(reason.into());
            }
        }

        let record = self.validate_fields(raw, id).inspect_err(log_rejection)?;
        debug!(id = %record.id, "record accepted");
        Ok(record)
    }

    fn validate_fields(
        &self,
        raw: &RawRecord,
        id: ObservationId,
    ) -> Result<NormalizedRecord, RejectionReason> {
        let unexpected = raw.unexpected_fields();
        if !unexpected.is_empty() {
            return Err(RejectionReason::UnexpectedFields { fields: unexpected });
        }

        let sex = categorical::<Sex>(raw, "sex")?;
        let c_charge_degree = charge_degree(raw)?;
        let race = categorical::<Race>(raw, "race")?;

        let juv_fel_count = self.count(raw, "juv_fel_count")?;
        let juv_misd_count = self.count(raw, "juv_misd_count")?;
        let juv_other_count = self.count(raw, "juv_other_count")?;
        let priors_count = self.count(raw, "priors_count")?;

        let dob = date(raw, "dob")?;
        let c_offense_date = date(raw, "c_offense_date")?;
        let c_arrest_date = date(raw, "c_arrest_date")?;
        let c_jail_in = date(raw, "c_jail_in")?;

        let name = text(raw, "name")?;
        let c_case_number = text(raw, "c_case_number")?;
        let c_charge_desc = text(raw, "c_charge_desc")?;

        Ok(NormalizedRecord {
            id,
            name,
            sex,
            dob,
            race,
            juv_fel_count,
            juv_misd_count,
            juv_other_count,
            priors_count,
            c_case_number,
            c_charge_degree,
            c_charge_desc,
            c_offense_date,
            c_arrest_date,
            c_jail_in,
        })
    }

    /// Validate a count field against the configured bounds
    fn count(&self, raw: &RawRecord, field: &str) -> Result<Field<f64>, RejectionReason> {
        let Some(value) = raw.get(field) else {
            return Ok(Field::Absent);
        };

        let number = match value {
            Value::Number(n) => n.as_f64(),
            _ => None,
        };
        let Some(number) = number else {
            return Err(invalid_type(field, value, "a number"));
        };

        if !self.config.count_in_bounds(number) {
            return Err(RejectionReason::OutOfRange {
                field: field.to_string(),
                value: number,
                min: self.config.count_min,
                max: self.config.count_max,
            });
        }

        Ok(Field::Present(number))
    }
}

/// Extract the observation id; whole-valued floats are accepted
fn parse_id(raw: &RawRecord) -> Result<ObservationId, RejectionReason> {
    let value = raw.get("id").ok_or(RejectionReason::MissingId)?;

    let id = match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
                .map(|f| f as i64)
        }),
        _ => None,
    };

    id.map(ObservationId::new)
        .ok_or_else(|| invalid_type("id", value, "an integer"))
}

fn categorical<C: Categorical>(raw: &RawRecord, field: &str) -> Result<Field<C>, RejectionReason> {
    let Some(value) = raw.get(field) else {
        return Ok(Field::Absent);
    };

    value
        .as_str()
        .and_then(C::parse)
        .map(Field::Present)
        .ok_or_else(|| invalid_category(field, value))
}

/// Charge degree is checked modulo parenthesis noise but kept as received
fn charge_degree(raw: &RawRecord) -> Result<Field<String>, RejectionReason> {
    let field = "c_charge_degree";
    let Some(value) = raw.get(field) else {
        return Ok(Field::Absent);
    };

    match value.as_str() {
        Some(text) if ChargeDegree::parse_noisy(text).is_some() => {
            Ok(Field::Present(text.to_string()))
        }
        _ => Err(invalid_category(field, value)),
    }
}

fn date(raw: &RawRecord, field: &str) -> Result<Field<CalendarDate>, RejectionReason> {
    let Some(value) = raw.get(field) else {
        return Ok(Field::Absent);
    };

    value
        .as_str()
        .and_then(parse_calendar_date)
        .map(Field::Present)
        .ok_or_else(|| RejectionReason::InvalidDate {
            field: field.to_string(),
            value: display_value(value),
        })
}

fn text(raw: &RawRecord, field: &str) -> Result<Field<String>, RejectionReason> {
    match raw.get(field) {
        None => Ok(Field::Absent),
        Some(Value::String(s)) => Ok(Field::Present(s.clone())),
        Some(other) => Err(invalid_type(field, other, "a string")),
    }
}

fn invalid_category(field: &str, value: &Value) -> RejectionReason {
    RejectionReason::InvalidCategory {
        field: field.to_string(),
        value: display_value(value),
    }
}

fn invalid_type(field: &str, value: &Value, expected: &str) -> RejectionReason {
    RejectionReason::InvalidType {
        field: field.to_string(),
        value: display_value(value),
        expected: format!("{} (got {})", expected, json_type_name(value)),
    }
}

/// Strings render without quotes, everything else as compact JSON
fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn log_rejection(reason: &RejectionReason) {
    info!(kind = reason.kind(), field = reason.field(), "record rejected: {}", reason);
}
