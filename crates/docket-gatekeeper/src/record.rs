//! Raw boundary record and its JSON rendering

use docket_domain::{Categorical, Field, NormalizedRecord};
use serde_json::{Map, Value};

use crate::RejectionReason;

/// The fixed schema: every field a raw record may carry
pub const EXPECTED_FIELDS: [&str; 15] = [
    "id",
    "name",
    "sex",
    "dob",
    "race",
    "juv_fel_count",
    "juv_misd_count",
    "juv_other_count",
    "priors_count",
    "c_case_number",
    "c_charge_degree",
    "c_charge_desc",
    "c_offense_date",
    "c_arrest_date",
    "c_jail_in",
];

/// An untyped field-name to value mapping, as received at the boundary
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawRecord {
    fields: Map<String, Value>,
}

impl RawRecord {
    /// Decode a JSON envelope; anything but a JSON object is malformed
    pub fn from_slice(bytes: &[u8]) -> Result<Self, RejectionReason> {
        let value: Value = serde_json::from_slice(bytes)
            .map_err(|e| RejectionReason::MalformedInput(e.to_string()))?;
        Self::from_value(value)
    }

    /// Wrap an already decoded JSON value
    pub fn from_value(value: Value) -> Result<Self, RejectionReason> {
        match value {
            Value::Object(fields) => Ok(Self { fields }),
            other => Err(RejectionReason::MalformedInput(format!(
                "expected a JSON object, got {}",
                json_type_name(&other)
            ))),
        }
    }

    /// Value of a field; a missing key and an explicit `null` both read as `None`
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field).filter(|v| !v.is_null())
    }

    /// Field names present in the record, sorted
    pub fn field_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.fields.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Field names outside the expected schema, sorted
    pub fn unexpected_fields(&self) -> Vec<String> {
        self.field_names()
            .into_iter()
            .filter(|name| !EXPECTED_FIELDS.contains(name))
            .map(str::to_string)
            .collect()
    }
}

impl From<Map<String, Value>> for RawRecord {
    fn from(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}

pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Render a normalized record as a JSON object over the full schema
///
/// Absent fields become `null`; dates render as `YYYY-MM-DD`. This is the
/// observation the caller persists next to its prediction.
pub fn observation_json(record: &NormalizedRecord) -> Value {
    let mut out = Map::new();
    out.insert("id".to_string(), Value::from(record.id.value()));
    out.insert("name".to_string(), text(&record.name));
    out.insert(
        "sex".to_string(),
        to_json(record.sex.map(|s| Value::from(s.as_str()))),
    );
    out.insert("dob".to_string(), to_json(record.dob.map(|d| Value::from(d.to_string()))));
    out.insert(
        "race".to_string(),
        to_json(record.race.map(|r| Value::from(r.as_str()))),
    );
    out.insert("juv_fel_count".to_string(), number(record.juv_fel_count));
    out.insert("juv_misd_count".to_string(), number(record.juv_misd_count));
    out.insert("juv_other_count".to_string(), number(record.juv_other_count));
    out.insert("priors_count".to_string(), number(record.priors_count));
    out.insert("c_case_number".to_string(), text(&record.c_case_number));
    out.insert("c_charge_degree".to_string(), text(&record.c_charge_degree));
    out.insert("c_charge_desc".to_string(), text(&record.c_charge_desc));
    out.insert(
        "c_offense_date".to_string(),
        to_json(record.c_offense_date.map(|d| Value::from(d.to_string()))),
    );
    out.insert(
        "c_arrest_date".to_string(),
        to_json(record.c_arrest_date.map(|d| Value::from(d.to_string()))),
    );
    out.insert(
        "c_jail_in".to_string(),
        to_json(record.c_jail_in.map(|d| Value::from(d.to_string()))),
    );
    Value::Object(out)
}

fn to_json(field: Field<Value>) -> Value {
    field.present_or(Value::Null)
}

fn text(field: &Field<String>) -> Value {
    to_json(field.as_ref().map(|s| Value::from(s.as_str())))
}

fn number(field: Field<f64>) -> Value {
    to_json(field.map(Value::from))
}
