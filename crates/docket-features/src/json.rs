//! JSON rendering of feature vectors, for logs and offline inspection

use docket_domain::{Categorical, FeatureVector, Field};
use serde_json::{Map, Value};

/// Render a feature vector as a JSON object keyed by `FeatureVector::COLUMNS`
///
/// Absent values render as `null`; categories render as their labels.
pub fn feature_vector_json(features: &FeatureVector) -> Value {
    let mut out = Map::new();
    out.insert("sex".into(), label(features.sex));
    out.insert("juv_fel_count".into(), number(features.juv_fel_count));
    out.insert("juv_misd_count".into(), number(features.juv_misd_count));
    out.insert("juv_other_count".into(), number(features.juv_other_count));
    out.insert("priors_count".into(), number(features.priors_count));
    out.insert("c_charge_degree".into(), label(features.c_charge_degree));
    out.insert("c_charge_desc".into(), label(Field::Present(features.c_charge_desc)));
    out.insert("race_grouped".into(), label(Field::Present(features.race_grouped)));
    out.insert("dob_year".into(), number(features.dob_year.map(f64::from)));
    out.insert("c_jail_year".into(), number(features.c_jail_year.map(f64::from)));
    out.insert("c_jail_month".into(), number(features.c_jail_month.map(f64::from)));
    Value::Object(out)
}

fn label<C: Categorical>(field: Field<C>) -> Value {
    field.map(|c| Value::from(c.as_str())).present_or(Value::Null)
}

fn number(field: Field<f64>) -> Value {
    field.map(Value::from).present_or(Value::Null)
}
