//! Charge description bucketing

use docket_domain::{ChargeCategory, Field};

/// Ordered keyword groups; the first group with a matching keyword wins
///
/// The order is load-bearing: the classifier was fit on descriptions
/// bucketed with exactly this priority. Revisit only together with a retrain.
pub const KEYWORD_RULES: [(ChargeCategory, &[&str]); 4] = [
    (
        ChargeCategory::Violence,
        &["battery", "assault", "violence", "murder", "batt"],
    ),
    (ChargeCategory::Robbery, &["theft", "burglary", "robbery"]),
    (
        ChargeCategory::Drugs,
        &[
            "drug",
            "possession",
            "trafficking",
            "poss",
            "cocaine",
            "heroin",
            "deliver",
            "traffick",
        ],
    ),
    (
        ChargeCategory::Traffic,
        &["driving", "traffic", "license", "driv", "vehicle", "conduct"],
    ),
];

/// Bucket a free-text charge description
///
/// Matching is a case-insensitive substring test. No match buckets to
/// `other`.
///
/// # Examples
///
/// ```
/// use docket_domain::ChargeCategory;
/// use docket_features::bucket_charge_description;
///
/// assert_eq!(bucket_charge_description("Grand Theft Auto"), ChargeCategory::Robbery);
/// assert_eq!(
///     bucket_charge_description("battery while possession of cocaine"),
///     ChargeCategory::Violence
/// );
/// ```
pub fn bucket_charge_description(description: &str) -> ChargeCategory {
    let lowered = description.to_lowercase();

    KEYWORD_RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|kw| lowered.contains(kw)))
        .map(|(category, _)| *category)
        .unwrap_or(ChargeCategory::Other)
}

/// Bucket an optional description; absent buckets to `other`
pub fn bucket_field(description: Field<&str>) -> ChargeCategory {
    match description {
        Field::Present(text) => bucket_charge_description(text),
        Field::Absent => ChargeCategory::Other,
    }
}
