//! Record to feature-vector derivation

use docket_domain::{ChargeDegree, FeatureVector, NormalizedRecord};
use tracing::debug;

use crate::{bucket_field, RaceReferenceCounts, TransformError};

/// Derives feature vectors against a fixed race reference table
///
/// Holds no state beyond the reference table; safe to share read-only
/// across requests.
#[derive(Debug, Clone, Default)]
pub struct FeatureTransformer {
    reference: RaceReferenceCounts,
}

impl FeatureTransformer {
    /// Create a transformer over a reference table
    pub fn new(reference: RaceReferenceCounts) -> Self {
        Self { reference }
    }

    /// The reference table in use
    pub fn reference(&self) -> &RaceReferenceCounts {
        &self.reference
    }

    /// Derive the feature vector for one record
    pub fn transform(&self, record: &NormalizedRecord) -> Result<FeatureVector, TransformError> {
        transform(record, &self.reference)
    }
}

/// Derive the feature vector for one record
///
/// `id`, `name`, `c_case_number`, `c_offense_date` and `c_arrest_date` are
/// dropped; `race`, `dob` and `c_jail_in` survive only through their derived
/// columns. Absent source columns yield absent (or catch-all) outputs.
pub fn transform(
    record: &NormalizedRecord,
    reference: &RaceReferenceCounts,
) -> Result<FeatureVector, TransformError> {
    let c_charge_degree = record.c_charge_degree.as_ref().try_map(|raw| {
        ChargeDegree::parse_noisy(raw).ok_or_else(|| TransformError::ChargeDegree {
            value: raw.clone(),
        })
    })?;

    let c_charge_desc = bucket_field(record.c_charge_desc.as_ref().map(String::as_str));
    let race_grouped = reference.collapse(record.race);

    let features = FeatureVector {
        sex: record.sex,
        juv_fel_count: record.juv_fel_count,
        juv_misd_count: record.juv_misd_count,
        juv_other_count: record.juv_other_count,
        priors_count: record.priors_count,
        c_charge_degree,
        c_charge_desc,
        race_grouped,
        dob_year: record.dob.map(|d| d.year()),
        c_jail_year: record.c_jail_in.map(|d| d.year()),
        c_jail_month: record.c_jail_in.map(|d| d.month()),
    };

    debug!(
        id = %record.id,
        charge = %features.c_charge_desc,
        race_grouped = %features.race_grouped,
        "features derived"
    );

    Ok(features)
}
