//! Feature vector - the classifier-facing row

use crate::{Categorical, ChargeCategory, ChargeDegree, Field, Race, Sex};

/// The fully normalized, typed row consumed by the classifier
///
/// Identity, free-text and unused-date columns are gone; dates survive only
/// as derived integers. Column names and categorical domains are fixed and
/// must match what the classifier was fit on.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    /// Sex
    pub sex: Field<Sex>,
    /// Juvenile felony count
    pub juv_fel_count: Field<f64>,
    /// Juvenile misdemeanor count
    pub juv_misd_count: Field<f64>,
    /// Other juvenile offense count
    pub juv_other_count: Field<f64>,
    /// Prior offense count
    pub priors_count: Field<f64>,
    /// Charge degree, parenthesis noise removed
    pub c_charge_degree: Field<ChargeDegree>,
    /// Bucketed charge description; a missing description buckets to `other`
    pub c_charge_desc: ChargeCategory,
    /// Race after rare-category collapsing
    pub race_grouped: Race,
    /// Year of birth
    pub dob_year: Field<i32>,
    /// Year of jail intake
    pub c_jail_year: Field<i32>,
    /// Month of jail intake
    pub c_jail_month: Field<u32>,
}

/// A single column value, in the shape an encoder needs
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FeatureValue {
    /// Numeric column; absent values are left to the model's imputation
    Numeric(Field<f64>),

    /// Categorical column with its positional domain
    Categorical {
        /// Labels in positional order
        domain: &'static [&'static str],
        /// Position within `domain`, if present
        position: Field<usize>,
    },
}

impl FeatureVector {
    /// Column names in canonical order
    pub const COLUMNS: [&'static str; 11] = [
        "sex",
        "juv_fel_count",
        "juv_misd_count",
        "juv_other_count",
        "priors_count",
        "c_charge_degree",
        "c_charge_desc",
        "race_grouped",
        "dob_year",
        "c_jail_year",
        "c_jail_month",
    ];

    /// Categorical domain of a column, or `None` for numeric/unknown columns
    pub fn domain_of(column: &str) -> Option<&'static [&'static str]> {
        match column {
            "sex" => Some(Sex::DOMAIN),
            "c_charge_degree" => Some(ChargeDegree::DOMAIN),
            "c_charge_desc" => Some(ChargeCategory::DOMAIN),
            "race_grouped" => Some(Race::DOMAIN),
            _ => None,
        }
    }

    /// Look a column up by name
    pub fn get(&self, column: &str) -> Option<FeatureValue> {
        let value = match column {
            "sex" => categorical(self.sex),
            "juv_fel_count" => FeatureValue::Numeric(self.juv_fel_count),
            "juv_misd_count" => FeatureValue::Numeric(self.juv_misd_count),
            "juv_other_count" => FeatureValue::Numeric(self.juv_other_count),
            "priors_count" => FeatureValue::Numeric(self.priors_count),
            "c_charge_degree" => categorical(self.c_charge_degree),
            "c_charge_desc" => categorical(Field::Present(self.c_charge_desc)),
            "race_grouped" => categorical(Field::Present(self.race_grouped)),
            "dob_year" => FeatureValue::Numeric(self.dob_year.map(f64::from)),
            "c_jail_year" => FeatureValue::Numeric(self.c_jail_year.map(f64::from)),
            "c_jail_month" => FeatureValue::Numeric(self.c_jail_month.map(f64::from)),
            _ => return None,
        };
        Some(value)
    }
}

fn categorical<C: Categorical>(field: Field<C>) -> FeatureValue {
    FeatureValue::Categorical {
        domain: C::DOMAIN,
        position: field.map(|c| c.position()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> FeatureVector {
        FeatureVector {
            sex: Field::Present(Sex::Male),
            juv_fel_count: Field::Present(0.0),
            juv_misd_count: Field::Absent,
            juv_other_count: Field::Present(1.0),
            priors_count: Field::Present(2.0),
            c_charge_degree: Field::Present(ChargeDegree::Felony),
            c_charge_desc: ChargeCategory::Robbery,
            race_grouped: Race::Caucasian,
            dob_year: Field::Present(1990),
            c_jail_year: Field::Present(2020),
            c_jail_month: Field::Absent,
        }
    }

    #[test]
    fn test_every_column_is_addressable() {
        let vector = sample();
        for column in FeatureVector::COLUMNS {
            assert!(vector.get(column).is_some(), "column {} missing", column);
        }
        assert!(vector.get("id").is_none());
        assert!(vector.get("dob").is_none());
    }

    #[test]
    fn test_categorical_positions() {
        let vector = sample();
        assert_eq!(
            vector.get("sex"),
            Some(FeatureValue::Categorical {
                domain: Sex::DOMAIN,
                position: Field::Present(1),
            })
        );
        assert_eq!(
            vector.get("c_charge_desc"),
            Some(FeatureValue::Categorical {
                domain: ChargeCategory::DOMAIN,
                position: Field::Present(1),
            })
        );
    }

    #[test]
    fn test_numeric_absent_stays_absent() {
        let vector = sample();
        assert_eq!(
            vector.get("c_jail_month"),
            Some(FeatureValue::Numeric(Field::Absent))
        );
        assert_eq!(
            vector.get("dob_year"),
            Some(FeatureValue::Numeric(Field::Present(1990.0)))
        );
    }

    #[test]
    fn test_domain_of() {
        assert_eq!(FeatureVector::domain_of("race_grouped"), Some(Race::DOMAIN));
        assert_eq!(FeatureVector::domain_of("priors_count"), None);
    }
}
