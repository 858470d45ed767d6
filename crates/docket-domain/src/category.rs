//! Closed categorical domains
//!
//! Each enum lists its variants in the positional order the classifier was
//! fit on. Many classifiers one-hot encode by position, so `DOMAIN` order is
//! part of the model contract and must not be reshuffled.

use std::fmt;

/// A closed categorical domain with a fixed positional order
pub trait Categorical: Sized + Copy + 'static {
    /// Category labels in positional order
    const DOMAIN: &'static [&'static str];

    /// All variants, in the same order as `DOMAIN`
    const VARIANTS: &'static [Self];

    /// Canonical label of this category
    fn as_str(&self) -> &'static str;

    /// Index of this category within `DOMAIN`
    fn position(&self) -> usize;

    /// Exact, case-sensitive lookup of a label
    fn parse(s: &str) -> Option<Self> {
        Self::VARIANTS.iter().copied().find(|v| v.as_str() == s)
    }
}

/// Recorded sex of the person
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sex {
    /// "Female"
    Female = 0,
    /// "Male"
    Male = 1,
}

impl Categorical for Sex {
    const DOMAIN: &'static [&'static str] = &["Female", "Male"];
    const VARIANTS: &'static [Self] = &[Sex::Female, Sex::Male];

    fn as_str(&self) -> &'static str {
        match self {
            Sex::Female => "Female",
            Sex::Male => "Male",
        }
    }

    fn position(&self) -> usize {
        *self as usize
    }
}

/// Race category, both as validated at the boundary and as grouped for scoring
///
/// Rare-category collapsing maps into this same domain (rare values become
/// `Other`), so one enum serves both stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Race {
    /// "African-American"
    AfricanAmerican = 0,
    /// "Asian"
    Asian = 1,
    /// "Caucasian"
    Caucasian = 2,
    /// "Hispanic"
    Hispanic = 3,
    /// "Native American"
    NativeAmerican = 4,
    /// "Other"
    Other = 5,
}

impl Categorical for Race {
    const DOMAIN: &'static [&'static str] = &[
        "African-American",
        "Asian",
        "Caucasian",
        "Hispanic",
        "Native American",
        "Other",
    ];
    const VARIANTS: &'static [Self] = &[
        Race::AfricanAmerican,
        Race::Asian,
        Race::Caucasian,
        Race::Hispanic,
        Race::NativeAmerican,
        Race::Other,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Race::AfricanAmerican => "African-American",
            Race::Asian => "Asian",
            Race::Caucasian => "Caucasian",
            Race::Hispanic => "Hispanic",
            Race::NativeAmerican => "Native American",
            Race::Other => "Other",
        }
    }

    fn position(&self) -> usize {
        *self as usize
    }
}

/// Degree of the current charge: felony or misdemeanor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChargeDegree {
    /// "F"
    Felony = 0,
    /// "M"
    Misdemeanor = 1,
}

impl ChargeDegree {
    /// Remove the parenthesis noise seen in source data ("(F)" -> "F")
    pub fn strip_noise(raw: &str) -> String {
        raw.chars().filter(|c| *c != '(' && *c != ')').collect()
    }

    /// Strip parenthesis noise, then look the label up in the domain
    pub fn parse_noisy(raw: &str) -> Option<Self> {
        Self::parse(&Self::strip_noise(raw))
    }
}

impl Categorical for ChargeDegree {
    const DOMAIN: &'static [&'static str] = &["F", "M"];
    const VARIANTS: &'static [Self] = &[ChargeDegree::Felony, ChargeDegree::Misdemeanor];

    fn as_str(&self) -> &'static str {
        match self {
            ChargeDegree::Felony => "F",
            ChargeDegree::Misdemeanor => "M",
        }
    }

    fn position(&self) -> usize {
        *self as usize
    }
}

/// Bucket of the free-text charge description
///
/// Declaration order is also the keyword-matching priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChargeCategory {
    /// Violent offenses
    Violence = 0,
    /// Theft, burglary, robbery
    Robbery = 1,
    /// Drug possession and trafficking
    Drugs = 2,
    /// Driving and vehicle offenses
    Traffic = 3,
    /// Everything else, including a missing description
    Other = 4,
}

impl Categorical for ChargeCategory {
    const DOMAIN: &'static [&'static str] = &["violence", "robbery", "drugs", "traffic", "other"];
    const VARIANTS: &'static [Self] = &[
        ChargeCategory::Violence,
        ChargeCategory::Robbery,
        ChargeCategory::Drugs,
        ChargeCategory::Traffic,
        ChargeCategory::Other,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            ChargeCategory::Violence => "violence",
            ChargeCategory::Robbery => "robbery",
            ChargeCategory::Drugs => "drugs",
            ChargeCategory::Traffic => "traffic",
            ChargeCategory::Other => "other",
        }
    }

    fn position(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Race {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ChargeDegree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ChargeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Race {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid race: {}", s))
    }
}

impl std::str::FromStr for Sex {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid sex: {}", s))
    }
}
