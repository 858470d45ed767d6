//! Race reference frequency table

use std::collections::BTreeMap;
use std::path::Path;

use docket_domain::{Categorical, Field, Race};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::ReferenceError;

/// Minimum reference frequency for a race to keep its own category
pub const DEFAULT_MIN_COUNT: u64 = 50;

/// Fixed race frequencies from the training population
///
/// Computed once when the classifier was fit and loaded once at startup;
/// never recomputed per request. A race missing from the table has count 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaceReferenceCounts {
    counts: BTreeMap<String, u64>,
    #[serde(default = "default_min_count")]
    min_count: u64,
}

fn default_min_count() -> u64 {
    DEFAULT_MIN_COUNT
}

impl Default for RaceReferenceCounts {
    fn default() -> Self {
        Self {
            counts: BTreeMap::new(),
            min_count: DEFAULT_MIN_COUNT,
        }
    }
}

impl RaceReferenceCounts {
    /// Build a table from `(label, count)` pairs
    pub fn from_counts<I, S>(counts: I) -> Self
    where
        I: IntoIterator<Item = (S, u64)>,
        S: Into<String>,
    {
        Self {
            counts: counts.into_iter().map(|(k, v)| (k.into(), v)).collect(),
            min_count: DEFAULT_MIN_COUNT,
        }
    }

    /// Count a training column once to build the table
    pub fn from_observations<'a, I>(races: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut counts = BTreeMap::new();
        for race in races {
            *counts.entry(race.to_string()).or_insert(0) += 1;
        }
        Self {
            counts,
            min_count: DEFAULT_MIN_COUNT,
        }
    }

    /// Parse a JSON object of `label -> count`
    pub fn from_json_str(json: &str) -> Result<Self, ReferenceError> {
        let counts: BTreeMap<String, u64> = serde_json::from_str(json)?;
        for label in counts.keys() {
            if Race::parse(label).is_none() {
                warn!(label = %label, "race reference table has a label outside the race domain");
            }
        }
        Ok(Self {
            counts,
            min_count: DEFAULT_MIN_COUNT,
        })
    }

    /// Load a JSON table from disk
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ReferenceError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Override the collapsing cutoff
    pub fn with_min_count(mut self, min_count: u64) -> Self {
        self.min_count = min_count;
        self
    }

    /// Collapsing cutoff in effect
    pub fn min_count(&self) -> u64 {
        self.min_count
    }

    /// Reference frequency of a label
    pub fn count(&self, label: &str) -> u64 {
        self.counts.get(label).copied().unwrap_or(0)
    }

    /// Number of labels in the table
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Whether a race is frequent enough to keep its own category
    pub fn is_common(&self, race: Race) -> bool {
        self.count(race.as_str()) >= self.min_count
    }

    /// Keep a common race, replace a rare or absent one with `Other`
    pub fn collapse(&self, race: Field<Race>) -> Race {
        match race {
            Field::Present(r) if self.is_common(r) => r,
            _ => Race::Other,
        }
    }
}
