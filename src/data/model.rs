use std::collections::BTreeSet;
use std::fmt;

use serde::{Serialize, Serializer};

use crate::error::{DataLoadError, LoadResult};

/// Dropdown token meaning "no site restriction".
pub const ALL_SITES_TOKEN: &str = "ALL";

// ---------------------------------------------------------------------------
// Outcome – the binary launch result
// ---------------------------------------------------------------------------

/// Launch outcome as encoded by the `class` column (1 = success, 0 = failure).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Outcome {
    Success,
    Failure,
}

impl Outcome {
    pub fn from_class(class: i64) -> Option<Self> {
        match class {
            1 => Some(Outcome::Success),
            0 => Some(Outcome::Failure),
            _ => None,
        }
    }

    pub fn class(self) -> u8 {
        match self {
            Outcome::Success => 1,
            Outcome::Failure => 0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Outcome::Success => "Success",
            Outcome::Failure => "Failure",
        }
    }

    pub fn is_success(self) -> bool {
        self == Outcome::Success
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn serialize_class<S: Serializer>(outcome: &Outcome, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u8(outcome.class())
}

// ---------------------------------------------------------------------------
// LaunchRecord – one row of the source table
// ---------------------------------------------------------------------------

/// A single launch (one row of the source table).
///
/// Serialized with the source column names so report output reads like the
/// input file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LaunchRecord {
    #[serde(rename = "Launch Site")]
    pub site_name: String,
    #[serde(rename = "Payload Mass (kg)")]
    pub payload_mass_kg: f64,
    #[serde(rename = "class", serialize_with = "serialize_class")]
    pub outcome: Outcome,
    /// Only used to colour scatter points.
    #[serde(rename = "Booster Version Category")]
    pub booster_category: String,
}

impl LaunchRecord {
    pub fn new(
        site_name: impl Into<String>,
        payload_mass_kg: f64,
        outcome: Outcome,
        booster_category: impl Into<String>,
    ) -> Self {
        Self {
            site_name: site_name.into(),
            payload_mass_kg,
            outcome,
            booster_category: booster_category.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// LaunchTable – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset with bounds and indices computed once at load.
///
/// There are no mutating methods: after construction the table is shared
/// read-only by every transform.
#[derive(Debug, Clone)]
pub struct LaunchTable {
    records: Vec<LaunchRecord>,
    min_payload_mass_kg: f64,
    max_payload_mass_kg: f64,
    sites: BTreeSet<String>,
    booster_categories: BTreeSet<String>,
}

impl LaunchTable {
    /// Build the table and its derived scalars. An empty record list has no
    /// payload bounds and is rejected.
    pub fn from_records(records: Vec<LaunchRecord>) -> LoadResult<Self> {
        if records.is_empty() {
            return Err(DataLoadError::Empty);
        }

        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut sites = BTreeSet::new();
        let mut booster_categories = BTreeSet::new();

        for rec in &records {
            min = min.min(rec.payload_mass_kg);
            max = max.max(rec.payload_mass_kg);
            sites.insert(rec.site_name.clone());
            booster_categories.insert(rec.booster_category.clone());
        }

        Ok(LaunchTable {
            records,
            min_payload_mass_kg: min,
            max_payload_mass_kg: max,
            sites,
            booster_categories,
        })
    }

    pub fn records(&self) -> &[LaunchRecord] {
        &self.records
    }

    pub fn min_payload_mass_kg(&self) -> f64 {
        self.min_payload_mass_kg
    }

    pub fn max_payload_mass_kg(&self) -> f64 {
        self.max_payload_mass_kg
    }

    /// Distinct site names, sorted.
    pub fn sites(&self) -> &BTreeSet<String> {
        &self.sites
    }

    /// Distinct booster categories, sorted.
    pub fn booster_categories(&self) -> &BTreeSet<String> {
        &self.booster_categories
    }

    pub fn has_site(&self, site: &str) -> bool {
        self.sites.contains(site)
    }

    /// Number of launch records.
    pub fn len(&self) -> usize {
        self.records.len()
    }
}

// ---------------------------------------------------------------------------
// Control values
// ---------------------------------------------------------------------------

/// Site dropdown value: either the `ALL` sentinel or an exact site name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum SiteSelection {
    #[default]
    All,
    Site(String),
}

impl SiteSelection {
    /// Whether a record from `site` falls under this selection.
    pub fn matches(&self, site: &str) -> bool {
        match self {
            SiteSelection::All => true,
            SiteSelection::Site(name) => name == site,
        }
    }

    /// The dropdown token for this selection.
    pub fn token(&self) -> &str {
        match self {
            SiteSelection::All => ALL_SITES_TOKEN,
            SiteSelection::Site(name) => name,
        }
    }
}

impl From<&str> for SiteSelection {
    fn from(token: &str) -> Self {
        if token == ALL_SITES_TOKEN {
            SiteSelection::All
        } else {
            SiteSelection::Site(token.to_string())
        }
    }
}

impl fmt::Display for SiteSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Closed payload interval `[low, high]` in kilograms.
///
/// Not validated: an inverted interval is allowed and matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PayloadRange {
    pub low: f64,
    pub high: f64,
}

impl PayloadRange {
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// `[min, max]` of the table's payload column.
    pub fn full(table: &LaunchTable) -> Self {
        Self::new(table.min_payload_mass_kg(), table.max_payload_mass_kg())
    }

    /// Inclusive at both ends.
    pub fn contains(&self, payload_mass_kg: f64) -> bool {
        self.low <= payload_mass_kg && payload_mass_kg <= self.high
    }
}
