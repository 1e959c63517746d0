use std::collections::BTreeMap;

use serde::Serialize;

use super::model::{LaunchRecord, LaunchTable, PayloadRange, SiteSelection};

// ---------------------------------------------------------------------------
// FilteredLaunchSet – the scatter plot's derived table
// ---------------------------------------------------------------------------

/// Records passing the scatter filters, in original table order.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct FilteredLaunchSet {
    pub records: Vec<LaunchRecord>,
}

impl FilteredLaunchSet {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Split into one `(payload kg, class)` series per booster category,
    /// keyed in sorted category order. Points keep their relative order.
    pub fn by_booster_category(&self) -> BTreeMap<&str, Vec<[f64; 2]>> {
        let mut series: BTreeMap<&str, Vec<[f64; 2]>> = BTreeMap::new();
        for rec in &self.records {
            series
                .entry(rec.booster_category.as_str())
                .or_default()
                .push([rec.payload_mass_kg, f64::from(rec.outcome.class())]);
        }
        series
    }

    /// Chart title for the selection this set was built from.
    pub fn title(selection: &SiteSelection) -> String {
        match selection {
            SiteSelection::All => {
                "Correlation between Payload and Success for all sites".to_string()
            }
            SiteSelection::Site(site) => {
                format!("Correlation between Payload and Success for site {site}")
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Return the records for the scatter plot.
///
/// A record passes when:
/// * `range.low <= payload_mass_kg <= range.high` (both ends inclusive), and
/// * the selection is `All`, or the record's site equals the selected site.
///
/// An unknown site or an inverted range simply yields an empty set.
pub fn filter_for_scatter(
    table: &LaunchTable,
    selection: &SiteSelection,
    range: PayloadRange,
) -> FilteredLaunchSet {
    let records = table
        .records()
        .iter()
        .filter(|rec| range.contains(rec.payload_mass_kg))
        .filter(|rec| selection.matches(&rec.site_name))
        .cloned()
        .collect();
    FilteredLaunchSet { records }
}
