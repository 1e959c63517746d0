use std::collections::BTreeMap;

use serde::Serialize;

use super::model::{LaunchTable, Outcome, SiteSelection};

// ---------------------------------------------------------------------------
// OutcomeSummary – the pie chart's derived table
// ---------------------------------------------------------------------------

/// Counts backing the outcome pie chart.
///
/// Only non-zero entries are ever present, so the slice counts always sum to
/// the number of records the selection restricted to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "counts", rename_all = "snake_case")]
pub enum OutcomeSummary {
    /// `ALL` selected: successful launches per site.
    SuccessesBySite(BTreeMap<String, usize>),
    /// A single site selected: launches per outcome at that site.
    SiteOutcomes(BTreeMap<Outcome, usize>),
}

impl OutcomeSummary {
    /// Sum of all slice counts.
    pub fn total(&self) -> usize {
        match self {
            OutcomeSummary::SuccessesBySite(counts) => counts.values().sum(),
            OutcomeSummary::SiteOutcomes(counts) => counts.values().sum(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            OutcomeSummary::SuccessesBySite(counts) => counts.is_empty(),
            OutcomeSummary::SiteOutcomes(counts) => counts.is_empty(),
        }
    }

    /// (label, count) pairs in key order, ready for rendering.
    pub fn slices(&self) -> Vec<(String, usize)> {
        match self {
            OutcomeSummary::SuccessesBySite(counts) => {
                counts.iter().map(|(site, &n)| (site.clone(), n)).collect()
            }
            OutcomeSummary::SiteOutcomes(counts) => counts
                .iter()
                .map(|(outcome, &n)| (outcome.label().to_string(), n))
                .collect(),
        }
    }

    /// Chart title for the selection this summary was built from.
    pub fn title(selection: &SiteSelection) -> String {
        match selection {
            SiteSelection::All => "Total Successful Launches by Site".to_string(),
            SiteSelection::Site(site) => format!("Total Launch Outcomes for site {site}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Summarise launch outcomes for the pie chart.
///
/// * `All` → successes grouped by site; sites without a success are absent.
/// * `Site(name)` → that site's launches grouped by outcome; an unknown site
///   yields an empty summary rather than an error.
pub fn summarize_outcomes(table: &LaunchTable, selection: &SiteSelection) -> OutcomeSummary {
    match selection {
        SiteSelection::All => {
            let counts = table
                .records()
                .iter()
                .filter(|rec| rec.outcome.is_success())
                .fold(BTreeMap::new(), |mut acc, rec| {
                    *acc.entry(rec.site_name.clone()).or_insert(0) += 1;
                    acc
                });
            OutcomeSummary::SuccessesBySite(counts)
        }
        SiteSelection::Site(site) => {
            let counts = table
                .records()
                .iter()
                .filter(|rec| rec.site_name == *site)
                .fold(BTreeMap::new(), |mut acc, rec| {
                    *acc.entry(rec.outcome).or_insert(0) += 1;
                    acc
                });
            OutcomeSummary::SiteOutcomes(counts)
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::data::model::LaunchRecord;

    fn scenario() -> LaunchTable {
        LaunchTable::from_records(vec![
            LaunchRecord::new("CCAFS", 500.0, Outcome::Success, "v1.0"),
            LaunchRecord::new("CCAFS", 2500.0, Outcome::Failure, "v1.0"),
            LaunchRecord::new("KSC", 5000.0, Outcome::Success, "v1.1"),
        ])
        .unwrap()
    }

    #[test]
    fn test_all_sites_counts_successes() {
        let summary = summarize_outcomes(&scenario(), &SiteSelection::All);
        let expected = BTreeMap::from([("CCAFS".to_string(), 1), ("KSC".to_string(), 1)]);
        assert_eq!(summary, OutcomeSummary::SuccessesBySite(expected));
    }

    #[test]
    fn test_single_site_counts_outcomes() {
        let summary = summarize_outcomes(&scenario(), &SiteSelection::from("CCAFS"));
        let expected = BTreeMap::from([(Outcome::Success, 1), (Outcome::Failure, 1)]);
        assert_eq!(summary, OutcomeSummary::SiteOutcomes(expected));
    }

    #[test]
    fn test_only_present_outcomes_emitted() {
        let summary = summarize_outcomes(&scenario(), &SiteSelection::from("KSC"));
        assert_eq!(summary.slices(), vec![("Success".to_string(), 1)]);
    }

    #[test]
    fn test_site_without_success_absent_from_all() {
        let table = LaunchTable::from_records(vec![
            LaunchRecord::new("A", 1.0, Outcome::Failure, "FT"),
            LaunchRecord::new("B", 2.0, Outcome::Success, "FT"),
        ])
        .unwrap();
        let summary = summarize_outcomes(&table, &SiteSelection::All);
        assert_eq!(summary.slices(), vec![("B".to_string(), 1)]);
    }

    #[test]
    fn test_unknown_site_is_empty() {
        let summary = summarize_outcomes(&scenario(), &SiteSelection::from("NoSuchSite"));
        assert!(summary.is_empty());
        assert_eq!(summary.total(), 0);
    }

    #[test]
    fn test_titles() {
        assert_eq!(
            OutcomeSummary::title(&SiteSelection::All),
            "Total Successful Launches by Site"
        );
        assert_eq!(
            OutcomeSummary::title(&SiteSelection::from("KSC")),
            "Total Launch Outcomes for site KSC"
        );
    }

    #[test]
    fn test_serialized_shape() {
        let summary = summarize_outcomes(&scenario(), &SiteSelection::from("CCAFS"));
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["kind"], "site_outcomes");
        assert_eq!(json["counts"]["Success"], 1);
        assert_eq!(json["counts"]["Failure"], 1);
    }

    // -- Properties --

    const SITES: [&str; 3] = ["CCAFS", "KSC", "VAFB"];

    fn arb_table() -> impl Strategy<Value = LaunchTable> {
        prop::collection::vec((0..SITES.len(), 0.0..10_000.0f64, any::<bool>()), 1..60).prop_map(
            |rows| {
                let records = rows
                    .into_iter()
                    .map(|(site, mass, ok)| {
                        let outcome = if ok { Outcome::Success } else { Outcome::Failure };
                        LaunchRecord::new(SITES[site], mass, outcome, "FT")
                    })
                    .collect();
                LaunchTable::from_records(records).unwrap()
            },
        )
    }

    proptest! {
        #[test]
        fn prop_all_total_equals_success_count(table in arb_table()) {
            let successes = table.records().iter().filter(|r| r.outcome.is_success()).count();
            prop_assert_eq!(summarize_outcomes(&table, &SiteSelection::All).total(), successes);
        }

        #[test]
        fn prop_site_total_equals_site_count(table in arb_table(), site in 0..SITES.len()) {
            let name = SITES[site];
            let expected = table.records().iter().filter(|r| r.site_name == name).count();
            let summary = summarize_outcomes(&table, &SiteSelection::from(name));
            prop_assert_eq!(summary.total(), expected);
            prop_assert!(summary.slices().iter().all(|(_, n)| *n > 0));
        }

        #[test]
        fn prop_idempotent(table in arb_table(), site in 0..SITES.len()) {
            let selection = SiteSelection::from(SITES[site]);
            prop_assert_eq!(
                summarize_outcomes(&table, &selection),
                summarize_outcomes(&table, &selection)
            );
        }
    }
}
