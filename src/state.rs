use crate::color::CategoryColors;
use crate::data::filter::{FilteredLaunchSet, filter_for_scatter};
use crate::data::model::{LaunchTable, PayloadRange, SiteSelection};
use crate::data::summary::{OutcomeSummary, summarize_outcomes};

/// Range slider step in kilograms.
pub const PAYLOAD_STEP_KG: f64 = 1000.0;

/// Dropdown label for the `ALL` sentinel.
pub const ALL_SITES_LABEL: &str = "All Sites";

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// The table is never mutated. `summary` and `scatter` are the latest outputs
/// of the two transforms and are replaced whenever a control they depend on
/// changes:
///
/// | artifact  | inputs                  |
/// |-----------|-------------------------|
/// | `summary` | site                    |
/// | `scatter` | site, payload range     |
pub struct DashboardState {
    table: LaunchTable,

    /// Current dropdown value.
    pub site: SiteSelection,

    /// Current slider interval (always ordered and inside the table bounds).
    pub payload_range: PayloadRange,

    /// Pie chart data for `site`.
    pub summary: OutcomeSummary,

    /// Scatter data for `site` and `payload_range`.
    pub scatter: FilteredLaunchSet,

    /// Booster category colours for the scatter plot.
    pub booster_colors: CategoryColors,
}

impl DashboardState {
    /// Initial state: every site, full payload range.
    pub fn new(table: LaunchTable) -> Self {
        let site = SiteSelection::All;
        let payload_range = PayloadRange::full(&table);
        let summary = summarize_outcomes(&table, &site);
        let scatter = filter_for_scatter(&table, &site, payload_range);
        let booster_colors = CategoryColors::new(table.booster_categories());

        Self {
            table,
            site,
            payload_range,
            summary,
            scatter,
            booster_colors,
        }
    }

    pub fn table(&self) -> &LaunchTable {
        &self.table
    }

    /// Dropdown entries as (label, value): the `ALL` sentinel first, then the
    /// distinct site names in sorted order.
    pub fn site_options(&self) -> Vec<(String, SiteSelection)> {
        std::iter::once((ALL_SITES_LABEL.to_string(), SiteSelection::All))
            .chain(
                self.table
                    .sites()
                    .iter()
                    .map(|s| (s.clone(), SiteSelection::Site(s.clone()))),
            )
            .collect()
    }

    /// Label shown in the dropdown for the current selection.
    pub fn site_label(&self) -> &str {
        match &self.site {
            SiteSelection::All => ALL_SITES_LABEL,
            SiteSelection::Site(name) => name,
        }
    }

    /// Change the site; both charts depend on it.
    pub fn set_site(&mut self, site: SiteSelection) {
        if site == self.site {
            return;
        }
        log::debug!("site selection → {site}");
        self.site = site;
        self.summary = summarize_outcomes(&self.table, &self.site);
        self.refilter();
    }

    /// Change the payload interval; only the scatter depends on it.
    ///
    /// Values are clamped into the table bounds and ordered, so the slider
    /// can never hand the filter an inverted range.
    pub fn set_payload_range(&mut self, low: f64, high: f64) {
        let min = self.table.min_payload_mass_kg();
        let max = self.table.max_payload_mass_kg();
        let (a, b) = (low.clamp(min, max), high.clamp(min, max));
        let range = PayloadRange::new(a.min(b), a.max(b));
        if range == self.payload_range {
            return;
        }
        log::debug!("payload range → [{}, {}] kg", range.low, range.high);
        self.payload_range = range;
        self.refilter();
    }

    /// Recompute the scatter set from the current controls.
    fn refilter(&mut self) {
        self.scatter = filter_for_scatter(&self.table, &self.site, self.payload_range);
    }
}
