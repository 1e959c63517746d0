use std::f64::consts::{FRAC_PI_2, TAU};

use eframe::egui::{Color32, RichText, Stroke, Ui};
use egui_plot::{Legend, MarkerShape, Plot, PlotPoint, PlotPoints, Points, Polygon, Text};

use crate::color::generate_palette;
use crate::data::filter::FilteredLaunchSet;
use crate::data::summary::OutcomeSummary;
use crate::state::DashboardState;

/// Pie radius in plot units.
const PIE_RADIUS: f64 = 1.0;

/// Arc segments for a full turn; each wedge gets its share (at least two).
const PIE_SEGMENTS: usize = 128;

// ---------------------------------------------------------------------------
// Pie geometry
// ---------------------------------------------------------------------------

/// One pie slice as a fraction range of a full turn.
#[derive(Debug, Clone, PartialEq)]
pub struct Wedge {
    pub label: String,
    pub count: usize,
    /// Start of the slice, in turns (0.0 ..= 1.0).
    pub start: f64,
    /// End of the slice, in turns (0.0 ..= 1.0).
    pub end: f64,
}

impl Wedge {
    pub fn fraction(&self) -> f64 {
        self.end - self.start
    }

    /// Polygon outline: centre, then the arc. Slices start at twelve o'clock
    /// and run clockwise.
    pub fn outline(&self) -> Vec<[f64; 2]> {
        let steps = ((self.fraction() * PIE_SEGMENTS as f64).ceil() as usize).max(2);
        std::iter::once([0.0, 0.0])
            .chain((0..=steps).map(|i| {
                let turn = self.start + self.fraction() * i as f64 / steps as f64;
                point_at(turn, PIE_RADIUS)
            }))
            .collect()
    }

    /// Anchor for the percentage label, midway along the slice.
    pub fn label_anchor(&self) -> [f64; 2] {
        point_at((self.start + self.end) / 2.0, PIE_RADIUS * 0.65)
    }
}

fn point_at(turn: f64, radius: f64) -> [f64; 2] {
    let angle = FRAC_PI_2 - turn * TAU;
    [radius * angle.cos(), radius * angle.sin()]
}

/// Lay slices out proportionally to their counts. Zero-count slices are
/// skipped; an all-zero input gives no wedges.
pub fn pie_wedges(slices: &[(String, usize)]) -> Vec<Wedge> {
    let total: usize = slices.iter().map(|(_, n)| n).sum();
    if total == 0 {
        return Vec::new();
    }

    let mut acc = 0usize;
    slices
        .iter()
        .filter(|(_, n)| *n > 0)
        .map(|(label, n)| {
            let start = acc as f64 / total as f64;
            acc += n;
            Wedge {
                label: label.clone(),
                count: *n,
                start,
                end: acc as f64 / total as f64,
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Outcome pie chart
// ---------------------------------------------------------------------------

/// Render the outcome pie chart for the current site selection.
pub fn pie_chart(ui: &mut Ui, state: &DashboardState, height: f32) {
    ui.strong(OutcomeSummary::title(&state.site));

    if state.summary.is_empty() {
        ui.label("No launches for this selection.");
        return;
    }
    ui.label(RichText::new(format!("{} launches", state.summary.total())).weak());
    let wedges = pie_wedges(&state.summary.slices());
    let palette = generate_palette(wedges.len());

    Plot::new("success_pie_chart")
        .height(height)
        .legend(Legend::default())
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .show_x(false)
        .show_y(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .include_x(-1.4 * PIE_RADIUS)
        .include_x(1.4 * PIE_RADIUS)
        .include_y(-1.1 * PIE_RADIUS)
        .include_y(1.1 * PIE_RADIUS)
        .show(ui, |plot_ui| {
            for (wedge, color) in wedges.iter().zip(palette) {
                let outline: PlotPoints = wedge.outline().into();
                plot_ui.polygon(
                    Polygon::new(outline)
                        .name(format!("{} ({})", wedge.label, wedge.count))
                        .fill_color(color)
                        .stroke(Stroke::new(1.0, Color32::WHITE)),
                );

                let [x, y] = wedge.label_anchor();
                let pct = format!("{:.1}%", wedge.fraction() * 100.0);
                plot_ui.text(
                    Text::new(PlotPoint::new(x, y), RichText::new(pct).strong())
                        .color(Color32::WHITE),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Payload / outcome scatter plot
// ---------------------------------------------------------------------------

/// Render payload mass against launch outcome, one colour per booster
/// category.
pub fn scatter_plot(ui: &mut Ui, state: &DashboardState) {
    ui.strong(FilteredLaunchSet::title(&state.site));

    if state.scatter.is_empty() {
        ui.label(RichText::new("No launches in this payload range.").weak());
    }

    let table = state.table();
    let colors = &state.booster_colors;

    Plot::new("success_payload_scatter_chart")
        .legend(Legend::default())
        .x_axis_label("Payload Mass (kg)")
        .y_axis_label("class")
        .include_x(table.min_payload_mass_kg())
        .include_x(table.max_payload_mass_kg())
        .include_y(-0.25)
        .include_y(1.25)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (category, points) in state.scatter.by_booster_category() {
                let points: PlotPoints = points.into();
                plot_ui.points(
                    Points::new(points)
                        .name(category)
                        .color(colors.color_for(category))
                        .shape(MarkerShape::Circle)
                        .filled(true)
                        .radius(4.0),
                );
            }
        });
}
