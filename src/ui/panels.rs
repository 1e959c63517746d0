use eframe::egui::{self, Align, Layout, RichText, Ui};

use crate::state::{DashboardState, PAYLOAD_STEP_KG};

// ---------------------------------------------------------------------------
// Left side panel – controls
// ---------------------------------------------------------------------------

/// Render the control panel: site dropdown and payload range.
pub fn side_panel(ui: &mut Ui, state: &mut DashboardState) {
    ui.heading("Controls");
    ui.separator();

    site_dropdown(ui, state);
    ui.add_space(12.0);
    payload_range_slider(ui, state);
}

fn site_dropdown(ui: &mut Ui, state: &mut DashboardState) {
    ui.strong("Launch Site");

    let options = state.site_options();
    let current = state.site_label().to_string();
    let mut picked = None;

    egui::ComboBox::from_id_salt("site_dropdown")
        .selected_text(current)
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for (label, value) in options {
                let is_current = value == state.site;
                if ui.selectable_label(is_current, label).clicked() {
                    picked = Some(value);
                }
            }
        });

    if let Some(site) = picked {
        state.set_site(site);
    }
}

/// Two linked sliders standing in for a range slider. The state orders the
/// pair, so dragging one past the other swaps their roles.
fn payload_range_slider(ui: &mut Ui, state: &mut DashboardState) {
    ui.strong("Payload range (Kg):");

    let min = state.table().min_payload_mass_kg();
    let max = state.table().max_payload_mass_kg();
    let mut low = state.payload_range.low;
    let mut high = state.payload_range.high;

    let low_changed = ui
        .add(egui::Slider::new(&mut low, min..=max).step_by(PAYLOAD_STEP_KG).text("from"))
        .changed();
    let high_changed = ui
        .add(egui::Slider::new(&mut high, min..=max).step_by(PAYLOAD_STEP_KG).text("to"))
        .changed();

    // Bound marks.
    ui.horizontal(|ui: &mut Ui| {
        ui.label(RichText::new(format!("{}", min as i64)).weak());
        ui.with_layout(Layout::right_to_left(Align::Center), |ui: &mut Ui| {
            ui.label(RichText::new(format!("{}", max as i64)).weak());
        });
    });

    if low_changed || high_changed {
        state.set_payload_range(low, high);
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the title bar with record counts.
pub fn top_bar(ui: &mut Ui, state: &DashboardState) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(RichText::new(crate::DASHBOARD_TITLE).strong());
    });

    ui.horizontal(|ui: &mut Ui| {
        ui.label(format!(
            "{} launches loaded, {} in scatter",
            state.table().len(),
            state.scatter.len()
        ));
        ui.separator();
        ui.label(format!(
            "payload {}–{} kg",
            state.payload_range.low as i64,
            state.payload_range.high as i64
        ));
    });
}
