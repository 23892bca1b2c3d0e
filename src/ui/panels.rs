use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::state::AppState;
use crate::ui::{charts, maps};

// ---------------------------------------------------------------------------
// Top bar – dataset status
// ---------------------------------------------------------------------------

/// Render the top status bar.
pub fn top_bar(ui: &mut Ui, state: &AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.strong("UFO Sightings Analysis");
        ui.separator();
        ui.label(format!(
            "{} sightings loaded, {} matched",
            state.dataset.len(),
            state.analysis.record_count
        ));
        ui.separator();
        ui.label(format!("View: {}", state.analysis.title));
        if let Some(message) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(message).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Left side panel – country search
// ---------------------------------------------------------------------------

/// Render the left search panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Search");
    ui.separator();

    ui.strong("Country");
    if ui.text_edit_singleline(&mut state.country_query).changed() {
        state.recompute_analysis();
    }
    ui.weak("Leave empty for the global analysis.");

    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            let header = format!("Countries ({})", state.dataset.country_counts.len());
            egui::CollapsingHeader::new(RichText::new(header).strong())
                .default_open(false)
                .show(ui, |ui: &mut Ui| {
                    // Clone what we need so we can mutate state inside the loop.
                    let countries: Vec<(String, u64)> = state
                        .dataset
                        .country_counts
                        .iter()
                        .map(|(country, count)| (country.clone(), *count))
                        .collect();
                    for (country, count) in countries {
                        let selected = state.country_query == country;
                        let label = format!("{country}  ({count})");
                        if ui.selectable_label(selected, label).clicked() {
                            state.select_country(&country);
                        }
                    }
                });

            egui::CollapsingHeader::new(RichText::new("Shape colours").strong())
                .default_open(false)
                .show(ui, |ui: &mut Ui| {
                    for (label, color) in state.shape_colors.legend_entries() {
                        ui.label(RichText::new(label).color(color));
                    }
                });
        });
}

// ---------------------------------------------------------------------------
// Central panel – the chart column
// ---------------------------------------------------------------------------

/// Render the scrollable chart column: histogram, trend, duration means when
/// the view has them, then the three geographic views.
pub fn central_panel(ui: &mut Ui, state: &mut AppState) {
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            let analysis = &state.analysis;

            charts::shape_histogram(ui, &analysis.shape_counts, &state.shape_colors, &analysis.title);
            ui.separator();
            charts::yearly_trend_chart(ui, &analysis.yearly_trend, &analysis.title);
            if let Some(means) = &analysis.duration_means {
                ui.separator();
                charts::duration_bar_chart(ui, means, &state.shape_colors, &analysis.title);
            }
            ui.separator();
            maps::sighting_map(ui, &analysis.geo_sample);
            ui.separator();
            maps::density_heatmap(ui, &analysis.geo_points);
            ui.separator();
            maps::scatter_3d(
                ui,
                &analysis.geo_points,
                &state.shape_colors,
                &mut state.scatter_yaw_deg,
            );
        });
}
