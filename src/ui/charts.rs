use std::collections::BTreeMap;

use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, Line, Plot, PlotPoints};
use indexmap::IndexMap;

use crate::color::ShapeColors;

const CHART_HEIGHT: f32 = 280.0;

// ---------------------------------------------------------------------------
// Shape histogram – sightings per shape, bars in first-seen dataset order
// ---------------------------------------------------------------------------

/// Draw the shape histogram. One bar per shape, in the table's own order;
/// hovering a bar shows the shape name.
pub fn shape_histogram(
    ui: &mut Ui,
    counts: &IndexMap<String, u64>,
    colors: &ShapeColors,
    title: &str,
) {
    ui.heading(format!("Distribution of UFO Shapes in {title}"));

    let bars: Vec<Bar> = counts
        .iter()
        .enumerate()
        .map(|(i, (shape, count))| {
            Bar::new(i as f64, *count as f64)
                .width(0.8)
                .name(shape)
                .fill(colors.color_for(shape))
        })
        .collect();

    Plot::new("shape_histogram")
        .x_axis_label("UFO shape")
        .y_axis_label("Sightings")
        .height(CHART_HEIGHT)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });
}

// ---------------------------------------------------------------------------
// Yearly trend – sightings per year as a single line
// ---------------------------------------------------------------------------

/// Draw the sightings-per-year line chart.
pub fn yearly_trend_chart(ui: &mut Ui, trend: &BTreeMap<i32, u64>, title: &str) {
    ui.heading(format!("UFO Sightings Trends over Years in {title}"));

    let points: PlotPoints = trend
        .iter()
        .map(|(&year, &count)| [f64::from(year), count as f64])
        .collect();

    Plot::new("yearly_trend")
        .x_axis_label("Year")
        .y_axis_label("Sightings")
        .height(CHART_HEIGHT)
        .show(ui, |plot_ui| {
            plot_ui.line(Line::new(points).color(Color32::LIGHT_BLUE).width(1.5));
        });
}

// ---------------------------------------------------------------------------
// Duration means – average encounter length per shape (country views only)
// ---------------------------------------------------------------------------

/// Draw the mean-duration bar chart. Shapes are sorted alphabetically because
/// the means table is.
pub fn duration_bar_chart(
    ui: &mut Ui,
    means: &BTreeMap<String, f64>,
    colors: &ShapeColors,
    title: &str,
) {
    ui.heading(format!("Average Encounter Duration by UFO Shape in {title}"));

    let bars: Vec<Bar> = means
        .iter()
        .enumerate()
        .map(|(i, (shape, mean))| {
            Bar::new(i as f64, *mean)
                .width(0.8)
                .name(shape)
                .fill(colors.color_for(shape))
        })
        .collect();

    Plot::new("duration_means")
        .x_axis_label("UFO shape")
        .y_axis_label("Average duration (min)")
        .height(CHART_HEIGHT)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });
}
