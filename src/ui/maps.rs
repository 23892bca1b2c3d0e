use std::collections::BTreeMap;

use eframe::egui::{self, Color32, Stroke, Ui};
use egui_plot::{Legend, MarkerShape, Plot, PlotPoint, PlotPoints, Points, Polygon};

use crate::color::{self, ShapeColors};
use crate::data::aggregate::{GeoMarker, GeoPoint, MISSING_SHAPE_LABEL};

const MAP_HEIGHT: f32 = 360.0;
const MARKER_COLOR: Color32 = Color32::from_rgb(42, 129, 203);
/// Heatmap grid cell edge, in degrees.
const HEAT_CELL_DEG: f64 = 2.0;
/// A marker is considered hovered within this many degrees of the pointer.
const HOVER_RADIUS_DEG: f64 = 3.0;

// ---------------------------------------------------------------------------
// Point map – sampled sightings on a longitude/latitude plane
// ---------------------------------------------------------------------------

/// Draw the sampled sightings as map markers. Hovering near a marker shows
/// its coordinates and witness report below the plot.
pub fn sighting_map(ui: &mut Ui, markers: &[GeoMarker]) {
    ui.heading("Map of UFO Sightings");

    let points: PlotPoints = markers
        .iter()
        .map(|m| [m.longitude, m.latitude])
        .collect();

    let hovered = Plot::new("sighting_map")
        .x_axis_label("Longitude")
        .y_axis_label("Latitude")
        .height(MAP_HEIGHT)
        .data_aspect(1.0)
        .include_x(-180.0)
        .include_x(180.0)
        .include_y(-90.0)
        .include_y(90.0)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.points(
                Points::new(points)
                    .shape(MarkerShape::Circle)
                    .radius(3.0)
                    .color(MARKER_COLOR),
            );
            plot_ui
                .pointer_coordinate()
                .and_then(|pointer| nearest_marker(markers, pointer))
        })
        .inner;

    match hovered {
        Some(marker) if !marker.description.is_empty() => {
            ui.label(format!(
                "({:.2}, {:.2})  {}",
                marker.latitude, marker.longitude, marker.description
            ));
        }
        Some(marker) => {
            ui.label(format!("({:.2}, {:.2})", marker.latitude, marker.longitude));
        }
        None => {
            ui.weak("Hover over a marker to read the report.");
        }
    }
}

/// Closest marker to the pointer, if any lies within the hover radius.
fn nearest_marker<'a>(markers: &'a [GeoMarker], pointer: PlotPoint) -> Option<&'a GeoMarker> {
    markers
        .iter()
        .map(|m| {
            let dx = m.longitude - pointer.x;
            let dy = m.latitude - pointer.y;
            (m, dx * dx + dy * dy)
        })
        .filter(|(_, dist_sq)| *dist_sq <= HOVER_RADIUS_DEG * HOVER_RADIUS_DEG)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(m, _)| m)
}

// ---------------------------------------------------------------------------
// Density heatmap – geo points binned into a fixed-degree grid
// ---------------------------------------------------------------------------

/// Draw the sighting density heatmap. Every coordinate-complete record lands
/// in a grid cell; each non-empty cell becomes a translucent rectangle whose
/// colour scales with its share of the densest cell.
pub fn density_heatmap(ui: &mut Ui, points: &[GeoPoint]) {
    ui.heading("Heatmap of UFO Sightings");

    let (cells, max_count) = bin_points(points, HEAT_CELL_DEG);

    Plot::new("density_heatmap")
        .x_axis_label("Longitude")
        .y_axis_label("Latitude")
        .height(MAP_HEIGHT)
        .data_aspect(1.0)
        .include_x(-180.0)
        .include_x(180.0)
        .include_y(-90.0)
        .include_y(90.0)
        .show(ui, |plot_ui| {
            for (&(cell_x, cell_y), &count) in &cells {
                let x0 = cell_x as f64 * HEAT_CELL_DEG;
                let y0 = cell_y as f64 * HEAT_CELL_DEG;
                let corners: PlotPoints = vec![
                    [x0, y0],
                    [x0 + HEAT_CELL_DEG, y0],
                    [x0 + HEAT_CELL_DEG, y0 + HEAT_CELL_DEG],
                    [x0, y0 + HEAT_CELL_DEG],
                ]
                .into();
                let heat = count as f32 / max_count as f32;
                plot_ui.polygon(
                    Polygon::new(corners)
                        .fill_color(color::heat_color(heat))
                        .stroke(Stroke::NONE),
                );
            }
        });
}

/// Bucket points into (longitude, latitude) grid cells. Returns the cells and
/// the densest cell's count, floored at 1 so callers can divide by it.
fn bin_points(points: &[GeoPoint], cell_deg: f64) -> (BTreeMap<(i64, i64), u64>, u64) {
    let mut cells: BTreeMap<(i64, i64), u64> = BTreeMap::new();
    for p in points {
        let cell = (
            (p.longitude / cell_deg).floor() as i64,
            (p.latitude / cell_deg).floor() as i64,
        );
        *cells.entry(cell).or_insert(0) += 1;
    }
    let max_count = cells.values().copied().max().unwrap_or(1);
    (cells, max_count)
}

// ---------------------------------------------------------------------------
// 3D scatter – latitude/longitude/year rotated onto the plot plane
// ---------------------------------------------------------------------------

/// Draw the pseudo-3D scatter of (latitude, longitude, year). Each axis is
/// normalized to [0, 1], the ground plane is rotated by the yaw slider, and
/// depth is folded into the vertical with a fixed foreshortening. One point
/// series per shape, so the legend lists the shapes.
pub fn scatter_3d(ui: &mut Ui, points: &[GeoPoint], colors: &ShapeColors, yaw_deg: &mut f32) {
    ui.heading("3D Scatter Plot of UFO Sightings");
    ui.horizontal(|ui: &mut Ui| {
        ui.label("Rotation");
        ui.add(egui::Slider::new(yaw_deg, 0.0..=360.0).suffix("°"));
    });

    let Some(bounds) = AxisBounds::of(points) else {
        ui.weak("No geo-referenced sightings to plot.");
        return;
    };

    let yaw = f64::from(*yaw_deg).to_radians();
    let (sin_yaw, cos_yaw) = yaw.sin_cos();

    let mut series: BTreeMap<&str, Vec<[f64; 2]>> = BTreeMap::new();
    for p in points {
        let nx = bounds.norm_lat(p.latitude);
        let ny = bounds.norm_lon(p.longitude);
        let nz = bounds.norm_year(p.year);
        let screen_x = nx * cos_yaw - ny * sin_yaw;
        let depth = nx * sin_yaw + ny * cos_yaw;
        let screen_y = nz + depth * 0.4;
        series
            .entry(p.shape.as_deref().unwrap_or(MISSING_SHAPE_LABEL))
            .or_default()
            .push([screen_x, screen_y]);
    }

    Plot::new("scatter_3d")
        .legend(Legend::default())
        .height(MAP_HEIGHT)
        .show_axes(false)
        .show_grid(false)
        .show(ui, |plot_ui| {
            for (shape, shape_points) in series {
                plot_ui.points(
                    Points::new(PlotPoints::from(shape_points))
                        .shape(MarkerShape::Circle)
                        .radius(2.0)
                        .color(colors.color_for(shape))
                        .name(shape),
                );
            }
        });
}

/// Per-axis value ranges of a point set, for min-max normalization.
struct AxisBounds {
    lat: (f64, f64),
    lon: (f64, f64),
    year: (f64, f64),
}

impl AxisBounds {
    fn of(points: &[GeoPoint]) -> Option<Self> {
        if points.is_empty() {
            return None;
        }
        let mut bounds = AxisBounds {
            lat: (f64::INFINITY, f64::NEG_INFINITY),
            lon: (f64::INFINITY, f64::NEG_INFINITY),
            year: (f64::INFINITY, f64::NEG_INFINITY),
        };
        for p in points {
            bounds.lat = widen(bounds.lat, p.latitude);
            bounds.lon = widen(bounds.lon, p.longitude);
            bounds.year = widen(bounds.year, f64::from(p.year));
        }
        Some(bounds)
    }

    fn norm_lat(&self, v: f64) -> f64 {
        normalize(v, self.lat)
    }

    fn norm_lon(&self, v: f64) -> f64 {
        normalize(v, self.lon)
    }

    fn norm_year(&self, v: i32) -> f64 {
        normalize(f64::from(v), self.year)
    }
}

fn widen((min, max): (f64, f64), v: f64) -> (f64, f64) {
    (min.min(v), max.max(v))
}

/// Min-max scale into [0, 1]; a degenerate range maps to the midpoint.
fn normalize(v: f64, (min, max): (f64, f64)) -> f64 {
    let range = max - min;
    if range.abs() < f64::EPSILON {
        0.5
    } else {
        (v - min) / range
    }
}
