use std::collections::{BTreeMap, BTreeSet};

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Color mapping: shape label → Color32
// ---------------------------------------------------------------------------

/// Maps the dataset's distinct shape labels to distinct colours. Shared by
/// the histogram, the duration bars, the 3D scatter and the side-panel
/// legend, so a shape keeps its colour across every chart.
#[derive(Debug, Clone)]
pub struct ShapeColors {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl ShapeColors {
    /// Build the colour map from the dataset's sorted shape labels.
    pub fn new(shapes: &BTreeSet<String>) -> Self {
        let palette = generate_palette(shapes.len());
        let mapping: BTreeMap<String, Color32> =
            shapes.iter().cloned().zip(palette).collect();

        ShapeColors {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a shape label. Labels outside the dataset's
    /// vocabulary (notably the missing-shape bucket) fall back to gray.
    pub fn color_for(&self, shape: &str) -> Color32 {
        self.mapping
            .get(shape)
            .copied()
            .unwrap_or(self.default_color)
    }

    /// Legend entries (label → colour) for the UI.
    pub fn legend_entries(&self) -> Vec<(String, Color32)> {
        self.mapping
            .iter()
            .map(|(label, color)| (label.clone(), *color))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Heat ramp
// ---------------------------------------------------------------------------

/// Map a normalized density `t` in `[0, 1]` to a translucent heat colour:
/// blue through green to red, with opacity rising alongside the density.
pub fn heat_color(t: f32) -> Color32 {
    let t = t.clamp(0.0, 1.0);
    let hsl = Hsl::new(240.0 * (1.0 - t), 0.9, 0.5);
    let rgb: Srgb = hsl.into_color();
    Color32::from_rgba_unmultiplied(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
        (80.0 + 150.0 * t) as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_one_color_per_label() {
        assert!(generate_palette(0).is_empty());
        assert_eq!(generate_palette(7).len(), 7);
    }

    #[test]
    fn unknown_labels_fall_back_to_gray() {
        let shapes: BTreeSet<String> = ["disk", "light"].iter().map(|s| s.to_string()).collect();
        let colors = ShapeColors::new(&shapes);

        assert_ne!(colors.color_for("disk"), colors.color_for("light"));
        assert_eq!(colors.color_for("(missing)"), Color32::GRAY);
        assert_eq!(colors.legend_entries().len(), 2);
    }
}
