use std::collections::{BTreeMap, BTreeSet};

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Mix, Srgb};

/// Navy used for single-series bar charts.
pub const BAR_COLOR: Color32 = Color32::from_rgb(0x08, 0x21, 0x57);

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
            to_color32(Hsl::new(hue, 0.75, 0.55))
        })
        .collect()
}

/// Colour on a light-to-dark blue ramp, `t` in `[0, 1]` (clamped).
pub fn sequential_color(t: f32) -> Color32 {
    let light = Hsl::new(210.0, 0.70, 0.85);
    let dark = Hsl::new(222.0, 0.83, 0.19);
    to_color32(light.mix(dark, t.clamp(0.0, 1.0)))
}

/// Position of `value` inside `[min, max]`, 1.0 when the range is empty.
pub fn normalize(value: f64, min: f64, max: f64) -> f32 {
    let range = max - min;
    if range.abs() < f64::EPSILON {
        1.0
    } else {
        ((value - min) / range) as f32
    }
}

fn to_color32(hsl: Hsl) -> Color32 {
    let rgb: Srgb = hsl.into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

// ---------------------------------------------------------------------------
// Color mapping: category → Color32
// ---------------------------------------------------------------------------

/// Maps the values of a categorical column to distinct colours.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl ColorMap {
    /// Build a colour map from the sorted distinct categories.
    pub fn new<'a, I>(categories: I) -> Self
    where
        I: IntoIterator<Item = &'a String>,
    {
        let unique: BTreeSet<&String> = categories.into_iter().collect();
        let palette = generate_palette(unique.len());
        let mapping = unique
            .into_iter()
            .zip(palette)
            .map(|(v, c)| (v.clone(), c))
            .collect();

        ColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a given category.
    pub fn color_for(&self, value: &str) -> Color32 {
        self.mapping
            .get(value)
            .copied()
            .unwrap_or(self.default_color)
    }
}
