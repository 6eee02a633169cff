use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::Pollutant;

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
// Color mapping: pollutant → Color32
// ---------------------------------------------------------------------------

/// Assigns each criteria pollutant a stable display colour, used for the
/// trend line and the metric-card accents.
#[derive(Debug, Clone)]
pub struct PollutantColors {
    mapping: BTreeMap<Pollutant, Color32>,
    default_color: Color32,
}

impl Default for PollutantColors {
    fn default() -> Self {
        Self::new()
    }
}

impl PollutantColors {
    pub fn new() -> Self {
        let palette = generate_palette(Pollutant::ALL.len());
        let mapping: BTreeMap<Pollutant, Color32> =
            Pollutant::ALL.iter().copied().zip(palette).collect();
        PollutantColors {
            mapping,
            default_color: Color32::LIGHT_BLUE,
        }
    }

    /// Look up the colour for a pollutant.
    pub fn color_for(&self, pollutant: Pollutant) -> Color32 {
        self.mapping
            .get(&pollutant)
            .copied()
            .unwrap_or(self.default_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_pollutant_gets_a_distinct_color() {
        let colors = PollutantColors::new();
        let assigned: std::collections::BTreeSet<_> = Pollutant::ALL
            .iter()
            .map(|&p| {
                let c = colors.color_for(p);
                (c.r(), c.g(), c.b())
            })
            .collect();
        assert_eq!(assigned.len(), Pollutant::ALL.len());
    }
}
