use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use opo_scan_viewer::data::model::Phase;

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
            let hue = 210.0 + (i as f32 / n as f32) * 360.0;
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
// Series colours
// ---------------------------------------------------------------------------

/// Fixed colours for every plotted series.
#[derive(Debug, Clone)]
pub struct SeriesColors {
    pub expected: Color32,
    pub measured: Color32,
    pub outlier: Color32,
    pub difference: Color32,
    initial: Color32,
    final_values: Color32,
}

impl Default for SeriesColors {
    fn default() -> Self {
        let energy = generate_palette(2);
        let phases = generate_palette(4);
        SeriesColors {
            expected: energy[0],
            measured: energy[1],
            outlier: Color32::RED,
            difference: Color32::from_rgb(200, 40, 40),
            initial: phases[1],
            final_values: phases[3],
        }
    }
}

impl SeriesColors {
    pub fn phase(&self, phase: Phase) -> Color32 {
        match phase {
            Phase::Initial => self.initial,
            Phase::Final => self.final_values,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_size() {
        assert!(generate_palette(0).is_empty());
        assert_eq!(generate_palette(4).len(), 4);
    }

    #[test]
    fn phases_get_distinct_colours() {
        let colors = SeriesColors::default();
        assert_ne!(colors.phase(Phase::Initial), colors.phase(Phase::Final));
        assert_ne!(colors.expected, colors.measured);
    }
}
