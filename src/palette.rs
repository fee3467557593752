// Colour palettes: sequential ramps for the choropleth fill and the fixed
// per-gender bar colours.

use crate::selection::Gender;
use clap::ValueEnum;
use plotters::style::RGBColor;

/// Fill for areas present in the boundary file but absent from the table.
pub const UNMATCHED_AREA: RGBColor = RGBColor(189, 189, 189);

/// Outline colour for district boundaries.
pub const BOUNDARY_LINE: RGBColor = RGBColor(70, 70, 70);

/// Sea/background fill behind the map.
pub const OCEAN: RGBColor = RGBColor(222, 235, 247);

/// A sequential colour ramp defined by evenly spaced control points,
/// sampled with linear interpolation.
#[derive(Debug, Clone)]
pub struct SequentialPalette {
    stops: &'static [(u8, u8, u8)],
}

impl SequentialPalette {
    /// Magma ramp (dark purple to pale yellow), as used by the density map.
    pub fn magma() -> Self {
        Self {
            stops: &[
                (0, 0, 4),
                (28, 16, 68),
                (79, 18, 123),
                (129, 37, 129),
                (181, 54, 122),
                (229, 80, 100),
                (251, 135, 97),
                (254, 194, 135),
                (252, 253, 191),
            ],
        }
    }

    /// Plasma ramp (indigo to yellow).
    pub fn plasma() -> Self {
        Self {
            stops: &[
                (13, 8, 135),
                (84, 2, 163),
                (139, 10, 165),
                (185, 50, 137),
                (219, 92, 104),
                (244, 136, 73),
                (254, 188, 43),
                (240, 249, 33),
            ],
        }
    }

    /// Colour at position `t` in [0, 1]; out-of-range values are clamped.
    pub fn color_at(&self, t: f64) -> RGBColor {
        let t = t.clamp(0.0, 1.0);
        let segments = (self.stops.len() - 1) as f64;
        let scaled = t * segments;
        let idx = (scaled.floor() as usize).min(self.stops.len() - 2);
        let frac = scaled - idx as f64;

        let (r0, g0, b0) = self.stops[idx];
        let (r1, g1, b1) = self.stops[idx + 1];
        RGBColor(
            lerp(r0, r1, frac),
            lerp(g0, g1, frac),
            lerp(b0, b1, frac),
        )
    }
}

fn lerp(a: u8, b: u8, t: f64) -> u8 {
    (a as f64 + (b as f64 - a as f64) * t).round() as u8
}

/// Selectable ramp for the map fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum PaletteKind {
    #[default]
    Magma,
    Plasma,
}

impl PaletteKind {
    pub fn palette(&self) -> SequentialPalette {
        match self {
            PaletteKind::Magma => SequentialPalette::magma(),
            PaletteKind::Plasma => SequentialPalette::plasma(),
        }
    }
}

/// Bar colour per gender, matching the original chart: blue for male, pink
/// for female, grey for both combined.
pub fn gender_color(gender: Gender) -> RGBColor {
    match gender {
        Gender::Male => RGBColor(0x1f, 0x77, 0xb4),
        Gender::Female => RGBColor(0xe3, 0x77, 0xc2),
        Gender::Both => RGBColor(0x7f, 0x7f, 0x7f),
    }
}
