use palette::{Hsl, IntoColor, Srgb};

use crate::config::HeatmapStyle;

// ---------------------------------------------------------------------------
// Heat colour
// ---------------------------------------------------------------------------

/// Straight (non-premultiplied) RGBA, 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const TRANSPARENT: Rgba8 = Rgba8::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl From<[u8; 4]> for Rgba8 {
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        Rgba8::new(r, g, b, a)
    }
}

fn unit_to_u8(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// The colour at the centre of every heat disk (gradient stop 0).
pub fn heat_center(style: &HeatmapStyle) -> Rgba8 {
    let hsl = Hsl::new(style.hue, style.saturation, style.lightness);
    let rgb: Srgb = hsl.into_color();
    Rgba8::new(
        unit_to_u8(rgb.red),
        unit_to_u8(rgb.green),
        unit_to_u8(rgb.blue),
        unit_to_u8(style.center_alpha),
    )
}

/// The colour at the rim (gradient stop 1): same hue, fully transparent.
pub fn heat_rim(style: &HeatmapStyle) -> Rgba8 {
    heat_center(style).with_alpha(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_style_is_opaque_red() {
        let style = HeatmapStyle::default();
        assert_eq!(heat_center(&style), Rgba8::new(255, 0, 0, 255));
        assert_eq!(heat_rim(&style), Rgba8::new(255, 0, 0, 0));
    }

    #[test]
    fn hue_and_alpha_follow_style() {
        let style = HeatmapStyle {
            hue: 240.0,
            center_alpha: 0.8,
            ..HeatmapStyle::default()
        };
        let c = heat_center(&style);
        assert_eq!((c.r, c.g, c.b), (0, 0, 255));
        assert_eq!(c.a, 204);
    }
}
