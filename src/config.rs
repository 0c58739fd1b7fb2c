use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Heatmap style
// ---------------------------------------------------------------------------

/// Drawing parameters for the heatmap.  Every key is optional in the style
/// file; missing keys keep their default.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HeatmapStyle {
    /// Upper bound on a circle's radius, in surface units.
    pub max_radius: f64,
    /// Intensity needed per unit of radius (`radius = intensity / this`).
    pub intensity_per_unit: f64,
    /// Heat colour as HSL.  The default (0°, 1.0, 0.5) is pure red.
    pub hue: f32,
    pub saturation: f32,
    pub lightness: f32,
    /// Alpha at the centre of each gradient, 0.0–1.0.
    pub center_alpha: f32,
    /// RGBA fill used when clearing the off-screen raster.
    pub background: [u8; 4],
}

impl Default for HeatmapStyle {
    fn default() -> Self {
        Self {
            max_radius: 50.0,
            intensity_per_unit: 10.0,
            hue: 0.0,
            saturation: 1.0,
            lightness: 0.5,
            center_alpha: 1.0,
            background: [0, 0, 0, 0],
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read style file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid style file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{0} must be positive")]
    NotPositive(&'static str),

    #[error("{0} must be within 0.0..=1.0")]
    OutOfUnitRange(&'static str),
}

impl HeatmapStyle {
    /// Load a style from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let style: HeatmapStyle = serde_json::from_str(text)?;
        style.validate()?;
        Ok(style)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(self.max_radius > 0.0) {
            return Err(ConfigError::NotPositive("max_radius"));
        }
        if !(self.intensity_per_unit > 0.0) {
            return Err(ConfigError::NotPositive("intensity_per_unit"));
        }
        for (name, v) in [
            ("saturation", self.saturation),
            ("lightness", self.lightness),
            ("center_alpha", self.center_alpha),
        ] {
            if !(0.0..=1.0).contains(&v) {
                return Err(ConfigError::OutOfUnitRange(name));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_is_default() {
        assert_eq!(HeatmapStyle::from_json("{}").unwrap(), HeatmapStyle::default());
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let style = HeatmapStyle::from_json(r#"{"max_radius": 80, "center_alpha": 0.8}"#).unwrap();
        assert_eq!(style.max_radius, 80.0);
        assert_eq!(style.center_alpha, 0.8);
        assert_eq!(style.intensity_per_unit, 10.0);
    }

    #[test]
    fn rejects_unknown_keys_and_bad_values() {
        assert!(matches!(
            HeatmapStyle::from_json(r#"{"radius": 5}"#),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            HeatmapStyle::from_json(r#"{"intensity_per_unit": 0}"#),
            Err(ConfigError::NotPositive("intensity_per_unit"))
        ));
        assert!(matches!(
            HeatmapStyle::from_json(r#"{"center_alpha": 1.5}"#),
            Err(ConfigError::OutOfUnitRange("center_alpha"))
        ));
    }
}
