//! CLI argument definitions

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "hotspots",
    about = "Campus Wi-Fi usage heatmap viewer",
    after_help = "\
EXAMPLES:
    hotspots                                         Start the viewer
    hotspots --open usage.csv                        Start with a dataset loaded
    hotspots --open usage.json --export map.png      Render to PNG without a window
    hotspots --open usage.json --export map.png --size 1920x1080 --style red.json"
)]
pub struct Args {
    /// Point data to load at startup (.json, .csv, .parquet)
    #[arg(short, long, value_name = "FILE")]
    pub open: Option<PathBuf>,

    /// Heatmap style file (JSON); defaults apply to missing keys
    #[arg(short, long, value_name = "FILE")]
    pub style: Option<PathBuf>,

    /// Render the dataset to a PNG and exit instead of opening a window
    #[arg(long, value_name = "PNG", requires = "open")]
    pub export: Option<PathBuf>,

    /// Export size as WIDTHxHEIGHT
    #[arg(long, default_value = "800x600")]
    pub size: Size,
}

/// Raster dimensions parsed from `WIDTHxHEIGHT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl FromStr for Size {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (w, h) = s
            .split_once(['x', 'X'])
            .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{s}'"))?;
        let parse = |v: &str| {
            v.trim()
                .parse::<u32>()
                .map_err(|e| format!("invalid dimension '{v}': {e}"))
        };
        let size = Size {
            width: parse(w)?,
            height: parse(h)?,
        };
        if size.width == 0 || size.height == 0 {
            return Err(format!("size must be non-zero, got '{s}'"));
        }
        Ok(size)
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_parses_and_rejects() {
        assert_eq!(
            "1920x1080".parse::<Size>(),
            Ok(Size {
                width: 1920,
                height: 1080
            })
        );
        assert!("1920".parse::<Size>().is_err());
        assert!("0x10".parse::<Size>().is_err());
        assert!("axb".parse::<Size>().is_err());
    }

    #[test]
    fn export_requires_open() {
        assert!(Args::try_parse_from(["hotspots", "--export", "out.png"]).is_err());

        let args =
            Args::try_parse_from(["hotspots", "--open", "d.json", "--export", "out.png"]).unwrap();
        assert_eq!(args.size.to_string(), "800x600");
        assert_eq!(args.export, Some(PathBuf::from("out.png")));
    }
}
