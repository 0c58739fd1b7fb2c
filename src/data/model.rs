use std::fmt;
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// RawPoint – one record from the source file
// ---------------------------------------------------------------------------

/// A single usage sample as it appears in the uploaded file
/// (`{longitude, latitude, bandwidthUsage}`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawPoint {
    pub longitude: f64,
    pub latitude: f64,
    pub bandwidth_usage: f64,
}

impl RawPoint {
    pub fn new(longitude: f64, latitude: f64, bandwidth_usage: f64) -> Self {
        Self {
            longitude,
            latitude,
            bandwidth_usage,
        }
    }
}

// ---------------------------------------------------------------------------
// RenderPoint – a point ready for drawing
// ---------------------------------------------------------------------------

/// Surface-space point with the intensity that drives the circle radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderPoint {
    pub x: f64,
    pub y: f64,
    pub intensity: f64,
}

// ---------------------------------------------------------------------------
// SourceFormat – which ingestor produced a dataset
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Json,
    Csv,
    Parquet,
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceFormat::Json => write!(f, "JSON"),
            SourceFormat::Csv => write!(f, "CSV"),
            SourceFormat::Parquet => write!(f, "Parquet"),
        }
    }
}

// ---------------------------------------------------------------------------
// Dataset – the currently loaded points
// ---------------------------------------------------------------------------

/// The loaded point data, in file order.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub points: Vec<RawPoint>,
    pub format: SourceFormat,
    /// File the points came from, if any.
    pub source: Option<PathBuf>,
}

impl Dataset {
    pub fn new(points: Vec<RawPoint>, format: SourceFormat) -> Self {
        Self {
            points,
            format,
            source: None,
        }
    }

    pub fn with_source(mut self, path: impl Into<PathBuf>) -> Self {
        self.source = Some(path.into());
        self
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Compute the status-bar summary.
    pub fn summary(&self) -> DatasetSummary {
        DatasetSummary::from_points(&self.points)
    }
}

// ---------------------------------------------------------------------------
// DatasetSummary
// ---------------------------------------------------------------------------

/// Inclusive `[min, max]` range of one column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    fn of(values: impl Iterator<Item = f64>) -> Option<Self> {
        values.fold(None, |acc, v| match acc {
            None => Some(Range { min: v, max: v }),
            Some(r) => Some(Range {
                min: r.min.min(v),
                max: r.max.max(v),
            }),
        })
    }
}

/// Aggregate figures shown after a successful load.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DatasetSummary {
    pub count: usize,
    pub longitude: Option<Range>,
    pub latitude: Option<Range>,
    pub bandwidth: Option<Range>,
    pub total_bandwidth: f64,
}

impl DatasetSummary {
    pub fn from_points(points: &[RawPoint]) -> Self {
        DatasetSummary {
            count: points.len(),
            longitude: Range::of(points.iter().map(|p| p.longitude)),
            latitude: Range::of(points.iter().map(|p| p.latitude)),
            bandwidth: Range::of(points.iter().map(|p| p.bandwidth_usage)),
            total_bandwidth: points.iter().map(|p| p.bandwidth_usage).sum(),
        }
    }
}

impl fmt::Display for DatasetSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} points", self.count)?;
        if let Some(bw) = self.bandwidth {
            write!(
                f,
                ", bandwidth {:.1}–{:.1} (total {:.1})",
                bw.min, bw.max, self.total_bandwidth
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_of_empty_dataset_has_no_ranges() {
        let s = DatasetSummary::from_points(&[]);
        assert_eq!(s.count, 0);
        assert!(s.longitude.is_none());
        assert!(s.bandwidth.is_none());
        assert_eq!(s.total_bandwidth, 0.0);
        assert_eq!(s.to_string(), "0 points");
    }

    #[test]
    fn summary_tracks_bounds_and_total() {
        let points = [
            RawPoint::new(-72.29, 43.70, 120.0),
            RawPoint::new(-72.28, 43.71, 30.0),
            RawPoint::new(-72.30, 43.69, 50.0),
        ];
        let s = DatasetSummary::from_points(&points);
        assert_eq!(s.count, 3);
        assert_eq!(s.longitude, Some(Range { min: -72.30, max: -72.28 }));
        assert_eq!(s.latitude, Some(Range { min: 43.69, max: 43.71 }));
        assert_eq!(s.bandwidth, Some(Range { min: 30.0, max: 120.0 }));
        assert_eq!(s.total_bandwidth, 200.0);
    }
}
