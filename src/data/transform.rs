use serde_json::Value as JsonValue;

use super::loader::{raw_point_from_json, IngestError};
use super::model::{RawPoint, RenderPoint};

// ---------------------------------------------------------------------------
// RawPoint → RenderPoint
// ---------------------------------------------------------------------------

/// Map raw records onto drawable points.
///
/// One output per input, same order.  Values pass through unchanged:
/// `x = longitude`, `y = latitude`, `intensity = bandwidthUsage`.
pub fn transform(points: &[RawPoint]) -> Vec<RenderPoint> {
    points.iter().map(RenderPoint::from).collect()
}

/// Transform untyped JSON records, rejecting the first one that lacks a
/// numeric `longitude`, `latitude` or `bandwidthUsage`.
pub fn transform_records(records: &[JsonValue]) -> Result<Vec<RenderPoint>, IngestError> {
    records
        .iter()
        .enumerate()
        .map(|(row, rec)| raw_point_from_json(row, rec).map(RenderPoint::from))
        .collect()
}

impl From<&RawPoint> for RenderPoint {
    fn from(p: &RawPoint) -> Self {
        RenderPoint {
            x: p.longitude,
            y: p.latitude,
            intensity: p.bandwidth_usage,
        }
    }
}

impl From<RawPoint> for RenderPoint {
    fn from(p: RawPoint) -> Self {
        RenderPoint::from(&p)
    }
}
