/// Data layer: core types, loading, and the point transform.
///
/// Architecture:
/// ```text
///  .json / .csv / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  Ingestor per format → Dataset (Vec<RawPoint>)
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ transform  │  RawPoint → RenderPoint, 1:1, order kept
///   └───────────┘
///        │
///        ▼
///     render::render_heatmap
/// ```

pub mod loader;
pub mod model;
pub mod transform;
