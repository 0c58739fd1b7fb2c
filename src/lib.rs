//! HotSpots: campus Wi-Fi usage heatmaps.
//!
//! Point data (`longitude`, `latitude`, `bandwidthUsage`) is loaded from
//! JSON, CSV or Parquet, mapped to drawable points and painted as soft
//! radial-gradient disks, either in the egui viewer or to a PNG.

pub mod app;
pub mod cli;
pub mod color;
pub mod config;
pub mod data;
pub mod render;
pub mod state;
pub mod ui;
