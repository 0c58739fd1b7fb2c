use anyhow::{anyhow, Context, Result};
use clap::Parser;
use eframe::egui;

use hotspots::app::HotSpotsApp;
use hotspots::cli::Args;
use hotspots::config::HeatmapStyle;
use hotspots::data::loader::load_file;
use hotspots::data::transform::transform;
use hotspots::render::raster::export_png;
use hotspots::state::{AppState, Section};

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let style = match &args.style {
        Some(path) => HeatmapStyle::load(path)
            .with_context(|| format!("loading style {}", path.display()))?,
        None => HeatmapStyle::default(),
    };

    if let Some(out) = &args.export {
        // clap enforces --open alongside --export
        let input = args.open.as_deref().context("--export needs --open")?;
        let dataset =
            load_file(input).with_context(|| format!("loading {}", input.display()))?;
        let points = transform(&dataset.points);
        return export_png(&points, &style, args.size.width, args.size.height, out)
            .context("exporting heatmap");
    }

    let mut state = AppState::new(style);
    if let Some(path) = &args.open {
        state.load_path(path);
        state.section = Section::Demo;
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "HotSpots – Campus Wi-Fi Heatmaps",
        options,
        Box::new(move |cc| {
            // Install image loaders so egui can show the campus heatmaps.
            egui_extras::install_image_loaders(&cc.egui_ctx);
            Ok(Box::new(HotSpotsApp::new(state)))
        }),
    )
    .map_err(|e| anyhow!("viewer failed: {e}"))
}
