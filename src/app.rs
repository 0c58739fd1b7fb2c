use eframe::egui;

use crate::state::AppState;
use crate::ui::panels;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct HotSpotsApp {
    pub state: AppState,
}

impl HotSpotsApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl Default for HotSpotsApp {
    fn default() -> Self {
        Self::new(AppState::default())
    }
}

impl eframe::App for HotSpotsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: navigation + status ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left drawer: only while the menu is open ----
        egui::SidePanel::left("nav_drawer")
            .default_width(180.0)
            .resizable(false)
            .show_animated(ctx, self.state.menu_open, |ui| {
                panels::nav_drawer(ui, &mut self.state);
            });

        // ---- Central panel: selected section ----
        egui::CentralPanel::default().show(ctx, |ui| {
            panels::central(ui, &mut self.state);
        });
    }
}
