use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::loader::all_ingestors;
use crate::state::{AppState, NoticeLevel, Section};
use crate::ui::{campus, canvas};

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the navigation bar and status line.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        let toggle = if state.menu_open { "✖" } else { "☰" };
        if ui.button(toggle).clicked() {
            state.toggle_menu();
        }

        ui.label(RichText::new("🔥 HotSpots").strong());
        ui.separator();

        for section in Section::ALL {
            if ui
                .selectable_label(state.section == section, section.to_string())
                .clicked()
            {
                state.select_section(section);
            }
        }

        if let Some(notice) = &state.notice {
            ui.separator();
            ui.label(RichText::new(&notice.text).color(notice_color(notice.level)));
        }
    });
}

fn notice_color(level: NoticeLevel) -> Color32 {
    match level {
        NoticeLevel::Info => Color32::LIGHT_BLUE,
        NoticeLevel::Warning => Color32::YELLOW,
        NoticeLevel::Error => Color32::RED,
    }
}

// ---------------------------------------------------------------------------
// Navigation drawer
// ---------------------------------------------------------------------------

/// Contents of the side drawer shown while `state.menu_open` is set.
pub fn nav_drawer(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.heading("Menu");
        if ui.small_button("✖").clicked() {
            state.close_menu();
        }
    });
    ui.separator();

    for section in Section::ALL {
        if ui
            .selectable_label(state.section == section, section.to_string())
            .clicked()
        {
            state.select_section(section);
        }
    }
}

// ---------------------------------------------------------------------------
// Central panel
// ---------------------------------------------------------------------------

/// Render whichever section is selected.
pub fn central(ui: &mut Ui, state: &mut AppState) {
    match state.section {
        Section::Home => campus::home_section(ui),
        Section::Dartmouth => campus::campus_section(ui, campus::Campus::Dartmouth),
        Section::HongKong => campus::campus_section(ui, campus::Campus::HongKong),
        Section::Demo => demo_section(ui, state),
    }
}

/// Upload-and-render demo: controls on top, canvas below.
fn demo_section(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui: &mut Ui| {
        if ui.button("Load file…").clicked() {
            open_file_dialog(state);
        }
        if ui.button("Render").clicked() {
            state.render();
        }

        ui.separator();
        match (&state.dataset, &state.summary) {
            (Some(ds), Some(summary)) => {
                let name = ds
                    .source
                    .as_deref()
                    .and_then(|p| p.file_name())
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                ui.label(format!("{name} ({}): {}", ds.format, summary));
            }
            _ => {
                ui.label("No dataset loaded.");
            }
        }
    });
    ui.separator();

    canvas::heatmap_canvas(ui, state);
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let ingestors = all_ingestors();
    let all_exts: Vec<&str> = ingestors
        .iter()
        .flat_map(|ing| ing.extensions().iter().copied())
        .collect();

    let mut dialog = rfd::FileDialog::new()
        .set_title("Open point data")
        .add_filter("Supported files", all_exts.as_slice());
    for ing in &ingestors {
        dialog = dialog.add_filter(ing.format().to_string(), ing.extensions());
    }

    if let Some(path) = dialog.pick_file() {
        state.load_path(&path);
    }
}
