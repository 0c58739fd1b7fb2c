use std::fmt;
use std::path::Path;

use crate::config::HeatmapStyle;
use crate::data::loader::{load_file, IngestError};
use crate::data::model::{Dataset, DatasetSummary, RenderPoint};
use crate::data::transform::transform;

// ---------------------------------------------------------------------------
// Navigation
// ---------------------------------------------------------------------------

/// Page sections reachable from the navigation bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Home,
    Dartmouth,
    HongKong,
    Demo,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::Home,
        Section::Dartmouth,
        Section::HongKong,
        Section::Demo,
    ];
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Section::Home => write!(f, "Home"),
            Section::Dartmouth => write!(f, "Dartmouth Data"),
            Section::HongKong => write!(f, "Hong Kong Data"),
            Section::Demo => write!(f, "Try It"),
        }
    }
}

// ---------------------------------------------------------------------------
// User-visible feedback
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// A message shown in the status bar until the next action replaces it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            text: text.into(),
        }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            text: text.into(),
        }
    }
}

pub const NO_DATASET_NOTICE: &str = "No dataset loaded";

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset (None until user loads a file).
    pub dataset: Option<Dataset>,

    /// Figures for the loaded dataset, computed once per load.
    pub summary: Option<DatasetSummary>,

    /// Points produced by the last "Render" action; painted every frame.
    pub frame: Option<Vec<RenderPoint>>,

    /// Heatmap drawing parameters.
    pub style: HeatmapStyle,

    /// Status / error message shown in the UI.
    pub notice: Option<Notice>,

    /// Section currently shown in the central panel.
    pub section: Section,

    /// Whether the navigation drawer is open.
    pub menu_open: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(HeatmapStyle::default())
    }
}

impl AppState {
    pub fn new(style: HeatmapStyle) -> Self {
        Self {
            dataset: None,
            summary: None,
            frame: None,
            style,
            notice: None,
            section: Section::Home,
            menu_open: false,
        }
    }

    /// Load `path` and store the result.  See [`AppState::apply_load`].
    pub fn load_path(&mut self, path: &Path) -> bool {
        let result = load_file(path);
        self.apply_load(result)
    }

    /// Store a freshly loaded dataset, replacing the previous one.
    ///
    /// On failure the previous dataset is kept and the error becomes the
    /// notice.  Returns whether the dataset was replaced.
    pub fn apply_load(&mut self, result: Result<Dataset, IngestError>) -> bool {
        match result {
            Ok(dataset) => {
                let summary = dataset.summary();
                log::info!("Loaded {} ({} format): {summary}", source_label(&dataset), dataset.format);
                self.notice = Some(Notice::info(format!(
                    "Loaded {summary}. Press Render to draw."
                )));
                self.dataset = Some(dataset);
                self.summary = Some(summary);
                true
            }
            Err(e) => {
                log::error!("Failed to load file: {e}");
                self.notice = Some(Notice::error(format!("Error: {e}")));
                false
            }
        }
    }

    /// Transform the loaded dataset into the frame the canvas paints.
    ///
    /// Without a dataset this only raises a warning.  Returns whether a new
    /// frame was produced.
    pub fn render(&mut self) -> bool {
        let Some(dataset) = &self.dataset else {
            log::warn!("Render requested with no dataset loaded");
            self.notice = Some(Notice::warning(NO_DATASET_NOTICE));
            return false;
        };

        let points = transform(&dataset.points);
        self.notice = Some(if points.is_empty() {
            Notice::warning("Dataset has no points; heatmap cleared")
        } else {
            Notice::info(format!("Rendered {} points", points.len()))
        });
        log::info!("Rendering {} points", points.len());
        self.frame = Some(points);
        true
    }

    pub fn toggle_menu(&mut self) {
        self.menu_open = !self.menu_open;
    }

    pub fn close_menu(&mut self) {
        self.menu_open = false;
    }

    /// Jump to a section; choosing an entry closes the drawer.
    pub fn select_section(&mut self, section: Section) {
        self.section = section;
        self.menu_open = false;
    }
}

fn source_label(dataset: &Dataset) -> String {
    dataset
        .source
        .as_deref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "<memory>".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{RawPoint, SourceFormat};

    fn dataset(points: Vec<RawPoint>) -> Dataset {
        Dataset::new(points, SourceFormat::Json)
    }

    #[test]
    fn render_without_dataset_warns() {
        let mut state = AppState::default();
        assert!(!state.render());
        assert!(state.frame.is_none());
        assert_eq!(state.notice, Some(Notice::warning(NO_DATASET_NOTICE)));
    }

    #[test]
    fn render_transforms_loaded_points() {
        let mut state = AppState::default();
        assert!(state.apply_load(Ok(dataset(vec![RawPoint::new(1.0, 2.0, 30.0)]))));
        assert!(state.frame.is_none(), "loading alone does not render");

        assert!(state.render());
        assert_eq!(
            state.frame,
            Some(vec![RenderPoint {
                x: 1.0,
                y: 2.0,
                intensity: 30.0
            }])
        );
        assert_eq!(state.notice.as_ref().map(|n| n.level), Some(NoticeLevel::Info));
    }

    #[test]
    fn failed_load_keeps_previous_dataset() {
        let mut state = AppState::default();
        let first = dataset(vec![RawPoint::new(1.0, 2.0, 3.0)]);
        state.apply_load(Ok(first.clone()));

        let path = std::env::temp_dir().join(format!("hotspots-{}-broken.json", std::process::id()));
        std::fs::write(&path, "[{\"longitude\": 1,").unwrap();
        assert!(!state.load_path(&path));
        std::fs::remove_file(&path).ok();

        assert_eq!(state.dataset, Some(first));
        assert_eq!(state.summary.map(|s| s.count), Some(1));
        let notice = state.notice.unwrap();
        assert_eq!(notice.level, NoticeLevel::Error);
        assert!(notice.text.contains("invalid JSON"), "{}", notice.text);
    }

    #[test]
    fn second_load_replaces_dataset() {
        let mut state = AppState::default();
        state.apply_load(Ok(dataset(vec![RawPoint::new(1.0, 1.0, 1.0); 3])));
        state.apply_load(Ok(dataset(vec![RawPoint::new(2.0, 2.0, 2.0)])));
        assert_eq!(state.dataset.as_ref().map(Dataset::len), Some(1));
        assert_eq!(state.summary.map(|s| s.count), Some(1));

        state.render();
        assert_eq!(state.frame.as_ref().map(Vec::len), Some(1));
    }

    #[test]
    fn empty_dataset_renders_blank_frame() {
        let mut state = AppState::default();
        state.apply_load(Ok(dataset(Vec::new())));
        assert!(state.render());
        assert_eq!(state.frame, Some(Vec::new()));
        assert_eq!(state.notice.as_ref().map(|n| n.level), Some(NoticeLevel::Warning));
    }

    #[test]
    fn menu_state_is_explicit() {
        let mut state = AppState::default();
        assert!(!state.menu_open);
        state.toggle_menu();
        assert!(state.menu_open);
        state.select_section(Section::Demo);
        assert_eq!(state.section, Section::Demo);
        assert!(!state.menu_open);
        state.toggle_menu();
        state.close_menu();
        assert!(!state.menu_open);
    }
}
