use eframe::egui::{self, RichText, Ui};

// ---------------------------------------------------------------------------
// Pre-rendered campus heatmaps
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Campus {
    Dartmouth,
    HongKong,
}

impl Campus {
    pub fn title(self) -> &'static str {
        match self {
            Campus::Dartmouth => "Dartmouth Data",
            Campus::HongKong => "Hong Kong Data",
        }
    }

    pub fn subtitle(self) -> &'static str {
        match self {
            Campus::Dartmouth => {
                "Campus-wide Wi-Fi heatmap showing access point activity across Dartmouth College"
            }
            Campus::HongKong => {
                "Visualization of HKU Library Wi-Fi traffic across multiple floors"
            }
        }
    }

    /// Fixed location of the pre-rendered image, relative to the working
    /// directory.
    pub fn image_uri(self) -> &'static str {
        match self {
            Campus::Dartmouth => "file://assets/dart_heatmap.png",
            Campus::HongKong => "file://assets/hk_heatmap.png",
        }
    }
}

/// Show one campus: heading, blurb and its heatmap image.  A missing image
/// file shows egui's error placeholder.
pub fn campus_section(ui: &mut Ui, campus: Campus) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(RichText::new(campus.title()).strong());
        ui.label(campus.subtitle());
    });
    ui.add_space(8.0);
    ui.add(
        egui::Image::new(campus.image_uri())
            .max_width(ui.available_width())
            .max_height(ui.available_height())
            .maintain_aspect_ratio(true),
    );
}

/// Landing section text.
pub fn home_section(ui: &mut Ui) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.add_space(24.0);
        ui.heading(RichText::new("🔥 HotSpots").size(32.0).strong());
        ui.label("See where campus Wi-Fi runs hot.");
        ui.add_space(12.0);
        ui.label(
            "Browse the Dartmouth and Hong Kong heatmaps, or load your own \
             longitude / latitude / bandwidth samples under \"Try It\".",
        );
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn campus_images_live_under_assets() {
        assert_eq!(Campus::Dartmouth.image_uri(), "file://assets/dart_heatmap.png");
        assert_eq!(Campus::HongKong.image_uri(), "file://assets/hk_heatmap.png");
        assert!(Campus::HongKong.subtitle().contains("HKU Library"));
    }
}
