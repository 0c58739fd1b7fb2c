use eframe::egui::{self, Color32, Mesh, Painter, Rect, Sense, Ui, Vec2};

use crate::color::Rgba8;
use crate::data::model::RenderPoint;
use crate::render::{render_heatmap, Surface};
use crate::state::AppState;

/// Id of the heatmap drawing area.
pub const HEATMAP_CANVAS_ID: &str = "heatmap";

// ---------------------------------------------------------------------------
// egui painter as a heatmap surface
// ---------------------------------------------------------------------------

/// Paints into `rect` through an egui [`Painter`].  Point coordinates are
/// relative to the rect's top-left corner, like canvas pixels.
pub struct EguiSurface<'a> {
    painter: &'a Painter,
    rect: Rect,
    background: Color32,
}

impl<'a> EguiSurface<'a> {
    pub fn new(painter: &'a Painter, rect: Rect, background: Color32) -> Self {
        Self {
            painter,
            rect,
            background,
        }
    }
}

fn to_color32(c: Rgba8) -> Color32 {
    Color32::from_rgba_unmultiplied(c.r, c.g, c.b, c.a)
}

/// Rim vertices for a disk of `radius` points.
fn segments_for(radius: f64) -> u32 {
    ((radius * 1.5).ceil() as u32).clamp(16, 96)
}

impl Surface for EguiSurface<'_> {
    fn size(&self) -> (f64, f64) {
        (self.rect.width() as f64, self.rect.height() as f64)
    }

    fn clear(&mut self) {
        self.painter.rect_filled(self.rect, 0.0, self.background);
    }

    fn fill_radial(&mut self, cx: f64, cy: f64, radius: f64, center: Rgba8, rim: Rgba8) {
        // Triangle fan: egui interpolates vertex colours linearly, which is
        // exactly a two-stop radial gradient.
        let origin = self.rect.min + Vec2::new(cx as f32, cy as f32);
        let r = radius as f32;
        let n = segments_for(radius);

        let mut mesh = Mesh::default();
        mesh.colored_vertex(origin, to_color32(center));
        let rim = to_color32(rim);
        for i in 0..n {
            let angle = i as f32 / n as f32 * std::f32::consts::TAU;
            mesh.colored_vertex(origin + Vec2::angled(angle) * r, rim);
        }
        for i in 0..n {
            mesh.add_triangle(0, 1 + i, 1 + (i + 1) % n);
        }
        self.painter.add(egui::Shape::mesh(mesh));
    }
}

// ---------------------------------------------------------------------------
// Heatmap canvas widget
// ---------------------------------------------------------------------------

/// Fill the remaining space with the heatmap canvas and paint the current
/// frame.  The canvas takes its size from the available layout each frame.
pub fn heatmap_canvas(ui: &mut Ui, state: &AppState) {
    ui.push_id(HEATMAP_CANVAS_ID, |ui: &mut Ui| {
        let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::hover());
        let rect = response.rect;

        let background = match Rgba8::from(state.style.background) {
            bg if bg.a > 0 => to_color32(bg),
            _ => ui.visuals().extreme_bg_color,
        };

        let Some(points) = &state.frame else {
            painter.rect_filled(rect, 4.0, background);
            painter.text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                "Load a file, then press Render",
                egui::FontId::proportional(16.0),
                ui.visuals().weak_text_color(),
            );
            return;
        };

        let mut surface = EguiSurface::new(&painter, rect, background);
        render_heatmap(&mut surface, points, &state.style);

        if let Some(pos) = response.hover_pos() {
            show_nearest_point(response, pos - rect.min, points);
        }
    });
}

/// Tooltip with the point under the cursor, if any is close enough.
fn show_nearest_point(response: egui::Response, local: Vec2, points: &[RenderPoint]) {
    const PICK_DISTANCE: f32 = 6.0;

    let nearest = points
        .iter()
        .map(|p| (p, (Vec2::new(p.x as f32, p.y as f32) - local).length()))
        .filter(|(_, d)| *d <= PICK_DISTANCE)
        .min_by(|a, b| a.1.total_cmp(&b.1));

    if let Some((p, _)) = nearest {
        response.on_hover_ui_at_pointer(|ui: &mut Ui| {
            ui.label(format!("x {:.4}, y {:.4}", p.x, p.y));
            ui.label(format!("bandwidth {:.1}", p.intensity));
        });
    }
}
