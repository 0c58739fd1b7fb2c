use std::path::{Path, PathBuf};

use image::{Rgba, RgbaImage};
use thiserror::Error;

use super::{render_heatmap, Surface};
use crate::color::Rgba8;
use crate::config::HeatmapStyle;
use crate::data::model::RenderPoint;

// ---------------------------------------------------------------------------
// Off-screen RGBA surface
// ---------------------------------------------------------------------------

/// An in-memory RGBA image.  Pixel `(i, j)` covers the unit square whose
/// centre is `(i + 0.5, j + 0.5)`; gradients are composited source-over.
pub struct RasterSurface {
    image: RgbaImage,
    background: Rgba8,
}

impl RasterSurface {
    pub fn new(width: u32, height: u32, background: Rgba8) -> Self {
        let image = RgbaImage::from_pixel(width, height, Rgba(background.to_array()));
        Self { image, background }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Rgba8 {
        let [r, g, b, a] = self.image.get_pixel(x, y).0;
        Rgba8::new(r, g, b, a)
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }
}

/// Interpolate two straight-alpha colours in premultiplied space, as canvas
/// gradients do.  Returns straight RGBA as floats in 0.0–1.0.
fn gradient_at(center: Rgba8, rim: Rgba8, t: f64) -> [f64; 4] {
    let premul = |c: Rgba8| {
        let a = c.a as f64 / 255.0;
        [
            c.r as f64 / 255.0 * a,
            c.g as f64 / 255.0 * a,
            c.b as f64 / 255.0 * a,
            a,
        ]
    };
    let (c0, c1) = (premul(center), premul(rim));
    let out: [f64; 4] = std::array::from_fn(|i| c0[i] + (c1[i] - c0[i]) * t);
    let a = out[3];
    if a > 0.0 {
        [out[0] / a, out[1] / a, out[2] / a, a]
    } else {
        [0.0; 4]
    }
}

/// Source-over composite of straight-alpha `src` onto `dst`.
fn blend_over(dst: &mut Rgba<u8>, src: [f64; 4]) {
    let sa = src[3];
    if sa <= 0.0 {
        return;
    }
    let da = dst.0[3] as f64 / 255.0;
    let out_a = sa + da * (1.0 - sa);
    for i in 0..3 {
        let d = dst.0[i] as f64 / 255.0;
        let c = (src[i] * sa + d * da * (1.0 - sa)) / out_a;
        dst.0[i] = (c * 255.0).round().clamp(0.0, 255.0) as u8;
    }
    dst.0[3] = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;
}

impl Surface for RasterSurface {
    fn size(&self) -> (f64, f64) {
        (self.image.width() as f64, self.image.height() as f64)
    }

    fn clear(&mut self) {
        let bg = Rgba(self.background.to_array());
        for px in self.image.pixels_mut() {
            *px = bg;
        }
    }

    fn fill_radial(&mut self, cx: f64, cy: f64, radius: f64, center: Rgba8, rim: Rgba8) {
        let (w, h) = (self.image.width() as f64, self.image.height() as f64);
        // Pixel rows/columns whose centres can fall inside the disk.
        let x0 = (cx - radius - 0.5).floor().max(0.0);
        let x1 = (cx + radius - 0.5).ceil().min(w - 1.0);
        let y0 = (cy - radius - 0.5).floor().max(0.0);
        let y1 = (cy + radius - 0.5).ceil().min(h - 1.0);
        if x0 > x1 || y0 > y1 {
            return;
        }

        for py in y0 as u32..=y1 as u32 {
            for px in x0 as u32..=x1 as u32 {
                let dx = px as f64 + 0.5 - cx;
                let dy = py as f64 + 0.5 - cy;
                let d = (dx * dx + dy * dy).sqrt();
                if d >= radius {
                    continue;
                }
                let src = gradient_at(center, rim, d / radius);
                blend_over(self.image.get_pixel_mut(px, py), src);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// PNG export
// ---------------------------------------------------------------------------

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("export size must be non-zero, got {0}x{1}")]
    EmptySize(u32, u32),

    #[error("cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Render `points` into a fresh `width`×`height` raster.
pub fn render_to_image(
    points: &[RenderPoint],
    style: &HeatmapStyle,
    width: u32,
    height: u32,
) -> Result<RgbaImage, ExportError> {
    if width == 0 || height == 0 {
        return Err(ExportError::EmptySize(width, height));
    }
    let mut surface = RasterSurface::new(width, height, Rgba8::from(style.background));
    render_heatmap(&mut surface, points, style);
    Ok(surface.into_image())
}

/// Render `points` and save them as a PNG at `path`.
pub fn export_png(
    points: &[RenderPoint],
    style: &HeatmapStyle,
    width: u32,
    height: u32,
    path: &Path,
) -> Result<(), ExportError> {
    let img = render_to_image(points, style, width, height)?;
    img.save_with_format(path, image::ImageFormat::Png)
        .map_err(|source| ExportError::Write {
            path: path.to_path_buf(),
            source,
        })?;
    log::info!("wrote {width}x{height} heatmap to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgba8 = Rgba8::new(255, 0, 0, 255);
    const CLEAR: Rgba8 = Rgba8::TRANSPARENT;

    fn point(x: f64, y: f64, intensity: f64) -> RenderPoint {
        RenderPoint { x, y, intensity }
    }

    #[test]
    fn centre_is_full_colour_and_outside_is_untouched() {
        let mut s = RasterSurface::new(40, 40, CLEAR);
        let style = HeatmapStyle::default();
        // radius 10 around the centre of pixel (20, 20)
        assert_eq!(render_heatmap(&mut s, &[point(20.5, 20.5, 100.0)], &style), 1);

        assert_eq!(s.pixel(20, 20), RED);
        assert_eq!(s.pixel(31, 20), CLEAR);
        assert_eq!(s.pixel(20, 9), CLEAR);
        assert_eq!(s.pixel(0, 0), CLEAR);
    }

    #[test]
    fn alpha_fades_towards_the_rim() {
        let mut s = RasterSurface::new(40, 40, CLEAR);
        render_heatmap(&mut s, &[point(20.5, 20.5, 100.0)], &HeatmapStyle::default());

        let near = s.pixel(22, 20).a;
        let mid = s.pixel(25, 20).a;
        let far = s.pixel(29, 20).a;
        assert!(near > mid && mid > far && far > 0, "{near} {mid} {far}");
        // d = 5 of radius 10 → half alpha
        assert_eq!(mid, 128);
        assert_eq!(s.pixel(25, 20).r, 255);
    }

    #[test]
    fn rerender_with_fewer_points_leaves_no_artifacts() {
        let style = HeatmapStyle::default();
        let mut s = RasterSurface::new(100, 100, CLEAR);
        let many = [
            point(10.5, 10.5, 100.0),
            point(50.5, 50.5, 100.0),
            point(90.5, 90.5, 100.0),
        ];
        render_heatmap(&mut s, &many, &style);
        assert_eq!(s.pixel(90, 90), RED);

        render_heatmap(&mut s, &many[..1], &style);
        assert_eq!(s.pixel(10, 10), RED);
        assert_eq!(s.pixel(50, 50), CLEAR);
        assert_eq!(s.pixel(90, 90), CLEAR);
    }

    #[test]
    fn overlapping_disks_accumulate() {
        let style = HeatmapStyle {
            center_alpha: 0.5,
            ..HeatmapStyle::default()
        };
        let mut single = RasterSurface::new(20, 20, CLEAR);
        render_heatmap(&mut single, &[point(10.5, 10.5, 50.0)], &style);
        let mut double = RasterSurface::new(20, 20, CLEAR);
        render_heatmap(
            &mut double,
            &[point(10.5, 10.5, 50.0), point(10.5, 10.5, 50.0)],
            &style,
        );
        assert!(double.pixel(10, 10).a > single.pixel(10, 10).a);
    }

    #[test]
    fn disks_partly_off_surface_are_clipped() {
        let mut s = RasterSurface::new(10, 10, CLEAR);
        let style = HeatmapStyle::default();
        let points = [point(-5.0, -5.0, 1000.0), point(500.0, 500.0, 100.0)];
        assert_eq!(render_heatmap(&mut s, &points, &style), 2);
        assert!(s.pixel(0, 0).a > 0);
        assert!(s.pixel(9, 9).a > 0);
    }

    #[test]
    fn zero_size_export_is_rejected() {
        assert!(matches!(
            render_to_image(&[], &HeatmapStyle::default(), 0, 10),
            Err(ExportError::EmptySize(0, 10))
        ));
    }

    #[test]
    fn export_writes_png() {
        let path = std::env::temp_dir().join(format!("hotspots-{}-export.png", std::process::id()));
        export_png(
            &[point(8.0, 8.0, 60.0)],
            &HeatmapStyle::default(),
            16,
            16,
            &path,
        )
        .unwrap();
        let reloaded = image::open(&path).unwrap().to_rgba8();
        std::fs::remove_file(&path).ok();
        assert_eq!(reloaded.dimensions(), (16, 16));
    }
}
