/// Heatmap drawing, independent of where the pixels end up.
///
/// `render_heatmap` clears a [`Surface`] and paints one radial-gradient disk
/// per point.  Two surfaces exist: the egui painter used by the viewer
/// (`ui::canvas`) and the off-screen RGBA [`raster::RasterSurface`] used by
/// `--export` and the tests.
pub mod raster;

use crate::color::{heat_center, heat_rim, Rgba8};
use crate::config::HeatmapStyle;
use crate::data::model::RenderPoint;

/// Something a heatmap can be painted on.
pub trait Surface {
    /// Width and height in surface units, as laid out right now.
    fn size(&self) -> (f64, f64);

    /// Reset every pixel to the surface's background.
    fn clear(&mut self);

    /// Fill the disk of `radius` around `(cx, cy)` with a gradient running
    /// from `center` (stop 0) to `rim` (stop 1).
    fn fill_radial(&mut self, cx: f64, cy: f64, radius: f64, center: Rgba8, rim: Rgba8);
}

/// Disk radius for a point: linear in intensity, capped at `max_radius`.
///
/// NaN intensities yield NaN, which [`render_heatmap`] treats like zero.
pub fn radius_for(intensity: f64, style: &HeatmapStyle) -> f64 {
    let r = intensity / style.intensity_per_unit;
    // `f64::min` would swap a NaN for the cap.
    if r > style.max_radius {
        style.max_radius
    } else {
        r
    }
}

/// Clear `surface` and draw `points` onto it.  Returns the number of disks
/// actually painted.
///
/// A surface with no area is left alone.  Points whose radius is zero,
/// negative or NaN are skipped without error.  The surface size is read at
/// call time, so callers re-render after a layout change.
pub fn render_heatmap<S: Surface + ?Sized>(
    surface: &mut S,
    points: &[RenderPoint],
    style: &HeatmapStyle,
) -> usize {
    let (width, height) = surface.size();
    if !(width > 0.0 && height > 0.0) {
        log::warn!("heatmap surface has no area ({width}x{height}), skipping render");
        return 0;
    }

    surface.clear();

    let center = heat_center(style);
    let rim = heat_rim(style);
    let mut drawn = 0;
    for p in points {
        let radius = radius_for(p.intensity, style);
        if radius > 0.0 {
            surface.fill_radial(p.x, p.y, radius, center, rim);
            drawn += 1;
        }
    }

    log::debug!(
        "rendered {drawn}/{} points on {width}x{height} surface",
        points.len()
    );
    drawn
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records calls instead of drawing.
    #[derive(Default)]
    struct Recorder {
        size: (f64, f64),
        clears: usize,
        disks: Vec<(f64, f64, f64)>,
    }

    impl Surface for Recorder {
        fn size(&self) -> (f64, f64) {
            self.size
        }

        fn clear(&mut self) {
            self.clears += 1;
            self.disks.clear();
        }

        fn fill_radial(&mut self, cx: f64, cy: f64, radius: f64, _: Rgba8, _: Rgba8) {
            self.disks.push((cx, cy, radius));
        }
    }

    fn point(x: f64, y: f64, intensity: f64) -> RenderPoint {
        RenderPoint { x, y, intensity }
    }

    #[test]
    fn radius_is_linear_then_capped() {
        let style = HeatmapStyle::default();
        assert_eq!(radius_for(100.0, &style), 10.0);
        assert_eq!(radius_for(500.0, &style), 50.0);
        assert_eq!(radius_for(1000.0, &style), 50.0);
        assert_eq!(radius_for(0.0, &style), 0.0);
    }

    #[test]
    fn nan_intensity_keeps_nan_radius() {
        let style = HeatmapStyle::default();
        assert!(radius_for(f64::NAN, &style).is_nan());
        assert_eq!(radius_for(f64::INFINITY, &style), 50.0);
    }

    #[test]
    fn draws_one_disk_per_point() {
        let mut s = Recorder {
            size: (200.0, 100.0),
            ..Default::default()
        };
        let drawn = render_heatmap(
            &mut s,
            &[point(1.0, 2.0, 100.0), point(30.0, 40.0, 1000.0)],
            &HeatmapStyle::default(),
        );
        assert_eq!(drawn, 2);
        assert_eq!(s.clears, 1);
        assert_eq!(s.disks, vec![(1.0, 2.0, 10.0), (30.0, 40.0, 50.0)]);
    }

    #[test]
    fn degenerate_radii_are_skipped() {
        let mut s = Recorder {
            size: (10.0, 10.0),
            ..Default::default()
        };
        let points = [point(1.0, 1.0, 0.0), point(2.0, 2.0, -5.0), point(3.0, 3.0, f64::NAN)];
        assert_eq!(render_heatmap(&mut s, &points, &HeatmapStyle::default()), 0);
        assert_eq!(s.clears, 1);
        assert!(s.disks.is_empty());
    }

    #[test]
    fn empty_input_still_clears() {
        let mut s = Recorder {
            size: (10.0, 10.0),
            ..Default::default()
        };
        s.disks.push((0.0, 0.0, 1.0));
        assert_eq!(render_heatmap(&mut s, &[], &HeatmapStyle::default()), 0);
        assert_eq!(s.clears, 1);
        assert!(s.disks.is_empty());
    }

    #[test]
    fn zero_area_surface_is_skipped() {
        let mut s = Recorder::default();
        assert_eq!(
            render_heatmap(&mut s, &[point(1.0, 1.0, 100.0)], &HeatmapStyle::default()),
            0
        );
        assert_eq!(s.clears, 0);
    }
}
