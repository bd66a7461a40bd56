#![deny(unsafe_code)]
//! CPU-side rasterization of the particle field.
//!
//! [`RasterSurface`] implements [`Surface`] over an RGBA8 buffer so the
//! simulator can run headless (CLI renders, tests). With the default `png`
//! feature, [`snapshot::write_png`] saves the buffer to disk.

pub mod pixel;

#[cfg(feature = "png")]
pub mod snapshot;

use pixel::{blend_over, segment_distance};
use plexus_core::{DVec2, FieldError, Rgba, Srgb, Surface};

/// An in-memory RGBA8 drawing surface.
///
/// `clear` fills the background color; discs are filled by pixel-centre
/// sampling and lines are anti-aliased by distance to the segment. All
/// drawing composites source-over.
#[derive(Debug, Clone)]
pub struct RasterSurface {
    width: u32,
    height: u32,
    background: Rgba,
    pixels: Vec<u8>,
}

impl RasterSurface {
    /// Allocates a surface cleared to `background`.
    ///
    /// Returns `FieldError::InvalidDimensions` for a zero dimension or a
    /// buffer size that overflows `usize`.
    pub fn new(width: u32, height: u32, background: Rgba) -> Result<Self, FieldError> {
        if width == 0 || height == 0 {
            return Err(FieldError::InvalidDimensions);
        }
        let len = buffer_len(width, height).ok_or(FieldError::InvalidDimensions)?;
        let mut surface = Self {
            width,
            height,
            background,
            pixels: vec![0; len],
        };
        surface.clear();
        Ok(surface)
    }

    /// A surface with an opaque background.
    pub fn opaque(width: u32, height: u32, background: Srgb) -> Result<Self, FieldError> {
        Self::new(width, height, background.with_alpha(1.0))
    }

    pub fn width_px(&self) -> u32 {
        self.width
    }

    pub fn height_px(&self) -> u32 {
        self.height
    }

    /// Row-major RGBA8 data, `width * height * 4` bytes.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// The RGBA value at `(x, y)`, or `None` outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let mut out = [0; 4];
        out.copy_from_slice(&self.pixels[i..i + 4]);
        Some(out)
    }

    /// Number of pixels that differ from the background.
    pub fn painted_pixels(&self) -> usize {
        let bg = self.background_rgba8();
        self.pixels.chunks_exact(4).filter(|px| *px != bg).count()
    }

    fn background_rgba8(&self) -> [u8; 4] {
        let [r, g, b] = self.background.color.to_rgb8();
        let a = (self.background.alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
        [r, g, b, a]
    }

    /// Calls `paint(pixel, centre)` for each pixel whose centre lies in the
    /// clipped bounding box `[x0, x1] × [y0, y1]`.
    fn for_each_in_box(
        &mut self,
        (x0, y0): (f64, f64),
        (x1, y1): (f64, f64),
        mut paint: impl FnMut(&mut [u8], (f64, f64)),
    ) {
        if !(x0.is_finite() && y0.is_finite() && x1.is_finite() && y1.is_finite()) {
            return;
        }
        let clip = |v: f64, max: u32| v.floor().clamp(0.0, max as f64) as u32;
        let (px0, px1) = (clip(x0, self.width), clip(x1 + 1.0, self.width));
        let (py0, py1) = (clip(y0, self.height), clip(y1 + 1.0, self.height));
        let stride = self.width as usize;
        for py in py0..py1 {
            for px in px0..px1 {
                let i = (py as usize * stride + px as usize) * 4;
                let centre = (px as f64 + 0.5, py as f64 + 0.5);
                paint(&mut self.pixels[i..i + 4], centre);
            }
        }
    }
}

fn buffer_len(width: u32, height: u32) -> Option<usize> {
    (width as usize)
        .checked_mul(height as usize)?
        .checked_mul(4)
}

impl Surface for RasterSurface {
    fn width(&self) -> f64 {
        self.width as f64
    }

    fn height(&self) -> f64 {
        self.height as f64
    }

    /// Reallocates to the rounded size. A size that cannot be allocated
    /// leaves an empty surface that ignores drawing.
    fn resize(&mut self, width: f64, height: f64) {
        let to_px = |v: f64| {
            if v.is_finite() && v > 0.0 {
                v.round().min(u32::MAX as f64) as u32
            } else {
                0
            }
        };
        let (w, h) = (to_px(width), to_px(height));
        match buffer_len(w, h) {
            Some(len) => {
                self.width = w;
                self.height = h;
                self.pixels = vec![0; len];
            }
            None => {
                self.width = 0;
                self.height = 0;
                self.pixels = Vec::new();
            }
        }
        self.clear();
    }

    fn clear(&mut self) {
        let bg = self.background_rgba8();
        for px in self.pixels.chunks_exact_mut(4) {
            px.copy_from_slice(&bg);
        }
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Rgba) {
        let r2 = radius * radius;
        self.for_each_in_box(
            (center.x - radius, center.y - radius),
            (center.x + radius, center.y + radius),
            |px, (x, y)| {
                let (dx, dy) = (x - center.x, y - center.y);
                if dx * dx + dy * dy <= r2 {
                    blend_over(px, color, 1.0);
                }
            },
        );
    }

    fn stroke_line(&mut self, from: DVec2, to: DVec2, width: f64, color: Rgba) {
        let half = width.max(0.0) / 2.0;
        let reach = half + 1.0;
        let (a, b) = ((from.x, from.y), (to.x, to.y));
        self.for_each_in_box(
            (from.x.min(to.x) - reach, from.y.min(to.y) - reach),
            (from.x.max(to.x) + reach, from.y.max(to.y) + reach),
            |px, p| {
                let coverage = (half + 0.5 - segment_distance(p, a, b)).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    blend_over(px, color, coverage);
                }
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plexus_core::{FieldConfig, Simulator, Xorshift64};

    fn black() -> Srgb {
        Srgb::from_hex("#000000").unwrap()
    }

    fn accent(alpha: f64) -> Rgba {
        Srgb::from_hex("#00ffc6").unwrap().with_alpha(alpha)
    }

    #[test]
    fn new_rejects_zero_dimensions() {
        assert!(RasterSurface::opaque(0, 4, black()).is_err());
        assert!(RasterSurface::opaque(4, 0, black()).is_err());
    }

    #[test]
    fn new_is_cleared_to_background() {
        let s = RasterSurface::opaque(4, 3, Srgb::from_hex("#111111").unwrap()).unwrap();
        assert_eq!(s.pixels().len(), 4 * 3 * 4);
        assert_eq!(s.pixel(3, 2), Some([0x11, 0x11, 0x11, 255]));
        assert_eq!(s.painted_pixels(), 0);
    }

    #[test]
    fn pixel_outside_is_none() {
        let s = RasterSurface::opaque(4, 4, black()).unwrap();
        assert_eq!(s.pixel(4, 0), None);
        assert_eq!(s.pixel(0, 4), None);
    }

    #[test]
    fn fill_circle_paints_centre_not_corner() {
        let mut s = RasterSurface::opaque(20, 20, black()).unwrap();
        s.fill_circle(DVec2::new(10.0, 10.0), 2.5, accent(1.0));
        assert_eq!(s.pixel(10, 10), Some([0, 255, 198, 255]));
        assert_eq!(s.pixel(0, 0), Some([0, 0, 0, 255]));
        let painted = s.painted_pixels();
        assert!((12..=32).contains(&painted), "painted {painted}");
    }

    #[test]
    fn fill_circle_partly_off_surface_is_clipped() {
        let mut s = RasterSurface::opaque(8, 8, black()).unwrap();
        s.fill_circle(DVec2::new(-0.5, 4.0), 2.0, accent(1.0));
        s.fill_circle(DVec2::new(1e9, 1e9), 2.0, accent(1.0));
        s.fill_circle(DVec2::new(f64::NAN, 4.0), 2.0, accent(1.0));
        assert!(s.pixel(0, 4).is_some_and(|px| px[1] == 255));
    }

    #[test]
    fn stroke_line_paints_along_segment_with_partial_alpha() {
        let mut s = RasterSurface::opaque(20, 10, black()).unwrap();
        s.stroke_line(DVec2::new(2.0, 5.5), DVec2::new(18.0, 5.5), 0.5, accent(1.0));
        let on = s.pixel(10, 5).unwrap();
        assert!(on[1] > 100, "pixel on the line should be lit: {on:?}");
        assert!(on[1] < 255, "hairline coverage is partial: {on:?}");
        assert_eq!(s.pixel(10, 0), Some([0, 0, 0, 255]));
    }

    #[test]
    fn zero_alpha_line_paints_nothing() {
        let mut s = RasterSurface::opaque(20, 10, black()).unwrap();
        s.stroke_line(DVec2::new(0.0, 5.0), DVec2::new(20.0, 5.0), 0.5, accent(0.0));
        assert_eq!(s.painted_pixels(), 0);
    }

    #[test]
    fn clear_restores_background() {
        let mut s = RasterSurface::opaque(10, 10, black()).unwrap();
        s.fill_circle(DVec2::new(5.0, 5.0), 3.0, accent(1.0));
        s.clear();
        assert_eq!(s.painted_pixels(), 0);
    }

    #[test]
    fn resize_reallocates_and_clears() {
        let mut s = RasterSurface::opaque(10, 10, black()).unwrap();
        s.resize(32.4, 16.6);
        assert_eq!((s.width_px(), s.height_px()), (32, 17));
        assert_eq!(s.pixels().len(), 32 * 17 * 4);
        assert_eq!(s.painted_pixels(), 0);
    }

    #[test]
    fn resize_to_degenerate_size_ignores_drawing() {
        let mut s = RasterSurface::opaque(10, 10, black()).unwrap();
        s.resize(-5.0, f64::NAN);
        assert!(s.pixels().is_empty());
        s.fill_circle(DVec2::new(0.0, 0.0), 3.0, accent(1.0));
        s.stroke_line(DVec2::ZERO, DVec2::ONE, 1.0, accent(1.0));
        assert!(s.pixels().is_empty());
    }

    #[test]
    fn simulator_frames_paint_the_raster() {
        let surface = RasterSurface::opaque(1, 1, black()).unwrap();
        let mut sim = Simulator::mount(
            Some(surface),
            210.0,
            210.0,
            FieldConfig::default(),
            Xorshift64::new(42),
        )
        .unwrap();
        for _ in 0..5 {
            assert!(sim.frame());
        }
        assert_eq!(sim.field().len(), 4);
        assert!(sim.surface().painted_pixels() > 0);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn drawing_never_panics_and_keeps_buffer_size(
                w in 1_u32..64,
                h in 1_u32..64,
                x in -100.0_f64..200.0,
                y in -100.0_f64..200.0,
                r in 0.0_f64..10.0,
                alpha in -2.0_f64..2.0,
            ) {
                let mut s = RasterSurface::opaque(w, h, black()).unwrap();
                s.fill_circle(DVec2::new(x, y), r, accent(alpha));
                s.stroke_line(DVec2::new(x, y), DVec2::new(y, x), r, accent(alpha));
                prop_assert_eq!(s.pixels().len(), (w * h * 4) as usize);
                for px in s.pixels().chunks_exact(4) {
                    prop_assert_eq!(px[3], 255);
                }
            }
        }
    }
}
