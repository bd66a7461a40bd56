//! Pure per-pixel compositing on RGBA8 buffers.
//!
//! Always available (no feature gate) so the raster surface works without the
//! `png` feature.

use plexus_core::Rgba;

/// Composites `src` over the straight-alpha RGBA8 pixel `dst`.
///
/// `coverage` scales the source alpha (anti-aliasing); both are clamped to
/// [0, 1].
pub fn blend_over(dst: &mut [u8], src: Rgba, coverage: f64) {
    let a = (src.alpha.clamp(0.0, 1.0) * coverage.clamp(0.0, 1.0)).min(1.0);
    if a <= 0.0 {
        return;
    }
    let da = dst[3] as f64 / 255.0;
    let out_a = a + da * (1.0 - a);
    let [sr, sg, sb] = src.color.to_rgb8();
    for (channel, s) in dst.iter_mut().take(3).zip([sr, sg, sb]) {
        let d = *channel as f64;
        let v = (s as f64 * a + d * da * (1.0 - a)) / out_a;
        *channel = v.round().clamp(0.0, 255.0) as u8;
    }
    dst[3] = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;
}

/// Distance from `p` to the segment `a`–`b`.
pub fn segment_distance(p: (f64, f64), a: (f64, f64), b: (f64, f64)) -> f64 {
    let (abx, aby) = (b.0 - a.0, b.1 - a.1);
    let (apx, apy) = (p.0 - a.0, p.1 - a.1);
    let len2 = abx * abx + aby * aby;
    let t = if len2 > 0.0 {
        ((apx * abx + apy * aby) / len2).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let (dx, dy) = (apx - t * abx, apy - t * aby);
    (dx * dx + dy * dy).sqrt()
}
