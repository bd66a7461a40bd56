//! PNG output of a [`RasterSurface`].
//!
//! Feature-gated behind `png` (default on) so builds that only need the raster
//! buffer do not pull in the `image` crate.

use crate::RasterSurface;
use plexus_core::FieldError;
use std::path::Path;

/// Writes the surface as an RGBA PNG.
///
/// Returns `FieldError::InvalidDimensions` for an empty surface, or
/// `FieldError::Io` on write failure.
pub fn write_png(surface: &RasterSurface, path: &Path) -> Result<(), FieldError> {
    if surface.width_px() == 0 || surface.height_px() == 0 {
        return Err(FieldError::InvalidDimensions);
    }
    let img = image::RgbaImage::from_raw(
        surface.width_px(),
        surface.height_px(),
        surface.pixels().to_vec(),
    )
    .ok_or_else(|| FieldError::Io("RGBA buffer size mismatch".into()))?;
    img.save(path).map_err(|e| FieldError::Io(e.to_string()))?;
    log::debug!("wrote {}", path.display());
    Ok(())
}
