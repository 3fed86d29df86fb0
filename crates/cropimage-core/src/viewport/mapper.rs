//! Viewport-to-crop-rect mapping.
//!
//! # Algorithm
//!
//! The host shows the image aspect-filled into the mask and lets the user
//! zoom and scroll it. To express what the mask frames in source pixels we
//! build one effective scale (points on screen per source pixel):
//!
//! ```text
//! z  = zoom_scale / density
//! z /= source.width  / (mask.width  * density)   if width is the fitted dimension
//! z /= source.height / (mask.height * density)   otherwise
//!
//! rect = (offset.x / z, offset.y / z, mask.width / z, mask.height / z)
//! ```
//!
//! The second step undoes the fit scaling applied before any user zoom.

use super::{CropRect, Size, ViewportState};
use crate::error::CropError;
use crate::CropShape;

/// Compute the rectangle of the source image framed by the mask.
///
/// # Arguments
///
/// * `viewport` - Snapshot of the viewport at confirmation time
/// * `shape` - Crop shape; only its aspect ratio matters here
/// * `source` - Source image size in pixels
///
/// # Returns
///
/// The crop rectangle in source pixel coordinates. It is not clamped: for a
/// scroll offset inside `[0, content - mask]` it lies within the source up
/// to floating-point noise, and [`crate::transform::rasterize`] clamps it.
///
/// # Errors
///
/// Returns `CropError::InvalidViewport` if any input would make the
/// division meaningless (zero, negative or non-finite values).
pub fn compute_crop_rect(
    viewport: &ViewportState,
    shape: CropShape,
    source: Size,
) -> Result<CropRect, CropError> {
    viewport.validate()?;
    shape.validate()?;
    if !source.is_positive() {
        return Err(CropError::InvalidViewport(format!(
            "source size must be positive, got {}x{}",
            source.width, source.height
        )));
    }

    let density = viewport.device_pixel_density;
    let mask = viewport.mask_size;

    let mut zoom = viewport.zoom_scale / density;
    if source.aspect_ratio() <= shape.aspect_ratio() {
        zoom /= source.width / (mask.width * density);
    } else {
        zoom /= source.height / (mask.height * density);
    }

    let rect = CropRect::new(
        viewport.content_offset.x / zoom,
        viewport.content_offset.y / zoom,
        mask.width / zoom,
        mask.height / zoom,
    );
    log::debug!(
        "viewport zoom {} at {:?} maps to crop rect {:?}",
        viewport.zoom_scale,
        viewport.content_offset,
        rect
    );

    Ok(rect)
}


// ============================================================================
// Property-Based Tests
// ============================================================================
