//! Resampling a bitmap to a logical size.
//!
//! Uses the `image` crate's resize algorithms. The input is never modified.

use super::normalize_orientation;
use crate::decode::{Bitmap, FilterType, Orientation};
use crate::error::CropError;
use crate::viewport::Size;

/// Resize a bitmap to `target` points at `density` pixels per point.
///
/// # Arguments
///
/// * `image` - The source bitmap
/// * `target` - Target logical size in points
/// * `density` - Pixels per point of the output buffer
/// * `filter` - Interpolation filter to use
///
/// # Returns
///
/// A copy of the input when its logical size already equals `target`;
/// otherwise a new upright bitmap of `round(target * density)` pixels with
/// `scale == density`. Tagged inputs are normalized first.
///
/// # Errors
///
/// Returns `CropError::InvalidViewport` for a non-positive target or density
/// and `CropError::NoSourcePixelBuffer` if the image has no pixels.
pub fn resize(
    image: &Bitmap,
    target: Size,
    density: f64,
    filter: FilterType,
) -> Result<Bitmap, CropError> {
    if !target.is_positive() || !density.is_finite() || density <= 0.0 {
        return Err(CropError::InvalidViewport(format!(
            "cannot resize to {}x{} at density {}",
            target.width, target.height, density
        )));
    }

    // Fast path: already the requested size
    if image.logical_size() == target {
        return Ok(image.clone());
    }

    if !image.has_pixel_buffer() {
        return Err(CropError::NoSourcePixelBuffer);
    }

    let upright = if image.orientation == Orientation::Up {
        image.clone()
    } else {
        normalize_orientation(image)?
    };

    let rgba = upright.to_rgba_image().ok_or_else(|| {
        CropError::UnsupportedPixelFormat("failed to create RgbaImage".to_string())
    })?;

    let width = ((target.width * density).round() as u32).max(1);
    let height = ((target.height * density).round() as u32).max(1);
    let resized = image::imageops::resize(&rgba, width, height, filter.to_image_filter());

    Ok(Bitmap::from_rgba_image(resized)
        .with_color_space(upright.color_space)
        .with_scale(density))
}
