//! Oval clipping of a cropped bitmap.

use super::EllipseMask;
use crate::error::CropError;
use crate::transform::{canvas::Canvas, AffineTransform};
use crate::decode::Bitmap;
use crate::viewport::Size;

/// Clip a bitmap to the ellipse inscribed in its bounds.
///
/// The result is rendered at `density` pixels per source pixel: a
/// `w x h` input produces a `round(w * density) x round(h * density)`
/// bitmap with `scale == density`. Inside the ellipse every output pixel
/// is an unmodified copy of the source pixel under it (nearest sampling);
/// outside, pixels are fully transparent.
///
/// # Errors
///
/// Returns `CropError::NoSourcePixelBuffer` if the input has no pixels and
/// `CropError::InvalidViewport` for a non-positive density.
pub fn oval_clip(image: &Bitmap, density: f64) -> Result<Bitmap, CropError> {
    if !density.is_finite() || density <= 0.0 {
        return Err(CropError::InvalidViewport(format!(
            "device pixel density must be positive, got {}",
            density
        )));
    }
    if !image.has_pixel_buffer() {
        return Err(CropError::NoSourcePixelBuffer);
    }

    let (w, h) = (image.width as f64, image.height as f64);
    let out_width = ((w * density).round() as u32).max(1);
    let out_height = ((h * density).round() as u32).max(1);

    let mut canvas = Canvas::new(out_width, out_height);
    canvas.concat(&AffineTransform::scale(out_width as f64 / w, out_height as f64 / h));
    canvas.clip_to_ellipse(EllipseMask::inscribed());
    canvas.draw(image, Size::new(w, h))?;

    Ok(canvas.into_bitmap(image.color_space, density))
}
