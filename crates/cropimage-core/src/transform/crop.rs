//! Crop rasterization.
//!
//! Turns a crop rectangle in source pixels into a new bitmap by copying the
//! covered rows straight out of the source buffer. No resampling happens
//! for rectangular crops; circular crops add an oval clip rendered at the
//! device pixel density.
//!
//! # Example
//!
//! ```ignore
//! let rect = compute_crop_rect(&viewport, CropShape::Circle, source_size)?;
//! let avatar = rasterize(&image, rect, CropShape::Circle, viewport.device_pixel_density)?;
//! ```

use crate::decode::{Bitmap, Orientation, BYTES_PER_PIXEL};
use crate::error::CropError;
use crate::mask::oval_clip;
use crate::viewport::{compute_crop_rect, CropRect, PixelBounds, Size, ViewportState};
use crate::CropShape;

/// Copy a whole-pixel region out of a bitmap.
///
/// The output is tightly packed, upright and at scale 1. Bounds must lie
/// inside the image.
///
/// # Errors
///
/// Returns `CropError::NoSourcePixelBuffer` if the image has no pixels and
/// `CropError::UnsupportedPixelFormat` if its buffer layout is invalid.
pub fn extract_region(image: &Bitmap, bounds: PixelBounds) -> Result<Bitmap, CropError> {
    let src = image
        .pixels
        .as_deref()
        .ok_or(CropError::NoSourcePixelBuffer)?;
    image.check_layout(src)?;

    debug_assert!(bounds.x + bounds.width <= image.width);
    debug_assert!(bounds.y + bounds.height <= image.height);

    let row_bytes = bounds.width as usize * BYTES_PER_PIXEL;
    let mut output = Vec::with_capacity(row_bytes * bounds.height as usize);

    // Copy pixel data row by row
    for y in bounds.y..bounds.y + bounds.height {
        let start = y as usize * image.stride + bounds.x as usize * BYTES_PER_PIXEL;
        output.extend_from_slice(&src[start..start + row_bytes]);
    }

    Ok(Bitmap::new(bounds.width, bounds.height, output)
        .with_color_space(image.color_space)
        .with_orientation(Orientation::Up))
}

/// Rasterize a crop rectangle of `image` into a new bitmap.
///
/// # Arguments
///
/// * `image` - Source bitmap (normalized upright)
/// * `rect` - Crop rectangle in source pixel coordinates
/// * `shape` - Crop shape; `Circle` adds an oval clip
/// * `density` - Device pixel density used for the oval clip
///
/// # Behavior
///
/// - The rect is clamped to the buffer before cropping, so floating-point
///   overshoot never fails the crop
/// - Fractional edges are widened to whole pixels
///
/// # Errors
///
/// * `CropError::NoSourcePixelBuffer` - the image has no raw pixels
/// * `CropError::CropOutOfBounds` - nothing of the rect lies inside the image
pub fn rasterize(
    image: &Bitmap,
    rect: CropRect,
    shape: CropShape,
    density: f64,
) -> Result<Bitmap, CropError> {
    if !image.has_pixel_buffer() {
        return Err(CropError::NoSourcePixelBuffer);
    }

    let bounds =
        rect.to_pixel_bounds(image.width, image.height)
            .ok_or(CropError::CropOutOfBounds {
                rect,
                width: image.width,
                height: image.height,
            })?;

    let cropped = extract_region(image, bounds)?;

    if shape.is_circle() {
        oval_clip(&cropped, density)
    } else {
        Ok(cropped)
    }
}

/// Crop `image` to whatever the viewport currently frames.
///
/// Convenience for [`compute_crop_rect`] followed by [`rasterize`], using
/// the stored buffer dimensions as the source size.
pub fn crop_image(
    image: &Bitmap,
    viewport: &ViewportState,
    shape: CropShape,
) -> Result<Bitmap, CropError> {
    if !image.has_pixel_buffer() {
        return Err(CropError::NoSourcePixelBuffer);
    }

    let source = Size::new(image.width as f64, image.height as f64);
    let rect = compute_crop_rect(viewport, shape, source)?;
    rasterize(image, rect, shape, viewport.device_pixel_density)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::ColorSpace;
    use crate::viewport::Point;

    /// Create a test image where each pixel has a unique value based on position.
    fn test_image(width: u32, height: u32) -> Bitmap {
        let mut pixels = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                let v = ((y * width + x) % 256) as u8;
                pixels.extend_from_slice(&[v, v, v, 255]);
            }
        }
        Bitmap::new(width, height, pixels)
    }

    fn rect_shape() -> CropShape {
        CropShape::Rectangle { aspect_ratio: 1.0 }
    }

    #[test]
    fn test_extract_region_values() {
        let img = test_image(10, 10);
        let bounds = PixelBounds {
            x: 3,
            y: 3,
            width: 4,
            height: 2,
        };
        let result = extract_region(&img, bounds).unwrap();

        assert_eq!((result.width, result.height), (4, 2));
        // First pixel should be from (3, 3): value = 3 * 10 + 3 = 33
        assert_eq!(result.pixel(0, 0), Some([33, 33, 33, 255]));
        // Last pixel from (6, 4): value = 46
        assert_eq!(result.pixel(3, 1), Some([46, 46, 46, 255]));
        assert_eq!(result.stride, 16);
    }

    #[test]
    fn test_full_rect_is_identity() {
        let img = test_image(50, 40);
        let result = rasterize(&img, CropRect::new(0.0, 0.0, 50.0, 40.0), rect_shape(), 2.0)
            .unwrap();
        assert_eq!(result.pixels, img.pixels);
    }

    #[test]
    fn test_rect_is_clamped_before_crop() {
        let img = test_image(10, 10);
        let rect = CropRect::new(-2.0, 8.0, 5.0, 5.0);
        let result = rasterize(&img, rect, rect_shape(), 1.0).unwrap();

        assert_eq!((result.width, result.height), (3, 2));
        assert_eq!(result.pixel(0, 0), Some([80, 80, 80, 255]));
    }

    #[test]
    fn test_rounding_overshoot_does_not_fail() {
        let img = test_image(100, 100);
        let rect = CropRect::new(0.0, 0.0, 100.000_000_01, 100.000_000_01);
        let result = rasterize(&img, rect, rect_shape(), 3.0).unwrap();
        assert_eq!((result.width, result.height), (100, 100));
    }

    #[test]
    fn test_rect_outside_is_out_of_bounds() {
        let img = test_image(10, 10);
        let rect = CropRect::new(20.0, 20.0, 5.0, 5.0);
        let result = rasterize(&img, rect, rect_shape(), 1.0);
        assert_eq!(
            result,
            Err(CropError::CropOutOfBounds {
                rect,
                width: 10,
                height: 10
            })
        );
    }

    #[test]
    fn test_missing_pixels() {
        let img = Bitmap::without_pixels(10, 10);
        let result = rasterize(&img, CropRect::new(0.0, 0.0, 5.0, 5.0), rect_shape(), 1.0);
        assert_eq!(result, Err(CropError::NoSourcePixelBuffer));
    }

    #[test]
    fn test_circle_adds_transparent_corners() {
        let img = test_image(40, 40);
        let result = rasterize(
            &img,
            CropRect::new(10.0, 10.0, 20.0, 20.0),
            CropShape::Circle,
            2.0,
        )
        .unwrap();

        assert_eq!((result.width, result.height), (40, 40));
        assert_eq!(result.scale, 2.0);
        assert_eq!(result.pixel(0, 0), Some([0, 0, 0, 0]));
        // Center comes from source pixel (20, 20)
        assert_eq!(result.pixel(20, 20), img.pixel(20, 20));
    }

    #[test]
    fn test_color_space_carried() {
        let img = test_image(8, 8).with_color_space(Some(ColorSpace::DisplayP3));
        let result = rasterize(&img, CropRect::new(0.0, 0.0, 4.0, 4.0), rect_shape(), 1.0)
            .unwrap();
        assert_eq!(result.color_space, Some(ColorSpace::DisplayP3));
    }

    #[test]
    fn test_source_not_modified() {
        let img = test_image(16, 16);
        let before = img.clone();
        let _ = rasterize(&img, CropRect::new(2.0, 2.0, 8.0, 8.0), CropShape::Circle, 3.0);
        assert_eq!(img, before);
    }

    #[test]
    fn test_crop_image_concrete_scenario() {
        // 400x300 source, density 3, 100pt square mask, zoom 3, no offset
        let img = test_image(400, 300);
        let vp = ViewportState {
            zoom_scale: 3.0,
            content_offset: Point::ZERO,
            content_size: Size::new(400.0, 300.0),
            mask_size: Size::new(100.0, 100.0),
            device_pixel_density: 3.0,
        };
        let result = crop_image(&img, &vp, rect_shape()).unwrap();

        // z = 3/3 / (300 / 300) = 1, so a 100x100 rect at the origin
        assert_eq!((result.width, result.height), (100, 100));
        assert_eq!(result.pixel(0, 0), img.pixel(0, 0));
        assert_eq!(result.pixel(99, 99), img.pixel(99, 99));
    }

    #[test]
    fn test_crop_image_with_offset() {
        let img = test_image(400, 300);
        let vp = ViewportState {
            zoom_scale: 1.0,
            content_offset: Point::new(50.0, 0.0),
            content_size: Size::new(400.0, 300.0),
            mask_size: Size::new(300.0, 300.0),
            device_pixel_density: 1.0,
        };
        let result = crop_image(&img, &vp, rect_shape()).unwrap();

        assert_eq!((result.width, result.height), (300, 300));
        assert_eq!(result.pixel(0, 0), img.pixel(50, 0));
    }

    #[test]
    fn test_crop_image_without_pixels() {
        let img = Bitmap::without_pixels(400, 300);
        let vp = ViewportState::initial(
            Size::new(400.0, 300.0),
            Size::new(100.0, 100.0),
            1.0,
            2.0,
        );
        assert_eq!(
            crop_image(&img, &vp, CropShape::Circle),
            Err(CropError::NoSourcePixelBuffer)
        );
    }
}
