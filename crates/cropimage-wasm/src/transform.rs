//! WASM bindings for the crop pipeline.
//!
//! Structured arguments cross the boundary as plain JS objects:
//!
//! ```typescript
//! const viewport = {
//!   zoom_scale: 1.5,
//!   content_offset: { x: 120, y: 40 },
//!   content_size: { width: 600, height: 450 },
//!   mask_size: { width: 300, height: 300 },
//!   device_pixel_density: window.devicePixelRatio,
//! };
//! const shape = { type: 'circle' }; // or { type: 'rectangle', aspect_ratio: 1.5 }
//!
//! const avatar = crop_image(upright, viewport, shape);
//! ```

use crate::types::{filter_from_u8, to_js_error, JsBitmap};
use cropimage_core::transform;
use cropimage_core::viewport::{mask_size_for, Size};
use cropimage_core::{mask, CropShape, ViewportState};
use wasm_bindgen::prelude::*;

fn viewport_from_js(value: JsValue) -> Result<ViewportState, JsValue> {
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsValue::from_str(&format!("Invalid viewport: {}", e)))
}

fn shape_from_js(value: JsValue) -> Result<CropShape, JsValue> {
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsValue::from_str(&format!("Invalid crop shape: {}", e)))
}

/// Redraw a bitmap upright according to its orientation tag.
///
/// The result is tagged 1 (upright); dimensions swap for tags 5-8.
#[wasm_bindgen]
pub fn normalize_orientation(image: &JsBitmap) -> Result<JsBitmap, JsValue> {
    transform::normalize_orientation(&image.to_bitmap())
        .map(JsBitmap::from_bitmap)
        .map_err(to_js_error)
}

/// The viewport a host should start from for `image`.
///
/// The mask spans `screen_width` points at the shape's aspect ratio, the
/// image is fitted to it at zoom 1 and centered.
#[wasm_bindgen]
pub fn initial_viewport(
    image: &JsBitmap,
    screen_width: f64,
    shape: JsValue,
    device_pixel_density: f64,
) -> Result<JsValue, JsValue> {
    let shape = shape_from_js(shape)?;
    shape.validate().map_err(to_js_error)?;

    let viewport = initial_viewport_for(image, screen_width, shape, device_pixel_density);
    serde_wasm_bindgen::to_value(&viewport).map_err(to_js_error)
}

fn initial_viewport_for(
    image: &JsBitmap,
    screen_width: f64,
    shape: CropShape,
    density: f64,
) -> ViewportState {
    let aspect = shape.aspect_ratio();
    let logical = image.to_bitmap().logical_size();
    ViewportState::initial(logical, mask_size_for(screen_width, aspect), aspect, density)
}

/// Map a viewport snapshot to a crop rectangle in source pixels.
///
/// Returns `{ x, y, width, height }`. The rectangle is not clamped to the
/// source bounds.
#[wasm_bindgen]
pub fn compute_crop_rect(
    viewport: JsValue,
    shape: JsValue,
    source_width: f64,
    source_height: f64,
) -> Result<JsValue, JsValue> {
    let viewport = viewport_from_js(viewport)?;
    let shape = shape_from_js(shape)?;
    let rect = cropimage_core::compute_crop_rect(
        &viewport,
        shape,
        Size::new(source_width, source_height),
    )
    .map_err(to_js_error)?;
    serde_wasm_bindgen::to_value(&rect).map_err(to_js_error)
}

/// Crop an upright image to what the viewport frames.
///
/// Circular shapes come back clipped, at the viewport's pixel density.
#[wasm_bindgen]
pub fn crop_image(image: &JsBitmap, viewport: JsValue, shape: JsValue) -> Result<JsBitmap, JsValue> {
    let viewport = viewport_from_js(viewport)?;
    let shape = shape_from_js(shape)?;
    transform::crop_image(&image.to_bitmap(), &viewport, shape)
        .map(JsBitmap::from_bitmap)
        .map_err(to_js_error)
}

/// Clip a bitmap to its inscribed ellipse, rendered at `density`.
#[wasm_bindgen]
pub fn oval_clip(image: &JsBitmap, density: f64) -> Result<JsBitmap, JsValue> {
    mask::oval_clip(&image.to_bitmap(), density)
        .map(JsBitmap::from_bitmap)
        .map_err(to_js_error)
}

/// Resize a bitmap to a logical size.
///
/// # Arguments
///
/// * `image` - Source bitmap
/// * `width` - Target width in points
/// * `height` - Target height in points
/// * `density` - Pixels per point of the output
/// * `filter` - Interpolation filter: 0=Nearest, 1=Bilinear, 2=Lanczos3
#[wasm_bindgen]
pub fn resize(
    image: &JsBitmap,
    width: f64,
    height: f64,
    density: f64,
    filter: u8,
) -> Result<JsBitmap, JsValue> {
    transform::resize(
        &image.to_bitmap(),
        Size::new(width, height),
        density,
        filter_from_u8(filter),
    )
    .map(JsBitmap::from_bitmap)
    .map_err(to_js_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Create a test image where each pixel encodes its position.
    fn test_image(width: u32, height: u32) -> JsBitmap {
        let mut pixels = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.extend_from_slice(&[x as u8, y as u8, 0, 255]);
            }
        }
        JsBitmap::new(width, height, pixels)
    }

    #[test]
    fn test_initial_viewport_fits_landscape() {
        let img = test_image(200, 100);
        let vp = initial_viewport_for(&img, 100.0, CropShape::Circle, 2.0);

        assert_eq!(vp.zoom_scale, 1.0);
        assert_eq!(vp.mask_size, Size::new(100.0, 100.0));
        // Height fills the mask, width overflows and is centered
        assert_eq!(vp.content_size, Size::new(200.0, 100.0));
        assert_eq!(vp.content_offset.x, 50.0);
        assert_eq!(vp.device_pixel_density, 2.0);
    }

    #[test]
    fn test_initial_viewport_crops_center() {
        let img = test_image(200, 100);
        let vp = initial_viewport_for(&img, 100.0, CropShape::default(), 1.0);

        let cropped =
            transform::crop_image(&img.to_bitmap(), &vp, CropShape::default()).unwrap();
        let js = JsBitmap::from_bitmap(cropped);
        assert_eq!((js.width(), js.height()), (100, 100));
        // First pixel comes from column 50
        assert_eq!(&js.pixels()[0..4], &[50, 0, 0, 255]);
    }

    #[test]
    fn test_initial_viewport_uses_upright_size() {
        let mut img = test_image(200, 100);
        img.set_orientation(6);
        let vp = initial_viewport_for(&img, 100.0, CropShape::Circle, 1.0);

        // Upright the image is portrait: width fills the mask
        assert_eq!(vp.content_size, Size::new(100.0, 200.0));
    }

    #[test]
    fn test_oval_clip_through_wrapper() {
        let img = test_image(10, 10);
        let clipped = mask::oval_clip(&img.to_bitmap(), 2.0).unwrap();
        let js = JsBitmap::from_bitmap(clipped);
        assert_eq!((js.width(), js.height()), (20, 20));
        assert_eq!(js.scale(), 2.0);
        assert_eq!(js.pixels()[3], 0);
    }
}

/// WASM-specific tests that require JsValue.
///
/// Run these with `wasm-pack test`.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use cropimage_core::{CropRect, Point};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn viewport(zoom: f64) -> JsValue {
        let vp = ViewportState {
            zoom_scale: zoom,
            content_offset: Point::ZERO,
            content_size: Size::new(400.0, 300.0),
            mask_size: Size::new(100.0, 100.0),
            device_pixel_density: 1.0,
        };
        serde_wasm_bindgen::to_value(&vp).unwrap()
    }

    fn circle() -> JsValue {
        serde_wasm_bindgen::to_value(&CropShape::Circle).unwrap()
    }

    #[wasm_bindgen_test]
    fn test_compute_crop_rect() {
        let rect = compute_crop_rect(viewport(2.0), circle(), 400.0, 300.0).unwrap();
        let rect: CropRect = serde_wasm_bindgen::from_value(rect).unwrap();
        assert_eq!(rect, CropRect::new(0.0, 0.0, 150.0, 150.0));
    }

    #[wasm_bindgen_test]
    fn test_compute_crop_rect_invalid_viewport() {
        let bad = serde_wasm_bindgen::to_value(&"not a viewport").unwrap();
        assert!(compute_crop_rect(bad, circle(), 400.0, 300.0).is_err());
    }

    #[wasm_bindgen_test]
    fn test_crop_image_circle() {
        let img = tests_image(400, 300);
        let result = crop_image(&img, viewport(1.0), circle()).unwrap();
        assert_eq!((result.width(), result.height()), (300, 300));
    }

    #[wasm_bindgen_test]
    fn test_normalize_orientation_swaps() {
        let mut img = tests_image(40, 20);
        img.set_orientation(8);
        let upright = normalize_orientation(&img).unwrap();
        assert_eq!((upright.width(), upright.height()), (20, 40));
        assert_eq!(upright.orientation(), 1);
    }

    #[wasm_bindgen_test]
    fn test_resize_filters() {
        let img = tests_image(64, 64);
        for filter in 0..3 {
            let result = resize(&img, 16.0, 8.0, 2.0, filter).unwrap();
            assert_eq!((result.width(), result.height()), (32, 16));
        }
    }

    fn tests_image(width: u32, height: u32) -> JsBitmap {
        JsBitmap::new(width, height, vec![200u8; (width * height * 4) as usize])
    }
}
