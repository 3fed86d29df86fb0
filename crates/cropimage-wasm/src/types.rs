//! WASM-compatible wrapper types for bitmaps.
//!
//! This module provides JavaScript-friendly types that wrap the core CropImage
//! types, handling the conversion between Rust and JavaScript data representations.

use cropimage_core::decode::{Bitmap, FilterType, Orientation};
use wasm_bindgen::prelude::*;

/// A bitmap wrapper for JavaScript.
///
/// Pixels are tightly packed RGBA (4 bytes per pixel, row-major order).
/// `orientation` is the EXIF value (1-8) describing how the stored pixels
/// must be transformed for upright display, and `scale` the number of
/// pixels per display point.
///
/// # Memory Management
///
/// The pixel data is stored in WASM memory. When you call `pixels()`, a copy is made
/// to JavaScript memory as a `Uint8Array`.
///
/// The `free()` method can be called to explicitly release WASM memory, but this is
/// optional as wasm-bindgen's finalizer will handle cleanup automatically.
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct JsBitmap {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    orientation: u8,
    scale: f64,
}

#[wasm_bindgen]
impl JsBitmap {
    /// Create an upright bitmap at scale 1 from RGBA pixel data.
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> JsBitmap {
        JsBitmap {
            width,
            height,
            pixels,
            orientation: Orientation::Up.to_exif(),
            scale: 1.0,
        }
    }

    /// Get the stored width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the stored height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// EXIF orientation value (1 = upright)
    #[wasm_bindgen(getter)]
    pub fn orientation(&self) -> u8 {
        self.orientation
    }

    /// Tag the bitmap with an EXIF orientation. Unknown values count as upright.
    #[wasm_bindgen(setter)]
    pub fn set_orientation(&mut self, value: u8) {
        self.orientation = Orientation::from_exif(value as u32).to_exif();
    }

    /// Pixels per display point
    #[wasm_bindgen(getter)]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    #[wasm_bindgen(setter)]
    pub fn set_scale(&mut self, value: f64) {
        self.scale = value;
    }

    /// Get the number of bytes in the pixel buffer (width * height * 4)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// Returns RGBA pixel data as Uint8Array.
    ///
    /// Note: This creates a copy of the pixel data.
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }

    /// Explicitly free WASM memory.
    pub fn free(self) {
        // Dropping self releases the memory
    }
}

impl JsBitmap {
    /// Wrap a core bitmap, repacking strided rows.
    ///
    /// A bitmap without a pixel buffer becomes an empty wrapper with the
    /// same dimensions; core functions reject it when it comes back.
    pub(crate) fn from_bitmap(bitmap: Bitmap) -> Self {
        let pixels = match bitmap.to_rgba_image() {
            Some(rgba) => rgba.into_raw(),
            None => Vec::new(),
        };
        Self {
            width: bitmap.width,
            height: bitmap.height,
            pixels,
            orientation: bitmap.orientation.to_exif(),
            scale: bitmap.scale,
        }
    }

    /// Convert to a core bitmap. This clones the pixel data.
    pub(crate) fn to_bitmap(&self) -> Bitmap {
        let base = if self.pixels.is_empty() {
            Bitmap::without_pixels(self.width, self.height)
        } else {
            Bitmap {
                pixels: Some(self.pixels.clone()),
                ..Bitmap::without_pixels(self.width, self.height)
            }
        };
        base.with_orientation(Orientation::from_exif(self.orientation as u32))
            .with_scale(self.scale)
    }
}

/// Convert a u8 filter type value to the core FilterType enum.
///
/// Values:
/// - 0 = Nearest (fastest, lowest quality)
/// - 1 = Bilinear (good balance of speed and quality)
/// - 2 = Lanczos3 (best quality, slowest)
///
/// Any other value defaults to Bilinear.
pub(crate) fn filter_from_u8(value: u8) -> FilterType {
    match value {
        0 => FilterType::Nearest,
        2 => FilterType::Lanczos3,
        _ => FilterType::Bilinear, // Default
    }
}

/// Map any displayable error into a JavaScript exception value.
pub(crate) fn to_js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}
