//! Image decoding WASM bindings.
//!
//! # Functions
//!
//! - [`decode_image`] - Decode a JPEG or PNG file, tagging its EXIF orientation
//! - [`image_orientation`] - Read only the EXIF orientation of a file
//!
//! Decoding does not rotate the pixels. Pass the result to
//! `normalize_orientation`, or straight to a `JsCropSession`, which
//! normalizes on load.
//!
//! # Example
//!
//! ```typescript
//! import { decode_image, normalize_orientation } from '@cropimage/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const stored = decode_image(bytes);
//! const upright = normalize_orientation(stored);
//! console.log(`Upright ${upright.width}x${upright.height}`);
//! ```

use crate::types::{to_js_error, JsBitmap};
use cropimage_core::decode;
use wasm_bindgen::prelude::*;

/// Decode a JPEG or PNG image from bytes.
///
/// # Returns
///
/// A `JsBitmap` with RGBA pixels as stored in the file and its `orientation`
/// set from EXIF (1 when the file has none).
///
/// # Errors
///
/// Returns an error if the bytes are not a supported image format or the
/// file is corrupted.
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsBitmap, JsValue> {
    decode::decode_image(bytes)
        .map(JsBitmap::from_bitmap)
        .map_err(to_js_error)
}

/// Read the EXIF orientation (1-8) of an encoded image without decoding it.
///
/// Returns 1 when the file has no orientation tag.
#[wasm_bindgen]
pub fn image_orientation(bytes: &[u8]) -> u8 {
    decode::get_orientation(bytes).to_exif()
}
