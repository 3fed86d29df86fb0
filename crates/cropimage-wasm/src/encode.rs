//! Image encoding WASM bindings.
//!
//! # Functions
//!
//! - [`encode_png`] - Encode a bitmap to PNG, keeping transparency
//! - [`encode_jpeg`] - Encode a bitmap to JPEG
//!
//! # Example
//!
//! ```typescript
//! import { encode_png } from '@cropimage/wasm';
//!
//! const png = encode_png(avatar);
//! await writable.write(new Blob([png], { type: 'image/png' }));
//! ```

use crate::types::{to_js_error, JsBitmap};
use cropimage_core::encode;
use wasm_bindgen::prelude::*;

/// Encode a bitmap to PNG bytes.
///
/// PNG keeps the alpha channel, so this is the format to use for circular
/// crops.
///
/// # Errors
///
/// Returns an error if the bitmap is empty, has an invalid pixel buffer,
/// or is not upright.
#[wasm_bindgen]
pub fn encode_png(image: &JsBitmap) -> Result<Vec<u8>, JsValue> {
    encode::encode_png(&image.to_bitmap()).map_err(to_js_error)
}

/// Encode a bitmap to JPEG bytes.
///
/// # Arguments
///
/// * `image` - The bitmap to encode
/// * `quality` - JPEG quality (1-100, recommended: 90)
///
/// Transparent pixels come out black.
#[wasm_bindgen]
pub fn encode_jpeg(image: &JsBitmap, quality: u8) -> Result<Vec<u8>, JsValue> {
    encode::encode_jpeg(&image.to_bitmap(), quality).map_err(to_js_error)
}
