//! CropImage WASM - WebAssembly bindings for CropImage
//!
//! This crate exposes the cropimage-core pipeline to JavaScript/TypeScript
//! hosts that implement the interactive part of a crop control.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper types for bitmaps
//! - `decode` - Image decoding bindings (JPEG/PNG with EXIF orientation)
//! - `encode` - Image encoding bindings (PNG, JPEG)
//! - `transform` - Orientation normalization, crop mapping, clipping, resize
//! - `session` - The crop session state machine
//!
//! # Usage
//!
//! ```typescript
//! import init, { decode_image, initial_viewport, JsCropSession } from '@cropimage/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const image = decode_image(new Uint8Array(await file.arrayBuffer()));
//! const shape = { type: 'circle' };
//! const viewport = initial_viewport(image, 390, shape, devicePixelRatio);
//! const session = new JsCropSession(image, viewport, shape, undefined, onAvatar);
//! ```

use wasm_bindgen::prelude::*;

mod decode;
mod encode;
mod logger;
mod session;
mod transform;
mod types;

// Re-export public types
pub use decode::{decode_image, image_orientation};
pub use encode::{encode_jpeg, encode_png};
pub use session::JsCropSession;
pub use transform::{
    compute_crop_rect, crop_image, initial_viewport, normalize_orientation, oval_clip, resize,
};
pub use types::JsBitmap;

/// Initialize the WASM module (called automatically on load)
///
/// Installs the console logger at `warn` so orientation fallbacks show up
/// in the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    logger::install(log::LevelFilter::Warn);
}

/// Change how much of the pipeline's logging reaches the console.
///
/// Accepts `off`, `error`, `warn`, `info`, `debug` or `trace`.
#[wasm_bindgen]
pub fn set_log_level(level: &str) -> Result<(), JsValue> {
    let filter = logger::parse_level(level)
        .ok_or_else(|| JsValue::from_str(&format!("Unknown log level: {}", level)))?;
    logger::install(filter);
    Ok(())
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
