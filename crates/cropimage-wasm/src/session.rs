//! WASM bindings for the crop session.
//!
//! The JavaScript side owns the gestures. It pushes the viewport geometry
//! into the session whenever it changes and calls `confirm` or `cancel`
//! when the user is done.
//!
//! # Example
//!
//! ```typescript
//! const session = new JsCropSession(decoded, viewport, { type: 'circle' }, undefined,
//!   (avatar: JsBitmap) => upload(encode_png(avatar)));
//!
//! scrollView.onChange = (vp) => session.update_viewport(vp);
//! doneButton.onclick = () => session.confirm();
//! cancelButton.onclick = () => session.cancel();
//! ```

use crate::types::{to_js_error, JsBitmap};
use cropimage_core::{CropConfig, CropSession, CropShape, SessionState, ViewportState};
use wasm_bindgen::prelude::*;

/// A crop session driven from JavaScript.
///
/// The latest viewport pushed through `update_viewport` is the snapshot
/// `confirm` crops to.
#[wasm_bindgen]
pub struct JsCropSession {
    inner: CropSession<ViewportState>,
}

#[wasm_bindgen]
impl JsCropSession {
    /// Create a session and load `image` into it.
    ///
    /// # Arguments
    ///
    /// * `image` - The decoded image, orientation tag included
    /// * `viewport` - Initial viewport geometry
    /// * `shape` - `{ type: 'circle' }` or `{ type: 'rectangle', aspect_ratio }`
    /// * `config` - Optional `{ min_zoom, max_zoom, normalization }`
    /// * `on_complete` - Called once with the cropped `JsBitmap`
    ///
    /// # Errors
    ///
    /// Returns an error if an argument cannot be read or the image cannot be
    /// normalized under the configured policy.
    #[wasm_bindgen(constructor)]
    pub fn new(
        image: &JsBitmap,
        viewport: JsValue,
        shape: JsValue,
        config: JsValue,
        on_complete: js_sys::Function,
    ) -> Result<JsCropSession, JsValue> {
        let viewport: ViewportState = serde_wasm_bindgen::from_value(viewport)
            .map_err(|e| JsValue::from_str(&format!("Invalid viewport: {}", e)))?;
        let shape: CropShape = serde_wasm_bindgen::from_value(shape)
            .map_err(|e| JsValue::from_str(&format!("Invalid crop shape: {}", e)))?;
        let config = config_from_js(config)?;

        let deliver = move |bitmap| {
            let result = JsValue::from(JsBitmap::from_bitmap(bitmap));
            if let Err(err) = on_complete.call1(&JsValue::NULL, &result) {
                log::error!("Crop completion callback threw: {:?}", err);
            }
        };

        let inner = CropSession::show(&image.to_bitmap(), viewport, shape, config, deliver)
            .map_err(to_js_error)?;
        Ok(JsCropSession { inner })
    }

    /// Replace the displayed image.
    pub fn load(&mut self, image: &JsBitmap) -> Result<(), JsValue> {
        self.inner.load(&image.to_bitmap()).map_err(to_js_error)
    }

    /// Record the host's current viewport geometry.
    pub fn update_viewport(&mut self, viewport: JsValue) -> Result<(), JsValue> {
        let viewport: ViewportState = serde_wasm_bindgen::from_value(viewport)
            .map_err(|e| JsValue::from_str(&format!("Invalid viewport: {}", e)))?;
        *self.inner.host_mut() = viewport;
        Ok(())
    }

    /// The last viewport geometry received.
    pub fn viewport(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(self.inner.host()).map_err(to_js_error)
    }

    /// Crop to the last viewport and invoke the completion callback.
    ///
    /// On error the session stays open and the callback is not invoked.
    pub fn confirm(&mut self) -> Result<(), JsValue> {
        self.inner.confirm().map_err(to_js_error)
    }

    /// Close the session without invoking the callback.
    pub fn cancel(&mut self) -> Result<(), JsValue> {
        self.inner.cancel().map_err(to_js_error)
    }

    /// One of `idle`, `displaying`, `completed`, `cancelled`.
    #[wasm_bindgen(getter)]
    pub fn state(&self) -> String {
        state_name(self.inner.state()).to_string()
    }

    /// The upright image being displayed, if the session is still open.
    pub fn image(&self) -> Option<JsBitmap> {
        self.inner.image().cloned().map(JsBitmap::from_bitmap)
    }
}

fn config_from_js(value: JsValue) -> Result<CropConfig, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(CropConfig::default());
    }
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsValue::from_str(&format!("Invalid crop config: {}", e)))
}

fn state_name(state: SessionState) -> &'static str {
    match state {
        SessionState::Idle => "idle",
        SessionState::Displaying => "displaying",
        SessionState::Completed => "completed",
        SessionState::Cancelled => "cancelled",
    }
}
