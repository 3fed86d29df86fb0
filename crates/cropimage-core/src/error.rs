//! Error type shared by the normalizer, the crop mapper and the session.

use thiserror::Error;

use crate::session::SessionState;
use crate::viewport::CropRect;

/// Errors produced while normalizing or cropping an image.
///
/// Every variant is local to a single call: the source bitmap is never
/// modified, so the caller may retry or fall back freely.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CropError {
    /// The bitmap lacks a raw pixel buffer, a color space, or uses a layout
    /// other than 32-bit RGBA.
    #[error("Unsupported pixel format: {0}")]
    UnsupportedPixelFormat(String),

    /// The crop source exposes no raw pixel buffer.
    #[error("Source image exposes no raw pixel buffer")]
    NoSourcePixelBuffer,

    /// The crop rectangle does not intersect the source buffer.
    #[error("Crop rectangle {rect:?} lies outside the {width}x{height} source buffer")]
    CropOutOfBounds {
        rect: CropRect,
        width: u32,
        height: u32,
    },

    /// Viewport, shape or source dimensions are non-finite or non-positive.
    #[error("Invalid viewport: {0}")]
    InvalidViewport(String),

    /// A session event arrived in a state that cannot handle it.
    #[error("Crop session cannot handle this event while {0:?}")]
    InvalidState(SessionState),

    /// Drawing into the destination buffer failed.
    #[error("Rendering failed: {0}")]
    RenderFailed(String),
}
