//! Orientation normalization.
//!
//! Camera pipelines often store pixels in sensor order and record the
//! display orientation as a tag. Before the image can be shown in a
//! viewport (and before any crop rectangle can be expressed against its
//! buffer) the pixels are re-rendered upright once.
//!
//! # Algorithm
//!
//! The destination has the logical (upright) size `w x h`. A transform maps
//! the stored buffer, drawn into a `w x h` rectangle (`h x w` for the left
//! and right families), onto the destination:
//!
//! ```text
//! | Family | Rotation       | Anchoring translation |
//! |--------|----------------|-----------------------|
//! | up     | none           | none                  |
//! | down   | 180°           | (w, h)                |
//! | left   | +90° (CCW)     | (0, h)                |
//! | right  | -90° (CW)      | (w, 0)                |
//! ```
//!
//! Mirrored variants then flip horizontally (scale x by -1) after
//! translating by `h` (left/right families) or `w` (up/down families).

use std::f64::consts::PI;

use super::canvas::Canvas;
use super::AffineTransform;
use crate::decode::{Bitmap, Orientation};
use crate::error::CropError;
use crate::viewport::Size;

/// Build the transform that draws a buffer tagged `orientation` upright
/// into a destination of logical size `width x height`.
pub fn orientation_transform(orientation: Orientation, width: f64, height: f64) -> AffineTransform {
    let identity = AffineTransform::IDENTITY;

    let transform = match orientation {
        Orientation::Down | Orientation::DownMirrored => {
            identity.translated_by(width, height).rotated_by(PI)
        }
        Orientation::Left | Orientation::LeftMirrored => {
            identity.translated_by(0.0, height).rotated_by(PI / 2.0)
        }
        Orientation::Right | Orientation::RightMirrored => {
            identity.translated_by(width, 0.0).rotated_by(-PI / 2.0)
        }
        Orientation::Up | Orientation::UpMirrored => identity,
    };

    match orientation {
        Orientation::UpMirrored | Orientation::DownMirrored => {
            transform.translated_by(width, 0.0).scaled_by(-1.0, 1.0)
        }
        Orientation::LeftMirrored | Orientation::RightMirrored => {
            transform.translated_by(height, 0.0).scaled_by(-1.0, 1.0)
        }
        Orientation::Up | Orientation::Down | Orientation::Left | Orientation::Right => transform,
    }
}

/// Re-render a bitmap so that its stored pixels are upright.
///
/// # Returns
///
/// A new bitmap tagged `Orientation::Up` with scale 1 and a tightly packed
/// buffer. For left/right tagged inputs the width and height are swapped.
/// An input that is already upright is returned as a copy.
///
/// # Errors
///
/// Returns `CropError::UnsupportedPixelFormat` if the bitmap has no raw
/// pixel buffer, no color space, or a buffer layout other than RGBA8.
pub fn normalize_orientation(image: &Bitmap) -> Result<Bitmap, CropError> {
    if image.orientation == Orientation::Up {
        return Ok(image.clone());
    }

    let pixels = image.pixels.as_deref().ok_or_else(|| {
        CropError::UnsupportedPixelFormat("image exposes no raw pixel buffer".to_string())
    })?;
    let color_space = image.color_space.ok_or_else(|| {
        CropError::UnsupportedPixelFormat("image has no color space".to_string())
    })?;
    image.check_layout(pixels)?;

    let (width, height) = image.oriented_dimensions();
    let (w, h) = (width as f64, height as f64);

    let mut canvas = Canvas::new(width, height);
    canvas.concat(&orientation_transform(image.orientation, w, h));

    let rect = if image.orientation.swaps_dimensions() {
        Size::new(h, w)
    } else {
        Size::new(w, h)
    };
    canvas.draw(image, rect)?;

    Ok(canvas.into_bitmap(Some(color_space), 1.0))
}


// ============================================================================
// Property-Based Tests
// ============================================================================
