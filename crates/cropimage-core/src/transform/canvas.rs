//! A minimal RGBA drawing surface.
//!
//! Mirrors the model of a bitmap graphics context: allocate a transparent
//! buffer, concatenate transforms onto the current transform, optionally
//! clip, draw an image into a rectangle once, then take the result.
//!
//! Drawing uses inverse mapping with nearest-neighbour sampling: each
//! destination pixel center is mapped back into the image rectangle and
//! the pixel under it is copied verbatim. Pixels outside the rectangle or
//! the clip are left untouched (transparent).

use super::AffineTransform;
use crate::decode::{Bitmap, ColorSpace, Orientation, BYTES_PER_PIXEL};
use crate::error::CropError;
use crate::mask::EllipseMask;
use crate::viewport::Size;

pub(crate) struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    ctm: AffineTransform,
    clip: Option<EllipseMask>,
}

impl Canvas {
    /// Allocate a transparent canvas.
    pub(crate) fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0u8; width as usize * height as usize * BYTES_PER_PIXEL],
            ctm: AffineTransform::IDENTITY,
            clip: None,
        }
    }

    /// Prepend `transform` to the current transform.
    pub(crate) fn concat(&mut self, transform: &AffineTransform) {
        self.ctm = self.ctm.pre_concat(transform);
    }

    /// Restrict drawing to an ellipse given in normalized canvas coordinates.
    pub(crate) fn clip_to_ellipse(&mut self, mask: EllipseMask) {
        self.clip = Some(mask);
    }

    /// Draw `image` into the rectangle `(0, 0, rect.width, rect.height)` of
    /// user space.
    ///
    /// The stored buffer is stretched over the rectangle; the orientation tag
    /// is ignored, exactly as when drawing a raw pixel buffer.
    pub(crate) fn draw(&mut self, image: &Bitmap, rect: Size) -> Result<(), CropError> {
        let src = image.pixels.as_deref().ok_or_else(|| {
            CropError::UnsupportedPixelFormat("image exposes no raw pixel buffer".to_string())
        })?;
        image.check_layout(src)?;

        if !rect.is_positive() || image.is_empty() {
            return Ok(());
        }

        let inverse = self.ctm.invert().ok_or_else(|| {
            CropError::RenderFailed("current transform is not invertible".to_string())
        })?;

        let scale_x = image.width as f64 / rect.width;
        let scale_y = image.height as f64 / rect.height;
        let (w_f, h_f) = (self.width as f64, self.height as f64);

        for dst_y in 0..self.height {
            for dst_x in 0..self.width {
                let cx = dst_x as f64 + 0.5;
                let cy = dst_y as f64 + 0.5;

                if let Some(clip) = &self.clip {
                    if !clip.contains(cx / w_f, cy / h_f) {
                        continue;
                    }
                }

                let (ux, uy) = inverse.apply(cx, cy);
                if ux < 0.0 || uy < 0.0 || ux >= rect.width || uy >= rect.height {
                    continue;
                }

                let src_x = ((ux * scale_x).floor() as u32).min(image.width - 1);
                let src_y = ((uy * scale_y).floor() as u32).min(image.height - 1);

                let src_idx = src_y as usize * image.stride + src_x as usize * BYTES_PER_PIXEL;
                let dst_idx = (dst_y as usize * self.width as usize + dst_x as usize)
                    * BYTES_PER_PIXEL;
                self.pixels[dst_idx..dst_idx + BYTES_PER_PIXEL]
                    .copy_from_slice(&src[src_idx..src_idx + BYTES_PER_PIXEL]);
            }
        }

        Ok(())
    }

    /// Finish drawing and wrap the buffer as an upright bitmap.
    pub(crate) fn into_bitmap(self, color_space: Option<ColorSpace>, scale: f64) -> Bitmap {
        Bitmap::new(self.width, self.height, self.pixels)
            .with_color_space(color_space)
            .with_orientation(Orientation::Up)
            .with_scale(scale)
    }
}
