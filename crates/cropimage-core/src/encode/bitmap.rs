//! PNG and JPEG encoding of bitmaps through the `image` crate.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{DynamicImage, ExtendedColorType, ImageEncoder, RgbaImage};
use thiserror::Error;

use crate::decode::{Bitmap, Orientation};

/// Errors that can occur while encoding a bitmap.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// The bitmap has no raw pixels or its buffer layout is invalid
    #[error("Invalid pixel data: {0}")]
    InvalidPixelData(String),

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The encoder failed
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),
}

/// Encode a bitmap to PNG bytes, keeping its alpha channel.
///
/// # Errors
///
/// Returns an error if the bitmap is empty, has no pixel buffer, or is not
/// upright (normalize it first).
pub fn encode_png(image: &Bitmap) -> Result<Vec<u8>, EncodeError> {
    let rgba = to_encodable(image)?;
    let mut buffer = Cursor::new(Vec::new());

    PngEncoder::new(&mut buffer)
        .write_image(rgba.as_raw(), rgba.width(), rgba.height(), ExtendedColorType::Rgba8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}

/// Encode a bitmap to JPEG bytes.
///
/// JPEG has no alpha channel, so alpha is dropped; transparent pixels come
/// out black. Quality is clamped to 1-100.
pub fn encode_jpeg(image: &Bitmap, quality: u8) -> Result<Vec<u8>, EncodeError> {
    let rgba = to_encodable(image)?;
    let rgb = DynamicImage::ImageRgba8(rgba).into_rgb8();

    let quality = quality.clamp(1, 100);
    let mut buffer = Cursor::new(Vec::new());

    JpegEncoder::new_with_quality(&mut buffer, quality)
        .write_image(rgb.as_raw(), rgb.width(), rgb.height(), ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}

fn to_encodable(image: &Bitmap) -> Result<RgbaImage, EncodeError> {
    if image.is_empty() {
        return Err(EncodeError::InvalidDimensions {
            width: image.width,
            height: image.height,
        });
    }
    if image.orientation != Orientation::Up {
        return Err(EncodeError::InvalidPixelData(format!(
            "bitmap is tagged {:?}; normalize it before encoding",
            image.orientation
        )));
    }
    image
        .to_rgba_image()
        .ok_or_else(|| EncodeError::InvalidPixelData("no usable RGBA pixel buffer".to_string()))
}
