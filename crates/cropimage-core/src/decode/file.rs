//! Image decoding that records, but does not apply, the EXIF orientation.
//!
//! Decoding only reads the stored buffer. Making it upright is the job of
//! [`crate::transform::normalize_orientation`], which runs once when a crop
//! session loads the image.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::ImageReader;

use super::{Bitmap, DecodeError, Orientation};

/// Decode a JPEG or PNG image into a bitmap tagged with its EXIF orientation.
///
/// # Arguments
///
/// * `bytes` - Raw file bytes
///
/// # Returns
///
/// An sRGB RGBA8 `Bitmap` holding the stored (possibly rotated) pixels, with
/// `orientation` set from the EXIF data or `Orientation::Up` when there is none.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` for empty input and
/// `DecodeError::CorruptedFile` if the bytes cannot be decoded.
pub fn decode_image(bytes: &[u8]) -> Result<Bitmap, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::InvalidFormat);
    }

    let orientation = extract_orientation(bytes);

    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    let img = reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    Ok(Bitmap::from_rgba_image(img.into_rgba8()).with_orientation(orientation))
}

/// Extract the EXIF orientation from encoded image bytes.
///
/// Returns `Orientation::Up` if no EXIF data is found or orientation
/// cannot be determined.
pub fn get_orientation(bytes: &[u8]) -> Orientation {
    extract_orientation(bytes)
}

fn extract_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);

    match Reader::new().read_from_container(&mut cursor) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
            .map(Orientation::from_exif)
            .unwrap_or_default(),
        Err(_) => Orientation::Up,
    }
}
