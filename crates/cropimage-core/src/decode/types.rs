//! Core bitmap types shared by every stage of the crop pipeline.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::CropError;
use crate::viewport::Size;

/// Bytes per pixel of the only supported buffer layout (RGBA8).
pub const BYTES_PER_PIXEL: usize = 4;

/// Bits per pixel of the only supported buffer layout (RGBA8).
pub const BITS_PER_PIXEL: u8 = 32;

/// Error types for image decoding operations.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The file format is not recognized or supported.
    #[error("Invalid or unsupported image format")]
    InvalidFormat,

    /// The image file is corrupted or incomplete.
    #[error("Corrupted or incomplete image file: {0}")]
    CorruptedFile(String),
}

/// Filter type for image resizing operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FilterType {
    /// Nearest neighbor interpolation (fastest, lowest quality).
    Nearest,
    /// Bilinear interpolation (fast, acceptable quality).
    #[default]
    Bilinear,
    /// Lanczos3 interpolation (slower, highest quality).
    Lanczos3,
}

impl FilterType {
    /// Convert to the image crate's FilterType.
    pub fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            FilterType::Nearest => image::imageops::FilterType::Nearest,
            FilterType::Bilinear => image::imageops::FilterType::Triangle,
            FilterType::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }
}

/// Color space descriptor attached to a pixel buffer.
///
/// The crop pipeline never converts between color spaces; the descriptor is
/// carried from input to output unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ColorSpace {
    #[default]
    Srgb,
    DisplayP3,
    LinearSrgb,
}

/// How a stored pixel buffer must be transformed to appear upright.
///
/// The discriminants are the EXIF orientation values (1-8).
/// See: https://exiftool.org/TagNames/EXIF.html
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Orientation {
    /// Stored upright (identity).
    #[default]
    Up = 1,
    /// Stored mirrored horizontally.
    UpMirrored = 2,
    /// Stored rotated by 180 degrees.
    Down = 3,
    /// Stored rotated by 180 degrees and mirrored (a vertical flip).
    DownMirrored = 4,
    /// Stored transposed: mirrored variant of `Left`.
    LeftMirrored = 5,
    /// Displayed by rotating the stored buffer 90 degrees clockwise.
    Right = 6,
    /// Stored transversed: mirrored variant of `Right`.
    RightMirrored = 7,
    /// Displayed by rotating the stored buffer 90 degrees counter-clockwise.
    Left = 8,
}

impl Orientation {
    /// All eight orientations in EXIF order.
    pub const ALL: [Orientation; 8] = [
        Orientation::Up,
        Orientation::UpMirrored,
        Orientation::Down,
        Orientation::DownMirrored,
        Orientation::LeftMirrored,
        Orientation::Right,
        Orientation::RightMirrored,
        Orientation::Left,
    ];

    /// Parse an EXIF orientation value.
    ///
    /// Unknown values are logged and treated as `Up`.
    pub fn from_exif(value: u32) -> Orientation {
        match value {
            1 => Orientation::Up,
            2 => Orientation::UpMirrored,
            3 => Orientation::Down,
            4 => Orientation::DownMirrored,
            5 => Orientation::LeftMirrored,
            6 => Orientation::Right,
            7 => Orientation::RightMirrored,
            8 => Orientation::Left,
            other => {
                log::warn!("unknown orientation tag {other}, treating image as upright");
                Orientation::Up
            }
        }
    }

    /// The EXIF value for this orientation.
    pub fn to_exif(self) -> u8 {
        self as u8
    }

    /// Returns true for the four mirrored variants.
    #[inline]
    pub fn is_mirrored(self) -> bool {
        matches!(
            self,
            Orientation::UpMirrored
                | Orientation::DownMirrored
                | Orientation::LeftMirrored
                | Orientation::RightMirrored
        )
    }

    /// Returns true if this orientation swaps width and height dimensions.
    ///
    /// The left and right families (90° and 270° rotations with or without
    /// mirroring) swap the image dimensions.
    #[inline]
    pub fn swaps_dimensions(self) -> bool {
        matches!(
            self,
            Orientation::Left
                | Orientation::LeftMirrored
                | Orientation::Right
                | Orientation::RightMirrored
        )
    }
}

impl From<u32> for Orientation {
    fn from(value: u32) -> Self {
        Orientation::from_exif(value)
    }
}

/// An RGBA8 bitmap with its orientation tag.
///
/// `width` and `height` describe the stored buffer. The buffer itself is
/// optional: a bitmap backed by something other than raw memory (for example
/// a GPU texture on the host side) carries only its dimensions, and every
/// operation that needs pixels reports that explicitly.
#[derive(Debug, Clone, PartialEq)]
pub struct Bitmap {
    /// Stored buffer width in pixels.
    pub width: u32,
    /// Stored buffer height in pixels.
    pub height: u32,
    /// Color space of the pixel data, if known.
    pub color_space: Option<ColorSpace>,
    /// Bits per pixel. Only 32 (RGBA8) is supported.
    pub bits_per_pixel: u8,
    /// Bytes per row, at least `width * 4`.
    pub stride: usize,
    /// How the stored buffer must be transformed to appear upright.
    pub orientation: Orientation,
    /// Pixels per display point of the buffer.
    pub scale: f64,
    /// Raw RGBA pixel data in row-major order, `stride` bytes per row.
    pub pixels: Option<Vec<u8>>,
}

impl Bitmap {
    /// Create an upright sRGB bitmap from tightly packed RGBA pixel data.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            width as usize * height as usize * BYTES_PER_PIXEL,
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            color_space: Some(ColorSpace::Srgb),
            bits_per_pixel: BITS_PER_PIXEL,
            stride: width as usize * BYTES_PER_PIXEL,
            orientation: Orientation::Up,
            scale: 1.0,
            pixels: Some(pixels),
        }
    }

    /// Create a bitmap handle that has dimensions but no raw pixel buffer.
    pub fn without_pixels(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            color_space: Some(ColorSpace::Srgb),
            bits_per_pixel: BITS_PER_PIXEL,
            stride: width as usize * BYTES_PER_PIXEL,
            orientation: Orientation::Up,
            scale: 1.0,
            pixels: None,
        }
    }

    /// Create a transparent bitmap of the given size.
    pub fn transparent(width: u32, height: u32) -> Self {
        Self::new(
            width,
            height,
            vec![0u8; width as usize * height as usize * BYTES_PER_PIXEL],
        )
    }

    /// Create a Bitmap from an image::RgbaImage.
    pub fn from_rgba_image(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self::new(width, height, img.into_raw())
    }

    /// Tag the bitmap with an orientation.
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Replace the color space descriptor.
    pub fn with_color_space(mut self, color_space: Option<ColorSpace>) -> Self {
        self.color_space = color_space;
        self
    }

    /// Replace the pixel-buffer scale factor.
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Replace the row stride. The pixel buffer is not touched.
    pub fn with_stride(mut self, stride: usize) -> Self {
        self.stride = stride;
        self
    }

    /// Convert to an image::RgbaImage, dropping any row padding.
    ///
    /// Returns `None` if there is no pixel buffer or its layout is invalid.
    pub fn to_rgba_image(&self) -> Option<image::RgbaImage> {
        let pixels = self.pixels.as_deref()?;
        self.check_layout(pixels).ok()?;

        let row_bytes = self.width as usize * BYTES_PER_PIXEL;
        let mut packed = Vec::with_capacity(row_bytes * self.height as usize);
        for y in 0..self.height as usize {
            let start = y * self.stride;
            packed.extend_from_slice(&pixels[start..start + row_bytes]);
        }
        image::RgbaImage::from_raw(self.width, self.height, packed)
    }

    /// Width and height after the orientation tag has been applied.
    pub fn oriented_dimensions(&self) -> (u32, u32) {
        if self.orientation.swaps_dimensions() {
            (self.height, self.width)
        } else {
            (self.width, self.height)
        }
    }

    /// Upright size in display points.
    pub fn logical_size(&self) -> Size {
        let (width, height) = self.oriented_dimensions();
        let scale = if self.scale > 0.0 { self.scale } else { 1.0 };
        Size::new(width as f64 / scale, height as f64 / scale)
    }

    /// Returns true if the bitmap exposes a raw pixel buffer.
    pub fn has_pixel_buffer(&self) -> bool {
        self.pixels.is_some()
    }

    /// Get the RGBA value of a stored pixel.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let pixels = self.pixels.as_deref()?;
        let idx = y as usize * self.stride + x as usize * BYTES_PER_PIXEL;
        let px = pixels.get(idx..idx + BYTES_PER_PIXEL)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Get the total number of pixels.
    pub fn pixel_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Get the size of the pixel buffer in bytes.
    pub fn byte_size(&self) -> usize {
        self.pixels.as_ref().map_or(0, Vec::len)
    }

    /// Check if this is an empty/invalid image.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Verify that `pixels` can hold this bitmap in RGBA8 with `stride`.
    pub(crate) fn check_layout(&self, pixels: &[u8]) -> Result<(), CropError> {
        if self.bits_per_pixel != BITS_PER_PIXEL {
            return Err(CropError::UnsupportedPixelFormat(format!(
                "{} bits per pixel, expected {}",
                self.bits_per_pixel, BITS_PER_PIXEL
            )));
        }

        let row_bytes = self.width as usize * BYTES_PER_PIXEL;
        if self.stride < row_bytes {
            return Err(CropError::UnsupportedPixelFormat(format!(
                "stride {} is shorter than a {}-pixel row",
                self.stride, self.width
            )));
        }

        let required = match self.height as usize {
            0 => 0,
            h => (h - 1) * self.stride + row_bytes,
        };
        if pixels.len() < required {
            return Err(CropError::UnsupportedPixelFormat(format!(
                "buffer holds {} bytes, {} required",
                pixels.len(),
                required
            )));
        }

        Ok(())
    }
}
