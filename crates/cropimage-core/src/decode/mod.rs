//! Bitmap types and image decoding for CropImage.
//!
//! This module provides:
//! - The [`Bitmap`] type every stage of the pipeline consumes and produces
//! - The [`Orientation`] tag describing how a stored buffer must be turned upright
//! - Decoding of JPEG/PNG bytes into orientation-tagged bitmaps
//!
//! # Architecture
//!
//! Decoding belongs to the image-acquisition side (camera, gallery, file
//! picker). It hands the crop core a bitmap whose buffer may still be stored
//! rotated or mirrored; the orientation is applied later by the normalizer.
//! All operations are synchronous and single-threaded.
//!
//! # Examples
//!
//! ```ignore
//! use cropimage_core::decode::decode_image;
//!
//! let bytes = std::fs::read("photo.jpg").unwrap();
//! let bitmap = decode_image(&bytes).unwrap();
//! println!("Stored {}x{}, tagged {:?}", bitmap.width, bitmap.height, bitmap.orientation);
//! ```

mod file;
mod types;

pub use file::{decode_image, get_orientation};
pub use types::{
    Bitmap, ColorSpace, DecodeError, FilterType, Orientation, BITS_PER_PIXEL, BYTES_PER_PIXEL,
};
