//! Encoding of crop results.
//!
//! This module provides functionality for:
//! - Encoding bitmaps to PNG, which keeps the transparent corners of
//!   circular crops
//! - Encoding bitmaps to JPEG with configurable quality
//!
//! Persisting the bytes is the host's business; these functions only
//! produce them. All operations are synchronous and single-threaded.
//!
//! # Examples
//!
//! ```ignore
//! use cropimage_core::encode::encode_png;
//!
//! let png_bytes = encode_png(&avatar).unwrap();
//! println!("Encoded {} bytes", png_bytes.len());
//! ```

mod bitmap;

pub use bitmap::{encode_jpeg, encode_png, EncodeError};
