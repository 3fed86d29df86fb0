//! Pixel operations of the crop pipeline.
//!
//! # Pipeline Order
//!
//! 1. Orientation normalization, once when an image is loaded
//! 2. Viewport-to-crop-rect mapping (see [`crate::viewport`]), on confirmation
//! 3. Rasterization of the crop rect, plus an oval clip for circular crops
//!
//! # Coordinate System
//!
//! - Pixel coordinates, origin at the top-left corner, y grows downwards
//! - Rotation angles are in radians, positive = counter-clockwise on screen

mod affine;
pub(crate) mod canvas;
mod crop;
mod orientation;
mod resize;

pub use affine::AffineTransform;
pub use crop::{crop_image, extract_region, rasterize};
pub use orientation::{normalize_orientation, orientation_transform};
pub use resize::resize;
