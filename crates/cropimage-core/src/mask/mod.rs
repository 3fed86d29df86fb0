//! Elliptical masking for circular crops.
//!
//! A circular crop is a square rectangular crop followed by a clip to the
//! ellipse inscribed in the result's bounds. Pixels inside the ellipse are
//! copied unchanged; the four corners outside it become fully transparent.
//! There is no feathering: the edge is a hard per-pixel decision on the
//! pixel center.

mod clip;
mod ellipse;

pub use clip::oval_clip;
pub use ellipse::EllipseMask;
