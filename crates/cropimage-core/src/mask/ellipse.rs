//! Elliptical clip region.
//!
//! An ellipse defined by center and radii in normalized coordinates, where
//! (0, 0) is the top-left and (1, 1) the bottom-right corner of whatever
//! surface it is evaluated on.

use serde::{Deserialize, Serialize};

/// Elliptical region in normalized coordinates.
///
/// # Example
/// ```
/// use cropimage_core::mask::EllipseMask;
///
/// let mask = EllipseMask::inscribed();
/// assert!(mask.contains(0.5, 0.5));
/// assert!(!mask.contains(0.0, 0.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EllipseMask {
    /// Center X coordinate (0.0 to 1.0)
    pub center_x: f64,
    /// Center Y coordinate (0.0 to 1.0)
    pub center_y: f64,
    /// Horizontal radius, relative to the surface width
    pub radius_x: f64,
    /// Vertical radius, relative to the surface height
    pub radius_y: f64,
}

impl EllipseMask {
    /// Create a new ellipse. Radii are kept above zero.
    pub fn new(center_x: f64, center_y: f64, radius_x: f64, radius_y: f64) -> Self {
        Self {
            center_x,
            center_y,
            radius_x: radius_x.max(0.001),
            radius_y: radius_y.max(0.001),
        }
    }

    /// The ellipse inscribed in the full surface bounds.
    pub fn inscribed() -> Self {
        Self::new(0.5, 0.5, 0.5, 0.5)
    }

    /// Squared distance from the center in ellipse space; 1.0 is the boundary.
    #[inline]
    pub fn normalized_distance_sq(&self, x: f64, y: f64) -> f64 {
        let dx = (x - self.center_x) / self.radius_x;
        let dy = (y - self.center_y) / self.radius_y;
        dx * dx + dy * dy
    }

    /// Check if a point is inside the ellipse or on its boundary.
    #[inline]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        self.normalized_distance_sq(x, y) <= 1.0
    }

    /// Area of the ellipse in normalized units.
    pub fn area(&self) -> f64 {
        std::f64::consts::PI * self.radius_x * self.radius_y
    }
}
