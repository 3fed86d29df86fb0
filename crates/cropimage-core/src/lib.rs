//! CropImage Core - interactive crop pipeline
//!
//! This crate provides the computational core behind an interactive image
//! cropping control: orientation normalization of freshly acquired images,
//! mapping of a zoomed/scrolled viewport to a crop rectangle in source
//! pixels, and rasterization of that rectangle (optionally clipped to a
//! circle). Gestures, widgets and presentation stay with the host, which
//! talks to the core through [`session::ViewportHost`] and a completion
//! callback.

pub mod decode;
pub mod encode;
pub mod error;
pub mod mask;
pub mod session;
pub mod transform;
pub mod viewport;

pub use decode::{Bitmap, ColorSpace, Orientation};
pub use error::CropError;
pub use session::{CropSession, SessionState, ViewportHost};
pub use transform::{crop_image, normalize_orientation, rasterize};
pub use viewport::{compute_crop_rect, CropRect, Point, Size, ViewportState};

use serde::{Deserialize, Serialize};

/// Shape of the crop mask.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CropShape {
    /// Rectangle with the given width / height ratio.
    Rectangle { aspect_ratio: f64 },
    /// Circle inscribed in a square.
    Circle,
}

impl Default for CropShape {
    fn default() -> Self {
        CropShape::Rectangle { aspect_ratio: 1.0 }
    }
}

impl CropShape {
    /// Width / height ratio of the mask (1.0 for a circle).
    pub fn aspect_ratio(&self) -> f64 {
        match self {
            CropShape::Rectangle { aspect_ratio } => *aspect_ratio,
            CropShape::Circle => 1.0,
        }
    }

    /// Whether the output is clipped to an ellipse.
    pub fn is_circle(&self) -> bool {
        matches!(self, CropShape::Circle)
    }

    /// Reject non-finite or non-positive aspect ratios.
    pub fn validate(&self) -> Result<(), CropError> {
        let ratio = self.aspect_ratio();
        if ratio.is_finite() && ratio > 0.0 {
            Ok(())
        } else {
            Err(CropError::InvalidViewport(format!(
                "aspect ratio must be positive, got {}",
                ratio
            )))
        }
    }
}

/// What a crop session does when the loaded image cannot be normalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NormalizationPolicy {
    /// Fail the load; no session is shown for an image that cannot be made upright.
    #[default]
    Strict,
    /// Keep the image as stored and continue, logging a warning.
    FallbackToSource,
}

/// Configuration for a crop session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CropConfig {
    /// Smallest zoom scale the viewport may report (1.0 = fitted).
    pub min_zoom: f64,
    /// Largest zoom scale the viewport may report.
    pub max_zoom: f64,
    /// Behaviour when orientation normalization fails.
    pub normalization: NormalizationPolicy,
}

impl Default for CropConfig {
    fn default() -> Self {
        Self {
            min_zoom: 1.0,
            max_zoom: 3.0,
            normalization: NormalizationPolicy::Strict,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crop_shape_aspect_ratio() {
        assert_eq!(CropShape::Circle.aspect_ratio(), 1.0);
        assert_eq!(
            CropShape::Rectangle { aspect_ratio: 1.5 }.aspect_ratio(),
            1.5
        );
        assert_eq!(CropShape::default().aspect_ratio(), 1.0);
    }

    #[test]
    fn test_crop_shape_validate() {
        assert!(CropShape::Circle.validate().is_ok());
        assert!(CropShape::Rectangle { aspect_ratio: 0.5 }.validate().is_ok());
        assert!(CropShape::Rectangle { aspect_ratio: 0.0 }.validate().is_err());
        assert!(CropShape::Rectangle {
            aspect_ratio: f64::NAN
        }
        .validate()
        .is_err());
    }

    #[test]
    fn test_config_defaults() {
        let config = CropConfig::default();
        assert_eq!(config.min_zoom, 1.0);
        assert_eq!(config.max_zoom, 3.0);
        assert_eq!(config.normalization, NormalizationPolicy::Strict);
    }
}
