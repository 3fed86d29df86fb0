//! Viewport geometry: the state a host reports and the rectangles derived from it.
//!
//! # Coordinate Systems
//!
//! - Viewport values (offset, content size, mask size) are in display points
//! - [`CropRect`] and [`PixelBounds`] are in source-image pixels
//! - Origin is the top-left corner, y grows downwards
//!
//! The device pixel density converts between the two: one point covers
//! `density` pixels along each axis.

mod layout;
mod mapper;

pub use layout::{centered_origin, clamp_offset, fit_content, mask_size_for, ContentLayout};
pub use mapper::compute_crop_rect;

use serde::{Deserialize, Serialize};

use crate::error::CropError;

/// Values closer than this to an integer are treated as that integer when
/// converting a crop rectangle to pixel bounds.
const SNAP_EPSILON: f64 = 1e-6;

/// A point in display points.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A width/height pair, in points or pixels depending on context.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Width divided by height.
    pub fn aspect_ratio(&self) -> f64 {
        self.width / self.height
    }

    /// Both dimensions are finite and strictly positive.
    pub fn is_positive(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    /// Multiply both dimensions by `factor`.
    pub fn scaled(&self, factor: f64) -> Size {
        Size::new(self.width * factor, self.height * factor)
    }
}

/// A crop rectangle in source-image pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CropRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl CropRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The right edge.
    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    /// The bottom edge.
    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }

    /// Intersect with `[0, width] x [0, height]`.
    ///
    /// The result may be empty (zero width or height) when the rectangle lies
    /// entirely outside the bounds.
    pub fn clamped_to(&self, width: u32, height: u32) -> CropRect {
        let (w, h) = (width as f64, height as f64);
        let left = self.x.clamp(0.0, w);
        let top = self.y.clamp(0.0, h);
        let right = self.max_x().clamp(left, w);
        let bottom = self.max_y().clamp(top, h);
        CropRect::new(left, top, right - left, bottom - top)
    }

    /// Returns true if the rectangle lies within `[0, width] x [0, height]`,
    /// allowing `tolerance` of floating-point slack on every edge.
    pub fn is_within(&self, width: u32, height: u32, tolerance: f64) -> bool {
        self.x >= -tolerance
            && self.y >= -tolerance
            && self.max_x() <= width as f64 + tolerance
            && self.max_y() <= height as f64 + tolerance
    }

    /// Convert to whole-pixel bounds inside a `width x height` buffer.
    ///
    /// The origin is floored and the far edges are ceiled, after snapping
    /// values that are within rounding noise of an integer. Returns `None` if
    /// nothing of the rectangle remains inside the buffer.
    pub fn to_pixel_bounds(&self, width: u32, height: u32) -> Option<PixelBounds> {
        let values = [self.x, self.y, self.width, self.height];
        if values.iter().any(|v| !v.is_finite()) {
            return None;
        }

        let clamped = self.clamped_to(width, height);
        let left = snap(clamped.x).floor() as u32;
        let top = snap(clamped.y).floor() as u32;
        let right = (snap(clamped.max_x()).ceil() as u32).min(width);
        let bottom = (snap(clamped.max_y()).ceil() as u32).min(height);

        if right <= left || bottom <= top {
            return None;
        }

        Some(PixelBounds {
            x: left,
            y: top,
            width: right - left,
            height: bottom - top,
        })
    }
}

#[inline]
fn snap(value: f64) -> f64 {
    let rounded = value.round();
    if (value - rounded).abs() < SNAP_EPSILON {
        rounded
    } else {
        value
    }
}

/// A whole-pixel rectangle inside a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PixelBounds {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Snapshot of the interactive viewport at one instant.
///
/// The host mutates its own copy continuously while the user pans and
/// zooms; the crop pipeline only ever sees a copy taken at confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportState {
    /// Zoom relative to the fitted content (1.0 = image fitted to the mask).
    pub zoom_scale: f64,
    /// Scroll offset of the content, in points.
    pub content_offset: Point,
    /// Size of the zoomed content, in points.
    pub content_size: Size,
    /// Size of the mask (the visible viewport frame), in points.
    pub mask_size: Size,
    /// Physical pixels per display point.
    pub device_pixel_density: f64,
}

impl ViewportState {
    /// The viewport a host starts from: image fitted to the mask at zoom 1,
    /// scrolled so the overflow is split evenly on both sides.
    pub fn initial(image: Size, mask: Size, aspect_ratio: f64, density: f64) -> ViewportState {
        let layout = fit_content(image, mask, aspect_ratio);
        ViewportState {
            zoom_scale: 1.0,
            content_offset: layout.content_offset,
            content_size: layout.content_size,
            mask_size: mask,
            device_pixel_density: density,
        }
    }

    /// Check that every value the crop mapper divides by is usable.
    pub fn validate(&self) -> Result<(), CropError> {
        if !self.zoom_scale.is_finite() || self.zoom_scale <= 0.0 {
            return Err(CropError::InvalidViewport(format!(
                "zoom scale must be positive, got {}",
                self.zoom_scale
            )));
        }
        if !self.device_pixel_density.is_finite() || self.device_pixel_density <= 0.0 {
            return Err(CropError::InvalidViewport(format!(
                "device pixel density must be positive, got {}",
                self.device_pixel_density
            )));
        }
        if !self.mask_size.is_positive() {
            return Err(CropError::InvalidViewport(format!(
                "mask size must be positive, got {}x{}",
                self.mask_size.width, self.mask_size.height
            )));
        }
        if !self.content_offset.x.is_finite() || !self.content_offset.y.is_finite() {
            return Err(CropError::InvalidViewport(
                "content offset must be finite".to_string(),
            ));
        }
        Ok(())
    }

    /// Copy of this state with the zoom scale clamped to `[min_zoom, max_zoom]`.
    pub fn with_zoom_clamped(&self, min_zoom: f64, max_zoom: f64) -> ViewportState {
        ViewportState {
            zoom_scale: self.zoom_scale.clamp(min_zoom, max_zoom.max(min_zoom)),
            ..*self
        }
    }
}
