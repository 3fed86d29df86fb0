//! Initial placement of an image inside the crop mask.
//!
//! The image is aspect-filled into the mask: the dimension that fits
//! ("fitted") matches the mask exactly and the other overflows. The crop
//! mapper relies on the same fitted-dimension rule to undo this pre-scaling.

use super::{Point, Size};

/// Content size and scroll offset of a freshly fitted image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContentLayout {
    /// Size of the content at zoom 1, in points.
    pub content_size: Size,
    /// Offset that centers the overflowing dimension in the mask.
    pub content_offset: Point,
}

/// Mask size for a viewport `screen_width` points wide.
///
/// The mask spans the full width; its height follows the crop aspect ratio.
pub fn mask_size_for(screen_width: f64, aspect_ratio: f64) -> Size {
    Size::new(screen_width, screen_width / aspect_ratio)
}

/// Aspect-fill `image` into `mask`.
///
/// When `image.width / image.height <= aspect_ratio` the width is fitted and
/// the content overflows vertically; otherwise the height is fitted and the
/// content overflows horizontally.
pub fn fit_content(image: Size, mask: Size, aspect_ratio: f64) -> ContentLayout {
    if image.aspect_ratio() <= aspect_ratio {
        let height = mask.width * image.height / image.width;
        ContentLayout {
            content_size: Size::new(mask.width, height),
            content_offset: Point::new(0.0, (height - mask.height) / 2.0),
        }
    } else {
        let width = mask.height * image.width / image.height;
        ContentLayout {
            content_size: Size::new(width, mask.height),
            content_offset: Point::new((width - mask.width) / 2.0, 0.0),
        }
    }
}

/// Frame origin of the content view inside the mask.
///
/// Along an axis where the (zoomed) content is smaller than the mask it is
/// centered, otherwise it sits at the origin and scrolling takes over.
pub fn centered_origin(content: Size, mask: Size) -> Point {
    let x = if content.width < mask.width {
        (mask.width - content.width) / 2.0
    } else {
        0.0
    };
    let y = if content.height > mask.height {
        0.0
    } else {
        (mask.height - content.height) / 2.0
    };
    Point::new(x, y)
}

/// Clamp a scroll offset to the valid range `[0, content - mask]`.
pub fn clamp_offset(offset: Point, content: Size, mask: Size) -> Point {
    let max_x = (content.width - mask.width).max(0.0);
    let max_y = (content.height - mask.height).max(0.0);
    Point::new(offset.x.clamp(0.0, max_x), offset.y.clamp(0.0, max_y))
}
