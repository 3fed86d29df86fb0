//! 2D affine transforms for drawing bitmaps.
//!
//! A transform maps `(x, y)` to `(a*x + c*y + tx, b*x + d*y + ty)`.
//! The builder methods (`translated_by`, `rotated_by`, `scaled_by`) prepend
//! their operation, so in a chain such as
//!
//! ```text
//! AffineTransform::IDENTITY.translated_by(w, 0.0).rotated_by(PI / 2.0)
//! ```
//!
//! points are rotated first and translated second. This matches the order
//! in which a drawing context concatenates operations onto its current
//! transform.
//!
//! Angles are in radians, positive = counter-clockwise on screen (y down).

/// An affine transform in image coordinates (origin top-left, y down).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffineTransform {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub tx: f64,
    pub ty: f64,
}

impl Default for AffineTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl AffineTransform {
    pub const IDENTITY: AffineTransform = AffineTransform {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        tx: 0.0,
        ty: 0.0,
    };

    pub fn translation(tx: f64, ty: f64) -> Self {
        Self {
            tx,
            ty,
            ..Self::IDENTITY
        }
    }

    /// Counter-clockwise rotation about the origin.
    pub fn rotation(angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self {
            a: cos,
            b: -sin,
            c: sin,
            d: cos,
            tx: 0.0,
            ty: 0.0,
        }
    }

    pub fn scale(sx: f64, sy: f64) -> Self {
        Self {
            a: sx,
            d: sy,
            ..Self::IDENTITY
        }
    }

    /// Transform that applies `first`, then `self`.
    pub fn pre_concat(&self, first: &AffineTransform) -> AffineTransform {
        AffineTransform {
            a: self.a * first.a + self.c * first.b,
            b: self.b * first.a + self.d * first.b,
            c: self.a * first.c + self.c * first.d,
            d: self.b * first.c + self.d * first.d,
            tx: self.a * first.tx + self.c * first.ty + self.tx,
            ty: self.b * first.tx + self.d * first.ty + self.ty,
        }
    }

    pub fn translated_by(&self, tx: f64, ty: f64) -> AffineTransform {
        self.pre_concat(&Self::translation(tx, ty))
    }

    pub fn rotated_by(&self, angle: f64) -> AffineTransform {
        self.pre_concat(&Self::rotation(angle))
    }

    pub fn scaled_by(&self, sx: f64, sy: f64) -> AffineTransform {
        self.pre_concat(&Self::scale(sx, sy))
    }

    /// Map a point through the transform.
    #[inline]
    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (
            self.a * x + self.c * y + self.tx,
            self.b * x + self.d * y + self.ty,
        )
    }

    pub fn determinant(&self) -> f64 {
        self.a * self.d - self.b * self.c
    }

    /// The inverse transform, or `None` if the transform is singular.
    pub fn invert(&self) -> Option<AffineTransform> {
        let det = self.determinant();
        if !det.is_finite() || det.abs() < f64::EPSILON {
            return None;
        }

        let a = self.d / det;
        let b = -self.b / det;
        let c = -self.c / det;
        let d = self.a / det;
        Some(AffineTransform {
            a,
            b,
            c,
            d,
            tx: -(a * self.tx + c * self.ty),
            ty: -(b * self.tx + d * self.ty),
        })
    }
}
