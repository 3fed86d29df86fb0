//! Crop session state machine.
//!
//! A session owns the normalized image while the host displays it, and
//! turns one viewport snapshot into a cropped bitmap when the user confirms.
//!
//! ```text
//! Idle --load--> Displaying --confirm--> Completed
//!                     |
//!                     +-----cancel-----> Cancelled
//! ```
//!
//! `Completed` and `Cancelled` are terminal. The completion callback fires
//! at most once, and never after a cancel.

use serde::{Deserialize, Serialize};

use crate::decode::Bitmap;
use crate::error::CropError;
use crate::transform::{crop_image, normalize_orientation};
use crate::viewport::ViewportState;
use crate::{CropConfig, CropShape, NormalizationPolicy};

/// Lifecycle state of a [`CropSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// Created, no image loaded yet.
    Idle,
    /// Image loaded and shown; the user is panning and zooming.
    Displaying,
    /// The crop was confirmed and delivered.
    Completed,
    /// The user backed out; nothing was delivered.
    Cancelled,
}

impl SessionState {
    /// Whether no further events are accepted.
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionState::Completed | SessionState::Cancelled)
    }
}

/// The interactive part of a crop control, owned by the host.
///
/// Gestures, scrolling and zoom limits live on the host side; the session
/// only asks for the current geometry when it needs to crop.
pub trait ViewportHost {
    /// Current viewport geometry.
    fn viewport_state(&self) -> ViewportState;
}

impl ViewportHost for ViewportState {
    fn viewport_state(&self) -> ViewportState {
        *self
    }
}

type Completion = Box<dyn FnOnce(Bitmap)>;

/// One crop interaction, from showing an image to delivering the result.
pub struct CropSession<H: ViewportHost> {
    host: H,
    shape: CropShape,
    config: CropConfig,
    state: SessionState,
    image: Option<Bitmap>,
    on_complete: Option<Completion>,
}

impl<H: ViewportHost> CropSession<H> {
    /// Create an idle session.
    pub fn new(
        host: H,
        shape: CropShape,
        config: CropConfig,
        on_complete: impl FnOnce(Bitmap) + 'static,
    ) -> Self {
        Self {
            host,
            shape,
            config,
            state: SessionState::Idle,
            image: None,
            on_complete: Some(Box::new(on_complete)),
        }
    }

    /// Create a session and load `image` into it in one step.
    pub fn show(
        image: &Bitmap,
        host: H,
        shape: CropShape,
        config: CropConfig,
        on_complete: impl FnOnce(Bitmap) + 'static,
    ) -> Result<Self, CropError> {
        let mut session = Self::new(host, shape, config, on_complete);
        session.load(image)?;
        Ok(session)
    }

    /// Normalize `image` and start displaying it.
    ///
    /// Loading again while displaying replaces the image. With
    /// [`NormalizationPolicy::Strict`] a normalization failure is returned
    /// and the state is left unchanged; with
    /// [`NormalizationPolicy::FallbackToSource`] the image is kept as stored.
    pub fn load(&mut self, image: &Bitmap) -> Result<(), CropError> {
        if self.state.is_terminal() {
            return Err(CropError::InvalidState(self.state));
        }
        self.shape.validate()?;

        let upright = match normalize_orientation(image) {
            Ok(upright) => upright,
            Err(err) => match self.config.normalization {
                NormalizationPolicy::Strict => return Err(err),
                NormalizationPolicy::FallbackToSource => {
                    log::warn!("Orientation normalization failed, using source image: {}", err);
                    image.clone()
                }
            },
        };

        log::debug!(
            "Crop session displaying {}x{} image ({:?})",
            upright.width,
            upright.height,
            self.shape
        );
        self.image = Some(upright);
        self.state = SessionState::Displaying;
        Ok(())
    }

    /// Crop the image to the host's current viewport and deliver it.
    ///
    /// Reads exactly one viewport snapshot. On success the completion
    /// callback receives the result and the session is `Completed`. On
    /// failure the error is returned, no callback fires and the session
    /// keeps displaying so the user can adjust and retry.
    pub fn confirm(&mut self) -> Result<(), CropError> {
        if self.state != SessionState::Displaying {
            return Err(CropError::InvalidState(self.state));
        }
        let image = self.image.as_ref().ok_or(CropError::NoSourcePixelBuffer)?;

        let (min_zoom, max_zoom) = (self.config.min_zoom, self.config.max_zoom);
        if !min_zoom.is_finite() || !max_zoom.is_finite() || min_zoom <= 0.0 {
            return Err(CropError::InvalidViewport(format!(
                "zoom limits must be positive, got {}..{}",
                min_zoom, max_zoom
            )));
        }

        let viewport = self
            .host
            .viewport_state()
            .with_zoom_clamped(min_zoom, max_zoom);
        let cropped = crop_image(image, &viewport, self.shape)?;

        log::info!(
            "Crop confirmed: {}x{} output at density {}",
            cropped.width,
            cropped.height,
            viewport.device_pixel_density
        );

        self.state = SessionState::Completed;
        self.image = None;
        if let Some(on_complete) = self.on_complete.take() {
            on_complete(cropped);
        }
        Ok(())
    }

    /// Abandon the session without delivering anything.
    pub fn cancel(&mut self) -> Result<(), CropError> {
        if self.state.is_terminal() {
            return Err(CropError::InvalidState(self.state));
        }
        log::debug!("Crop session cancelled");
        self.state = SessionState::Cancelled;
        self.image = None;
        self.on_complete = None;
        Ok(())
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn shape(&self) -> CropShape {
        self.shape
    }

    pub fn config(&self) -> &CropConfig {
        &self.config
    }

    /// The normalized image being displayed, if any.
    pub fn image(&self) -> Option<&Bitmap> {
        self.image.as_ref()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}

impl<H: ViewportHost> std::fmt::Debug for CropSession<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CropSession")
            .field("shape", &self.shape)
            .field("config", &self.config)
            .field("state", &self.state)
            .field("has_image", &self.image.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::{ColorSpace, Orientation};
    use crate::viewport::{Point, Size};
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    fn test_image(width: u32, height: u32) -> Bitmap {
        let mut pixels = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.extend_from_slice(&[x as u8, y as u8, 0, 255]);
            }
        }
        Bitmap::new(width, height, pixels)
    }

    fn fitted(width: f64, height: f64) -> ViewportState {
        ViewportState::initial(Size::new(width, height), Size::new(100.0, 100.0), 1.0, 1.0)
    }

    /// Host that counts how often it is asked for its geometry.
    struct CountingHost {
        viewport: ViewportState,
        reads: Cell<u32>,
    }

    impl ViewportHost for CountingHost {
        fn viewport_state(&self) -> ViewportState {
            self.reads.set(self.reads.get() + 1);
            self.viewport
        }
    }

    fn recorder() -> (Rc<RefCell<Vec<Bitmap>>>, impl FnOnce(Bitmap) + 'static) {
        let delivered = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&delivered);
        (delivered, move |bitmap| sink.borrow_mut().push(bitmap))
    }

    #[test]
    fn test_new_session_is_idle() {
        let session = CropSession::new(
            fitted(100.0, 100.0),
            CropShape::Circle,
            CropConfig::default(),
            |_| {},
        );
        assert_eq!(session.state(), SessionState::Idle);
        assert!(session.image().is_none());
    }

    #[test]
    fn test_confirm_delivers_exactly_once() {
        let (delivered, on_complete) = recorder();
        let img = test_image(100, 100);
        let mut session = CropSession::show(
            &img,
            fitted(100.0, 100.0),
            CropShape::default(),
            CropConfig::default(),
            on_complete,
        )
        .unwrap();
        assert_eq!(session.state(), SessionState::Displaying);

        session.confirm().unwrap();
        assert_eq!(session.state(), SessionState::Completed);
        assert_eq!(delivered.borrow().len(), 1);
        assert_eq!(delivered.borrow()[0].pixels, img.pixels);

        assert_eq!(
            session.confirm(),
            Err(CropError::InvalidState(SessionState::Completed))
        );
        assert_eq!(delivered.borrow().len(), 1);
    }

    #[test]
    fn test_confirm_reads_one_snapshot() {
        let host = CountingHost {
            viewport: fitted(60.0, 40.0),
            reads: Cell::new(0),
        };
        let mut session = CropSession::show(
            &test_image(60, 40),
            host,
            CropShape::Circle,
            CropConfig::default(),
            |_| {},
        )
        .unwrap();
        assert_eq!(session.host().reads.get(), 0);

        session.confirm().unwrap();
        assert_eq!(session.host().reads.get(), 1);
    }

    #[test]
    fn test_cancel_never_delivers() {
        let (delivered, on_complete) = recorder();
        let mut session = CropSession::show(
            &test_image(10, 10),
            fitted(10.0, 10.0),
            CropShape::Circle,
            CropConfig::default(),
            on_complete,
        )
        .unwrap();

        session.cancel().unwrap();
        assert_eq!(session.state(), SessionState::Cancelled);
        assert_eq!(
            session.confirm(),
            Err(CropError::InvalidState(SessionState::Cancelled))
        );
        assert!(delivered.borrow().is_empty());
    }

    #[test]
    fn test_cancel_from_idle() {
        let mut session = CropSession::new(
            fitted(10.0, 10.0),
            CropShape::Circle,
            CropConfig::default(),
            |_| {},
        );
        session.cancel().unwrap();
        assert_eq!(
            session.load(&test_image(4, 4)),
            Err(CropError::InvalidState(SessionState::Cancelled))
        );
        assert_eq!(
            session.cancel(),
            Err(CropError::InvalidState(SessionState::Cancelled))
        );
    }

    #[test]
    fn test_confirm_before_load() {
        let mut session = CropSession::new(
            fitted(10.0, 10.0),
            CropShape::Circle,
            CropConfig::default(),
            |_| {},
        );
        assert_eq!(
            session.confirm(),
            Err(CropError::InvalidState(SessionState::Idle))
        );
    }

    #[test]
    fn test_load_normalizes_orientation() {
        let img = test_image(30, 20).with_orientation(Orientation::Right);
        let session = CropSession::show(
            &img,
            fitted(20.0, 30.0),
            CropShape::Circle,
            CropConfig::default(),
            |_| {},
        )
        .unwrap();

        let shown = session.image().unwrap();
        assert_eq!((shown.width, shown.height), (20, 30));
        assert_eq!(shown.orientation, Orientation::Up);
    }

    #[test]
    fn test_strict_policy_fails_load() {
        let img = test_image(8, 8)
            .with_orientation(Orientation::Down)
            .with_color_space(None);
        let result = CropSession::show(
            &img,
            fitted(8.0, 8.0),
            CropShape::Circle,
            CropConfig::default(),
            |_| {},
        );
        assert!(matches!(result, Err(CropError::UnsupportedPixelFormat(_))));
    }

    #[test]
    fn test_fallback_policy_keeps_source() {
        let img = test_image(8, 8)
            .with_orientation(Orientation::Down)
            .with_color_space(None);
        let config = CropConfig {
            normalization: NormalizationPolicy::FallbackToSource,
            ..CropConfig::default()
        };
        let session =
            CropSession::show(&img, fitted(8.0, 8.0), CropShape::Circle, config, |_| {}).unwrap();

        assert_eq!(session.state(), SessionState::Displaying);
        assert_eq!(session.image(), Some(&img));
    }

    #[test]
    fn test_failed_confirm_stays_displaying() {
        let (delivered, on_complete) = recorder();
        let mut session = CropSession::show(
            &test_image(10, 10),
            fitted(10.0, 10.0),
            CropShape::default(),
            CropConfig::default(),
            on_complete,
        )
        .unwrap();

        // Scrolled far past the content
        session.host_mut().content_offset = Point::new(5000.0, 5000.0);
        assert!(matches!(
            session.confirm(),
            Err(CropError::CropOutOfBounds { .. })
        ));
        assert_eq!(session.state(), SessionState::Displaying);
        assert!(delivered.borrow().is_empty());

        // Back in range, the retry succeeds
        session.host_mut().content_offset = Point::ZERO;
        session.confirm().unwrap();
        assert_eq!(delivered.borrow().len(), 1);
    }

    #[test]
    fn test_zoom_is_clamped_to_config() {
        let (delivered, on_complete) = recorder();
        let mut host = fitted(100.0, 100.0);
        host.zoom_scale = 50.0;
        let mut session = CropSession::show(
            &test_image(100, 100),
            host,
            CropShape::default(),
            CropConfig::default(),
            on_complete,
        )
        .unwrap();

        session.confirm().unwrap();
        // Clamped to max_zoom = 3: a third of the fitted image per side
        let out = &delivered.borrow()[0];
        assert_eq!((out.width, out.height), (34, 34));
    }

    #[test]
    fn test_color_space_survives_session() {
        let (delivered, on_complete) = recorder();
        let img = test_image(20, 20).with_color_space(Some(ColorSpace::DisplayP3));
        let mut session = CropSession::show(
            &img,
            fitted(20.0, 20.0),
            CropShape::Circle,
            CropConfig::default(),
            on_complete,
        )
        .unwrap();
        session.confirm().unwrap();
        assert_eq!(delivered.borrow()[0].color_space, Some(ColorSpace::DisplayP3));
    }

    #[test]
    fn test_invalid_shape_rejected_on_load() {
        let mut session = CropSession::new(
            fitted(10.0, 10.0),
            CropShape::Rectangle { aspect_ratio: -1.0 },
            CropConfig::default(),
            |_| {},
        );
        assert!(matches!(
            session.load(&test_image(10, 10)),
            Err(CropError::InvalidViewport(_))
        ));
        assert_eq!(session.state(), SessionState::Idle);
    }
}
