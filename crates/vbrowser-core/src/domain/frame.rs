//! Video frame presentation.
//!
//! Frames from the remote session arrive in one of two shapes, depending on
//! what the session transport can produce on the current platform: a decoded
//! bitmap, or a handle to a live video element whose size has to be read from
//! its intrinsic video dimensions.  [`FrameSample`] resolves that difference
//! once, where frames are received.
//!
//! # Presentation state machine
//!
//! ```text
//!            first frame                    any frame
//! Unbound ───────────────▶ DirectBound ───────────────▶ Redrawing ─┐
//!                                                          ▲       │ any frame
//!                                                          └───────┘
//! ```
//!
//! The first frame of a session is bound to the texture as its image.  Every
//! later frame is scaled into the texture's off-screen canvas instead, so size
//! changes between frames are absorbed by the fixed canvas size.  The choice
//! is sticky: only [`FramePresenter::reset`] returns to `Unbound`.

use tracing::{debug, trace};

/// Width and height of a frame or drawing surface, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FrameSize {
    pub width: u32,
    pub height: u32,
}

impl FrameSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// A video frame delivered by the remote session.
///
/// `I` is the rendering layer's image handle type.
#[derive(Debug, Clone, PartialEq)]
pub enum FrameSample<I> {
    /// An immediately usable bitmap.
    Bitmap { image: I, width: u32, height: u32 },
    /// A live video element; its generic size is its intrinsic video size.
    VideoFrame {
        element: I,
        intrinsic_width: u32,
        intrinsic_height: u32,
    },
}

impl<I> FrameSample<I> {
    /// The size consumers should treat as the frame's width and height.
    pub fn size(&self) -> FrameSize {
        match self {
            Self::Bitmap { width, height, .. } => FrameSize::new(*width, *height),
            Self::VideoFrame {
                intrinsic_width,
                intrinsic_height,
                ..
            } => FrameSize::new(*intrinsic_width, *intrinsic_height),
        }
    }

    pub fn image(&self) -> &I {
        match self {
            Self::Bitmap { image, .. } => image,
            Self::VideoFrame { element, .. } => element,
        }
    }

    pub fn into_image(self) -> I {
        match self {
            Self::Bitmap { image, .. } => image,
            Self::VideoFrame { element, .. } => element,
        }
    }
}

/// The texture a [`FramePresenter`] writes into.
///
/// Implemented by the rendering layer.  The texture owns an off-screen 2D
/// canvas of fixed size that backs it once the presenter switches to the
/// redraw path.
pub trait FrameTarget {
    type Image;

    /// Makes `image` the texture's source image.  `size` is the generic
    /// width/height the renderer should read from it.
    fn bind(&mut self, image: Self::Image, size: FrameSize);

    /// Current size of the off-screen canvas.
    fn canvas_size(&self) -> FrameSize;

    /// Draws the `src`-sized `image` into the canvas, scaled to `dst`.
    fn draw_scaled(&mut self, image: &Self::Image, src: FrameSize, dst: FrameSize);

    fn set_flip_y(&mut self, flip: bool);

    /// Flags the texture for re-upload on the next render.
    fn mark_needs_update(&mut self);
}

/// Which presentation path the session has committed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PresentationMode {
    /// No frame has been presented yet.
    #[default]
    Unbound,
    /// The first frame is bound as the texture image.
    DirectBound,
    /// Frames are drawn into the texture's canvas.
    Redrawing,
}

/// What [`FramePresenter::present`] did with a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresentOutcome {
    Bound,
    Redrawn,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PresentationState {
    pub mode: PresentationMode,
    pub last_presented_size: Option<FrameSize>,
    pub frames_presented: u64,
}

/// Owns the [`PresentationState`] of one session and applies frames to a
/// [`FrameTarget`].
#[derive(Debug, Default)]
pub struct FramePresenter {
    state: PresentationState,
}

impl FramePresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &PresentationState {
        &self.state
    }

    /// Presents one frame.
    ///
    /// Frames with a zero dimension are handed to the target unchanged; what
    /// the target does with them is up to the target.
    pub fn present<T: FrameTarget>(&mut self, frame: FrameSample<T::Image>, target: &mut T) -> PresentOutcome {
        let size = frame.size();

        let outcome = match self.state.mode {
            PresentationMode::Unbound => {
                target.bind(frame.into_image(), size);
                target.mark_needs_update();
                self.state.mode = PresentationMode::DirectBound;
                debug!(width = size.width, height = size.height, "first frame bound to texture");
                PresentOutcome::Bound
            }
            PresentationMode::DirectBound | PresentationMode::Redrawing => {
                let canvas = target.canvas_size();
                target.draw_scaled(frame.image(), size, canvas);
                target.set_flip_y(true);
                target.mark_needs_update();
                if self.state.mode == PresentationMode::DirectBound {
                    debug!(
                        canvas_width = canvas.width,
                        canvas_height = canvas.height,
                        "switching to canvas redraw"
                    );
                    self.state.mode = PresentationMode::Redrawing;
                }
                if self.state.last_presented_size != Some(size) {
                    trace!(width = size.width, height = size.height, "frame size changed");
                }
                PresentOutcome::Redrawn
            }
        };

        self.state.last_presented_size = Some(size);
        self.state.frames_presented += 1;
        outcome
    }

    /// Returns to `Unbound`; the next frame is bound directly again.
    pub fn reset(&mut self) {
        self.state = PresentationState::default();
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── Recording target ──────────────────────────────────────────────────────

    #[derive(Debug, Default)]
    struct RecordingTarget {
        canvas: FrameSize,
        bound: Option<(&'static str, FrameSize)>,
        draws: Vec<(&'static str, FrameSize, FrameSize)>,
        flip_y: bool,
        updates: u32,
    }

    impl RecordingTarget {
        fn with_canvas(width: u32, height: u32) -> Self {
            Self {
                canvas: FrameSize::new(width, height),
                ..Self::default()
            }
        }
    }

    impl FrameTarget for RecordingTarget {
        type Image = &'static str;

        fn bind(&mut self, image: Self::Image, size: FrameSize) {
            self.bound = Some((image, size));
        }

        fn canvas_size(&self) -> FrameSize {
            self.canvas
        }

        fn draw_scaled(&mut self, image: &Self::Image, src: FrameSize, dst: FrameSize) {
            self.draws.push((*image, src, dst));
        }

        fn set_flip_y(&mut self, flip: bool) {
            self.flip_y = flip;
        }

        fn mark_needs_update(&mut self) {
            self.updates += 1;
        }
    }

    fn bitmap(name: &'static str, width: u32, height: u32) -> FrameSample<&'static str> {
        FrameSample::Bitmap { image: name, width, height }
    }

    // ── Tests ─────────────────────────────────────────────────────────────────

    #[test]
    fn test_first_bitmap_is_bound_directly() {
        // Arrange
        let mut presenter = FramePresenter::new();
        let mut target = RecordingTarget::with_canvas(1280, 720);

        // Act
        let outcome = presenter.present(bitmap("first", 640, 360), &mut target);

        // Assert
        assert_eq!(outcome, PresentOutcome::Bound);
        assert_eq!(target.bound, Some(("first", FrameSize::new(640, 360))));
        assert!(target.draws.is_empty());
        assert!(!target.flip_y);
        assert_eq!(target.updates, 1);
        assert_eq!(presenter.state().mode, PresentationMode::DirectBound);
    }

    #[test]
    fn test_first_video_frame_binds_with_intrinsic_size() {
        let mut presenter = FramePresenter::new();
        let mut target = RecordingTarget::with_canvas(1280, 720);
        let frame = FrameSample::VideoFrame {
            element: "video",
            intrinsic_width: 1920,
            intrinsic_height: 1080,
        };

        presenter.present(frame, &mut target);

        assert_eq!(target.bound, Some(("video", FrameSize::new(1920, 1080))));
    }

    #[test]
    fn test_second_frame_is_redrawn_into_canvas() {
        let mut presenter = FramePresenter::new();
        let mut target = RecordingTarget::with_canvas(1280, 720);
        presenter.present(bitmap("first", 640, 360), &mut target);

        let outcome = presenter.present(bitmap("second", 800, 600), &mut target);

        assert_eq!(outcome, PresentOutcome::Redrawn);
        // The bound image is left alone.
        assert_eq!(target.bound, Some(("first", FrameSize::new(640, 360))));
        assert_eq!(
            target.draws,
            vec![("second", FrameSize::new(800, 600), FrameSize::new(1280, 720))]
        );
        assert!(target.flip_y);
        assert_eq!(target.updates, 2);
        assert_eq!(presenter.state().mode, PresentationMode::Redrawing);
    }

    #[test]
    fn test_redraw_path_is_sticky_across_size_changes() {
        let mut presenter = FramePresenter::new();
        let mut target = RecordingTarget::with_canvas(256, 256);
        presenter.present(bitmap("a", 100, 100), &mut target);

        for (i, (w, h)) in [(100, 100), (300, 200), (50, 900)].into_iter().enumerate() {
            let outcome = presenter.present(bitmap("b", w, h), &mut target);
            assert_eq!(outcome, PresentOutcome::Redrawn, "frame {i}");
        }

        assert_eq!(target.draws.len(), 3);
        assert!(target.draws.iter().all(|(_, _, dst)| *dst == FrameSize::new(256, 256)));
        assert_eq!(presenter.state().last_presented_size, Some(FrameSize::new(50, 900)));
        assert_eq!(presenter.state().frames_presented, 4);
    }

    #[test]
    fn test_video_frames_after_first_are_redrawn_with_intrinsic_size() {
        let mut presenter = FramePresenter::new();
        let mut target = RecordingTarget::with_canvas(640, 480);
        presenter.present(bitmap("a", 640, 480), &mut target);

        presenter.present(
            FrameSample::VideoFrame {
                element: "v",
                intrinsic_width: 320,
                intrinsic_height: 240,
            },
            &mut target,
        );

        assert_eq!(
            target.draws,
            vec![("v", FrameSize::new(320, 240), FrameSize::new(640, 480))]
        );
    }

    #[test]
    fn test_zero_sized_frame_is_passed_to_draw() {
        let mut presenter = FramePresenter::new();
        let mut target = RecordingTarget::with_canvas(64, 64);
        presenter.present(bitmap("a", 64, 64), &mut target);

        presenter.present(bitmap("empty", 0, 0), &mut target);

        assert_eq!(target.draws, vec![("empty", FrameSize::new(0, 0), FrameSize::new(64, 64))]);
    }

    #[test]
    fn test_reset_returns_to_direct_bind() {
        let mut presenter = FramePresenter::new();
        let mut target = RecordingTarget::with_canvas(64, 64);
        presenter.present(bitmap("a", 64, 64), &mut target);
        presenter.present(bitmap("b", 64, 64), &mut target);

        presenter.reset();
        let outcome = presenter.present(bitmap("c", 32, 32), &mut target);

        assert_eq!(outcome, PresentOutcome::Bound);
        assert_eq!(target.bound, Some(("c", FrameSize::new(32, 32))));
        assert_eq!(presenter.state().frames_presented, 1);
    }

    #[test]
    fn test_frame_size_is_empty() {
        assert!(FrameSize::new(0, 10).is_empty());
        assert!(FrameSize::new(10, 0).is_empty());
        assert!(!FrameSize::new(1, 1).is_empty());
    }
}
