//! # vbrowser-core
//!
//! Pure interaction logic for a remotely rendered browser displayed on a
//! surface inside a 3D scene.
//!
//! This crate has zero dependencies on networking, async runtimes, or any
//! particular renderer.  The rendering layer and the remote session are
//! reached only through the traits and data types defined here.
//!
//! # Architecture overview (for beginners)
//!
//! A "virtual browser" is a real browser running on a remote machine.  Its
//! screen arrives locally as a stream of video frames, which we paint onto a
//! flat object in the 3D scene (the *surface*).  When the local user points
//! at that surface and clicks, we translate the 3D hit point into the 2D
//! coordinates the remote browser understands and send it a mouse event.
//!
//! The crate is split into two modules:
//!
//! - **`domain`** – The stateful and geometric building blocks:
//!   the coordinate mapper (3D hit point → `[0,1]²`), the input throttler
//!   (rate limit for move/wheel events) and the frame presenter (video frame →
//!   texture).
//!
//! - **`protocol`** – The event vocabulary.  Local pointer events come in as
//!   [`InputEvent`]; the remote browser expects [`RemoteInputEvent`].  The
//!   normalizer converts one into the other.

pub mod domain;
pub mod protocol;

// Re-export the most-used types at the crate root so callers can write
// `vbrowser_core::FramePresenter` instead of the full module path.
pub use domain::frame::{
    FramePresenter, FrameSample, FrameSize, FrameTarget, PresentOutcome, PresentationMode,
    PresentationState,
};
pub use domain::geometry::{
    map_to_surface, GeometryError, IntersectionPoint, NormalizedCoordinate, SurfaceDimensions,
    SurfaceTransform,
};
pub use domain::throttle::{InputThrottler, ThrottleState, DEFAULT_THROTTLE_WINDOW_MS};
pub use protocol::events::{EventClass, InputEvent, PointerEventKind, RemoteInputEvent};
pub use protocol::normalize::{normalize, normalize_named, RawPointerPayload};
