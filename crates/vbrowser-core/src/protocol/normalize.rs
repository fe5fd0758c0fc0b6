//! Conversion of local pointer events into remote browser input events.
//!
//! The functions here have no side effects: the same input always yields the
//! same output.  A `None` result is not an error, it means "nothing to send"
//! (the pointer missed the surface, or the event name is not one the remote
//! browser understands).

use serde::Deserialize;

use crate::domain::geometry::{map_to_surface, IntersectionPoint, SurfaceDimensions, SurfaceTransform};
use crate::protocol::events::{InputEvent, PointerEventKind, RemoteInputEvent, PRIMARY_BUTTON};

/// Untyped payload as delivered alongside an event name by the input source.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawPointerPayload {
    #[serde(default)]
    pub xyz: Option<IntersectionPoint>,
    #[serde(default, rename = "deltaY")]
    pub delta_y: Option<f64>,
}

/// Translates a local pointer event into the remote session's input shape.
///
/// # Returns
///
/// - `None` for a pointer-class event with no intersection point.
/// - `Some(RemoteInputEvent::Wheel)` for wheel events; wheel events are never
///   coordinate-mapped.
/// - `Some(..)` with normalized coordinates and button 0 otherwise.
pub fn normalize(
    event: &InputEvent,
    surface_transform: &SurfaceTransform,
    dims: SurfaceDimensions,
) -> Option<RemoteInputEvent> {
    let button = PRIMARY_BUTTON;
    let mapped = |xyz: &Option<IntersectionPoint>| xyz.map(|p| map_to_surface(p, surface_transform, dims));

    match event {
        InputEvent::PointerDown { xyz } => {
            mapped(xyz).map(|c| RemoteInputEvent::MouseDown { x: c.x, y: c.y, button })
        }
        InputEvent::PointerUp { xyz } => {
            mapped(xyz).map(|c| RemoteInputEvent::MouseUp { x: c.x, y: c.y, button })
        }
        InputEvent::PointerMove { xyz } => {
            mapped(xyz).map(|c| RemoteInputEvent::MouseMove { x: c.x, y: c.y, button })
        }
        InputEvent::PointerTap { xyz } => {
            mapped(xyz).map(|c| RemoteInputEvent::Click { x: c.x, y: c.y, button })
        }
        InputEvent::PointerWheel { delta_y } => Some(RemoteInputEvent::Wheel { delta_y: *delta_y }),
    }
}

/// Boundary form of [`normalize`] for collaborators that name events with
/// strings.
///
/// Unknown names and wheel events without a `deltaY` yield `None`.
pub fn normalize_named(
    type_name: &str,
    payload: &RawPointerPayload,
    surface_transform: &SurfaceTransform,
    dims: SurfaceDimensions,
) -> Option<RemoteInputEvent> {
    let kind = PointerEventKind::from_name(type_name)?;
    let event = match kind {
        PointerEventKind::Down => InputEvent::PointerDown { xyz: payload.xyz },
        PointerEventKind::Up => InputEvent::PointerUp { xyz: payload.xyz },
        PointerEventKind::Move => InputEvent::PointerMove { xyz: payload.xyz },
        PointerEventKind::Tap => InputEvent::PointerTap { xyz: payload.xyz },
        PointerEventKind::Wheel => InputEvent::PointerWheel {
            delta_y: payload.delta_y?,
        },
    };
    normalize(&event, surface_transform, dims)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
