//! Local and remote input event types.
//!
//! # JSON discriminant
//!
//! Both enums are serialized with a `"type"` field naming the variant and
//! the payload fields flattened next to it, matching what the remote browser
//! SDK accepts:
//!
//! ```json
//! {"type":"mousedown","x":0.25,"y":0.75,"button":0}
//! {"type":"wheel","deltaY":120.0}
//! ```
//!
//! Local events use the scene's own pointer vocabulary:
//!
//! ```json
//! {"type":"pointerDown","xyz":[0.1,0.2,0.0]}
//! {"type":"pointerWheel","deltaY":-40.0}
//! ```

use serde::{Deserialize, Serialize};

use crate::domain::geometry::IntersectionPoint;

/// Button id carried by every forwarded pointer event.
///
/// The bridge emulates a single-button mouse.
pub const PRIMARY_BUTTON: u8 = 0;

// ── Local events ──────────────────────────────────────────────────────────────

/// The pointer event names the input source delivers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerEventKind {
    Down,
    Up,
    Move,
    Tap,
    Wheel,
}

impl PointerEventKind {
    /// Resolves an event name such as `"pointerDown"`.
    ///
    /// Returns `None` for names the bridge does not handle.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "pointerDown" => Some(Self::Down),
            "pointerUp" => Some(Self::Up),
            "pointerMove" => Some(Self::Move),
            "pointerTap" => Some(Self::Tap),
            "pointerWheel" => Some(Self::Wheel),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Down => "pointerDown",
            Self::Up => "pointerUp",
            Self::Move => "pointerMove",
            Self::Tap => "pointerTap",
            Self::Wheel => "pointerWheel",
        }
    }

    pub fn class(self) -> EventClass {
        match self {
            Self::Down => EventClass::Down,
            Self::Up => EventClass::Up,
            Self::Move => EventClass::Move,
            Self::Tap => EventClass::Tap,
            Self::Wheel => EventClass::Wheel,
        }
    }
}

/// Rate-limiting class of an event.
///
/// Only continuous input (`Move`, `Wheel`) is throttled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventClass {
    Down,
    Up,
    Move,
    Tap,
    Wheel,
}

impl EventClass {
    pub fn is_throttled(self) -> bool {
        matches!(self, Self::Move | Self::Wheel)
    }
}

/// A pointer event delivered by the local input system.
///
/// Pointer-class variants carry the world-space point where the pointer ray
/// met the display surface, if it met it at all.  The wheel variant only
/// carries a scroll delta.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum InputEvent {
    PointerDown {
        #[serde(default)]
        xyz: Option<IntersectionPoint>,
    },
    PointerUp {
        #[serde(default)]
        xyz: Option<IntersectionPoint>,
    },
    PointerMove {
        #[serde(default)]
        xyz: Option<IntersectionPoint>,
    },
    PointerTap {
        #[serde(default)]
        xyz: Option<IntersectionPoint>,
    },
    PointerWheel {
        #[serde(rename = "deltaY")]
        delta_y: f64,
    },
}

impl InputEvent {
    pub fn kind(&self) -> PointerEventKind {
        match self {
            Self::PointerDown { .. } => PointerEventKind::Down,
            Self::PointerUp { .. } => PointerEventKind::Up,
            Self::PointerMove { .. } => PointerEventKind::Move,
            Self::PointerTap { .. } => PointerEventKind::Tap,
            Self::PointerWheel { .. } => PointerEventKind::Wheel,
        }
    }

    pub fn class(&self) -> EventClass {
        self.kind().class()
    }

    /// The surface hit point, for pointer-class events that have one.
    pub fn intersection(&self) -> Option<IntersectionPoint> {
        match self {
            Self::PointerDown { xyz }
            | Self::PointerUp { xyz }
            | Self::PointerMove { xyz }
            | Self::PointerTap { xyz } => *xyz,
            Self::PointerWheel { .. } => None,
        }
    }
}

// ── Remote events ─────────────────────────────────────────────────────────────

/// The input event shape the remote browser session accepts.
///
/// `x` and `y` are normalized surface coordinates (see
/// [`NormalizedCoordinate`](crate::domain::geometry::NormalizedCoordinate)).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RemoteInputEvent {
    #[serde(rename = "mousedown")]
    MouseDown { x: f64, y: f64, button: u8 },
    #[serde(rename = "mouseup")]
    MouseUp { x: f64, y: f64, button: u8 },
    #[serde(rename = "mousemove")]
    MouseMove { x: f64, y: f64, button: u8 },
    #[serde(rename = "click")]
    Click { x: f64, y: f64, button: u8 },
    #[serde(rename = "wheel")]
    Wheel {
        #[serde(rename = "deltaY")]
        delta_y: f64,
    },
}

impl RemoteInputEvent {
    /// The wire name carried in the `"type"` field.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::MouseDown { .. } => "mousedown",
            Self::MouseUp { .. } => "mouseup",
            Self::MouseMove { .. } => "mousemove",
            Self::Click { .. } => "click",
            Self::Wheel { .. } => "wheel",
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kind_names_resolve_both_ways() {
        for kind in [
            PointerEventKind::Down,
            PointerEventKind::Up,
            PointerEventKind::Move,
            PointerEventKind::Tap,
            PointerEventKind::Wheel,
        ] {
            assert_eq!(PointerEventKind::from_name(kind.name()), Some(kind));
        }
    }

    #[test]
    fn test_unknown_event_name_is_none() {
        assert_eq!(PointerEventKind::from_name("pointerScroll"), None);
        assert_eq!(PointerEventKind::from_name("PointerDown"), None);
        assert_eq!(PointerEventKind::from_name(""), None);
    }

    #[test]
    fn test_only_move_and_wheel_are_throttled() {
        assert!(EventClass::Move.is_throttled());
        assert!(EventClass::Wheel.is_throttled());
        assert!(!EventClass::Down.is_throttled());
        assert!(!EventClass::Up.is_throttled());
        assert!(!EventClass::Tap.is_throttled());
    }

    #[test]
    fn test_input_event_parses_from_scene_json() {
        let ev: InputEvent = serde_json::from_value(json!({"type": "pointerDown", "xyz": [0.1, 0.2, 0.0]})).unwrap();
        assert_eq!(ev.kind(), PointerEventKind::Down);
        assert_eq!(ev.intersection(), Some(IntersectionPoint::new(0.1, 0.2, 0.0)));
    }

    #[test]
    fn test_input_event_without_xyz_parses_as_none() {
        let ev: InputEvent = serde_json::from_value(json!({"type": "pointerMove"})).unwrap();
        assert_eq!(ev, InputEvent::PointerMove { xyz: None });
        assert_eq!(ev.intersection(), None);
    }

    #[test]
    fn test_wheel_event_uses_camel_case_delta() {
        let ev: InputEvent = serde_json::from_value(json!({"type": "pointerWheel", "deltaY": -40.0})).unwrap();
        assert_eq!(ev, InputEvent::PointerWheel { delta_y: -40.0 });
        assert_eq!(ev.class(), EventClass::Wheel);
    }

    #[test]
    fn test_remote_pointer_events_have_wire_shape() {
        let cases = [
            (RemoteInputEvent::MouseDown { x: 0.25, y: 0.75, button: 0 }, "mousedown"),
            (RemoteInputEvent::MouseUp { x: 0.25, y: 0.75, button: 0 }, "mouseup"),
            (RemoteInputEvent::MouseMove { x: 0.25, y: 0.75, button: 0 }, "mousemove"),
            (RemoteInputEvent::Click { x: 0.25, y: 0.75, button: 0 }, "click"),
        ];
        for (event, name) in cases {
            let value = serde_json::to_value(&event).unwrap();
            assert_eq!(value, json!({"type": name, "x": 0.25, "y": 0.75, "button": 0}));
            assert_eq!(event.type_name(), name);
        }
    }

    #[test]
    fn test_remote_wheel_has_no_coordinates() {
        let value = serde_json::to_value(RemoteInputEvent::Wheel { delta_y: 10.0 }).unwrap();
        assert_eq!(value, json!({"type": "wheel", "deltaY": 10.0}));
        assert!(value.get("x").is_none());
        assert!(value.get("button").is_none());
    }
}
