//! Event vocabulary shared between the local input system and the remote
//! browser session.
//!
//! # Message flow
//!
//! ```text
//! Input source  →  InputEvent  →  normalize()  →  RemoteInputEvent  →  remote session
//! ```
//!
//! Both enums are closed: adding a new pointer event means adding a variant,
//! and every `match` over them has to be updated before the code compiles.

pub mod events;
pub mod normalize;

pub use events::{EventClass, InputEvent, PointerEventKind, RemoteInputEvent, PRIMARY_BUTTON};
pub use normalize::{normalize, normalize_named, RawPointerPayload};
