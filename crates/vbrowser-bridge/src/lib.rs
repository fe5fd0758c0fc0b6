//! vbrowser-bridge library crate.
//!
//! Connects a remote browser session to a display surface in a 3D scene:
//! pointer events from the scene go out to the session, video frames from the
//! session come back onto the surface's texture.
//!
//! # Architecture (clean architecture)
//!
//! ```text
//! Input source ──InputEvent──▶ ┌───────────────────────┐ ──RemoteInputEvent──▶ Remote session
//!                              │  application/          │
//! Display surface ◀──texture── │    SessionBridge       │ ◀──FrameSample─────── Remote session
//!                              └───────────────────────┘
//!   domain/          BridgeConfig, SessionEvent (pure types)
//!   application/     SessionBridge + collaborator traits
//!   infrastructure/  clocks, software texture, recording session, config file, replay scripts
//! ```
//!
//! # Layer rules
//!
//! - `domain` has no I/O and no async.
//! - `application` depends on `domain` and `vbrowser-core` only.
//! - `infrastructure` implements the application traits and does the I/O.

/// Domain layer: configuration and lifecycle event types.
pub mod domain;

/// Application layer: the session bridge and the traits it is wired through.
pub mod application;

/// Infrastructure layer: concrete collaborators and file loading.
pub mod infrastructure;
