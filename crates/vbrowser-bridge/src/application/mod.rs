//! Application layer for vbrowser-bridge.
//!
//! # Responsibilities
//!
//! - Opening a remote session through a provider and owning it while it lives
//! - Routing scene pointer events through normalization and throttling to the
//!   session
//! - Presenting session frames on the display surface's texture
//! - Defining the traits the outer world implements (`RemoteSession`,
//!   `RemoteSessionProvider`, `DisplaySurface`, `Clock`)
//!
//! # What does NOT belong here?
//!
//! - Session transports, HTTP calls, authentication (provider implementations)
//! - Reading files or parsing CLI arguments

pub mod session_bridge;

pub use session_bridge::{
    BridgeError, Clock, DisplaySurface, ForwardOutcome, RemoteSession, RemoteSessionProvider,
    SessionBridge, SessionContext, SessionError,
};
