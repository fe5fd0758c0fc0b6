//! Domain layer for vbrowser-bridge.
//!
//! Pure types with no I/O: the configuration schema and the lifecycle events
//! a remote session reports.  Reading files, opening sessions and logging
//! setup all live in outer layers.

pub mod config;
pub mod lifecycle;

pub use config::{
    BridgeConfig, ConfigError, InteractionConfig, SessionConfig, SurfaceConfig, MAX_TEXTURE_SIDE,
};
pub use lifecycle::{CloseDeadline, ConnectionState, DisconnectKind, SessionEvent, TimeoutKind};
