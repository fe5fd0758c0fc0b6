//! Lifecycle notifications reported by a remote session.
//!
//! The bridge does not act on these beyond logging them; they are modelled so
//! that providers can hand them over in a typed form and replay scripts can
//! describe them.
//!
//! ```json
//! {"event":"connectionStateChanged","state":"reconnecting"}
//! {"event":"disconnected","kind":"inactive"}
//! {"event":"closeWarning","kind":"absolute","deadline":{"delay":30000,"closeDate":"2026-10-16T12:00:00Z"}}
//! {"event":"cursor","x":0.4,"y":0.6,"userId":"u-2"}
//! ```

use serde::{Deserialize, Serialize};

/// State of the session's video stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionState {
    Connecting,
    Playing,
    Reconnecting,
}

/// Why the session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisconnectKind {
    /// The virtual browser was shut down on request.
    Request,
    /// The inactivity timeout fired.
    Inactive,
    /// The absolute session timeout fired.
    Absolute,
    /// This user was kicked from the session.
    Kick,
}

/// Which timeout a close warning refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeoutKind {
    Inactive,
    Absolute,
}

/// When a pending timeout will close the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloseDeadline {
    /// Milliseconds until the timeout fires.
    #[serde(rename = "delay")]
    pub delay_ms: u64,
    /// RFC 3339 timestamp of the close.
    #[serde(rename = "closeDate")]
    pub close_date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum SessionEvent {
    ConnectionStateChanged {
        state: ConnectionState,
    },
    Disconnected {
        kind: DisconnectKind,
    },
    /// A timeout passed its warning threshold (`deadline` set) or was reset
    /// (`deadline` absent).
    CloseWarning {
        kind: TimeoutKind,
        #[serde(default)]
        deadline: Option<CloseDeadline>,
    },
    /// Another participant moved their cursor over the remote browser.
    Cursor {
        x: f64,
        y: f64,
        #[serde(rename = "userId")]
        user_id: String,
    },
}

// ── Tests ─────────────────────────────────────────────────────────────────────
