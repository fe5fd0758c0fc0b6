//! SessionBridge: wires a remote browser session to a display surface.
//!
//! One bridge serves one display surface.  Each call to
//! [`SessionBridge::connect`] creates a fresh [`SessionContext`] and resets the
//! throttler and frame presenter, so nothing leaks from one session into the
//! next.
//!
//! # Input path
//!
//! ```text
//! InputEvent ─▶ normalize ─▶ session present? ─▶ throttle ─▶ RemoteSession::send_event
//!                 │ None          │ no               │ drop
//!                 ▼               ▼                  ▼
//!              Ignored         NoSession          Throttled
//! ```
//!
//! None of the early exits are errors.  Only a failing send is reported as
//! [`BridgeError::Send`], and it is not retried.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, error, info, trace, warn};
use uuid::Uuid;
use vbrowser_core::{
    normalize, FramePresenter, FrameSample, FrameTarget, InputEvent, InputThrottler,
    PresentOutcome, PresentationState, RemoteInputEvent, SurfaceDimensions, SurfaceTransform,
};

use crate::domain::config::{BridgeConfig, SessionConfig};
use crate::domain::lifecycle::SessionEvent;

// ── Errors ────────────────────────────────────────────────────────────────────

/// Failures reported by a remote session or its provider.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("remote session is closed")]
    Closed,
    #[error("remote session timed out after {0} ms")]
    Timeout(u64),
    #[error("remote session rejected the request: {0}")]
    Rejected(String),
    #[error("remote session transport error: {0}")]
    Transport(String),
}

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("failed to open remote session: {0}")]
    Open(#[source] SessionError),

    #[error("failed to send {event_type} to remote session: {source}")]
    Send {
        event_type: &'static str,
        #[source]
        source: SessionError,
    },
}

// ── Collaborator traits ───────────────────────────────────────────────────────

/// An open remote browser session.
pub trait RemoteSession: Send {
    /// Forwards one input event to the remote browser.
    fn send_event(&self, event: &RemoteInputEvent) -> Result<(), SessionError>;
}

/// Opens remote sessions.  Session negotiation and authentication live behind
/// this trait.
#[async_trait]
pub trait RemoteSessionProvider: Send + Sync {
    async fn open(&self, context: &SessionContext) -> Result<Box<dyn RemoteSession>, SessionError>;
}

/// The scene object the remote browser is displayed on.
pub trait DisplaySurface {
    type Texture: FrameTarget;

    /// The surface's current local → world matrix.
    fn world_transform(&self) -> SurfaceTransform;

    fn dimensions(&self) -> SurfaceDimensions;

    fn texture_mut(&mut self) -> &mut Self::Texture;
}

/// Millisecond time source used for throttling.
pub trait Clock: Send + Sync {
    fn now_millis(&self) -> u64;
}

// ── Session context ───────────────────────────────────────────────────────────

/// Per-session state handed to the provider: an id for correlating logs and
/// the opaque session settings.
#[derive(Debug, Clone)]
pub struct SessionContext {
    id: Uuid,
    config: Arc<SessionConfig>,
}

impl SessionContext {
    pub fn new(config: Arc<SessionConfig>) -> Self {
        Self {
            id: Uuid::new_v4(),
            config,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }
}

/// What happened to one input event.
#[derive(Debug, Clone, PartialEq)]
pub enum ForwardOutcome {
    Sent(RemoteInputEvent),
    /// The event had nothing to send (pointer missed the surface).
    Ignored,
    /// No session is attached yet, or it was closed.
    NoSession,
    /// Dropped by the throttle window.
    Throttled,
}

struct ActiveSession {
    context: SessionContext,
    remote: Box<dyn RemoteSession>,
}

// ── Bridge ────────────────────────────────────────────────────────────────────

pub struct SessionBridge<S: DisplaySurface> {
    surface: S,
    session_config: Arc<SessionConfig>,
    clock: Arc<dyn Clock>,
    throttler: InputThrottler,
    presenter: FramePresenter,
    active: Option<ActiveSession>,
}

impl<S: DisplaySurface> SessionBridge<S> {
    pub fn new(surface: S, config: &BridgeConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            surface,
            session_config: Arc::new(config.session.clone()),
            clock,
            throttler: InputThrottler::with_window(config.interaction.throttle_window_ms),
            presenter: FramePresenter::new(),
            active: None,
        }
    }

    /// Opens a new session and attaches it, replacing any current one.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Open`] if the provider fails.  The bridge is
    /// left without a session in that case.
    pub async fn connect(&mut self, provider: &dyn RemoteSessionProvider) -> Result<Uuid, BridgeError> {
        if let Some(previous) = self.active.take() {
            info!(session_id = %previous.context.id(), "replacing remote session");
        }
        self.throttler.reset();
        self.presenter.reset();

        let context = SessionContext::new(Arc::clone(&self.session_config));
        info!(
            session_id = %context.id(),
            embed_url = %context.config().embed_url,
            "opening remote session"
        );

        match provider.open(&context).await {
            Ok(remote) => {
                let id = context.id();
                self.active = Some(ActiveSession { context, remote });
                info!(session_id = %id, "remote session attached");
                Ok(id)
            }
            Err(e) => {
                error!(session_id = %context.id(), "failed to open remote session: {e}");
                Err(BridgeError::Open(e))
            }
        }
    }

    /// Handles one pointer event from the scene.
    ///
    /// The surface transform is read fresh for every event.  Only events that
    /// reach the send step consume a throttle slot.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Send`] if the session fails to accept the event.
    pub fn handle_input(&mut self, event: &InputEvent) -> Result<ForwardOutcome, BridgeError> {
        let transform = self.surface.world_transform();
        let dims = self.surface.dimensions();

        let Some(remote) = normalize(event, &transform, dims) else {
            trace!(event = event.kind().name(), "event has no surface hit; ignored");
            return Ok(ForwardOutcome::Ignored);
        };

        let Some(active) = self.active.as_ref() else {
            trace!(event = event.kind().name(), "no remote session; event dropped");
            return Ok(ForwardOutcome::NoSession);
        };

        let now = self.clock.now_millis();
        if !self.throttler.admit(event.class(), now) {
            trace!(event = event.kind().name(), now_ms = now, "throttled");
            return Ok(ForwardOutcome::Throttled);
        }

        match active.remote.send_event(&remote) {
            Ok(()) => {
                trace!(session_id = %active.context.id(), event = remote.type_name(), "sent");
                Ok(ForwardOutcome::Sent(remote))
            }
            Err(source) => {
                warn!(
                    session_id = %active.context.id(),
                    event = remote.type_name(),
                    "send failed: {source}"
                );
                Err(BridgeError::Send {
                    event_type: remote.type_name(),
                    source,
                })
            }
        }
    }

    /// Presents one frame from the session on the surface's texture.
    ///
    /// Returns `None` when no session is attached: frames still in flight from
    /// a closed session are discarded.
    pub fn on_frame(
        &mut self,
        frame: FrameSample<<S::Texture as FrameTarget>::Image>,
    ) -> Option<PresentOutcome> {
        if self.active.is_none() {
            trace!("frame arrived without a session; discarded");
            return None;
        }
        Some(self.presenter.present(frame, self.surface.texture_mut()))
    }

    /// Logs a lifecycle notification from the session.
    pub fn on_session_event(&self, event: &SessionEvent) {
        let session_id = self.active.as_ref().map(|a| a.context.id().to_string());
        let session_id = session_id.as_deref().unwrap_or("none");

        match event {
            SessionEvent::ConnectionStateChanged { state } => {
                info!(session_id, ?state, "connection state changed");
            }
            SessionEvent::Disconnected { kind } => {
                warn!(session_id, ?kind, "remote session disconnected");
            }
            SessionEvent::CloseWarning {
                kind,
                deadline: Some(deadline),
            } => {
                warn!(
                    session_id,
                    ?kind,
                    delay_ms = deadline.delay_ms,
                    close_date = %deadline.close_date,
                    "remote session will close"
                );
            }
            SessionEvent::CloseWarning { kind, deadline: None } => {
                info!(session_id, ?kind, "close warning cleared");
            }
            SessionEvent::Cursor { x, y, user_id } => {
                trace!(session_id, user_id = %user_id, x, y, "remote cursor");
            }
        }
    }

    /// Detaches the current session.
    ///
    /// After this no input reaches the old session and no frame reaches the
    /// texture until the next [`connect`](Self::connect).
    pub fn close(&mut self) -> Option<Uuid> {
        let closed = self.active.take()?;
        self.throttler.reset();
        self.presenter.reset();
        debug!(session_id = %closed.context.id(), "remote session detached");
        Some(closed.context.id())
    }

    pub fn is_connected(&self) -> bool {
        self.active.is_some()
    }

    pub fn context(&self) -> Option<&SessionContext> {
        self.active.as_ref().map(|a| &a.context)
    }

    pub fn presentation(&self) -> &PresentationState {
        self.presenter.state()
    }

    pub fn throttler(&self) -> &InputThrottler {
        &self.throttler
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access for the scene, e.g. to move the surface.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
