//! A session provider that records forwarded events instead of reaching a
//! real remote browser.
//!
//! Every event a [`RecordingSession`] accepts is pushed onto an unbounded
//! tokio channel.  The replay binary drains that channel to stdout; tests use
//! it to see exactly what would have been sent.  Once the receiver is dropped
//! the session reports [`SessionError::Closed`].

use async_trait::async_trait;
use tokio::sync::mpsc;
use tracing::{debug, info};
use uuid::Uuid;
use vbrowser_core::RemoteInputEvent;

use crate::application::session_bridge::{
    RemoteSession, RemoteSessionProvider, SessionContext, SessionError,
};

/// One forwarded event and the session it was sent on.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedEvent {
    pub session_id: Uuid,
    pub event: RemoteInputEvent,
}

pub struct RecordingSessionProvider {
    tx: mpsc::UnboundedSender<RecordedEvent>,
}

impl RecordingSessionProvider {
    /// Creates a provider and the receiver its sessions write into.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<RecordedEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

#[async_trait]
impl RemoteSessionProvider for RecordingSessionProvider {
    async fn open(&self, context: &SessionContext) -> Result<Box<dyn RemoteSession>, SessionError> {
        if self.tx.is_closed() {
            return Err(SessionError::Closed);
        }
        let cfg = context.config();
        info!(
            session_id = %context.id(),
            embed_url = %cfg.embed_url,
            volume = cfg.volume,
            video_paused = cfg.video_paused,
            delegate_keyboard = cfg.delegate_keyboard,
            "recording session opened"
        );
        Ok(Box::new(RecordingSession {
            session_id: context.id(),
            tx: self.tx.clone(),
        }))
    }
}

struct RecordingSession {
    session_id: Uuid,
    tx: mpsc::UnboundedSender<RecordedEvent>,
}

impl RemoteSession for RecordingSession {
    fn send_event(&self, event: &RemoteInputEvent) -> Result<(), SessionError> {
        debug!(session_id = %self.session_id, event = event.type_name(), "recorded");
        self.tx
            .send(RecordedEvent {
                session_id: self.session_id,
                event: event.clone(),
            })
            .map_err(|_| SessionError::Closed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::domain::config::SessionConfig;

    fn context() -> SessionContext {
        SessionContext::new(Arc::new(SessionConfig::new("https://vm.example.com/e")))
    }

    #[tokio::test]
    async fn test_sent_events_arrive_on_receiver() {
        // Arrange
        let (provider, mut rx) = RecordingSessionProvider::new();
        let ctx = context();
        let session = provider.open(&ctx).await.unwrap();
        let event = RemoteInputEvent::Click { x: 0.1, y: 0.9, button: 0 };

        // Act
        session.send_event(&event).unwrap();

        // Assert
        let recorded = rx.recv().await.expect("event recorded");
        assert_eq!(recorded, RecordedEvent { session_id: ctx.id(), event });
    }

    #[tokio::test]
    async fn test_send_after_receiver_dropped_is_closed() {
        let (provider, rx) = RecordingSessionProvider::new();
        let session = provider.open(&context()).await.unwrap();
        drop(rx);

        let err = session.send_event(&RemoteInputEvent::Wheel { delta_y: 1.0 }).unwrap_err();
        assert!(matches!(err, SessionError::Closed));
    }

    #[tokio::test]
    async fn test_open_after_receiver_dropped_fails() {
        let (provider, rx) = RecordingSessionProvider::new();
        drop(rx);
        assert!(matches!(provider.open(&context()).await, Err(SessionError::Closed)));
    }
}
