//! Session-eviction events emitted by the API boundary.
//!
//! The 401 policy is cross-cutting: any API call can discover that the
//! stored credential is no longer valid. Rather than letting network code
//! reach into store state, the client broadcasts an event and the session
//! store resets itself.

use tokio::sync::broadcast;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthEvent {
    /// The server rejected the stored credential; durable entries are gone.
    SessionEvicted,
}

/// Broadcast fan-out for [`AuthEvent`]. Sending with no subscribers is fine.
#[derive(Debug, Clone)]
pub struct AuthEventSender {
    tx: broadcast::Sender<AuthEvent>,
}

impl AuthEventSender {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(16);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<AuthEvent> {
        self.tx.subscribe()
    }

    pub fn send(&self, event: AuthEvent) {
        // Err only means nobody is listening right now.
        let _ = self.tx.send(event);
    }
}

impl Default for AuthEventSender {
    fn default() -> Self {
        Self::new()
    }
}
