//! Defines an abstraction over the event sending mechanism.

use super::events::SessionEvent;
use std::sync::mpsc::Sender;

/// A trait that abstracts the sending of session events.
/// This is "fire-and-forget" and doesn't return a result, simplifying its use.
pub trait EventProxy {
    fn send_event(&self, event: SessionEvent);
}

/// A channel-backed proxy. A dropped receiver is logged, not treated as fatal.
impl EventProxy for Sender<SessionEvent> {
    fn send_event(&self, event: SessionEvent) {
        if let Err(e) = self.send(event) {
            tracing::warn!("Failed to send session event: {}", e);
        }
    }
}

/// Discards every event, for callers that only poll the state.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullProxy;

impl EventProxy for NullProxy {
    fn send_event(&self, _event: SessionEvent) {}
}
