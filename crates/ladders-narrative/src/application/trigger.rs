//! Outbound commentary channel.
//!
//! The orchestrator owns a [`CommentaryTrigger`] and calls
//! [`notify`](CommentaryTrigger::notify) without waiting for anything. The
//! matching [`NarrationInbox`] is drained by the narration worker.

use tokio::sync::mpsc;
use tracing::warn;
use uuid::Uuid;

use crate::domain::events::CommentaryEvent;

/// Messages carried from the orchestrator to the narration worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NarrationMessage {
    /// A fresh session began; anything older is stale.
    SessionStarted {
        /// The new session.
        session_id: Uuid,
    },
    /// A move to narrate.
    Event(CommentaryEvent),
}

/// Sending half of the commentary channel.
#[derive(Debug, Clone)]
pub struct CommentaryTrigger {
    tx: mpsc::UnboundedSender<NarrationMessage>,
}

/// Receiving half of the commentary channel.
#[derive(Debug)]
pub struct NarrationInbox {
    rx: mpsc::UnboundedReceiver<NarrationMessage>,
}

/// Creates a connected trigger and inbox.
#[must_use]
pub fn commentary_channel() -> (CommentaryTrigger, NarrationInbox) {
    let (tx, rx) = mpsc::unbounded_channel();
    (CommentaryTrigger { tx }, NarrationInbox { rx })
}

impl CommentaryTrigger {
    /// Hands a move to the narrator. Never blocks and never fails; if the
    /// worker has gone away the event is dropped with a warning.
    pub fn notify(&self, event: CommentaryEvent) {
        if self.tx.send(NarrationMessage::Event(event)).is_err() {
            warn!("narration worker is not running; commentary dropped");
        }
    }

    /// Announces a new session so queued commentary for older ones is dropped.
    pub fn session_started(&self, session_id: Uuid) {
        if self
            .tx
            .send(NarrationMessage::SessionStarted { session_id })
            .is_err()
        {
            warn!(%session_id, "narration worker is not running");
        }
    }
}

impl NarrationInbox {
    /// Waits for the next message; `None` once every trigger is dropped.
    pub async fn recv(&mut self) -> Option<NarrationMessage> {
        self.rx.recv().await
    }

    /// Returns a message if one is already queued.
    pub fn try_recv(&mut self) -> Option<NarrationMessage> {
        self.rx.try_recv().ok()
    }
}
