//! Narration worker.
//!
//! Drains the commentary inbox one event at a time so transcript lines
//! appear in the order moves happened. While a narration is in flight the
//! worker keeps reading the inbox: new events are queued behind it, and a
//! session change drops the in-flight request along with everything queued
//! for the old session.
//!
//! Because the inbox is drained into the backlog while a request is pending,
//! the backlog is where a slow completion service makes commentary pile up.
//! It holds at most [`BACKLOG_LIMIT`] events; past that the oldest queued
//! event is discarded.

use std::collections::VecDeque;
use std::sync::Arc;

use ladders_core::clock::Clock;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::narrator::{NarrationError, Narrator};
use super::trigger::{NarrationInbox, NarrationMessage};
use crate::domain::events::CommentaryEvent;
use crate::domain::prompt::CommentaryPrompt;
use crate::domain::transcript::{Speaker, Transcript, TranscriptEntry};

/// Most commentary events queued behind the one being narrated.
pub const BACKLOG_LIMIT: usize = 16;

/// Background task that turns commentary events into transcript lines.
pub struct NarrationWorker {
    inbox: NarrationInbox,
    narrator: Arc<dyn Narrator>,
    transcript: Transcript,
    clock: Arc<dyn Clock>,
    current_session: Option<Uuid>,
    backlog: VecDeque<CommentaryEvent>,
}

impl NarrationWorker {
    /// Creates a worker.
    #[must_use]
    pub fn new(
        inbox: NarrationInbox,
        narrator: Arc<dyn Narrator>,
        transcript: Transcript,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            inbox,
            narrator,
            transcript,
            clock,
            current_session: None,
            backlog: VecDeque::new(),
        }
    }

    /// Main worker loop. Returns once every trigger has been dropped and the
    /// backlog is empty.
    pub async fn run(mut self) {
        loop {
            let event = if let Some(event) = self.backlog.pop_front() {
                event
            } else {
                match self.inbox.recv().await {
                    Some(NarrationMessage::SessionStarted { session_id }) => {
                        self.start_session(session_id);
                        continue;
                    }
                    Some(NarrationMessage::Event(event)) => event,
                    None => break,
                }
            };

            if self.is_stale(&event) {
                debug!(session_id = %event.session_id, "dropping commentary for old session");
                continue;
            }
            self.narrate(event).await;
        }
        debug!("narration worker stopped");
    }

    async fn narrate(&mut self, event: CommentaryEvent) {
        let prompt = CommentaryPrompt::from_event(&event);
        let narrator = Arc::clone(&self.narrator);
        let pending = narrator.narrate(&prompt);
        tokio::pin!(pending);

        loop {
            tokio::select! {
                result = &mut pending => {
                    self.record(&event, result);
                    return;
                }
                message = self.inbox.recv() => match message {
                    Some(NarrationMessage::Event(next)) => self.enqueue(next),
                    Some(NarrationMessage::SessionStarted { session_id }) => {
                        self.start_session(session_id);
                        if self.is_stale(&event) {
                            debug!("session reset; in-flight commentary cancelled");
                            return;
                        }
                    }
                    None => {
                        let result = (&mut pending).await;
                        self.record(&event, result);
                        return;
                    }
                },
            }
        }
    }

    fn enqueue(&mut self, event: CommentaryEvent) {
        if self.backlog.len() >= BACKLOG_LIMIT {
            if let Some(dropped) = self.backlog.pop_front() {
                warn!(
                    session_id = %dropped.session_id,
                    limit = BACKLOG_LIMIT,
                    "commentary backlog full; oldest event dropped"
                );
            }
        }
        self.backlog.push_back(event);
    }

    fn start_session(&mut self, session_id: Uuid) {
        if self.current_session == Some(session_id) {
            return;
        }
        info!(%session_id, "narration following new session");
        self.current_session = Some(session_id);
        self.backlog.retain(|event| event.session_id == session_id);
        self.transcript.clear();
    }

    fn is_stale(&self, event: &CommentaryEvent) -> bool {
        self.current_session
            .is_some_and(|session_id| session_id != event.session_id)
    }

    fn record(&self, event: &CommentaryEvent, result: Result<String, NarrationError>) {
        let (speaker, text) = match result {
            Ok(text) => (Speaker::Narrator, text),
            Err(err) => {
                warn!(error = %err, "commentary unavailable");
                (Speaker::System, format!("Narrator unavailable: {err}"))
            }
        };
        self.transcript.push(TranscriptEntry {
            speaker,
            text,
            session_id: event.session_id,
            occurred_at: self.clock.now(),
        });
    }
}
