//! Snakes & Ladders — Narration bounded context.
//!
//! The turn orchestrator hands every resolved move to a
//! [`CommentaryTrigger`](application::trigger::CommentaryTrigger) and moves
//! on. A [`NarrationWorker`](application::worker::NarrationWorker) drains
//! those events in arrival order, asks a [`Narrator`](application::narrator::Narrator)
//! for a line of commentary and appends the result, or a visible error, to
//! the chat [`Transcript`](domain::transcript::Transcript).

pub mod application;
pub mod domain;
