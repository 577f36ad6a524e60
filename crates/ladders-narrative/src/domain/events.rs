//! Events consumed by the Narration context.

use ladders_board::MoveOutcome;
use ladders_core::player::PlayerKind;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A resolved move handed to the narrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentaryEvent {
    /// Session the move belongs to; events from a reset session are dropped.
    pub session_id: Uuid,
    /// Display name of the player who moved.
    pub player_name: String,
    /// Whether the human or the automated opponent moved.
    pub player_kind: PlayerKind,
    /// What the roll did.
    pub outcome: MoveOutcome,
    /// The move ended the game.
    pub is_win: bool,
}
