//! Domain events for the Session context.

use ladders_board::MoveOutcome;
use ladders_core::event::{DomainEvent, EventMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::phase::TurnPhase;

/// Emitted when a session is created, at start-up or on reset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStarted {
    /// The session identifier.
    pub session_id: Uuid,
    /// Player ids, in seat order.
    pub player_ids: Vec<Uuid>,
}

/// Emitted when a roll has been applied to the active player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveResolved {
    /// The session identifier.
    pub session_id: Uuid,
    /// Seat of the player who moved.
    pub player_index: usize,
    /// Id of the player who moved.
    pub player_id: Uuid,
    /// What the roll did.
    pub outcome: MoveOutcome,
}

/// Emitted when play passes to the other seat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnPassed {
    /// The session identifier.
    pub session_id: Uuid,
    /// Seat of the player whose turn it now is.
    pub next_player_index: usize,
    /// Phase the session enters.
    pub phase: TurnPhase,
}

/// Emitted when a player lands exactly on the finishing square.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameWon {
    /// The session identifier.
    pub session_id: Uuid,
    /// Seat of the winner.
    pub winner_index: usize,
    /// Id of the winner.
    pub winner_id: Uuid,
}

/// Event payload variants for the Session context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEventKind {
    /// A session was created.
    SessionStarted(SessionStarted),
    /// A move was resolved.
    MoveResolved(MoveResolved),
    /// The turn passed.
    TurnPassed(TurnPassed),
    /// The game was won.
    GameWon(GameWon),
}

impl SessionEventKind {
    /// The event type name for this payload.
    #[must_use]
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::SessionStarted(_) => "session.session_started",
            Self::MoveResolved(_) => "session.move_resolved",
            Self::TurnPassed(_) => "session.turn_passed",
            Self::GameWon(_) => "session.game_won",
        }
    }
}

/// Domain event envelope for the Session context.
#[derive(Debug, Clone)]
pub struct SessionEvent {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// Event-specific payload.
    pub kind: SessionEventKind,
}

impl DomainEvent for SessionEvent {
    fn event_type(&self) -> &'static str {
        self.kind.event_type()
    }

    fn to_payload(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(&self.kind)
    }

    fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }
}
