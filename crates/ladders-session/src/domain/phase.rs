//! Turn phases.

use serde::{Deserialize, Serialize};

/// Where the turn state machine is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnPhase {
    /// Waiting for the human to ask for a roll.
    AwaitingHumanMove,
    /// A move is in flight; nothing else may start.
    ResolvingMove,
    /// The opponent's roll is scheduled.
    AutomatedTurnPending,
    /// Someone reached the finishing square. Only a reset leaves this phase.
    GameOver,
}
