//! Participant kinds shared by the session and narration contexts.

use serde::{Deserialize, Serialize};

/// Who controls a seat at the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerKind {
    /// Moves are requested through the API.
    Human,
    /// Moves are scheduled by the turn orchestrator.
    Automated,
}

impl PlayerKind {
    /// Returns `true` for the automated opponent.
    #[must_use]
    pub fn is_automated(self) -> bool {
        matches!(self, Self::Automated)
    }
}
