//! Shared application state.

use std::sync::Arc;

use ladders_board::BoardTopology;
use ladders_narrative::domain::transcript::Transcript;
use ladders_session::application::orchestrator::OrchestratorHandle;

/// Application state shared across all request handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Front door to the turn orchestrator.
    pub orchestrator: OrchestratorHandle,
    /// The validated board table.
    pub topology: Arc<BoardTopology>,
    /// Commentary written by the narration worker.
    pub transcript: Transcript,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(
        orchestrator: OrchestratorHandle,
        topology: Arc<BoardTopology>,
        transcript: Transcript,
    ) -> Self {
        Self {
            orchestrator,
            topology,
            transcript,
        }
    }
}
