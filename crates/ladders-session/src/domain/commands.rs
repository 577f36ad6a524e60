//! Commands for the Session context.

use ladders_core::command::Command;
use uuid::Uuid;

/// The human asks to roll.
#[derive(Debug, Clone)]
pub struct RequestMove {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
}

impl Command for RequestMove {
    fn command_type(&self) -> &'static str {
        "session.request_move"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Throw the current game away and start a fresh one.
#[derive(Debug, Clone)]
pub struct ResetGame {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
}

impl Command for ResetGame {
    fn command_type(&self) -> &'static str {
        "session.reset_game"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
