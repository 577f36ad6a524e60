//! Command abstractions.

use uuid::Uuid;

/// A request to change a game session. Handlers log the command type and
/// stamp every event they produce with the correlation ID.
pub trait Command: Send + Sync + std::fmt::Debug {
    /// Dotted type name, e.g. `session.request_move`.
    fn command_type(&self) -> &'static str;

    /// Correlation ID carried into every resulting event.
    fn correlation_id(&self) -> Uuid;
}
