//! Domain error types.

use thiserror::Error;

/// Top-level domain error type.
#[derive(Debug, Error)]
pub enum DomainError {
    /// A command was issued in a state that does not allow it.
    #[error("validation error: {0}")]
    Validation(String),

    /// Static configuration (board table, roster) is unusable.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A collaborator (worker task, random source) failed.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}
