//! Snakes & Ladders — Session & Turn bounded context.
//!
//! Owns the single source of truth for a game in progress, the
//! [`GameSession`](domain::aggregates::GameSession), and the
//! [`TurnOrchestrator`](application::orchestrator::TurnOrchestrator) that
//! drives it: human moves arrive as commands, the automated opponent's moves
//! are scheduled on timers, and every resolved move is handed to the
//! commentary trigger without waiting for it.

pub mod application;
pub mod domain;
