//! Domain layer for the Session context.

pub mod aggregates;
pub mod commands;
pub mod events;
pub mod phase;
pub mod players;
