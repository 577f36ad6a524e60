//! Application layer for the Session context.

pub mod orchestrator;
pub mod query_handlers;
