//! Application layer for the Board context.

pub mod query_handlers;
