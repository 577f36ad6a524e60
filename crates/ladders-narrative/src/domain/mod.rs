//! Domain layer for the Narration context.

pub mod events;
pub mod prompt;
pub mod transcript;
