//! Application layer for the Narration context.

pub mod completion;
pub mod narrator;
pub mod trigger;
pub mod worker;
