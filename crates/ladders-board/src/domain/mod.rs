//! Domain layer for the Board context.

pub mod grid;
pub mod movement;
pub mod placement;
pub mod square;
pub mod topology;
