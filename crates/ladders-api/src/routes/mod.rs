//! Route modules.

pub mod board;
pub mod commentary;
pub mod game;
pub mod health;
