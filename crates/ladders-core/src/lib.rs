//! Ladders Core — shared domain abstractions.
//!
//! This crate defines the traits and small value types every other crate in
//! the workspace depends on: time, randomness, errors, events and the two
//! kinds of participant. It contains no game rules and no I/O.

pub mod aggregate;
pub mod clock;
pub mod command;
pub mod error;
pub mod event;
pub mod player;
pub mod rng;
