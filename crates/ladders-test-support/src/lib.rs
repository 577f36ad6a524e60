//! Shared test doubles for the Snakes & Ladders engine.

mod clock;
mod narrator;
mod rng;

pub use clock::FixedClock;
pub use narrator::{FailingNarrator, RecordingNarrator, StalledNarrator};
pub use rng::SequenceRng;
