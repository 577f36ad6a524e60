//! Test RNG — deterministic `DeterministicRng` implementations for tests.

use ladders_core::rng::DeterministicRng;

/// An RNG that returns values from a predetermined sequence. Panics if the
/// sequence is exhausted, which makes an unexpected extra roll (for example
/// an automated turn firing after a reset) fail the test loudly.
#[derive(Debug)]
pub struct SequenceRng {
    values: Vec<u32>,
    index: usize,
}

impl SequenceRng {
    /// Create a new `SequenceRng` with the given values.
    #[must_use]
    pub fn new(values: Vec<u32>) -> Self {
        Self { values, index: 0 }
    }
}

impl DeterministicRng for SequenceRng {
    fn next_u32_range(&mut self, _min: u32, _max: u32) -> u32 {
        let val = self.values[self.index];
        self.index += 1;
        val
    }
}
