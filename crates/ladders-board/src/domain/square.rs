//! Squares and die rolls.

use std::fmt;

use ladders_core::error::DomainError;
use ladders_core::rng::DeterministicRng;
use serde::{Deserialize, Serialize};

/// Number of rows (and columns) on the board.
pub const BOARD_DIMENSION: u8 = 10;

/// Number of squares on the board.
pub const CELL_COUNT: u8 = BOARD_DIMENSION * BOARD_DIMENSION;

/// A square on the serpentine path, numbered `1..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Square(u8);

impl Square {
    /// The square every player starts on.
    pub const START: Self = Self(1);

    /// Landing exactly here wins the game.
    pub const FINISH: Self = Self(CELL_COUNT);

    /// Creates a square, returning `None` outside `1..=100`.
    #[must_use]
    pub fn new(value: u8) -> Option<Self> {
        (1..=CELL_COUNT).contains(&value).then_some(Self(value))
    }

    /// Returns the square number.
    #[must_use]
    pub fn value(self) -> u8 {
        self.0
    }

    /// Returns the square `roll` steps ahead, or `None` past the finish.
    #[must_use]
    pub fn advance(self, roll: DieRoll) -> Option<Self> {
        self.0.checked_add(roll.value()).and_then(Self::new)
    }

    /// Iterates every square in path order.
    pub fn all() -> impl Iterator<Item = Self> {
        (1..=CELL_COUNT).map(Self)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u8> for Square {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("square {value} is outside 1..={CELL_COUNT}"))
    }
}

impl From<Square> for u8 {
    fn from(square: Square) -> Self {
        square.0
    }
}

/// The face shown by a single six-sided die.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct DieRoll(u8);

impl DieRoll {
    /// Number of faces on the die.
    pub const FACES: u8 = 6;

    /// Creates a roll, returning `None` outside `1..=6`.
    #[must_use]
    pub fn new(value: u8) -> Option<Self> {
        (1..=Self::FACES).contains(&value).then_some(Self(value))
    }

    /// Rolls the die using the injected RNG.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the RNG yields a value outside
    /// the die's faces.
    pub fn roll(rng: &mut dyn DeterministicRng) -> Result<Self, DomainError> {
        let value = rng.next_u32_range(1, u32::from(Self::FACES));
        u8::try_from(value)
            .ok()
            .and_then(Self::new)
            .ok_or_else(|| {
                DomainError::Infrastructure(format!("random source produced die value {value}"))
            })
    }

    /// Returns the face value.
    #[must_use]
    pub fn value(self) -> u8 {
        self.0
    }
}

impl fmt::Display for DieRoll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u8> for DieRoll {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("die roll {value} is outside 1..=6"))
    }
}

impl From<DieRoll> for u8 {
    fn from(roll: DieRoll) -> Self {
        roll.0
    }
}
