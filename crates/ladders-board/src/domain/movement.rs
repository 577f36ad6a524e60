//! Move resolution.

use serde::{Deserialize, Serialize};

use super::square::{DieRoll, Square};
use super::topology::BoardTopology;

/// What happened when a roll was applied to a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    /// Position before the roll.
    pub from_square: Square,
    /// Position after the roll and any snake or ladder.
    pub to_square: Square,
    /// The die face.
    pub rolled: DieRoll,
    /// A snake carried the player down.
    pub crossed_snake: bool,
    /// A ladder carried the player up.
    pub crossed_ladder: bool,
    /// The roll would have passed the finish, so the player stayed put.
    pub overshot: bool,
}

impl MoveOutcome {
    /// The square the die pointed at before any snake or ladder, or `None`
    /// on an overshoot.
    #[must_use]
    pub fn target(&self) -> Option<Square> {
        self.from_square.advance(self.rolled)
    }

    /// Whether this move ends the game.
    #[must_use]
    pub fn is_win(&self) -> bool {
        self.to_square == Square::FINISH
    }
}

/// Applies `roll` to `position`.
///
/// Pure: the caller commits `to_square` to the player.
#[must_use]
pub fn resolve_move(topology: &BoardTopology, position: Square, roll: DieRoll) -> MoveOutcome {
    let Some(target) = position.advance(roll) else {
        return MoveOutcome {
            from_square: position,
            to_square: position,
            rolled: roll,
            crossed_snake: false,
            crossed_ladder: false,
            overshot: true,
        };
    };

    let landed = topology.resolve(target);
    MoveOutcome {
        from_square: position,
        to_square: landed,
        rolled: roll,
        crossed_snake: landed < target,
        crossed_ladder: landed > target,
        overshot: false,
    }
}

impl BoardTopology {
    /// Convenience wrapper around [`resolve_move`].
    #[must_use]
    pub fn resolve_move(&self, position: Square, roll: DieRoll) -> MoveOutcome {
        resolve_move(self, position, roll)
    }

    /// Whether `square` starts a snake or ladder.
    #[must_use]
    pub fn is_special(&self, square: Square) -> bool {
        self.resolve(square) != square
    }
}
