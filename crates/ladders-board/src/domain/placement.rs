//! Layout of tokens that share a square.

use serde::Serialize;

use super::grid::{GridCell, to_grid};
use super::square::Square;

/// Horizontal distance between neighbouring tokens, as a fraction of a cell.
pub const TOKEN_SPACING: f64 = 0.3;

/// Offset of the `index`-th of `occupants` tokens from the cell center.
///
/// Offsets are symmetric around zero: a lone token sits in the middle, two
/// tokens sit at `±spacing/2`, and so on.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn token_offset(index: usize, occupants: usize, spacing: f64) -> f64 {
    spacing * (index as f64 - (occupants.saturating_sub(1)) as f64 / 2.0)
}

/// Where to draw one player's token.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TokenPlacement {
    /// The square the player is on.
    pub square: Square,
    /// The cell that square maps to.
    pub cell: GridCell,
    /// Horizontal offset from the cell center.
    pub offset: f64,
}

/// Places every token, returned in the same order as `positions`.
///
/// Tokens on the same square are indexed in the order they appear in
/// `positions`.
#[must_use]
pub fn layout_tokens(positions: &[Square]) -> Vec<TokenPlacement> {
    positions
        .iter()
        .enumerate()
        .map(|(i, &square)| {
            let occupants = positions.iter().filter(|&&p| p == square).count();
            let index = positions[..i].iter().filter(|&&p| p == square).count();
            TokenPlacement {
                square,
                cell: to_grid(square),
                offset: token_offset(index, occupants, TOKEN_SPACING),
            }
        })
        .collect()
}
