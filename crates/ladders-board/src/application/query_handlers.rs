//! Query handlers for the Board context.
//!
//! The board view is the static half of what a renderer needs: every
//! square with its grid cell, and the snake and ladder table with the cells
//! of both ends.

use serde::Serialize;

use crate::domain::grid::{GridCell, to_grid};
use crate::domain::square::{BOARD_DIMENSION, CELL_COUNT, Square};
use crate::domain::topology::BoardTopology;

/// One numbered square and where it is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SquareView {
    /// Square number.
    pub square: Square,
    /// Grid cell.
    pub cell: GridCell,
}

/// A snake or ladder with the cells of both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LinkView {
    /// Square that triggers the link.
    pub from: Square,
    /// Square the player ends up on.
    pub to: Square,
    /// Cell of `from`.
    pub from_cell: GridCell,
    /// Cell of `to`.
    pub to_cell: GridCell,
}

impl LinkView {
    fn between(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            from_cell: to_grid(from),
            to_cell: to_grid(to),
        }
    }
}

/// Read-only view of the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardView {
    /// Squares per row and column.
    pub dimension: u8,
    /// Number of squares.
    pub cell_count: u8,
    /// Every square in order.
    pub squares: Vec<SquareView>,
    /// Snakes, head to tail.
    pub snakes: Vec<LinkView>,
    /// Ladders, base to top.
    pub ladders: Vec<LinkView>,
}

/// Builds the view of `topology`.
#[must_use]
pub fn board_view(topology: &BoardTopology) -> BoardView {
    BoardView {
        dimension: BOARD_DIMENSION,
        cell_count: CELL_COUNT,
        squares: Square::all()
            .map(|square| SquareView {
                square,
                cell: to_grid(square),
            })
            .collect(),
        snakes: topology
            .snakes()
            .iter()
            .map(|s| LinkView::between(s.head, s.tail))
            .collect(),
        ladders: topology
            .ladders()
            .iter()
            .map(|l| LinkView::between(l.base, l.top))
            .collect(),
    }
}
