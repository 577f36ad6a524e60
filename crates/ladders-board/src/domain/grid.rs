//! Coordinate mapping between squares and grid cells.
//!
//! Rows are numbered top to bottom on screen, so square 1 sits in row 9.
//! Counting visual rows from the bottom, even rows run left to right and odd
//! rows run right to left. This is the only mapping renderers may use.

use serde::{Deserialize, Serialize};

use super::square::{BOARD_DIMENSION, Square};

/// A cell of the 10×10 grid, `row` and `col` each in `0..=9`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawCell", into = "RawCell")]
pub struct GridCell {
    row: u8,
    col: u8,
}

/// Wire shape of a [`GridCell`], checked on the way in.
#[derive(Serialize, Deserialize)]
struct RawCell {
    row: u8,
    col: u8,
}

impl GridCell {
    /// Creates a cell, returning `None` if either coordinate is off the grid.
    #[must_use]
    pub fn new(row: u8, col: u8) -> Option<Self> {
        (row < BOARD_DIMENSION && col < BOARD_DIMENSION).then_some(Self { row, col })
    }

    /// Screen row, 0 at the top.
    #[must_use]
    pub fn row(self) -> u8 {
        self.row
    }

    /// Screen column, 0 at the left.
    #[must_use]
    pub fn col(self) -> u8 {
        self.col
    }

    /// Inverse of [`to_grid`].
    #[must_use]
    pub fn square(self) -> Square {
        let last = BOARD_DIMENSION - 1;
        let visual_row = last - self.row;
        let along = if visual_row % 2 == 1 {
            last - self.col
        } else {
            self.col
        };
        // Construction keeps both coordinates below 10.
        Square::new(visual_row * BOARD_DIMENSION + along + 1).unwrap_or(Square::START)
    }
}

/// Maps a square onto its grid cell.
#[must_use]
pub fn to_grid(square: Square) -> GridCell {
    let last = BOARD_DIMENSION - 1;
    let index = square.value() - 1;
    let row = last - index / BOARD_DIMENSION;
    let col = index % BOARD_DIMENSION;
    let col = if (last - row) % 2 == 1 { last - col } else { col };
    GridCell { row, col }
}

impl TryFrom<RawCell> for GridCell {
    type Error = String;

    fn try_from(raw: RawCell) -> Result<Self, Self::Error> {
        Self::new(raw.row, raw.col)
            .ok_or_else(|| format!("cell ({}, {}) is off the grid", raw.row, raw.col))
    }
}

impl From<GridCell> for RawCell {
    fn from(cell: GridCell) -> Self {
        Self {
            row: cell.row,
            col: cell.col,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn square(n: u8) -> Square {
        Square::new(n).unwrap()
    }

    #[test]
    fn test_start_is_bottom_left() {
        assert_eq!(to_grid(Square::START), GridCell { row: 9, col: 0 });
    }

    #[test]
    fn test_finish_is_top_left() {
        assert_eq!(to_grid(Square::FINISH), GridCell { row: 0, col: 0 });
    }

    #[test]
    fn test_second_row_runs_right_to_left() {
        assert_eq!(to_grid(square(10)), GridCell { row: 9, col: 9 });
        assert_eq!(to_grid(square(11)), GridCell { row: 8, col: 9 });
        assert_eq!(to_grid(square(20)), GridCell { row: 8, col: 0 });
        assert_eq!(to_grid(square(21)), GridCell { row: 7, col: 0 });
    }

    #[test]
    fn test_mapping_is_a_bijection() {
        let cells: HashSet<GridCell> = Square::all().map(to_grid).collect();
        assert_eq!(cells.len(), 100);

        for row in 0..10 {
            for col in 0..10 {
                assert!(cells.contains(&GridCell { row, col }));
            }
        }
    }

    #[test]
    fn test_cell_square_inverts_to_grid() {
        for sq in Square::all() {
            assert_eq!(to_grid(sq).square(), sq);
        }
    }

    #[test]
    fn test_cell_new_rejects_off_grid() {
        assert!(GridCell::new(10, 0).is_none());
        assert!(GridCell::new(0, 10).is_none());
        assert_eq!(GridCell::new(3, 4), Some(GridCell { row: 3, col: 4 }));
    }

    #[test]
    fn test_off_grid_cell_does_not_deserialize() {
        let result = serde_json::from_str::<GridCell>(r#"{"row":12,"col":0}"#);

        assert!(result.is_err());
    }

    #[test]
    fn test_cell_serde_keeps_row_and_col_shape() {
        // Arrange
        let cell = to_grid(square(11));

        // Act
        let json = serde_json::to_value(cell).unwrap();
        let back: GridCell = serde_json::from_value(json.clone()).unwrap();

        // Assert
        assert_eq!(json, serde_json::json!({ "row": 8, "col": 9 }));
        assert_eq!(back.row(), 8);
        assert_eq!(back.col(), 9);
        assert_eq!(back.square(), square(11));
    }
}
