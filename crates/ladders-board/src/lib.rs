//! Snakes & Ladders — Board bounded context.
//!
//! Owns everything that is a pure function of the board: square numbering
//! and its serpentine mapping onto the 10×10 grid, the snake and ladder
//! table with its validation rules, resolution of a single die roll, and
//! the layout of tokens that share a square.

pub mod application;
pub mod domain;

pub use application::query_handlers::{BoardView, LinkView, SquareView, board_view};

pub use domain::grid::{GridCell, to_grid};
pub use domain::movement::{MoveOutcome, resolve_move};
pub use domain::placement::{TOKEN_SPACING, TokenPlacement, layout_tokens, token_offset};
pub use domain::square::{BOARD_DIMENSION, CELL_COUNT, DieRoll, Square};
pub use domain::topology::{BoardTopology, Ladder, Snake, TopologyError};
