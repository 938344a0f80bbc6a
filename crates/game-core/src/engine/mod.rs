//! Engine module: variable-size sliding-tile board and the pure move ops.
//! Public API stays small and ergonomic.
//!
//! - `Board` is a square row-major grid with useful methods.
//! - Free functions mirror the methods when convenient (e.g., `shift`).
//! - Every operation returns a new `Board`; nothing mutates in place.

mod ops;
pub mod state;

pub use state::{
    Board, BoardError, Cell, Move, MoveResult, Score, TilePosition, MIN_BOARD_SIZE, WINNING_TILE,
};

pub use ops::{
    can_move, empty_cells, has_won, initialize, insert_random_tile, move_down, move_left,
    move_right, move_up, shift, slide_and_merge_line, tiles_with_positions,
};
