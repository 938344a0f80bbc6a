use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::ops;

/// Value held by a single cell. 0 marks an empty cell; anything else is a
/// power-of-two tile.
pub type Cell = u32;
/// Points accrued from merges.
pub type Score = u64;

/// First tile value that counts as a win.
pub const WINNING_TILE: Cell = 2048;
/// Smallest board the engine accepts. The application layer narrows this
/// further (3..=6); the engine only rules out degenerate grids.
pub const MIN_BOARD_SIZE: usize = 2;

/// A direction to move/merge tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    /// All four directions, in a fixed scan order.
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];
}

/// Errors raised by checked board construction.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum BoardError {
    #[error("board size {0} is below the minimum of {MIN_BOARD_SIZE}")]
    InvalidSize(usize),
    #[error("expected a square grid, got {rows} rows with a row of width {width}")]
    NotSquare { rows: usize, width: usize },
}

/// Square sliding-tile board, stored row-major.
///
/// Boards are immutable values: every operation produces a new `Board` from
/// an old one. Equality compares cells, which is also how the engine decides
/// whether a move changed anything.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    size: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// An all-empty board of `size` x `size` cells.
    ///
    /// ```
    /// use game_core::engine::Board;
    /// let b = Board::empty(4).unwrap();
    /// assert_eq!(b.size(), 4);
    /// assert!(Board::empty(1).is_err());
    /// ```
    pub fn empty(size: usize) -> Result<Self, BoardError> {
        if size < MIN_BOARD_SIZE {
            return Err(BoardError::InvalidSize(size));
        }
        Ok(Board {
            size,
            cells: vec![0; size * size],
        })
    }

    /// Build a board from explicit rows, validating squareness.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Result<Self, BoardError> {
        let size = rows.len();
        if size < MIN_BOARD_SIZE {
            return Err(BoardError::InvalidSize(size));
        }
        if let Some(row) = rows.iter().find(|row| row.len() != size) {
            return Err(BoardError::NotSquare {
                rows: size,
                width: row.len(),
            });
        }
        Ok(Board {
            size,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    /// Internal constructor for ops that already hold a valid cell vector.
    pub(crate) fn from_cells(size: usize, cells: Vec<Cell>) -> Self {
        debug_assert_eq!(cells.len(), size * size);
        Board { size, cells }
    }

    /// Side length of the square grid.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Value at (row, col).
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row * self.size + col]
    }

    /// Iterate over the rows as slices, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.size)
    }

    /// Copy the grid out as nested rows, for render snapshots.
    pub fn to_rows(&self) -> Vec<Vec<Cell>> {
        self.rows().map(|row| row.to_vec()).collect()
    }

    /// Return the result of sliding/merging tiles in `dir` (no random insert).
    ///
    /// ```
    /// use game_core::engine::{Board, Move};
    /// let b = Board::from_rows(vec![vec![2, 2], vec![0, 0]]).unwrap();
    /// let result = b.shift(Move::Left);
    /// assert_eq!(result.score, 4);
    /// assert!(result.moved);
    /// ```
    #[inline]
    pub fn shift(&self, dir: Move) -> MoveResult {
        ops::shift(self, dir)
    }

    /// Insert a random 2 (90%) or 4 (10%) tile into a uniformly-random empty
    /// cell, using the provided RNG. A full board is returned unchanged.
    ///
    /// Deterministic example using a seeded RNG:
    /// ```
    /// use game_core::engine::Board;
    /// use rand::{rngs::StdRng, SeedableRng};
    /// let mut rng = StdRng::seed_from_u64(123);
    /// let b = Board::empty(4).unwrap();
    /// let b = b.with_random_tile(&mut rng).with_random_tile(&mut rng);
    /// assert_eq!(b.rows().flatten().filter(|&&c| c != 0).count(), 2);
    /// ```
    pub fn with_random_tile<R: Rng + ?Sized>(&self, rng: &mut R) -> Board {
        let empties = ops::empty_cells(self);
        if empties.is_empty() {
            return self.clone();
        }
        let (row, col) = empties[rng.gen_range(0..empties.len())];
        let value = if rng.gen_range(0..10) < 9 { 2 } else { 4 };
        let mut next = self.clone();
        next.cells[row * self.size + col] = value;
        next
    }

    /// Convenience: like `with_random_tile` but uses thread-local RNG.
    pub fn with_random_tile_thread(&self) -> Board {
        let mut rng = rand::thread_rng();
        self.with_random_tile(&mut rng)
    }

    /// Perform a move, then insert a random tile if the move changed the
    /// board, using the provided RNG. A no-op move spawns nothing.
    pub fn make_move<R: Rng + ?Sized>(&self, direction: Move, rng: &mut R) -> MoveResult {
        let mut result = self.shift(direction);
        if result.moved {
            result.board = result.board.with_random_tile(rng);
        }
        result
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            let cells: Vec<_> = row.iter().map(ops::format_val).collect();
            writeln!(f, "\n{}", cells.join("|"))?;
            write!(f, "{}", "-".repeat(8 * self.size - 1))?;
        }
        writeln!(f)
    }
}

/// The outcome of attempting a move in one direction.
///
/// `moved == false` means the move was a no-op: the caller must not spawn a
/// tile, accrue score, or consume a turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveResult {
    pub board: Board,
    pub score: Score,
    pub moved: bool,
}

/// A non-empty cell as seen by the renderer.
///
/// Recomputed from scratch on every snapshot; `key` is a diffing hint for
/// the presentation layer, not a persistent tile identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TilePosition {
    pub row: usize,
    pub col: usize,
    pub value: Cell,
}

impl TilePosition {
    /// Render key combining position and value, e.g. `"1-3-64"`.
    pub fn key(&self) -> String {
        format!("{}-{}-{}", self.row, self.col, self.value)
    }
}
