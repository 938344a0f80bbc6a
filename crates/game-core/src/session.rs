//! Game session: the state machine that sequences a directional move into
//! score accrual, tile spawn, and terminal-state evaluation.

use rand::Rng;
use serde::Serialize;

use crate::engine::{self, Board, BoardError, Move, Score};

/// Session lifecycle status. `Won` and `Lost` are terminal until a restart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    Playing,
    Won,
    Lost,
}

/// One running game: the current board plus score bookkeeping.
///
/// Deliberately framework-free: the serving layer adapts this to whatever
/// transport it wants and only ever reads snapshot data back out.
pub struct GameSession {
    board: Board,
    score: Score,
    best_score: Score,
    status: GameStatus,
}

impl GameSession {
    /// Fresh session: a `size` x `size` board with two starting tiles.
    pub fn new<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Result<Self, BoardError> {
        Self::with_best_score(size, 0, rng)
    }

    /// Fresh session seeding the best score from persisted state.
    pub fn with_best_score<R: Rng + ?Sized>(
        size: usize,
        best_score: Score,
        rng: &mut R,
    ) -> Result<Self, BoardError> {
        Ok(GameSession {
            board: engine::initialize(size, rng)?,
            score: 0,
            best_score,
            status: GameStatus::Playing,
        })
    }

    /// Apply one directional move. Returns whether the session changed.
    ///
    /// Rejected outright when the status is not `Playing`. A move that cannot
    /// change the board consumes nothing: no score, no tile spawn, no status
    /// change. A real move accrues score, raises the best score immediately
    /// if surpassed, spawns one random tile, and then evaluates termination
    /// with the win check taking precedence over the loss check.
    pub fn apply_move<R: Rng + ?Sized>(&mut self, direction: Move, rng: &mut R) -> bool {
        if self.status != GameStatus::Playing {
            return false;
        }
        let result = self.board.make_move(direction, rng);
        if !result.moved {
            return false;
        }
        self.score += result.score;
        if self.score > self.best_score {
            self.best_score = self.score;
        }
        self.board = result.board;
        if engine::has_won(&self.board) {
            self.status = GameStatus::Won;
        } else if !engine::can_move(&self.board) {
            self.status = GameStatus::Lost;
        }
        true
    }

    /// Reset to a fresh board, optionally changing the size. Score returns
    /// to zero and the status to `Playing`; the best score is kept. This is
    /// the only way to change the board size or leave a terminal status.
    pub fn restart<R: Rng + ?Sized>(
        &mut self,
        new_size: Option<usize>,
        rng: &mut R,
    ) -> Result<(), BoardError> {
        let size = new_size.unwrap_or(self.board.size());
        self.board = engine::initialize(size, rng)?;
        self.score = 0;
        self.status = GameStatus::Playing;
        Ok(())
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn best_score(&self) -> Score {
        self.best_score
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Side length of the current board.
    pub fn size(&self) -> usize {
        self.board.size()
    }
}
