use std::sync::{Arc, Mutex};

use game_core::engine::{BoardError, Move};
use game_core::session::GameSession;
use rand::rngs::StdRng;
use tracing::warn;

use crate::store::BestScoreStore;

/// Board sizes the application exposes; the engine itself allows any N >= 2.
pub const MIN_BOARD_SIZE: usize = 3;
pub const MAX_BOARD_SIZE: usize = 6;

/// One browser-facing game: session, RNG, and the persisted best score.
///
/// Every transition runs to completion under the surrounding lock, so moves
/// are processed strictly one at a time and the store write attaches to the
/// move that caused it.
pub struct GameService {
    session: GameSession,
    store: BestScoreStore,
    rng: StdRng,
}

impl GameService {
    pub fn new(session: GameSession, store: BestScoreStore, rng: StdRng) -> Self {
        GameService {
            session,
            store,
            rng,
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Apply a directional move and persist the best score if it improved.
    /// Persistence failures are logged and never fail the move itself.
    pub fn apply_move(&mut self, direction: Move) {
        let previous_best = self.session.best_score();
        if self.session.apply_move(direction, &mut self.rng) {
            let best = self.session.best_score();
            if best > previous_best {
                if let Err(err) = self.store.record_best_score(best) {
                    warn!("failed to persist best score" = %err);
                }
            }
        }
    }

    pub fn restart(&mut self, new_size: Option<usize>) -> Result<(), BoardError> {
        self.session.restart(new_size, &mut self.rng)
    }
}

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<Mutex<GameService>>,
}

impl AppState {
    pub fn new(service: GameService) -> Self {
        AppState {
            service: Arc::new(Mutex::new(service)),
        }
    }
}
