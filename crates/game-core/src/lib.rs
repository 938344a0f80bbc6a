//! game-core: a sliding-tile 2048 engine and game session.
//!
//! This crate provides:
//! - A size-agnostic `Board` with the pure move operations (`engine` module)
//! - A `GameSession` state machine that sequences move, score accrual, tile
//!   spawn, and terminal-state checks (`session` module)
//!
//! Quick start:
//! ```
//! use game_core::engine::Move;
//! use game_core::session::GameSession;
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! // Deterministic session with a seeded RNG
//! let mut rng = StdRng::seed_from_u64(42);
//! let mut session = GameSession::new(4, &mut rng).unwrap();
//! session.apply_move(Move::Left, &mut rng);
//! assert_eq!(session.board().size(), 4);
//! ```
//!
//! Note: For convenience, there are also free functions mirroring the `Board`
//! methods (e.g., `engine::shift`, `engine::insert_random_tile`) that use
//! thread-local RNG where relevant. Prefer the methods when you need
//! determinism.
pub mod engine;
pub mod session;
