//! Qubic: 4x4x4 tic-tac-toe engine
//!
//! Two marks, X and O, take turns filling the 64 cells of a cube. The first
//! to own all four cells of any of the 76 straight lines wins: rows along
//! each axis, diagonals of every axis-aligned slice, and the four space
//! diagonals.
//!
//! # Architecture
//!
//! - [`board`]: cells, masks and the two-mask board
//! - [`rules`]: the line catalog and win/draw detection
//! - [`eval`]: line-occupancy heuristics
//! - [`search`]: one strategy per difficulty tier
//! - [`engine`]: difficulty dispatch and search statistics
//! - [`game`]: turn tracking for callers
//! - [`offload`]: request/response move service (worker thread or direct)
//! - [`ui`]: egui front end
//!
//! # Quick Start
//!
//! ```
//! use qubic::{choose_move, evaluate, Difficulty, Game, GameOutcome};
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let mut game = Game::new();
//! let mut rng = StdRng::seed_from_u64(1);
//!
//! while !game.is_over() {
//!     let mov = choose_move(game.board(), game.current(), Difficulty::Medium, &mut rng)
//!         .expect("board not full");
//!     game.play(mov).unwrap();
//! }
//! assert_ne!(evaluate(game.board()), GameOutcome::Ongoing);
//! ```
//!
//! # Board Linearization
//!
//! Cell `(x, y, z)` has index `x + 4y + 16z`. Both masks of a [`Board`] and
//! every move index use it.

pub mod board;
pub mod config;
pub mod engine;
pub mod error;
pub mod eval;
pub mod game;
pub mod offload;
pub mod rules;
pub mod search;
pub mod ui;

// Re-export commonly used types for convenience
pub use board::{Board, Cell, Mark, BOARD_SIZE, TOTAL_CELLS};
pub use config::{AppConfig, EngineConfig};
pub use engine::{choose_move, AIEngine, Difficulty, MoveResult, SearchType};
pub use error::{ConfigError, EngineError};
pub use game::Game;
pub use rules::{all_lines, evaluate, GameOutcome};
