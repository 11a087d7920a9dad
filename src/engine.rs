//! Move selection, the single dispatch point over difficulty tiers
//!
//! Every tier first takes an immediate win if one exists, then:
//!
//! 1. **Easy**: block the opponent's immediate win, else a random cell
//! 2. **Medium**: highest single-cell heuristic score
//! 3. **Hard**: alpha-beta search with a per-call transposition table
//!
//! The engine only reads the board. Nothing carries over between calls:
//! the Hard tier builds its searcher fresh each time, and Easy draws from
//! the generator the caller passes in.
//!
//! # Example
//!
//! ```
//! use qubic::board::{Board, Mark};
//! use qubic::engine::{choose_move, Difficulty};
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let mut board = Board::new();
//! for idx in [0, 1, 2] {
//!     board.place(idx, Mark::X).unwrap();
//! }
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! assert_eq!(choose_move(&board, Mark::X, Difficulty::Easy, &mut rng), Some(3));
//! ```

use std::fmt;
use std::time::Instant;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::board::{Board, Mark};
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::rules::find_immediate_win;
use crate::search::{easy_move, greedy_move, SearchResult, Searcher, WIN_SCORE};

/// Strength tier of the automated player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Decode a raw tier tag (0 = Easy, 1 = Medium, 2 = Hard).
    pub fn from_tag(tag: u8) -> Result<Difficulty, EngineError> {
        match tag {
            0 => Ok(Difficulty::Easy),
            1 => Ok(Difficulty::Medium),
            2 => Ok(Difficulty::Hard),
            other => Err(EngineError::UnknownDifficulty(other)),
        }
    }

    #[inline]
    pub fn tag(self) -> u8 {
        match self {
            Difficulty::Easy => 0,
            Difficulty::Medium => 1,
            Difficulty::Hard => 2,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        };
        f.write_str(name)
    }
}

/// Which strategy produced the move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchType {
    /// Completes a line on the spot
    ImmediateWin,
    /// Easy tier: forced block or random cell
    Random,
    /// Medium tier: best cell score
    Heuristic,
    /// Hard tier: alpha-beta search
    AlphaBeta,
    /// Board is full
    NoMove,
}

/// Result of a move search with detailed statistics.
#[derive(Debug, Clone)]
pub struct MoveResult {
    /// Chosen cell, `None` only on a full board
    pub best_move: Option<usize>,
    /// Score from the mover's point of view (tier-specific scale)
    pub score: i32,
    pub difficulty: Difficulty,
    pub search_type: SearchType,
    /// Time taken in milliseconds
    pub time_ms: u64,
    /// Number of nodes searched
    pub nodes: u64,
}

impl MoveResult {
    #[inline]
    fn immediate_win(idx: usize, difficulty: Difficulty, time_ms: u64) -> Self {
        Self {
            best_move: Some(idx),
            score: WIN_SCORE - 1,
            difficulty,
            search_type: SearchType::ImmediateWin,
            time_ms,
            nodes: 1,
        }
    }

    #[inline]
    fn no_move(difficulty: Difficulty, time_ms: u64) -> Self {
        Self {
            best_move: None,
            score: 0,
            difficulty,
            search_type: SearchType::NoMove,
            time_ms,
            nodes: 0,
        }
    }

    #[inline]
    fn from_alphabeta(result: SearchResult, time_ms: u64) -> Self {
        Self {
            best_move: result.best_move,
            score: result.score,
            difficulty: Difficulty::Hard,
            search_type: SearchType::AlphaBeta,
            time_ms,
            nodes: result.nodes,
        }
    }
}

/// Tier dispatcher configured once from [`EngineConfig`].
///
/// # Example
///
/// ```
/// use qubic::board::{Board, Mark};
/// use qubic::config::EngineConfig;
/// use qubic::engine::{AIEngine, Difficulty, SearchType};
///
/// let engine = AIEngine::with_config(EngineConfig { hard_depth: 2, ..EngineConfig::default() });
/// let mut board = Board::new();
/// board.place(21, Mark::X).unwrap();
///
/// let mut rng = rand::rng();
/// let result = engine.choose_move_with_stats(&board, Mark::O, Difficulty::Hard, &mut rng);
/// assert_eq!(result.search_type, SearchType::AlphaBeta);
/// assert!(board.is_empty(result.best_move.unwrap()));
/// ```
#[derive(Debug, Clone, Default)]
pub struct AIEngine {
    config: EngineConfig,
}

impl AIEngine {
    /// Engine with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        Self { config }
    }

    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Pick a move for `side`. See [`AIEngine::choose_move_with_stats`].
    #[must_use]
    pub fn choose_move<R: Rng + ?Sized>(
        &self,
        board: &Board,
        side: Mark,
        difficulty: Difficulty,
        rng: &mut R,
    ) -> Option<usize> {
        self.choose_move_with_stats(board, side, difficulty, rng).best_move
    }

    /// Pick a move for `side` and report how it was found.
    ///
    /// `rng` is only drawn from by the Easy tier when it has neither a win
    /// nor a block to play.
    pub fn choose_move_with_stats<R: Rng + ?Sized>(
        &self,
        board: &Board,
        side: Mark,
        difficulty: Difficulty,
        rng: &mut R,
    ) -> MoveResult {
        let start = Instant::now();

        let result = if board.is_full() {
            MoveResult::no_move(difficulty, 0)
        } else if let Some(win) = find_immediate_win(board, side) {
            MoveResult::immediate_win(win, difficulty, elapsed_ms(start))
        } else {
            match difficulty {
                Difficulty::Easy => MoveResult {
                    best_move: easy_move(board, side, rng),
                    score: 0,
                    difficulty,
                    search_type: SearchType::Random,
                    time_ms: elapsed_ms(start),
                    nodes: 1,
                },
                Difficulty::Medium => {
                    let best_move = greedy_move(board, side);
                    MoveResult {
                        best_move,
                        score: best_move.map_or(0, |idx| crate::eval::score_cell(board, idx, side)),
                        difficulty,
                        search_type: SearchType::Heuristic,
                        time_ms: elapsed_ms(start),
                        nodes: board.empty_cells().count() as u64,
                    }
                }
                Difficulty::Hard => {
                    let mut searcher = Searcher::new(self.config.tt_size_mb, self.config.hard_depth);
                    let result = searcher.search(board, side);
                    MoveResult::from_alphabeta(result, elapsed_ms(start))
                }
            }
        };

        log::debug!(
            "{} {:?} for {:?}: move {:?}, score {}, {} nodes, {}ms",
            result.difficulty,
            result.search_type,
            side,
            result.best_move,
            result.score,
            result.nodes,
            result.time_ms
        );
        result
    }
}

#[inline]
fn elapsed_ms(start: Instant) -> u64 {
    start.elapsed().as_millis() as u64
}

/// Pick a move with the default engine configuration.
///
/// Returns `None` only when the board is full.
#[must_use]
pub fn choose_move<R: Rng + ?Sized>(
    board: &Board,
    side: Mark,
    difficulty: Difficulty,
    rng: &mut R,
) -> Option<usize> {
    AIEngine::new().choose_move(board, side, difficulty, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{completes_line_at, evaluate, find_immediate_win, GameOutcome};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn board_with(x: &[usize], o: &[usize]) -> Board {
        let mut board = Board::new();
        for &i in x {
            board.place(i, Mark::X).unwrap();
        }
        for &i in o {
            board.place(i, Mark::O).unwrap();
        }
        board
    }

    fn fast_engine() -> AIEngine {
        AIEngine::with_config(EngineConfig {
            hard_depth: 3,
            tt_size_mb: 1,
            ..EngineConfig::default()
        })
    }

    #[test]
    fn test_difficulty_tags() {
        for d in Difficulty::ALL {
            assert_eq!(Difficulty::from_tag(d.tag()).unwrap(), d);
        }
        assert!(matches!(
            Difficulty::from_tag(3),
            Err(EngineError::UnknownDifficulty(3))
        ));
        assert_eq!(Difficulty::default(), Difficulty::Medium);
        assert_eq!(Difficulty::Hard.to_string(), "Hard");
    }

    #[test]
    fn test_concrete_scenario() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut board = Board::new();
        assert_eq!(evaluate(&board), GameOutcome::Ongoing);

        let first = choose_move(&board, Mark::X, Difficulty::Easy, &mut rng).unwrap();
        assert!(first < 64);

        for idx in [0, 1, 2] {
            board.place(idx, Mark::X).unwrap();
        }
        let mov = choose_move(&board, Mark::X, Difficulty::Easy, &mut rng);
        assert_eq!(mov, Some(3));

        board.place(3, Mark::X).unwrap();
        assert_eq!(
            evaluate(&board),
            GameOutcome::WinFor { mark: Mark::X, line: 0b1111 }
        );
    }

    #[test]
    fn test_all_tiers_take_win() {
        let engine = fast_engine();
        let board = board_with(&[0, 1, 2], &[12, 28, 44]);
        let mut rng = StdRng::seed_from_u64(0);
        for d in Difficulty::ALL {
            let result = engine.choose_move_with_stats(&board, Mark::X, d, &mut rng);
            assert_eq!(result.best_move, Some(3), "{}", d);
            assert_eq!(result.search_type, SearchType::ImmediateWin);
        }
    }

    #[test]
    fn test_all_tiers_block() {
        let engine = fast_engine();
        let board = board_with(&[5, 26], &[0, 16, 32]);
        let mut rng = StdRng::seed_from_u64(0);
        for d in Difficulty::ALL {
            assert_eq!(engine.choose_move(&board, Mark::X, d, &mut rng), Some(48), "{}", d);
        }
    }

    #[test]
    fn test_full_board_no_move() {
        let engine = fast_engine();
        let board = Board::from_masks(0xe3b5_b645_4adb_8168, 0x1c4a_49ba_b524_7e97).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        for d in Difficulty::ALL {
            let result = engine.choose_move_with_stats(&board, Mark::X, d, &mut rng);
            assert_eq!(result.best_move, None);
            assert_eq!(result.search_type, SearchType::NoMove);
        }
    }

    #[test]
    fn test_deterministic_per_tier() {
        let engine = fast_engine();
        let board = board_with(&[0, 21, 42], &[5, 63]);
        for d in Difficulty::ALL {
            let a = engine.choose_move(&board, Mark::O, d, &mut StdRng::seed_from_u64(11));
            let b = engine.choose_move(&board, Mark::O, d, &mut StdRng::seed_from_u64(11));
            assert_eq!(a, b, "{}", d);
        }
    }

    #[test]
    fn test_hard_forced_win() {
        // X to move: 0 opens threats at 3 and 48 at once
        let engine = fast_engine();
        let board = board_with(&[1, 2, 16, 32], &[60, 61, 27]);
        let mut rng = StdRng::seed_from_u64(0);
        let result = engine.choose_move_with_stats(&board, Mark::X, Difficulty::Hard, &mut rng);
        assert!(crate::search::is_decisive(result.score));
        assert!(result.score > 0);

        // Whatever O answers, X completes a line next move
        let mov = result.best_move.unwrap();
        let after = board.with_mark(mov, Mark::X);
        assert!(find_immediate_win(&board, Mark::X).is_none());
        for reply in after.empty_cells().iter_ones() {
            let next = after.with_mark(reply, Mark::O);
            assert!(!completes_line_at(&next, reply, Mark::O));
            assert!(
                find_immediate_win(&next, Mark::X).is_some(),
                "O escapes with {} after {}",
                reply,
                mov
            );
        }
    }

    #[test]
    fn test_engine_does_not_mutate_board() {
        let engine = fast_engine();
        let board = board_with(&[0, 21], &[42]);
        let before = board;
        let mut rng = StdRng::seed_from_u64(5);
        for d in Difficulty::ALL {
            let _ = engine.choose_move(&board, Mark::O, d, &mut rng);
        }
        assert_eq!(board, before);
    }
}
