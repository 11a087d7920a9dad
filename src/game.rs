//! Caller-side game model: board ownership and turn tracking
//!
//! The engine never mutates a board; this is the one place that does.

use crate::board::{check_index, Board, Cell, Mark};
use crate::error::EngineError;
use crate::rules::{evaluate, GameOutcome};

/// A game in progress. X always moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Game {
    board: Board,
    current: Mark,
    last_move: Option<usize>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            current: Mark::X,
            last_move: None,
        }
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mark whose turn it is
    #[inline]
    pub fn current(&self) -> Mark {
        self.current
    }

    #[inline]
    pub fn last_move(&self) -> Option<usize> {
        self.last_move
    }

    #[inline]
    pub fn outcome(&self) -> GameOutcome {
        evaluate(&self.board)
    }

    #[inline]
    pub fn is_over(&self) -> bool {
        self.outcome().is_over()
    }

    /// Place the current mark at `(x, y, z)` and pass the turn.
    pub fn make_move(&mut self, x: i32, y: i32, z: i32) -> Result<GameOutcome, EngineError> {
        let cell = Cell::try_new(x, y, z)?;
        self.play(cell.to_index())
    }

    /// Place the current mark at cell `idx` and pass the turn.
    ///
    /// Fails without touching the board when the game is over, the index
    /// is out of range, or the cell is taken.
    pub fn play(&mut self, idx: usize) -> Result<GameOutcome, EngineError> {
        if self.is_over() {
            return Err(EngineError::GameOver);
        }
        let idx = check_index(idx)?;
        self.board.place(idx, self.current)?;
        self.last_move = Some(idx);
        self.current = self.current.opponent();
        Ok(self.outcome())
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
