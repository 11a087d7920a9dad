//! Medium tier: best single-cell heuristic score, no lookahead

use crate::board::{Board, Mark};
use crate::eval::score_cells;

/// Highest-scoring empty cell for `side`, ties broken by lowest index.
///
/// Returns `None` only when the board is full.
#[must_use]
pub fn greedy_move(board: &Board, side: Mark) -> Option<usize> {
    let scores = score_cells(board, side);
    let mut best: Option<(usize, i32)> = None;

    for idx in board.empty_cells().iter_ones() {
        match best {
            Some((_, score)) if scores[idx] <= score => {}
            _ => best = Some((idx, scores[idx])),
        }
    }

    best.map(|(idx, _)| idx)
}
