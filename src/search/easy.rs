//! Easy tier: one-ply tactics, otherwise a random empty cell
//!
//! Randomness comes from the caller's `Rng`, so a seeded generator gives a
//! reproducible game.

use rand::Rng;

use crate::board::{Board, Mark};
use crate::rules::find_immediate_win;

/// Pick a move for `side`: a winning cell, else a cell that blocks the
/// opponent's win, else a uniformly random empty cell.
///
/// Returns `None` only when the board is full.
pub fn easy_move<R: Rng + ?Sized>(board: &Board, side: Mark, rng: &mut R) -> Option<usize> {
    if let Some(win) = find_immediate_win(board, side) {
        return Some(win);
    }
    if let Some(block) = find_immediate_win(board, side.opponent()) {
        return Some(block);
    }

    let empty = board.empty_cells();
    let n = empty.count() as usize;
    if n == 0 {
        return None;
    }
    empty.iter_ones().nth(rng.random_range(0..n))
}
