//! Heuristic evaluation for 4x4x4 positions
//!
//! Two views of the same line counts:
//! - [`evaluate`] scores a whole position for the search leaves
//! - [`score_cells`] scores every empty cell as a candidate move, used for
//!   the Medium tier and for move ordering in the Hard tier

use crate::board::{Board, Mark, TOTAL_CELLS};
use crate::rules::all_lines;

use super::patterns::{LineScore, BLOCK, BUILD, OPEN_LINE};

/// Evaluate the board from the perspective of `mark`.
///
/// Symmetric for negamax: `evaluate(b, X) == -evaluate(b, O)`.
/// Completed lines are not handled here; the search detects them first.
#[must_use]
pub fn evaluate(board: &Board, mark: Mark) -> i32 {
    let mine = board.marks(mark);
    let theirs = board.marks(mark.opponent());

    let mut score = 0;
    let mut my_threats = 0u64;
    let mut their_threats = 0u64;

    for mask in all_lines().masks() {
        let own = mine.count_in(mask) as usize;
        let opp = theirs.count_in(mask) as usize;

        match (own, opp) {
            (0, 0) => {}
            (k, 0) if k < 4 => {
                score += OPEN_LINE[k];
                if k == 3 {
                    my_threats |= mask & !mine.bits();
                }
            }
            (0, k) if k < 4 => {
                score -= OPEN_LINE[k];
                if k == 3 {
                    their_threats |= mask & !theirs.bits();
                }
            }
            _ => {}
        }
    }

    if my_threats.count_ones() >= 2 {
        score += LineScore::FORK;
    }
    if their_threats.count_ones() >= 2 {
        score -= LineScore::FORK;
    }

    score
}

/// Score every empty cell as a move for `mark`. Occupied cells score
/// `i32::MIN`.
///
/// Each line is read once and its weight is credited to its empty cells:
/// own three-of-four lines make that cell an immediate win, opponent
/// three-of-four lines make it an immediate block.
#[must_use]
pub fn score_cells(board: &Board, mark: Mark) -> [i32; TOTAL_CELLS] {
    let mine = board.marks(mark);
    let theirs = board.marks(mark.opponent());
    let empty = board.empty_cells();
    let mut scores = [0i32; TOTAL_CELLS];

    for line in all_lines().iter() {
        let mask = line.mask();
        let own = mine.count_in(mask) as usize;
        let opp = theirs.count_in(mask) as usize;

        let weight = match (own, opp) {
            (3, 0) => LineScore::IMMEDIATE_WIN,
            (k, 0) if k < 3 => BUILD[k],
            (0, 3) => LineScore::IMMEDIATE_BLOCK,
            (0, k) if k < 3 => BLOCK[k],
            _ => 0,
        };
        if weight == 0 {
            continue;
        }

        for idx in line.cells() {
            if empty.get(idx) {
                scores[idx] += weight;
            }
        }
    }

    for (idx, score) in scores.iter_mut().enumerate() {
        if !empty.get(idx) {
            *score = i32::MIN;
        }
    }

    scores
}

/// Score a single empty cell as a move for `mark`.
#[must_use]
pub fn score_cell(board: &Board, idx: usize, mark: Mark) -> i32 {
    if !board.is_empty(idx) {
        return i32::MIN;
    }
    let table = all_lines();
    let mine = board.marks(mark);
    let theirs = board.marks(mark.opponent());

    table
        .lines_through(idx)
        .iter()
        .filter_map(|&i| table.get(i))
        .map(|line| {
            let own = mine.count_in(line.mask()) as usize;
            let opp = theirs.count_in(line.mask()) as usize;
            match (own, opp) {
                (3, 0) => LineScore::IMMEDIATE_WIN,
                (k, 0) if k < 3 => BUILD[k],
                (0, 3) => LineScore::IMMEDIATE_BLOCK,
                (0, k) if k < 3 => BLOCK[k],
                _ => 0,
            }
        })
        .sum()
}
