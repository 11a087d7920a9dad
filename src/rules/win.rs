//! Win and draw detection
//!
//! A mark wins by occupying all four cells of any cataloged line. A full
//! cube with no completed line is a draw.

use crate::board::{Bitboard, Board, Mark};

use super::lines::all_lines;

/// Result of evaluating a position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Ongoing,
    Draw,
    /// `line` is the mask of the completed line, for highlighting
    WinFor { mark: Mark, line: u64 },
}

impl GameOutcome {
    #[inline]
    pub fn is_over(self) -> bool {
        !matches!(self, GameOutcome::Ongoing)
    }

    #[inline]
    pub fn winner(self) -> Option<Mark> {
        match self {
            GameOutcome::WinFor { mark, .. } => Some(mark),
            _ => None,
        }
    }

    #[inline]
    pub fn winning_line(self) -> Option<u64> {
        match self {
            GameOutcome::WinFor { line, .. } => Some(line),
            _ => None,
        }
    }
}

/// Evaluate a position.
///
/// Lines are tested in catalog order and the first completed one is
/// reported, so the answer is reproducible when several lines complete at
/// once.
///
/// # Example
///
/// ```
/// use qubic::board::{Board, Mark};
/// use qubic::rules::{evaluate, GameOutcome};
///
/// let mut board = Board::new();
/// assert_eq!(evaluate(&board), GameOutcome::Ongoing);
///
/// for idx in 0..4 {
///     board.place(idx, Mark::X).unwrap();
/// }
/// assert_eq!(evaluate(&board), GameOutcome::WinFor { mark: Mark::X, line: 0b1111 });
/// ```
#[must_use]
pub fn evaluate(board: &Board) -> GameOutcome {
    let x = board.marks(Mark::X);
    let o = board.marks(Mark::O);

    for mask in all_lines().masks() {
        if x.contains_all(mask) {
            return GameOutcome::WinFor { mark: Mark::X, line: mask };
        }
        if o.contains_all(mask) {
            return GameOutcome::WinFor { mark: Mark::O, line: mask };
        }
    }

    if board.is_full() {
        GameOutcome::Draw
    } else {
        GameOutcome::Ongoing
    }
}

/// Mask of the completed line, or 0 when nobody has won
#[must_use]
pub fn winning_mask(board: &Board) -> u64 {
    evaluate(board).winning_line().unwrap_or(0)
}

/// Check if `mark` owns any complete line
#[must_use]
pub fn has_line(board: &Board, mark: Mark) -> bool {
    let mine = board.marks(mark);
    all_lines().masks().any(|mask| mine.contains_all(mask))
}

/// Check whether the mark at `idx` sits on a completed line. Only the
/// lines through `idx` are inspected.
#[inline]
#[must_use]
pub fn completes_line_at(board: &Board, idx: usize, mark: Mark) -> bool {
    let table = all_lines();
    let mine = board.marks(mark);
    table
        .lines_through(idx)
        .iter()
        .any(|&i| table.get(i).is_some_and(|line| mine.contains_all(line.mask())))
}

/// Empty cells that would complete a line for `mark` if it played there.
#[must_use]
pub fn winning_cells(board: &Board, mark: Mark) -> Bitboard {
    let mine = board.marks(mark);
    let theirs = board.marks(mark.opponent());
    let mut cells = 0u64;

    for mask in all_lines().masks() {
        if mine.count_in(mask) == 3 && theirs.count_in(mask) == 0 {
            cells |= mask & !mine.bits();
        }
    }

    Bitboard::from_bits(cells)
}

/// Lowest-index cell that wins immediately for `mark`
#[must_use]
pub fn find_immediate_win(board: &Board, mark: Mark) -> Option<usize> {
    winning_cells(board, mark).iter_ones().next()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Cell, TOTAL_CELLS};
    use crate::rules::LINE_COUNT;

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

    /// Full board, 32 marks each, with no complete line for either side.
    fn drawn_board() -> Board {
        Board::from_masks(0xe3b5_b645_4adb_8168, 0x1c4a_49ba_b524_7e97).unwrap()
    }

    #[test]
    fn test_empty_board_ongoing() {
        assert_eq!(evaluate(&Board::new()), GameOutcome::Ongoing);
    }

    #[test]
    fn test_axis_win() {
        let board = board_with(&[0, 1, 2, 3], &[16, 17, 18]);
        assert_eq!(
            evaluate(&board),
            GameOutcome::WinFor { mark: Mark::X, line: 0b1111 }
        );
        assert_eq!(winning_mask(&board), 0b1111);
    }

    #[test]
    fn test_space_diagonal_win() {
        let cells: Vec<usize> = (0..4).map(|d| Cell::new(d, d, d).to_index()).collect();
        let board = board_with(&[1, 2, 5], &cells);
        let outcome = evaluate(&board);
        let expected: u64 = cells.iter().map(|&c| 1u64 << c).sum();
        assert_eq!(outcome, GameOutcome::WinFor { mark: Mark::O, line: expected });
    }

    #[test]
    fn test_every_line_detected() {
        for line in all_lines().iter() {
            let board = Board::from_masks(line.mask(), 0).unwrap();
            assert_eq!(
                evaluate(&board),
                GameOutcome::WinFor { mark: Mark::X, line: line.mask() }
            );
            let board = Board::from_masks(0, line.mask()).unwrap();
            assert_eq!(evaluate(&board).winner(), Some(Mark::O));
        }
    }

    #[test]
    fn test_three_in_line_is_ongoing() {
        let board = board_with(&[0, 1, 2], &[4, 5]);
        assert_eq!(evaluate(&board), GameOutcome::Ongoing);
    }

    #[test]
    fn test_draw_detected() {
        let board = drawn_board();
        assert!(board.is_full());
        assert_eq!(board.marks(Mark::X).count(), 32);
        assert!(!has_line(&board, Mark::X));
        assert!(!has_line(&board, Mark::O));
        assert_eq!(evaluate(&board), GameOutcome::Draw);
        assert_eq!(winning_mask(&board), 0);
    }

    #[test]
    fn test_full_board_with_line_is_win() {
        let (x, o) = drawn_board().masks();
        // Hand the first x-axis row to X
        let board = Board::from_masks(x | 0b1111, o & !0b1111).unwrap();
        assert!(board.is_full());
        assert_eq!(
            evaluate(&board),
            GameOutcome::WinFor { mark: Mark::X, line: 0b1111 }
        );
    }

    #[test]
    fn test_lowest_catalog_line_reported() {
        let row = 0b1111u64;
        let column = 0x0001_0001_0001_0001u64;
        let table = all_lines();
        let row_idx = table.iter().position(|l| l.mask() == row).unwrap();
        let column_idx = table.iter().position(|l| l.mask() == column).unwrap();
        assert!(row_idx < column_idx);

        // Both lines complete at once through cell 0
        let board = Board::from_masks(row | column, 0).unwrap();
        assert_eq!(winning_mask(&board), row);
    }

    #[test]
    fn test_winning_cells() {
        let board = board_with(&[0, 1, 2, 20, 40], &[60]);
        let cells: Vec<usize> = winning_cells(&board, Mark::X).iter_ones().collect();
        // {0,20,40,60} would also be three-of-four, but O holds 60
        assert_eq!(cells, vec![3]);
        assert_eq!(find_immediate_win(&board, Mark::X), Some(3));
        assert_eq!(find_immediate_win(&board, Mark::O), None);
    }

    #[test]
    fn test_blocked_line_is_not_winning() {
        let board = board_with(&[0, 1, 2], &[3]);
        assert!(winning_cells(&board, Mark::X).is_empty());
    }

    #[test]
    fn test_completes_line_at() {
        let board = board_with(&[0, 1, 2, 3], &[]);
        assert!(completes_line_at(&board, 2, Mark::X));
        assert!(!completes_line_at(&board, 2, Mark::O));
        let board = board_with(&[0, 1, 2], &[]);
        assert!(!completes_line_at(&board, 2, Mark::X));
    }

    #[test]
    fn test_constants_consistent() {
        assert_eq!(all_lines().len(), LINE_COUNT);
        assert_eq!(TOTAL_CELLS, 64);
    }
}
