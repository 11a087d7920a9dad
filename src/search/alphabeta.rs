//! Alpha-Beta search for the Hard tier
//!
//! Negamax with alpha-beta pruning to a fixed depth, with iterative
//! deepening to seed move ordering through the transposition table.
//!
//! # Features
//!
//! - Wins score `WIN - ply`: faster wins and slower losses are preferred
//! - Immediate-win cutoff at every node
//! - Forced replies: facing exactly one opponent threat, only the block is
//!   searched; facing two or more, the node is a known loss
//! - Move ordering: TT move, killer moves, then cell heuristic
//!
//! The search reads the board it is given and never changes it. All search
//! state (TT, killers, counters) lives in the `Searcher` and is dropped with
//! it, so two searchers given the same input return the same move.
//!
//! # Example
//!
//! ```
//! use qubic::board::{Board, Mark};
//! use qubic::search::Searcher;
//!
//! let mut board = Board::new();
//! for idx in [0, 1, 2] {
//!     board.place(idx, Mark::X).unwrap();
//! }
//! board.place(21, Mark::O).unwrap();
//!
//! let mut searcher = Searcher::new(1, 3);
//! let result = searcher.search(&board, Mark::X);
//! assert_eq!(result.best_move, Some(3));
//! ```

use crate::board::{Board, Mark, TOTAL_CELLS};
use crate::eval::{evaluate, score_cells, LineScore};
use crate::rules::{completes_line_at, winning_cells};

use super::tt::{EntryType, PositionKey, TranspositionTable};

/// Score of a completed line at the root
pub const WIN_SCORE: i32 = LineScore::WIN;

/// Infinity score for alpha-beta bounds
const INF: i32 = WIN_SCORE + 1;

/// Scores at or beyond this magnitude are forced results
const WIN_THRESHOLD: i32 = WIN_SCORE - TOTAL_CELLS as i32 - 1;

/// Killer move slots per ply
const KILLERS: usize = 2;

/// Search statistics for diagnostics and tuning.
#[derive(Debug, Clone, Default)]
pub struct SearchStats {
    /// Total beta cutoffs (fail-high)
    pub beta_cutoffs: u64,
    /// Beta cutoffs on the first move tried (measures move ordering quality)
    pub first_move_cutoffs: u64,
    /// Total TT probes
    pub tt_probes: u64,
    /// TT probes that returned a usable score
    pub tt_score_hits: u64,
}

impl SearchStats {
    /// First-move cutoff rate in percent
    pub fn first_move_rate(&self) -> f64 {
        if self.beta_cutoffs == 0 {
            0.0
        } else {
            self.first_move_cutoffs as f64 / self.beta_cutoffs as f64 * 100.0
        }
    }
}

/// Search result containing the best move found and associated statistics.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Best move found; `None` only on a full board
    pub best_move: Option<usize>,
    /// Score of the best move from the mover's point of view
    pub score: i32,
    /// Depth completed in iterative deepening
    pub depth: u8,
    /// Total nodes searched
    pub nodes: u64,
    pub stats: SearchStats,
}

/// True when `score` encodes a forced win or loss
#[inline]
pub fn is_decisive(score: i32) -> bool {
    score.abs() >= WIN_THRESHOLD
}

/// Mate scores are stored relative to the node, not the root.
#[inline]
fn score_to_tt(score: i32, ply: u8) -> i32 {
    if score >= WIN_THRESHOLD {
        score + i32::from(ply)
    } else if score <= -WIN_THRESHOLD {
        score - i32::from(ply)
    } else {
        score
    }
}

#[inline]
fn score_from_tt(score: i32, ply: u8) -> i32 {
    if score >= WIN_THRESHOLD {
        score - i32::from(ply)
    } else if score <= -WIN_THRESHOLD {
        score + i32::from(ply)
    } else {
        score
    }
}

/// Fixed-depth alpha-beta searcher.
pub struct Searcher {
    tt: TranspositionTable,
    max_depth: u8,
    nodes: u64,
    killer_moves: [[Option<usize>; KILLERS]; TOTAL_CELLS + 1],
    stats: SearchStats,
}

impl Searcher {
    /// Create a searcher with a `tt_size_mb` table searching `max_depth` plies.
    #[must_use]
    pub fn new(tt_size_mb: usize, max_depth: u8) -> Self {
        Self {
            tt: TranspositionTable::new(tt_size_mb),
            max_depth: max_depth.max(1),
            nodes: 0,
            killer_moves: [[None; KILLERS]; TOTAL_CELLS + 1],
            stats: SearchStats::default(),
        }
    }

    /// Search for the best move for `side`.
    ///
    /// Returns `best_move: None` only when the board has no empty cell.
    pub fn search(&mut self, board: &Board, side: Mark) -> SearchResult {
        let mut best = SearchResult {
            best_move: None,
            score: 0,
            depth: 0,
            nodes: 0,
            stats: SearchStats::default(),
        };

        if board.is_full() {
            return best;
        }

        // Immediate win: nothing to search
        if let Some(idx) = winning_cells(board, side).iter_ones().next() {
            self.nodes += 1;
            best.best_move = Some(idx);
            best.score = WIN_SCORE - 1;
            best.depth = 1;
            best.nodes = self.nodes;
            return best;
        }

        for depth in 1..=self.max_depth {
            let (best_move, score) = self.search_root(board, side, depth);
            best.best_move = best_move;
            best.score = score;
            best.depth = depth;

            // A forced result found at this depth is already the shortest one
            if is_decisive(score) {
                break;
            }
        }

        best.nodes = self.nodes;
        best.stats = self.stats.clone();
        best
    }

    /// Root-level search with full alpha-beta window.
    fn search_root(&mut self, board: &Board, side: Mark, depth: u8) -> (Option<usize>, i32) {
        let mut alpha = -INF;
        let beta = INF;
        let mut best_move = None;
        let mut best_score = -INF;

        let key = PositionKey::new(board, side);
        let tt_move = self.tt.get_best_move(key);
        let moves = self.ordered_moves(board, side, tt_move, 0);

        for mov in moves {
            let child = board.with_mark(mov, side);
            let score = if completes_line_at(&child, mov, side) {
                WIN_SCORE - 1
            } else {
                -self.alpha_beta(&child, side.opponent(), depth - 1, -beta, -alpha, 1)
            };

            if score > best_score {
                best_score = score;
                best_move = Some(mov);
            }
            alpha = alpha.max(score);
        }

        self.tt
            .store(key, depth, best_score, EntryType::Exact, best_move);
        (best_move, best_score)
    }

    /// Look `key` up against a root-relative window. Both bounds are shifted
    /// into the node-relative frame the table stores mate scores in, and a
    /// usable score comes back root-relative.
    fn probe_tt(
        &self,
        key: PositionKey,
        depth: u8,
        alpha: i32,
        beta: i32,
        ply: u8,
    ) -> (Option<i32>, Option<usize>) {
        match self
            .tt
            .probe(key, depth, score_to_tt(alpha, ply), score_to_tt(beta, ply))
        {
            Some(probe) => (probe.score.map(|s| score_from_tt(s, ply)), probe.best_move),
            None => (None, None),
        }
    }

    /// Negamax node. `board` is the position after the opponent's last move,
    /// which did not complete a line; `ply` counts moves from the root.
    fn alpha_beta(
        &mut self,
        board: &Board,
        side: Mark,
        depth: u8,
        mut alpha: i32,
        beta: i32,
        ply: u8,
    ) -> i32 {
        self.nodes += 1;

        if board.is_full() {
            return 0;
        }

        // Side to move completes a line on its next placement
        if !winning_cells(board, side).is_empty() {
            return WIN_SCORE - i32::from(ply) - 1;
        }

        if depth == 0 {
            return evaluate(board, side);
        }

        let threats = winning_cells(board, side.opponent());
        if threats.count() >= 2 {
            // Only one of them can be covered
            return -(WIN_SCORE - i32::from(ply) - 2);
        }

        let key = PositionKey::new(board, side);
        self.stats.tt_probes += 1;
        let (tt_score, tt_move) = self.probe_tt(key, depth, alpha, beta, ply);
        if let Some(score) = tt_score {
            self.stats.tt_score_hits += 1;
            return score;
        }

        let moves = match threats.iter_ones().next() {
            Some(block) => vec![block],
            None => self.ordered_moves(board, side, tt_move, ply),
        };

        let alpha_orig = alpha;
        let mut best_score = -INF;
        let mut best_move = None;

        for (i, mov) in moves.into_iter().enumerate() {
            let child = board.with_mark(mov, side);
            // No immediate win exists here, so `mov` cannot complete a line
            let score = -self.alpha_beta(&child, side.opponent(), depth - 1, -beta, -alpha, ply + 1);

            if score > best_score {
                best_score = score;
                best_move = Some(mov);
            }
            if score > alpha {
                alpha = score;
            }
            if alpha >= beta {
                self.stats.beta_cutoffs += 1;
                if i == 0 {
                    self.stats.first_move_cutoffs += 1;
                }
                self.record_killer(ply, mov);
                break;
            }
        }

        let entry_type = if best_score <= alpha_orig {
            EntryType::UpperBound
        } else if best_score >= beta {
            EntryType::LowerBound
        } else {
            EntryType::Exact
        };
        self.tt
            .store(key, depth, score_to_tt(best_score, ply), entry_type, best_move);

        best_score
    }

    /// Empty cells in search order: TT move, then killers, then the
    /// heuristic cell score (wins and blocks first), ties by lowest index.
    fn ordered_moves(
        &self,
        board: &Board,
        side: Mark,
        tt_move: Option<usize>,
        ply: u8,
    ) -> Vec<usize> {
        let scores = score_cells(board, side);
        let killers = self.killer_moves[usize::from(ply).min(TOTAL_CELLS)];

        let mut scored: Vec<(usize, i64)> = board
            .empty_cells()
            .iter_ones()
            .map(|idx| {
                let mut s = i64::from(scores[idx]);
                if tt_move == Some(idx) {
                    s += 1 << 40;
                } else if killers.contains(&Some(idx)) {
                    s += 1 << 20;
                }
                (idx, s)
            })
            .collect();

        scored.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        scored.into_iter().map(|(idx, _)| idx).collect()
    }

    fn record_killer(&mut self, ply: u8, mov: usize) {
        let slot = &mut self.killer_moves[usize::from(ply).min(TOTAL_CELLS)];
        if slot[0] != Some(mov) {
            slot[1] = slot[0];
            slot[0] = Some(mov);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::find_immediate_win;

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

    /// After `mov`, every reply of the opponent leaves `side` an immediate win.
    fn wins_by_force(board: &Board, side: Mark, mov: usize) -> bool {
        let after = board.with_mark(mov, side);
        if completes_line_at(&after, mov, side) {
            return true;
        }
        after.empty_cells().iter_ones().all(|reply| {
            let next = after.with_mark(reply, side.opponent());
            !completes_line_at(&next, reply, side.opponent())
                && find_immediate_win(&next, side).is_some()
        })
    }

    #[test]
    fn test_tt_score_normalisation() {
        let s = WIN_SCORE - 5;
        assert_eq!(score_from_tt(score_to_tt(s, 3), 3), s);
        assert_eq!(score_from_tt(score_to_tt(-s, 2), 2), -s);
        assert_eq!(score_to_tt(120, 4), 120);
    }

    #[test]
    fn test_tt_mate_bound_respects_ply() {
        let mut searcher = Searcher::new(1, 4);
        let key = PositionKey::new(&Board::new(), Mark::X);

        // Win five plies from the root, found at ply 3
        let win = WIN_SCORE - 5;
        searcher
            .tt
            .store(key, 2, score_to_tt(win, 3), EntryType::LowerBound, Some(0));
        assert_eq!(searcher.probe_tt(key, 2, -INF, WIN_SCORE - 3, 3).0, None);
        assert_eq!(searcher.probe_tt(key, 2, -INF, WIN_SCORE - 6, 3).0, Some(win));

        searcher
            .tt
            .store(key, 2, score_to_tt(-win, 3), EntryType::UpperBound, Some(0));
        assert_eq!(searcher.probe_tt(key, 2, -(WIN_SCORE - 3), INF, 3).0, None);
        assert_eq!(searcher.probe_tt(key, 2, -(WIN_SCORE - 6), INF, 3).0, Some(-win));
    }

    #[test]
    fn test_full_board_no_move() {
        let board = Board::from_masks(0xe3b5_b645_4adb_8168, 0x1c4a_49ba_b524_7e97).unwrap();
        let result = Searcher::new(1, 4).search(&board, Mark::X);
        assert_eq!(result.best_move, None);
    }

    #[test]
    fn test_takes_immediate_win() {
        let board = board_with(&[0, 1, 2], &[16, 32, 48]);
        let result = Searcher::new(1, 4).search(&board, Mark::X);
        assert_eq!(result.best_move, Some(3));
        assert_eq!(result.score, WIN_SCORE - 1);
    }

    #[test]
    fn test_blocks_single_threat() {
        // O threatens {0,16,32,48} at 48; X has nothing immediate
        let board = board_with(&[5, 26, 63], &[0, 16, 32]);
        let result = Searcher::new(1, 3).search(&board, Mark::X);
        assert_eq!(result.best_move, Some(48));
    }

    #[test]
    fn test_finds_fork() {
        // X to play 0: threatens the row at 3 and the column at 48
        let board = board_with(&[1, 2, 16, 32], &[60, 61, 27]);
        let mut searcher = Searcher::new(1, 3);
        let result = searcher.search(&board, Mark::X);
        let mov = result.best_move.unwrap();
        assert!(wins_by_force(&board, Mark::X, mov), "move {} does not force a win", mov);
        assert_eq!(result.score, WIN_SCORE - 3);
    }

    #[test]
    fn test_double_threat_is_lost() {
        // O has two separate threats (3 and 48); X cannot win immediately
        let board = board_with(&[5, 26, 63], &[1, 2, 0, 16, 32]);
        let result = Searcher::new(1, 2).search(&board, Mark::X);
        assert!(result.score <= -WIN_THRESHOLD);
        // Delay: still covers one of the threats
        let mov = result.best_move.unwrap();
        assert!(mov == 3 || mov == 48);
    }

    #[test]
    fn test_search_deterministic() {
        let board = board_with(&[0, 21], &[42, 5]);
        let a = Searcher::new(1, 3).search(&board, Mark::X);
        let b = Searcher::new(1, 3).search(&board, Mark::X);
        assert_eq!(a.best_move, b.best_move);
        assert_eq!(a.score, b.score);
        assert_eq!(a.nodes, b.nodes);
    }

    #[test]
    fn test_never_plays_occupied() {
        let board = board_with(&[0, 21, 42, 7, 9], &[63, 5, 10, 33]);
        let result = Searcher::new(1, 2).search(&board, Mark::O);
        let mov = result.best_move.unwrap();
        assert!(board.is_empty(mov));
    }

    #[test]
    fn test_stats_collected() {
        let board = board_with(&[0], &[21]);
        let result = Searcher::new(1, 3).search(&board, Mark::X);
        assert!(result.nodes > 0);
        assert!(result.stats.tt_probes > 0);
        assert!(result.stats.first_move_rate() <= 100.0);
    }
}
