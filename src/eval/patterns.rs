//! Line-occupancy weights for position and move evaluation
//!
//! A line is "open" for a mark while the opponent has no mark on it. Only
//! open lines carry weight; a line holding both marks is dead for the rest
//! of the game.

/// Scores used by the evaluator and the move scorers
pub struct LineScore;

impl LineScore {
    /// Completed line. Search scores wins as `WIN - ply`, so this must stay
    /// far above any sum of heuristic terms.
    pub const WIN: i32 = 1_000_000;

    /// Two or more distinct cells that each complete a line: the opponent
    /// can only cover one of them.
    pub const FORK: i32 = 2_000;

    /// Cell score for playing into an own three-of-four (wins on the spot)
    pub const IMMEDIATE_WIN: i32 = 1_000_000;
    /// Cell score for covering an opponent three-of-four. Seven of these
    /// (the most lines one cell can sit on) still stay below one win.
    pub const IMMEDIATE_BLOCK: i32 = 50_000;
}

/// Static value of an open line holding `k` marks (k = 0..=3)
pub const OPEN_LINE: [i32; 4] = [0, 1, 10, 100];

/// Move-scoring weight for extending an own open line holding `k` marks.
/// Empty lines get a small weight so central cells (more lines) are preferred.
pub const BUILD: [i32; 3] = [1, 10, 100];

/// Move-scoring weight for cutting an opponent open line holding `k` marks
pub const BLOCK: [i32; 3] = [0, 8, 80];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weights_monotonic() {
        assert!(OPEN_LINE.windows(2).all(|w| w[0] < w[1]));
        assert!(BUILD.windows(2).all(|w| w[0] < w[1]));
        assert!(BLOCK.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_score_hierarchy() {
        // A cell lies on at most 7 lines
        assert!(LineScore::IMMEDIATE_WIN > 7 * LineScore::IMMEDIATE_BLOCK);
        assert!(LineScore::IMMEDIATE_BLOCK > 7 * (BUILD[2] + BLOCK[2]));
        // 76 lines at full weight for one side, plus forks
        assert!(LineScore::WIN > 76 * OPEN_LINE[3] + LineScore::FORK + 64);
    }

    #[test]
    fn test_block_comparable_to_build() {
        // Blocking is slightly cheaper than building at the same count
        for k in 1..3 {
            assert!(BLOCK[k] < BUILD[k]);
            assert!(BLOCK[k] * 2 > BUILD[k]);
        }
    }
}
