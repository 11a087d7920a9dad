//! Game rules for 4x4x4 tic-tac-toe
//!
//! This module implements:
//! - The catalog of winning lines (axis, face diagonal, space diagonal)
//! - Win / draw detection and immediate-threat helpers

pub mod lines;
pub mod win;

// Re-exports for convenient access
pub use lines::{all_lines, LineTable, WinLine, LINE_COUNT};
pub use win::{
    completes_line_at, evaluate, find_immediate_win, has_line, winning_cells, winning_mask,
    GameOutcome,
};
