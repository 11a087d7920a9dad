//! Evaluation module for 4x4x4 positions
//!
//! This module provides line-occupancy scoring for board positions and
//! candidate moves. The evaluation considers:
//! - Open lines (no opponent mark) weighted by how full they are
//! - Forks (two or more cells completing a line)
//! - Immediate wins and blocks when scoring moves

pub mod heuristic;
pub mod patterns;

pub use heuristic::{evaluate, score_cell, score_cells};
pub use patterns::{LineScore, BLOCK, BUILD, OPEN_LINE};
