//! Move search, one strategy per difficulty tier
//!
//! Contains:
//! - Easy: immediate win / block, else a seeded random cell
//! - Medium: greedy single-ply cell scoring
//! - Hard: alpha-beta search with iterative deepening
//! - Transposition table for the Hard tier

pub mod alphabeta;
pub mod easy;
pub mod greedy;
pub mod tt;

pub use alphabeta::{is_decisive, SearchResult, SearchStats, Searcher, WIN_SCORE};
pub use easy::easy_move;
pub use greedy::greedy_move;
pub use tt::{EntryType, PositionKey, Probe, TTEntry, TTStats, TranspositionTable};
