//! Transposition table for caching search results
//!
//! The whole cube fits in two u64 masks, so entries are keyed by the exact
//! position (both masks plus the side to move) rather than by a hash: a
//! slot either holds this very position or it is a miss.
//!
//! # Example
//!
//! ```
//! use qubic::board::{Board, Mark};
//! use qubic::search::{EntryType, PositionKey, TranspositionTable};
//!
//! let mut tt = TranspositionTable::new(1); // 1 MB
//! let key = PositionKey::new(&Board::new(), Mark::X);
//!
//! tt.store(key, 3, 42, EntryType::Exact, Some(21));
//!
//! let probe = tt.probe(key, 3, -1000, 1000).unwrap();
//! assert_eq!(probe.score, Some(42));
//! assert_eq!(probe.best_move, Some(21));
//! ```

use crate::board::{Board, Mark};

/// Entry type for score interpretation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryType {
    /// Exact score - the search completed normally
    Exact,
    /// Lower bound - score >= stored value (beta cutoff)
    LowerBound,
    /// Upper bound - score <= stored value (alpha fail-low)
    UpperBound,
}

/// Exact identity of a searched position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PositionKey {
    pub x: u64,
    pub o: u64,
    pub side: Mark,
}

impl PositionKey {
    #[inline]
    pub fn new(board: &Board, side: Mark) -> Self {
        let (x, o) = board.masks();
        Self { x, o, side }
    }

    /// Slot selector; mixes both masks with a 64-bit multiplicative hash.
    #[inline]
    fn slot(&self, size: usize) -> usize {
        let side = match self.side {
            Mark::X => 0,
            Mark::O => 0x9E37_79B9_7F4A_7C15,
        };
        let h = (self.x ^ self.o.rotate_left(29) ^ side).wrapping_mul(0xFF51_AFD7_ED55_8CCD);
        ((h ^ (h >> 32)) as usize) % size
    }
}

/// Transposition table entry
#[derive(Debug, Clone, Copy)]
pub struct TTEntry {
    pub key: PositionKey,
    /// Remaining depth this entry was searched to
    pub depth: u8,
    /// Score, relative to the stored node (mate distances are node-relative)
    pub score: i32,
    pub entry_type: EntryType,
    pub best_move: Option<usize>,
}

/// Result of a successful probe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Probe {
    /// Set when the stored bound settles the current window
    pub score: Option<i32>,
    /// Best move of the earlier search, for ordering
    pub best_move: Option<usize>,
}

/// Direct-mapped transposition table with depth-preferred replacement.
pub struct TranspositionTable {
    entries: Vec<Option<TTEntry>>,
    size: usize,
}

impl TranspositionTable {
    /// Create a new transposition table with the given size in megabytes.
    #[must_use]
    pub fn new(size_mb: usize) -> Self {
        let entry_size = std::mem::size_of::<Option<TTEntry>>();
        let size = (size_mb * 1024 * 1024) / entry_size;

        // Ensure at least some entries
        let size = size.max(1024);

        Self {
            entries: vec![None; size],
            size,
        }
    }

    /// Probe the table for a position.
    ///
    /// Returns `None` on a miss. On a hit, `score` is only filled when the
    /// entry was searched at least `depth` deep and its bound is usable
    /// against `alpha..beta`; `best_move` is always passed through.
    #[must_use]
    pub fn probe(&self, key: PositionKey, depth: u8, alpha: i32, beta: i32) -> Option<Probe> {
        let entry = self.entries[key.slot(self.size)]?;
        if entry.key != key {
            return None;
        }

        let score = if entry.depth >= depth {
            match entry.entry_type {
                EntryType::Exact => Some(entry.score),
                EntryType::LowerBound if entry.score >= beta => Some(entry.score),
                EntryType::UpperBound if entry.score <= alpha => Some(entry.score),
                _ => None,
            }
        } else {
            None
        };

        Some(Probe {
            score,
            best_move: entry.best_move,
        })
    }

    /// Get best move from the table for move ordering.
    #[must_use]
    pub fn get_best_move(&self, key: PositionKey) -> Option<usize> {
        self.entries[key.slot(self.size)]
            .filter(|e| e.key == key)
            .and_then(|e| e.best_move)
    }

    /// Store a position in the table.
    ///
    /// An entry is replaced if the slot is empty, holds the same position,
    /// or the new search is at least as deep.
    pub fn store(
        &mut self,
        key: PositionKey,
        depth: u8,
        score: i32,
        entry_type: EntryType,
        best_move: Option<usize>,
    ) {
        let idx = key.slot(self.size);

        let should_replace = match &self.entries[idx] {
            None => true,
            Some(e) => e.key == key || e.depth <= depth,
        };

        if should_replace {
            self.entries[idx] = Some(TTEntry {
                key,
                depth,
                score,
                entry_type,
                best_move,
            });
        }
    }

    pub fn clear(&mut self) {
        self.entries.fill(None);
    }

    #[must_use]
    pub fn stats(&self) -> TTStats {
        let used = self.entries.iter().filter(|e| e.is_some()).count();
        TTStats {
            size: self.size,
            used,
            usage_percent: (used as f64 / self.size as f64 * 100.0) as u8,
        }
    }
}

/// Statistics about transposition table usage.
#[derive(Debug, Clone, Copy)]
pub struct TTStats {
    /// Total number of slots in the table
    pub size: usize,
    /// Number of slots currently occupied
    pub used: usize,
    /// Percentage of table in use (0-100)
    pub usage_percent: u8,
}
