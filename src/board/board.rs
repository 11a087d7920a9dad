//! Board structure: two disjoint occupancy masks

use std::fmt;

use super::bitboard::Bitboard;
use super::{check_index, Cell, Mark, BOARD_SIZE};
use crate::error::EngineError;

/// Game board.
///
/// Invariant: the X and O masks never share a bit. Every public way of
/// building or changing a board checks it; the engine only reads boards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Board {
    x: Bitboard,
    o: Bitboard,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a board from raw masks as they arrive over the caller boundary.
    pub fn from_masks(x_mask: u64, o_mask: u64) -> Result<Self, EngineError> {
        let overlap = x_mask & o_mask;
        if overlap != 0 {
            return Err(EngineError::OverlappingMasks { overlap });
        }
        Ok(Self {
            x: Bitboard::from_bits(x_mask),
            o: Bitboard::from_bits(o_mask),
        })
    }

    /// Raw `(x_mask, o_mask)` pair
    #[inline]
    pub fn masks(&self) -> (u64, u64) {
        (self.x.bits(), self.o.bits())
    }

    /// Get bitboard for a mark
    #[inline]
    pub fn marks(&self, mark: Mark) -> Bitboard {
        match mark {
            Mark::X => self.x,
            Mark::O => self.o,
        }
    }

    /// Get mark at a cell index
    #[inline]
    pub fn get(&self, idx: usize) -> Option<Mark> {
        if self.x.get(idx) {
            Some(Mark::X)
        } else if self.o.get(idx) {
            Some(Mark::O)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_cell(&self, cell: Cell) -> Option<Mark> {
        self.get(cell.to_index())
    }

    /// Check if a cell index is empty
    #[inline]
    pub fn is_empty(&self, idx: usize) -> bool {
        !self.occupied().get(idx)
    }

    #[inline]
    pub fn occupied(&self) -> Bitboard {
        self.x.union(self.o)
    }

    /// Empty cells as a bitboard
    #[inline]
    pub fn empty_cells(&self) -> Bitboard {
        self.occupied().complement()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.occupied().is_full()
    }

    /// Total marks on board
    #[inline]
    pub fn mark_count(&self) -> u32 {
        self.occupied().count()
    }

    #[inline]
    pub fn is_board_empty(&self) -> bool {
        self.occupied().is_empty()
    }

    /// Place a mark on an empty cell.
    pub fn place(&mut self, idx: usize, mark: Mark) -> Result<(), EngineError> {
        let idx = check_index(idx)?;
        if !self.is_empty(idx) {
            return Err(EngineError::CellOccupied(idx));
        }
        self.place_unchecked(idx, mark);
        Ok(())
    }

    /// Place a mark at 3D coordinates.
    pub fn place_at(&mut self, x: i32, y: i32, z: i32, mark: Mark) -> Result<(), EngineError> {
        let cell = Cell::try_new(x, y, z)?;
        self.place(cell.to_index(), mark)
    }

    /// Copy of this board with `mark` added at `idx`; search-internal, the
    /// cell must already be known to be empty.
    #[inline]
    pub(crate) fn with_mark(&self, idx: usize, mark: Mark) -> Board {
        let mut next = *self;
        next.place_unchecked(idx, mark);
        next
    }

    #[inline]
    fn place_unchecked(&mut self, idx: usize, mark: Mark) {
        debug_assert!(self.is_empty(idx));
        match mark {
            Mark::X => self.x.set(idx),
            Mark::O => self.o.set(idx),
        }
    }
}

impl fmt::Display for Board {
    /// Four 4x4 layers, z = 0 first, rows by y, columns by x.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for z in 0..BOARD_SIZE {
            if z > 0 {
                writeln!(f)?;
            }
            for y in 0..BOARD_SIZE {
                for x in 0..BOARD_SIZE {
                    let cell = Cell::new(x as u8, y as u8, z as u8);
                    let c = match self.get_cell(cell) {
                        Some(Mark::X) => 'X',
                        Some(Mark::O) => 'O',
                        None => '.',
                    };
                    if x > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", c)?;
                }
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
