//! Board representation for the 4x4x4 cube

pub mod bitboard;
pub mod board;


use serde::{Deserialize, Serialize};

use crate::error::EngineError;

// Re-exports
pub use bitboard::Bitboard;
pub use board::Board;

/// Cells along each axis (4x4x4)
pub const BOARD_SIZE: usize = 4;
pub const TOTAL_CELLS: usize = BOARD_SIZE * BOARD_SIZE * BOARD_SIZE; // 64

/// The two marks competing for the cube
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    /// Get opponent mark
    #[inline]
    pub fn opponent(self) -> Mark {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    /// Decode a raw side tag (1 = X, 2 = O).
    pub fn from_tag(tag: u8) -> Result<Mark, EngineError> {
        match tag {
            1 => Ok(Mark::X),
            2 => Ok(Mark::O),
            other => Err(EngineError::UnknownMark(other)),
        }
    }

    #[inline]
    pub fn tag(self) -> u8 {
        match self {
            Mark::X => 1,
            Mark::O => 2,
        }
    }
}

/// Cell coordinates inside the cube.
///
/// The linearization `index = x + 4y + 16z` is shared with every caller,
/// so it must never change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: u8,
    pub y: u8,
    pub z: u8,
}

impl Cell {
    #[inline]
    pub fn new(x: u8, y: u8, z: u8) -> Self {
        debug_assert!(
            (x as usize) < BOARD_SIZE && (y as usize) < BOARD_SIZE && (z as usize) < BOARD_SIZE
        );
        Self { x, y, z }
    }

    /// Checked constructor for coordinates coming from outside the engine.
    pub fn try_new(x: i32, y: i32, z: i32) -> Result<Self, EngineError> {
        if Self::is_valid(x, y, z) {
            Ok(Self::new(x as u8, y as u8, z as u8))
        } else {
            Err(EngineError::CoordOutOfRange { x, y, z })
        }
    }

    #[inline]
    pub fn to_index(self) -> usize {
        self.x as usize + BOARD_SIZE * self.y as usize + BOARD_SIZE * BOARD_SIZE * self.z as usize
    }

    #[inline]
    pub fn from_index(idx: usize) -> Self {
        debug_assert!(idx < TOTAL_CELLS);
        Self {
            x: (idx % BOARD_SIZE) as u8,
            y: ((idx % (BOARD_SIZE * BOARD_SIZE)) / BOARD_SIZE) as u8,
            z: (idx / (BOARD_SIZE * BOARD_SIZE)) as u8,
        }
    }

    #[inline]
    pub fn is_valid(x: i32, y: i32, z: i32) -> bool {
        let n = BOARD_SIZE as i32;
        (0..n).contains(&x) && (0..n).contains(&y) && (0..n).contains(&z)
    }

    /// Single-bit mask for this cell
    #[inline]
    pub fn bit(self) -> u64 {
        1u64 << self.to_index()
    }
}

/// Reject indices outside `0..64`.
#[inline]
pub fn check_index(idx: usize) -> Result<usize, EngineError> {
    if idx < TOTAL_CELLS {
        Ok(idx)
    } else {
        Err(EngineError::CellOutOfRange(idx))
    }
}
