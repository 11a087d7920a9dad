//! Catalog of the 76 winning lines through the 4x4x4 cube
//!
//! The catalog is generated once from coordinate geometry: every start cell
//! is paired with every step vector in `{-1, 0, 1}^3` (zero excluded, and
//! only one of each `d` / `-d` pair kept), the four cells reached by 0..3
//! steps are collected, and runs that leave the cube are dropped.
//!
//! - 48 axis lines (16 per axis)
//! - 24 face diagonals (2 per slab, 4 slabs per axis)
//! - 4 space diagonals
//!
//! # Example
//!
//! ```
//! use qubic::rules::{all_lines, LINE_COUNT};
//!
//! let table = all_lines();
//! assert_eq!(table.len(), LINE_COUNT);
//! // The x-axis line through the origin
//! assert!(table.iter().any(|line| line.mask() == 0b1111));
//! ```

use std::sync::OnceLock;

use crate::board::{Cell, BOARD_SIZE, TOTAL_CELLS};

/// Number of distinct winning lines in the cube
pub const LINE_COUNT: usize = 76;

/// One winning line: four collinear cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WinLine {
    mask: u64,
    cells: [usize; BOARD_SIZE],
    step: (i8, i8, i8),
}

impl WinLine {
    /// Bit mask over the 64 cell indices
    #[inline]
    pub fn mask(&self) -> u64 {
        self.mask
    }

    /// Cell indices in walking order
    #[inline]
    pub fn cells(&self) -> [usize; BOARD_SIZE] {
        self.cells
    }

    /// Direction vector between consecutive cells
    #[inline]
    pub fn step(&self) -> (i8, i8, i8) {
        self.step
    }

    #[inline]
    pub fn contains(&self, idx: usize) -> bool {
        (self.mask >> idx) & 1 == 1
    }
}

/// Read-only table of all winning lines plus a per-cell index into it.
pub struct LineTable {
    lines: Vec<WinLine>,
    /// Catalog indices of the lines passing through each cell
    through: [Vec<usize>; TOTAL_CELLS],
}

static LINE_TABLE: OnceLock<LineTable> = OnceLock::new();

/// Shared catalog, built on first use and never mutated afterwards.
pub fn all_lines() -> &'static LineTable {
    LINE_TABLE.get_or_init(LineTable::build)
}

/// Canonical step vectors: the first non-zero component is positive, so a
/// line and its reverse are only walked once.
fn directions() -> Vec<(i8, i8, i8)> {
    let mut dirs = Vec::with_capacity(13);
    for dz in -1i8..=1 {
        for dy in -1i8..=1 {
            for dx in -1i8..=1 {
                let first_nonzero = [dx, dy, dz].into_iter().find(|&d| d != 0);
                if first_nonzero == Some(1) {
                    dirs.push((dx, dy, dz));
                }
            }
        }
    }
    dirs
}

impl LineTable {
    /// Generate the catalog from geometry. Deterministic: lines are ordered
    /// by direction, then by start cell index.
    pub fn build() -> Self {
        let n = BOARD_SIZE as i32;
        let mut lines: Vec<WinLine> = Vec::with_capacity(LINE_COUNT);

        for (dx, dy, dz) in directions() {
            for start in 0..TOTAL_CELLS {
                let origin = Cell::from_index(start);
                let mut cells = [0usize; BOARD_SIZE];
                let mut mask = 0u64;
                let mut inside = true;

                for (k, slot) in cells.iter_mut().enumerate() {
                    let k = k as i32;
                    let x = origin.x as i32 + k * dx as i32;
                    let y = origin.y as i32 + k * dy as i32;
                    let z = origin.z as i32 + k * dz as i32;
                    if !Cell::is_valid(x, y, z) {
                        inside = false;
                        break;
                    }
                    let idx = (x + n * y + n * n * z) as usize;
                    *slot = idx;
                    mask |= 1u64 << idx;
                }

                if inside && !lines.iter().any(|l| l.mask == mask) {
                    lines.push(WinLine {
                        mask,
                        cells,
                        step: (dx, dy, dz),
                    });
                }
            }
        }

        debug_assert_eq!(lines.len(), LINE_COUNT);

        let mut through: [Vec<usize>; TOTAL_CELLS] = std::array::from_fn(|_| Vec::new());
        for (i, line) in lines.iter().enumerate() {
            for &cell in &line.cells {
                through[cell].push(i);
            }
        }

        Self { lines, through }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    #[inline]
    pub fn get(&self, i: usize) -> Option<&WinLine> {
        self.lines.get(i)
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, WinLine> {
        self.lines.iter()
    }

    /// Masks of every line, in catalog order
    pub fn masks(&self) -> impl Iterator<Item = u64> + '_ {
        self.lines.iter().map(|l| l.mask)
    }

    /// Catalog indices of the lines through a cell (4 to 7 of them)
    #[inline]
    pub fn lines_through(&self, idx: usize) -> &[usize] {
        &self.through[idx]
    }
}
