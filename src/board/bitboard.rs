//! Bitboard implementation for fast line tests

use super::TOTAL_CELLS;

/// One bit per cube cell; the whole cube fits in a single u64.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Bitboard {
    bits: u64,
}

impl Bitboard {
    /// Create empty bitboard
    pub const fn new() -> Self {
        Self { bits: 0 }
    }

    pub const fn from_bits(bits: u64) -> Self {
        Self { bits }
    }

    /// Every cell set
    pub const FULL: Bitboard = Bitboard { bits: u64::MAX };

    #[inline]
    pub const fn bits(self) -> u64 {
        self.bits
    }

    /// Set the bit for a cell index
    #[inline]
    pub fn set(&mut self, idx: usize) {
        debug_assert!(idx < TOTAL_CELLS);
        self.bits |= 1u64 << idx;
    }

    /// Check if bit is set for a cell index
    #[inline]
    pub fn get(self, idx: usize) -> bool {
        debug_assert!(idx < TOTAL_CELLS);
        (self.bits >> idx) & 1 == 1
    }

    /// Count total set bits (popcount)
    #[inline]
    pub fn count(self) -> u32 {
        self.bits.count_ones()
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.bits == 0
    }

    #[inline]
    pub fn is_full(self) -> bool {
        self.bits == u64::MAX
    }

    /// True when every bit of `mask` is also set here
    #[inline]
    pub fn contains_all(self, mask: u64) -> bool {
        self.bits & mask == mask
    }

    /// Number of bits shared with `mask`
    #[inline]
    pub fn count_in(self, mask: u64) -> u32 {
        (self.bits & mask).count_ones()
    }

    #[inline]
    pub fn union(self, other: Bitboard) -> Bitboard {
        Bitboard::from_bits(self.bits | other.bits)
    }

    #[inline]
    pub fn complement(self) -> Bitboard {
        Bitboard::from_bits(!self.bits)
    }

    /// Iterate over set cell indices in ascending order
    pub fn iter_ones(self) -> BitboardIter {
        BitboardIter { bits: self.bits }
    }
}

/// Iterator over set bits in a Bitboard
pub struct BitboardIter {
    bits: u64,
}

impl Iterator for BitboardIter {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        if self.bits == 0 {
            return None;
        }
        let idx = self.bits.trailing_zeros() as usize;
        self.bits &= self.bits - 1;
        Some(idx)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.bits.count_ones() as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for BitboardIter {}
