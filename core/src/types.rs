use core::fmt;
use core::ops::{BitAnd, BitOr, Sub};
use serde::{Deserialize, Serialize};

use crate::*;

/// Side length of the square play grid.
pub const GRID_SIDE: u8 = 5;

/// Number of cells on the grid.
pub const CELL_COUNT: u8 = GRID_SIDE * GRID_SIDE;

/// Row-major position of a cell, valid in `0..CELL_COUNT`.
pub type CellIndex = u8;

/// Two-dimensional coordinates `(row, col)`.
pub type Coord2 = (u8, u8);

pub const fn row_of(index: CellIndex) -> u8 {
    index / GRID_SIDE
}

pub const fn col_of(index: CellIndex) -> u8 {
    index % GRID_SIDE
}

pub const fn to_coords(index: CellIndex) -> Coord2 {
    (row_of(index), col_of(index))
}

pub const fn is_valid_index(index: CellIndex) -> bool {
    index < CELL_COUNT
}

pub fn validate_index(index: CellIndex) -> Result<CellIndex> {
    if is_valid_index(index) {
        Ok(index)
    } else {
        Err(GameError::InvalidIndex(index))
    }
}

pub fn from_coords((row, col): Coord2) -> Result<CellIndex> {
    let index = row.saturating_mul(GRID_SIDE).saturating_add(col);
    if row < GRID_SIDE && col < GRID_SIDE {
        Ok(index)
    } else {
        Err(GameError::InvalidIndex(index))
    }
}

/// Set of grid cells stored as one bit per cell.
///
/// Bits above `CELL_COUNT` are never set, every constructor checks that.
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct CellSet(u32);

impl CellSet {
    const MASK: u32 = (1 << CELL_COUNT) - 1;

    pub const fn empty() -> Self {
        Self(0)
    }

    pub const fn full() -> Self {
        Self(Self::MASK)
    }

    pub fn from_indices(indices: impl IntoIterator<Item = CellIndex>) -> Result<Self> {
        let mut set = Self::empty();
        for index in indices {
            set.insert(index)?;
        }
        Ok(set)
    }

    /// Collects every cell whose index satisfies `pred`.
    pub fn from_fn(mut pred: impl FnMut(CellIndex) -> bool) -> Self {
        (0..CELL_COUNT)
            .filter(|&index| pred(index))
            .fold(Self::empty(), |set, index| Self(set.0 | Self::bit(index)))
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    const fn bit(index: CellIndex) -> u32 {
        1 << index
    }

    pub const fn contains(self, index: CellIndex) -> bool {
        is_valid_index(index) && self.0 & Self::bit(index) != 0
    }

    /// Adds `index`, returning whether it was newly inserted.
    pub fn insert(&mut self, index: CellIndex) -> Result<bool> {
        let index = validate_index(index)?;
        let added = !self.contains(index);
        self.0 |= Self::bit(index);
        Ok(added)
    }

    /// Removes `index`, returning whether it was present.
    pub fn remove(&mut self, index: CellIndex) -> bool {
        let present = self.contains(index);
        if present {
            self.0 &= !Self::bit(index);
        }
        present
    }

    /// Flips membership of `index`, returning the new membership.
    pub fn toggle(&mut self, index: CellIndex) -> Result<bool> {
        let index = validate_index(index)?;
        self.0 ^= Self::bit(index);
        Ok(self.contains(index))
    }

    pub const fn len(self) -> u8 {
        self.0.count_ones() as u8
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn intersection(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }

    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub const fn difference(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }

    pub const fn is_disjoint(self, other: Self) -> bool {
        self.0 & other.0 == 0
    }

    pub fn iter(self) -> CellIter {
        CellIter { bits: self.0 }
    }
}

impl fmt::Debug for CellSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl TryFrom<u32> for CellSet {
    type Error = GameError;

    fn try_from(bits: u32) -> Result<Self> {
        let stray = bits & !Self::MASK;
        if stray == 0 {
            Ok(Self(bits))
        } else {
            let highest = (u32::BITS - 1 - stray.leading_zeros()) as u8;
            Err(GameError::InvalidIndex(highest))
        }
    }
}

impl From<CellSet> for u32 {
    fn from(set: CellSet) -> Self {
        set.0
    }
}

impl BitAnd for CellSet {
    type Output = CellSet;

    fn bitand(self, rhs: Self) -> Self::Output {
        self.intersection(rhs)
    }
}

impl BitOr for CellSet {
    type Output = CellSet;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}

impl Sub for CellSet {
    type Output = CellSet;

    fn sub(self, rhs: Self) -> Self::Output {
        self.difference(rhs)
    }
}

impl IntoIterator for CellSet {
    type Item = CellIndex;
    type IntoIter = CellIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Ascending iterator over the members of a [`CellSet`].
#[derive(Debug, Clone)]
pub struct CellIter {
    bits: u32,
}

impl Iterator for CellIter {
    type Item = CellIndex;

    fn next(&mut self) -> Option<Self::Item> {
        if self.bits == 0 {
            return None;
        }
        let index = self.bits.trailing_zeros() as CellIndex;
        // clear lowest set bit
        self.bits &= self.bits - 1;
        Some(index)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.bits.count_ones() as usize;
        (len, Some(len))
    }
}

impl ExactSizeIterator for CellIter {}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn coords_follow_row_major_layout() {
        assert_eq!(to_coords(0), (0, 0));
        assert_eq!(to_coords(7), (1, 2));
        assert_eq!(to_coords(24), (4, 4));
        assert_eq!(from_coords((2, 2)), Ok(12));
        assert_eq!(from_coords((5, 0)), Err(GameError::InvalidIndex(25)));
    }

    #[test]
    fn insert_rejects_out_of_range_index() {
        let mut set = CellSet::empty();

        assert_eq!(set.insert(25), Err(GameError::InvalidIndex(25)));
        assert_eq!(set.toggle(200), Err(GameError::InvalidIndex(200)));
        assert!(set.is_empty());
        assert!(!set.contains(30));
    }

    #[test]
    fn toggle_flips_membership() {
        let mut set = CellSet::empty();

        assert_eq!(set.toggle(3), Ok(true));
        assert!(set.contains(3));
        assert_eq!(set.toggle(3), Ok(false));
        assert!(set.is_empty());
    }

    #[test]
    fn iter_is_ascending() {
        let set = CellSet::from_indices([17, 2, 24, 0]).unwrap();

        assert_eq!(set.iter().collect::<Vec<_>>(), [0, 2, 17, 24]);
        assert_eq!(set.iter().len(), 4);
        assert_eq!(set.len(), 4);
    }

    #[test]
    fn set_operators_match_named_methods() {
        let a = CellSet::from_indices([1, 2, 3]).unwrap();
        let b = CellSet::from_indices([3, 4]).unwrap();

        assert_eq!(a & b, CellSet::from_indices([3]).unwrap());
        assert_eq!(a | b, CellSet::from_indices([1, 2, 3, 4]).unwrap());
        assert_eq!(a - b, CellSet::from_indices([1, 2]).unwrap());
        assert!((a - b).is_disjoint(b));
        assert_eq!(CellSet::full().len(), CELL_COUNT);
    }

    #[test]
    fn deserialize_rejects_bits_past_the_grid() {
        let set = CellSet::from_indices([0, 24]).unwrap();
        let json = serde_json::to_string(&set).unwrap();

        assert_eq!(serde_json::from_str::<CellSet>(&json).unwrap(), set);
        assert_eq!(CellSet::try_from(1u32 << 25), Err(GameError::InvalidIndex(25)));
        assert!(serde_json::from_str::<CellSet>("4294967295").is_err());
    }
}
