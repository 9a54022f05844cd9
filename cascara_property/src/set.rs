// Copyright 2025 the Cascara Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compact sets of attribute ids.

use core::fmt;
use core::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Not, Sub};

use crate::id::PropertyId;

/// A set of [`PropertyId`]s, stored as a 128-bit mask.
///
/// Iteration yields ids in index order.
///
/// # Example
///
/// ```rust
/// use cascara_property::{PropertyId, PropertyIdSet};
///
/// let fonts = PropertyIdSet::from_iter([PropertyId::FontSize, PropertyId::FontFamily]);
/// let colours = PropertyIdSet::from(PropertyId::Color);
///
/// let union = fonts | colours;
/// assert_eq!(union.len(), 3);
/// assert!(union.contains(PropertyId::Color));
/// assert!((union & colours).contains(PropertyId::Color));
/// assert!(!(union - colours).contains(PropertyId::Color));
/// ```
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct PropertyIdSet(u128);

const _: () = assert!(PropertyId::COUNT <= 128, "PropertyId must fit in a u128 mask");

impl PropertyIdSet {
    /// Creates an empty set.
    #[must_use]
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Creates the set of every built-in attribute.
    #[must_use]
    pub const fn all() -> Self {
        if PropertyId::COUNT == 128 {
            Self(u128::MAX)
        } else {
            Self((1_u128 << PropertyId::COUNT) - 1)
        }
    }

    /// Returns `true` if this set contains no ids.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if this set contains `id`.
    #[must_use]
    pub const fn contains(self, id: PropertyId) -> bool {
        (self.0 & (1_u128 << id.index())) != 0
    }

    /// Inserts an id, returning `true` if it was not already present.
    pub fn insert(&mut self, id: PropertyId) -> bool {
        let bit = 1_u128 << id.index();
        let added = self.0 & bit == 0;
        self.0 |= bit;
        added
    }

    /// Removes an id, returning `true` if it was present.
    pub fn remove(&mut self, id: PropertyId) -> bool {
        let bit = 1_u128 << id.index();
        let removed = self.0 & bit != 0;
        self.0 &= !bit;
        removed
    }

    /// Returns the number of ids in the set.
    #[must_use]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Returns an iterator over the ids in this set.
    #[must_use]
    pub const fn iter(self) -> PropertyIdSetIter {
        PropertyIdSetIter { bits: self.0 }
    }
}

impl fmt::Debug for PropertyIdSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter().map(PropertyId::name)).finish()
    }
}

impl BitOr for PropertyIdSet {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for PropertyIdSet {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for PropertyIdSet {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        Self(self.0 & rhs.0)
    }
}

impl BitAndAssign for PropertyIdSet {
    fn bitand_assign(&mut self, rhs: Self) {
        self.0 &= rhs.0;
    }
}

impl Sub for PropertyIdSet {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 & !rhs.0)
    }
}

/// Complement within the built-in attributes.
impl Not for PropertyIdSet {
    type Output = Self;

    fn not(self) -> Self::Output {
        Self(!self.0 & Self::all().0)
    }
}

impl From<PropertyId> for PropertyIdSet {
    fn from(id: PropertyId) -> Self {
        Self(1_u128 << id.index())
    }
}

impl FromIterator<PropertyId> for PropertyIdSet {
    fn from_iter<I: IntoIterator<Item = PropertyId>>(iter: I) -> Self {
        let mut set = Self::empty();
        set.extend(iter);
        set
    }
}

impl Extend<PropertyId> for PropertyIdSet {
    fn extend<I: IntoIterator<Item = PropertyId>>(&mut self, iter: I) {
        for id in iter {
            self.insert(id);
        }
    }
}

impl IntoIterator for PropertyIdSet {
    type Item = PropertyId;
    type IntoIter = PropertyIdSetIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An iterator over the ids in a [`PropertyIdSet`].
#[derive(Clone, Debug)]
pub struct PropertyIdSetIter {
    bits: u128,
}

impl Iterator for PropertyIdSetIter {
    type Item = PropertyId;

    fn next(&mut self) -> Option<Self::Item> {
        if self.bits == 0 {
            return None;
        }
        #[expect(clippy::cast_possible_truncation, reason = "trailing_zeros <= 127")]
        let index = self.bits.trailing_zeros() as u8;
        // Clear the lowest set bit.
        self.bits &= self.bits - 1;
        PropertyId::from_index(index)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let count = self.bits.count_ones() as usize;
        (count, Some(count))
    }
}

impl ExactSizeIterator for PropertyIdSetIter {}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn insert_remove_contains() {
        let mut set = PropertyIdSet::empty();
        assert!(set.is_empty());

        assert!(set.insert(PropertyId::Color));
        assert!(!set.insert(PropertyId::Color));
        assert!(set.contains(PropertyId::Color));
        assert!(!set.contains(PropertyId::Opacity));
        assert_eq!(set.len(), 1);

        assert!(set.remove(PropertyId::Color));
        assert!(!set.remove(PropertyId::Color));
        assert!(set.is_empty());
    }

    #[test]
    fn iterates_in_index_order() {
        let set = PropertyIdSet::from_iter([
            PropertyId::Transition,
            PropertyId::FontSize,
            PropertyId::Color,
        ]);
        let ids: Vec<_> = set.iter().collect();
        assert_eq!(
            ids,
            [PropertyId::FontSize, PropertyId::Color, PropertyId::Transition]
        );
        assert_eq!(set.iter().len(), 3);
    }

    #[test]
    fn all_and_complement() {
        let all = PropertyIdSet::all();
        assert_eq!(all.len(), PropertyId::COUNT);
        assert!(all.contains(PropertyId::Transition));

        let not_color = !PropertyIdSet::from(PropertyId::Color);
        assert_eq!(not_color.len(), PropertyId::COUNT - 1);
        assert!(!not_color.contains(PropertyId::Color));
        assert!((!all).is_empty());
    }
}
