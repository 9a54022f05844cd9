// Copyright 2025 the Cascara Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sparse attribute storage.
//!
//! This module provides [`PropertyDictionary`], used for rule declaration
//! blocks and per-element local overrides.
//!
//! # Implementation
//!
//! Entries live in a `SmallVec` sorted by [`PropertyId`] and are found by
//! binary search. Declaration blocks and local overrides rarely hold more than
//! a handful of attributes, so the first 8 entries stay inline.

use smallvec::SmallVec;

use crate::id::PropertyId;
use crate::set::PropertyIdSet;
use crate::value::Property;

const INLINE_CAPACITY: usize = 8;

/// A sparse map from [`PropertyId`] to [`Property`], sorted by id.
///
/// # Example
///
/// ```rust
/// use cascara_property::{Property, PropertyDictionary, PropertyId};
///
/// let mut dict = PropertyDictionary::new();
/// dict.set(PropertyId::Width, Property::px(100.0));
/// dict.set(PropertyId::Color, Property::keyword(0));
///
/// assert_eq!(dict.get(PropertyId::Width), Some(&Property::px(100.0)));
/// assert_eq!(dict.len(), 2);
///
/// // Iteration is in id order, not insertion order.
/// let ids: Vec<_> = dict.iter().map(|(id, _)| id).collect();
/// assert_eq!(ids, [PropertyId::Width, PropertyId::Color]);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PropertyDictionary {
    entries: SmallVec<[(PropertyId, Property); INLINE_CAPACITY]>,
}

impl PropertyDictionary {
    /// Creates an empty dictionary.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    fn find(&self, id: PropertyId) -> Result<usize, usize> {
        self.entries.binary_search_by_key(&id, |(pid, _)| *pid)
    }

    /// Returns the value stored for `id`.
    #[must_use]
    pub fn get(&self, id: PropertyId) -> Option<&Property> {
        self.find(id).ok().map(|i| &self.entries[i].1)
    }

    /// Returns `true` if a value is stored for `id`.
    #[must_use]
    pub fn contains(&self, id: PropertyId) -> bool {
        self.find(id).is_ok()
    }

    /// Stores `property` for `id`, returning the value it replaced.
    pub fn set(&mut self, id: PropertyId, property: Property) -> Option<Property> {
        match self.find(id) {
            Ok(i) => Some(core::mem::replace(&mut self.entries[i].1, property)),
            Err(i) => {
                self.entries.insert(i, (id, property));
                None
            }
        }
    }

    /// Removes the value stored for `id`.
    pub fn remove(&mut self, id: PropertyId) -> Option<Property> {
        self.find(id).ok().map(|i| self.entries.remove(i).1)
    }

    /// Copies every entry of `other` into this dictionary, replacing values
    /// for ids present in both.
    pub fn merge(&mut self, other: &Self) {
        for (id, property) in other.iter() {
            self.set(id, property.clone());
        }
    }

    /// Returns the number of stored values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no values are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the entries in id order.
    #[must_use]
    pub fn as_slice(&self) -> &[(PropertyId, Property)] {
        &self.entries
    }

    /// Iterates over the entries in id order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (PropertyId, &Property)> + '_ {
        self.entries.iter().map(|(id, property)| (*id, property))
    }

    /// Returns the set of ids with a stored value.
    #[must_use]
    pub fn ids(&self) -> PropertyIdSet {
        self.entries.iter().map(|(id, _)| *id).collect()
    }
}

impl FromIterator<(PropertyId, Property)> for PropertyDictionary {
    fn from_iter<I: IntoIterator<Item = (PropertyId, Property)>>(iter: I) -> Self {
        let mut dict = Self::new();
        for (id, property) in iter {
            dict.set(id, property);
        }
        dict
    }
}
