// Copyright 2025 the Cascara Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dirty set: explicit dirty keys, or the "all dirty" sentinel.

use core::hash::Hash;

use hashbrown::HashSet;

/// Keys awaiting recomputation, with an "all dirty" sentinel.
///
/// `DirtySet` is either an explicit set of keys or the sentinel state in
/// which every key is considered dirty. Entering the sentinel drops the
/// explicit keys: they are subsumed. A generation counter increments on
/// every mutation so callers can detect whether the set changed since an
/// earlier observation.
///
/// # Type Parameters
///
/// - `K`: The key type, typically an attribute identifier. Must be
///   `Copy + Eq + Hash`.
///
/// # Example
///
/// ```
/// use cascara_dirty::DirtySet;
///
/// let mut dirty = DirtySet::<u16>::new();
/// assert!(dirty.is_empty());
///
/// dirty.mark(1);
/// dirty.mark(2);
/// assert!(dirty.is_dirty(1));
/// assert!(!dirty.is_all());
///
/// dirty.mark_all();
/// assert!(dirty.is_all());
/// assert_eq!(dirty.len(), 0);
/// assert!(dirty.is_dirty(1234));
/// ```
#[derive(Clone, Debug)]
pub struct DirtySet<K>
where
    K: Copy + Eq + Hash,
{
    /// Explicitly marked keys. Always empty while `all` is set.
    keys: HashSet<K>,
    /// The "every key is dirty" sentinel.
    all: bool,
    /// Generation counter, incremented on each mutation.
    generation: u64,
}

impl<K> Default for DirtySet<K>
where
    K: Copy + Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K> DirtySet<K>
where
    K: Copy + Eq + Hash,
{
    /// Creates a new empty dirty set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            keys: HashSet::new(),
            all: false,
            generation: 0,
        }
    }

    /// Creates a dirty set in the "all dirty" state.
    #[must_use]
    pub fn new_all() -> Self {
        Self {
            keys: HashSet::new(),
            all: true,
            generation: 0,
        }
    }

    /// Returns the current generation.
    ///
    /// The generation is incremented on every mutation (mark, mark-all,
    /// remove, clear, take).
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Marks a key as dirty.
    ///
    /// Returns `true` if the key was newly marked, `false` if it was already
    /// dirty (explicitly or through the sentinel).
    pub fn mark(&mut self, key: K) -> bool {
        self.generation = self.generation.wrapping_add(1);
        if self.all {
            return false;
        }
        self.keys.insert(key)
    }

    /// Marks every key yielded by `keys` as dirty.
    pub fn mark_many(&mut self, keys: impl IntoIterator<Item = K>) {
        self.generation = self.generation.wrapping_add(1);
        if self.all {
            return;
        }
        self.keys.extend(keys);
    }

    /// Enters the "all dirty" state.
    pub fn mark_all(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.all = true;
        self.keys.clear();
    }

    /// Merges another dirty set into this one.
    pub fn union_with(&mut self, other: &Self) {
        if other.all {
            self.mark_all();
        } else {
            self.mark_many(other.keys.iter().copied());
        }
    }

    /// Returns `true` if the set is in the "all dirty" state.
    #[must_use]
    pub fn is_all(&self) -> bool {
        self.all
    }

    /// Returns `true` if `key` is dirty.
    #[must_use]
    pub fn is_dirty(&self, key: K) -> bool {
        self.all || self.keys.contains(&key)
    }

    /// Returns `true` if nothing is dirty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.all && self.keys.is_empty()
    }

    /// Returns the number of explicitly marked keys.
    ///
    /// This is zero in the "all dirty" state; check [`is_all`](Self::is_all)
    /// first when the distinction matters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns an iterator over the explicitly marked keys.
    ///
    /// Yields nothing in the "all dirty" state. Use
    /// [`intersection`](Self::intersection) to expand the sentinel against a
    /// known universe of keys.
    pub fn iter(&self) -> impl Iterator<Item = K> + '_ {
        self.keys.iter().copied()
    }

    /// Returns the keys of `universe` that are dirty, in `universe` order.
    pub fn intersection<I>(&self, universe: I) -> impl Iterator<Item = K>
    where
        I: IntoIterator<Item = K>,
    {
        universe.into_iter().filter(move |key| self.is_dirty(*key))
    }

    /// Un-marks a key.
    ///
    /// Returns `true` if the key was explicitly marked. Keys cannot be removed
    /// from the "all dirty" state; this returns `false` there.
    pub fn remove(&mut self, key: K) -> bool {
        let removed = self.keys.remove(&key);
        if removed {
            self.generation = self.generation.wrapping_add(1);
        }
        removed
    }

    /// Clears all dirty state, including the sentinel.
    pub fn clear(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.all = false;
        self.keys.clear();
    }

    /// Moves the current dirty state out, leaving this set empty.
    ///
    /// The returned set is exactly what was marked since the previous
    /// `take` or `clear`.
    #[must_use = "the consumed dirty keys are returned, not discarded"]
    pub fn take(&mut self) -> Self {
        let generation = self.generation;
        self.generation = self.generation.wrapping_add(1);
        Self {
            keys: core::mem::take(&mut self.keys),
            all: core::mem::replace(&mut self.all, false),
            generation,
        }
    }
}

/// Two dirty sets are equal when they mark the same keys; generations are
/// not compared.
impl<K> PartialEq for DirtySet<K>
where
    K: Copy + Eq + Hash,
{
    fn eq(&self, other: &Self) -> bool {
        self.all == other.all && self.keys == other.keys
    }
}

impl<K> Eq for DirtySet<K> where K: Copy + Eq + Hash {}

impl<K> Extend<K> for DirtySet<K>
where
    K: Copy + Eq + Hash,
{
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        self.mark_many(iter);
    }
}

impl<K> FromIterator<K> for DirtySet<K>
where
    K: Copy + Eq + Hash,
{
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut set = Self::new();
        set.mark_many(iter);
        set
    }
}
