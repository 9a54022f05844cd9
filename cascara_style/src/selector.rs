// Copyright 2025 the Cascara Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rule specificity and pseudo-class requirements.
//!
//! Selector matching happens before a [`Definition`](crate::Definition) is
//! built; what survives into the cascade is each rule's [`Specificity`] and
//! the pseudo-classes it still requires at runtime.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use smallvec::SmallVec;

/// Bucketed selector specificity: `(ids, classes, tags)`.
///
/// The fields are ordered highest-weight-first so that derived `Ord`
/// gives CSS-like lexicographic ordering.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Specificity(pub u32, pub u32, pub u32);

/// The pseudo-classes active on an element, in activation order.
///
/// Activating a pseudo-class twice records it twice; deactivating removes
/// every occurrence.
pub type PseudoClassList = SmallVec<[String; 4]>;

/// An owned, sorted, deduplicated set of pseudo-class names.
///
/// Rules are conditioned on a `PseudoClassSet`; the rule applies when every
/// name in the set is active on the element.
///
/// # Example
///
/// ```rust
/// use cascara_style::PseudoClassSet;
///
/// let set = PseudoClassSet::from_names(["hover", "active", "hover"]);
/// assert_eq!(set.len(), 2);
///
/// let active = ["focus".to_string(), "hover".to_string(), "active".to_string()];
/// assert!(set.is_satisfied_by(&active));
/// assert!(!set.is_satisfied_by(&active[..2]));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PseudoClassSet(Box<[String]>);

impl PseudoClassSet {
    /// Creates the empty set, which every element satisfies.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Constructs a set from names, sorting and deduplicating.
    #[must_use]
    pub fn from_names<S: Into<String>>(names: impl IntoIterator<Item = S>) -> Self {
        let mut names: Vec<String> = names.into_iter().map(Into::into).collect();
        names.sort();
        names.dedup();
        Self(names.into_boxed_slice())
    }

    /// Returns `true` if the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of names in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns the names in sorted order.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Returns `true` if this set contains `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.binary_search_by(|n| n.as_str().cmp(name)).is_ok()
    }

    /// Returns `true` if every name in this set appears in `active`.
    ///
    /// `active` is an element's activation list: unsorted, possibly with
    /// duplicates.
    #[must_use]
    pub fn is_satisfied_by(&self, active: &[String]) -> bool {
        self.0.iter().all(|required| active.contains(required))
    }
}

impl<S: Into<String>> FromIterator<S> for PseudoClassSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::from_names(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn from_names_sorts_and_dedups() {
        let set = PseudoClassSet::from_names(["focus", "active", "focus"]);
        assert_eq!(set.as_slice(), ["active", "focus"]);
        assert!(set.contains("focus"));
        assert!(!set.contains("hover"));
    }

    #[test]
    fn empty_set_is_always_satisfied() {
        assert!(PseudoClassSet::new().is_satisfied_by(&[]));
        assert!(!PseudoClassSet::from_names(["hover"]).is_satisfied_by(&[]));
    }

    #[test]
    fn duplicates_in_active_list_are_harmless() {
        let active = ["hover".to_string(), "hover".to_string()];
        assert!(PseudoClassSet::from_names(["hover"]).is_satisfied_by(&active));
    }

    #[test]
    fn specificity_orders_lexicographically() {
        assert!(Specificity(0, 1, 0) > Specificity(0, 0, 5));
        assert!(Specificity(1, 0, 0) > Specificity(0, 9, 9));
    }
}
