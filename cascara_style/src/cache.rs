// Copyright 2025 the Cascara Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Definition cache: one shared [`Definition`] per distinct rule match.

use alloc::vec::Vec;

use hashbrown::HashMap;

use crate::definition::{Definition, EffectInstancer, RuleId, RuleNode};
use crate::selector::PseudoClassSet;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct CacheKey {
    rules: Vec<RuleId>,
    volatile_pseudo_classes: PseudoClassSet,
    structurally_volatile: bool,
}

/// Memoises definitions by the sequence of rule nodes they were built from.
///
/// Elements matching the same rules share one [`Definition`].
///
/// # Example
///
/// ```rust
/// use cascara_property::{Property, PropertyId};
/// use cascara_style::{DefinitionCache, NoEffects, PseudoClassSet, RuleId, RuleNode, Specificity};
///
/// let rules = [RuleNode::new(RuleId(3), Specificity(0, 1, 0))
///     .with_property(PropertyId::Color, Property::keyword(0))];
/// let volatile = PseudoClassSet::new();
///
/// let mut cache = DefinitionCache::new();
/// let a = cache.get_or_build(&rules, &volatile, false, &NoEffects).unwrap();
/// let b = cache.get_or_build(&rules, &volatile, false, &NoEffects).unwrap();
/// assert!(a.ptr_eq(&b));
/// assert!(cache.get_or_build(&[], &volatile, false, &NoEffects).is_none());
///
/// drop((a, b));
/// assert_eq!(cache.prune(), 1);
/// assert!(cache.is_empty());
/// ```
#[derive(Debug, Default)]
pub struct DefinitionCache {
    entries: HashMap<CacheKey, Definition>,
}

impl DefinitionCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the definition for the matched `nodes`, building and caching
    /// it on first use. An empty match has no definition.
    ///
    /// The key is the sequence of rule ids in the order given, together with
    /// the volatility inputs.
    pub fn get_or_build(
        &mut self,
        nodes: &[RuleNode],
        volatile_pseudo_classes: &PseudoClassSet,
        structurally_volatile: bool,
        instancer: &dyn EffectInstancer,
    ) -> Option<Definition> {
        if nodes.is_empty() {
            return None;
        }
        let key = CacheKey {
            rules: nodes.iter().map(|node| node.id).collect(),
            volatile_pseudo_classes: volatile_pseudo_classes.clone(),
            structurally_volatile,
        };
        let definition = self.entries.entry(key).or_insert_with(|| {
            Definition::new(
                nodes,
                volatile_pseudo_classes,
                structurally_volatile,
                instancer,
            )
        });
        Some(definition.clone())
    }

    /// Drops definitions no element holds any more. Returns how many were
    /// dropped.
    pub fn prune(&mut self) -> usize {
        let before = self.entries.len();
        self.entries
            .retain(|_, definition| definition.holder_count() > 1);
        before - self.entries.len()
    }

    /// Returns the number of cached definitions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops every cached definition. Elements keep theirs.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::NoEffects;
    use crate::selector::Specificity;

    fn node(id: u32) -> RuleNode {
        RuleNode::new(RuleId(id), Specificity(0, 1, 0))
    }

    #[test]
    fn keys_distinguish_order_and_volatility() {
        let mut cache = DefinitionCache::new();
        let none = PseudoClassSet::new();
        let hover = PseudoClassSet::from_names(["hover"]);

        let ab = cache.get_or_build(&[node(1), node(2)], &none, false, &NoEffects);
        let ba = cache.get_or_build(&[node(2), node(1)], &none, false, &NoEffects);
        let volatile = cache.get_or_build(&[node(1), node(2)], &hover, false, &NoEffects);
        let structural = cache.get_or_build(&[node(1), node(2)], &none, true, &NoEffects);
        assert_eq!(cache.len(), 4);

        let ab = ab.unwrap();
        assert!(!ab.ptr_eq(&ba.unwrap()));
        assert!(!ab.ptr_eq(&volatile.unwrap()));
        assert!(structural.unwrap().is_structurally_volatile());
    }

    #[test]
    fn prune_keeps_held_definitions() {
        let mut cache = DefinitionCache::new();
        let none = PseudoClassSet::new();
        let held = cache.get_or_build(&[node(1)], &none, false, &NoEffects);
        let _ = cache.get_or_build(&[node(2)], &none, false, &NoEffects);

        assert_eq!(cache.prune(), 1);
        assert_eq!(cache.len(), 1);
        drop(held);
        assert_eq!(cache.prune(), 1);
        cache.clear();
        assert!(cache.is_empty());
    }
}
