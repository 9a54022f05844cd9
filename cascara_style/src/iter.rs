// Copyright 2025 the Cascara Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Effective-attribute iteration.
//!
//! [`StyleIterator`] walks an element's local overrides and its definition's
//! applicable declarations as one ordered sequence, without building a merged
//! table.

use alloc::string::String;

use cascara_property::{Property, PropertyId};

use crate::definition::{ConditionedProperty, ConditionedTable, Definition};
use crate::selector::PseudoClassSet;

/// Where a [`StyleEntry`] came from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum StyleSource {
    /// A local override on the element.
    Local,
    /// An unconditioned definition declaration.
    Base,
    /// A definition declaration whose pseudo-classes are all active.
    Conditioned,
}

/// One declaration yielded by a [`StyleIterator`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StyleEntry<'a> {
    /// The attribute.
    pub id: PropertyId,
    /// The declared value.
    pub property: &'a Property,
    /// The pseudo-classes the declaration requires, for conditioned entries.
    pub pseudo_classes: Option<&'a PseudoClassSet>,
    /// Where the declaration came from.
    pub source: StyleSource,
}

#[derive(Copy, Clone, Debug)]
enum Phase {
    Local(usize),
    Base(usize),
    Conditioned { list: usize, remaining: usize },
    Done,
}

/// Lazy cursor over every declaration that applies to an element.
///
/// Local overrides come first, then unconditioned definition declarations,
/// then satisfied conditioned declarations with the most specific last.
/// Definition entries shadowed by a local override are skipped. Assigning
/// the entries in order, letting later ones overwrite earlier ones for the
/// same attribute, gives the cascaded value of every attribute.
///
/// The cursor is `Clone`; a saved copy can resume as long as the definition
/// and the active pseudo-classes are unchanged, which the borrows enforce.
#[derive(Clone, Debug)]
pub struct StyleIterator<'a> {
    locals: &'a [(PropertyId, Property)],
    base: &'a [(PropertyId, Property)],
    conditioned: &'a ConditionedTable,
    active: &'a [String],
    phase: Phase,
}

impl<'a> StyleIterator<'a> {
    pub(crate) fn new(
        locals: &'a [(PropertyId, Property)],
        definition: Option<&'a Definition>,
        active: &'a [String],
    ) -> Self {
        let (base, conditioned): (&[_], &ConditionedTable) = match definition {
            Some(definition) => (
                definition.base_properties().as_slice(),
                definition.conditioned_table(),
            ),
            None => (&[], &[]),
        };
        Self {
            locals,
            base,
            conditioned,
            active,
            phase: Phase::Local(0),
        }
    }

    fn is_local(&self, id: PropertyId) -> bool {
        self.locals.binary_search_by_key(&id, |(pid, _)| *pid).is_ok()
    }

    fn start_list(&self, list: usize) -> Phase {
        match self.conditioned.get(list) {
            Some((_, entries)) => Phase::Conditioned {
                list,
                remaining: entries.len(),
            },
            None => Phase::Done,
        }
    }
}

impl<'a> Iterator for StyleIterator<'a> {
    type Item = StyleEntry<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.phase {
                Phase::Local(i) => {
                    let Some((id, property)) = self.locals.get(i) else {
                        self.phase = Phase::Base(0);
                        continue;
                    };
                    self.phase = Phase::Local(i + 1);
                    return Some(StyleEntry {
                        id: *id,
                        property,
                        pseudo_classes: None,
                        source: StyleSource::Local,
                    });
                }
                Phase::Base(i) => {
                    let Some((id, property)) = self.base.get(i) else {
                        self.phase = self.start_list(0);
                        continue;
                    };
                    self.phase = Phase::Base(i + 1);
                    if !self.is_local(*id) {
                        return Some(StyleEntry {
                            id: *id,
                            property,
                            pseudo_classes: None,
                            source: StyleSource::Base,
                        });
                    }
                }
                Phase::Conditioned { list, remaining } => {
                    let (id, entries) = &self.conditioned[list];
                    if remaining == 0 || self.is_local(*id) {
                        self.phase = self.start_list(list + 1);
                        continue;
                    }
                    self.phase = Phase::Conditioned {
                        list,
                        remaining: remaining - 1,
                    };
                    let ConditionedProperty {
                        pseudo_classes,
                        property,
                        ..
                    } = &entries[remaining - 1];
                    if pseudo_classes.is_satisfied_by(self.active) {
                        return Some(StyleEntry {
                            id: *id,
                            property,
                            pseudo_classes: Some(pseudo_classes),
                            source: StyleSource::Conditioned,
                        });
                    }
                }
                Phase::Done => return None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::{NoEffects, RuleId, RuleNode};
    use crate::selector::Specificity;
    use alloc::string::ToString;
    use alloc::vec;
    use alloc::vec::Vec;
    use cascara_property::PropertyDictionary;

    fn definition() -> Definition {
        let base = RuleNode::new(RuleId(0), Specificity(0, 1, 0))
            .with_property(PropertyId::Width, Property::px(10.0))
            .with_property(PropertyId::Height, Property::px(20.0));
        let hover = RuleNode::new(RuleId(1), Specificity(0, 1, 0))
            .with_pseudo_classes(PseudoClassSet::from_names(["hover"]))
            .with_property(PropertyId::Width, Property::px(30.0))
            .with_property(PropertyId::Opacity, Property::number(0.5));
        let hover_focus = RuleNode::new(RuleId(2), Specificity(0, 2, 0))
            .with_pseudo_classes(PseudoClassSet::from_names(["hover", "focus"]))
            .with_property(PropertyId::Width, Property::px(40.0));
        Definition::new(&[base, hover, hover_focus], &PseudoClassSet::new(), false, &NoEffects)
    }

    fn resolve(iter: StyleIterator<'_>) -> PropertyDictionary {
        let mut out = PropertyDictionary::new();
        for entry in iter {
            out.set(entry.id, entry.property.clone());
        }
        out
    }

    #[test]
    fn empty_sources_yield_nothing() {
        assert_eq!(StyleIterator::new(&[], None, &[]).count(), 0);
        let empty = Definition::empty();
        assert_eq!(StyleIterator::new(&[], Some(&empty), &[]).count(), 0);
    }

    #[test]
    fn last_assignment_matches_direct_lookup() {
        let definition = definition();
        for active in [
            vec![],
            vec!["hover".to_string()],
            vec!["focus".to_string(), "hover".to_string()],
        ] {
            let resolved = resolve(StyleIterator::new(&[], Some(&definition), &active));
            for id in [PropertyId::Width, PropertyId::Height, PropertyId::Opacity] {
                assert_eq!(
                    resolved.get(id),
                    definition.get_property(id, &active),
                    "{id} under {active:?}"
                );
            }
        }
    }

    #[test]
    fn locals_come_first_and_shadow_definition_entries() {
        let definition = definition();
        let locals = PropertyDictionary::from_iter([(PropertyId::Width, Property::px(1.0))]);
        let active = vec!["focus".to_string(), "hover".to_string()];
        let entries: Vec<_> =
            StyleIterator::new(locals.as_slice(), Some(&definition), &active).collect();

        assert_eq!(entries[0].source, StyleSource::Local);
        let widths: Vec<_> = entries
            .iter()
            .filter(|e| e.id == PropertyId::Width)
            .collect();
        assert_eq!(widths.len(), 1);
        assert_eq!(widths[0].property, &Property::px(1.0));
    }

    #[test]
    fn unsatisfied_entries_are_skipped() {
        let definition = definition();
        let entries: Vec<_> = StyleIterator::new(&[], Some(&definition), &[]).collect();
        assert!(entries.iter().all(|e| e.source == StyleSource::Base));
        assert_eq!(entries.len(), 2);
    }

    #[test]
    fn saved_cursor_resumes() {
        let definition = definition();
        let active = vec!["hover".to_string()];
        let mut iter = StyleIterator::new(&[], Some(&definition), &active);
        let first = iter.next();
        let saved = iter.clone();
        let rest: Vec<_> = iter.collect();
        let resumed: Vec<_> = saved.collect();
        assert!(first.is_some());
        assert_eq!(rest, resumed);
    }
}
