// Copyright 2025 the Cascara Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tree-aware style operations.

use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use cascara_dirty::DirtySet;
use cascara_property::{
    Property, PropertyId, PropertyIdSet, PropertyRegistry, Transition, TransitionList, Unit,
    Value,
};
use kurbo::Size;
use tracing::debug;

use crate::compute::inherited_dirty;
use crate::computed::DEFAULT_FONT_SIZE;
use crate::definition::{Definition, PseudoClassVolatility};
use crate::host::{StyleHost, children};
use crate::resolve::ResolveContext;
use crate::selector::PseudoClassList;

/// Runs style operations that reach beyond one element.
///
/// A `StyleCx` borrows the attribute registry and drives an element's
/// [`ElementStyle`](crate::ElementStyle) through a [`StyleHost`]: ancestor
/// lookup, pseudo-class and class changes with their invalidation of
/// descendants, definition switches with transitions, and value computation
/// with propagation of inherited attributes to children.
///
/// # Example
///
/// See the crate-level documentation.
#[derive(Copy, Clone, Debug)]
pub struct StyleCx<'a> {
    registry: &'a PropertyRegistry,
}

impl<'a> StyleCx<'a> {
    /// Creates a context over `registry`.
    #[must_use]
    pub fn new(registry: &'a PropertyRegistry) -> Self {
        Self { registry }
    }

    /// Returns the registry.
    #[must_use]
    pub fn registry(&self) -> &'a PropertyRegistry {
        self.registry
    }

    /// Returns the value of `id` on `key`.
    ///
    /// Lookup order: the local override, then the definition under the
    /// active pseudo-classes, then (for inherited attributes) the nearest
    /// ancestor that declares it itself, then the registered default.
    /// Ancestors are not cascaded further; computed values are the
    /// authoritative inheritance path.
    #[must_use]
    pub fn get_property<'s, H: StyleHost>(
        &'s self,
        host: &'s H,
        key: H::Key,
        id: PropertyId,
    ) -> Option<&'s Property> {
        let style = host.style(key);
        self.resolve(
            host,
            key,
            style.definition(),
            style.active_pseudo_classes(),
            id,
        )
    }

    /// [`get_property`](Self::get_property) with an explicit definition and
    /// pseudo-class list for `key`.
    fn resolve<'s, H: StyleHost>(
        &'s self,
        host: &'s H,
        key: H::Key,
        definition: Option<&'s Definition>,
        active: &[String],
        id: PropertyId,
    ) -> Option<&'s Property> {
        if let Some(p) = host.style(key).local_override(id) {
            return Some(p);
        }
        if let Some(p) = definition.and_then(|d| d.get_property(id, active)) {
            return Some(p);
        }
        if self.registry.is_inherited(id) {
            let mut ancestor = host.parent(key);
            while let Some(a) = ancestor {
                if let Some(p) = host.style(a).get_local_property(id) {
                    return Some(p);
                }
                ancestor = host.parent(a);
            }
        }
        self.registry.default_value(id)
    }

    /// Activates or deactivates a pseudo-class on `key`.
    ///
    /// Activating appends (duplicates allowed); deactivating removes every
    /// occurrence. Returns `false` and does nothing else if the list did not
    /// change. Otherwise decorators are invalidated, the attributes the
    /// pseudo-class can affect are marked dirty (or handed to transitions),
    /// and a volatile pseudo-class invalidates fonts or descendant
    /// definitions.
    pub fn set_pseudo_class<H: StyleHost>(
        &self,
        host: &mut H,
        key: H::Key,
        pseudo_class: &str,
        activate: bool,
    ) -> bool {
        let style = host.style_mut(key);
        let before: PseudoClassList = style.active_pseudo_classes().iter().cloned().collect();
        if !style.apply_pseudo_class(pseudo_class, activate) {
            return false;
        }
        let after: PseudoClassList = style.active_pseudo_classes().iter().cloned().collect();
        let definition = style.definition().cloned();

        host.dirty_decorators(key, false);

        let Some(definition) = definition else {
            return true;
        };

        let mut properties = definition.defined_properties_for(pseudo_class);
        self.transition_property_changes(
            host,
            key,
            &mut properties,
            Some(&definition),
            Some(&definition),
            &before,
            &after,
        );
        host.style_mut(key).dirty_properties(properties);

        match definition.pseudo_class_volatility(pseudo_class) {
            PseudoClassVolatility::Stable => {}
            PseudoClassVolatility::FontVolatile => host.dirty_font(key),
            PseudoClassVolatility::StructureVolatile => self.dirty_child_definitions(host, key),
        }
        true
    }

    /// Sets or clears one class on `key`. Returns `true` if the class list
    /// changed, in which case the definitions of `key` and every descendant
    /// are marked for re-resolution.
    pub fn set_class<H: StyleHost>(
        &self,
        host: &mut H,
        key: H::Key,
        class: &str,
        activate: bool,
    ) -> bool {
        let changed = host.style_mut(key).apply_class(class, activate);
        if changed {
            self.dirty_definition(host, key);
        }
        changed
    }

    /// Replaces the classes of `key` with the whitespace-separated
    /// `class_names`. Returns `true` if the set of classes changed, in which case
    /// the definitions of `key` and every descendant are marked for
    /// re-resolution.
    pub fn set_class_names<H: StyleHost>(
        &self,
        host: &mut H,
        key: H::Key,
        class_names: &str,
    ) -> bool {
        let changed = host.style_mut(key).apply_class_names(class_names);
        if changed {
            self.dirty_definition(host, key);
        }
        changed
    }

    /// Marks the definitions of `key` and every descendant for
    /// re-resolution.
    pub fn dirty_definition<H: StyleHost>(&self, host: &mut H, key: H::Key) {
        host.style_mut(key).mark_definition_dirty();
        self.dirty_child_definitions(host, key);
    }

    /// Marks the definition of every descendant of `key` for re-resolution.
    pub fn dirty_child_definitions<H: StyleHost>(&self, host: &mut H, key: H::Key) {
        let mut pending: Vec<H::Key> = children(&*host, key).collect();
        while let Some(next) = pending.pop() {
            host.style_mut(next).mark_definition_dirty();
            pending.extend(children(&*host, next));
        }
    }

    /// Re-resolves the definition of `key` if it is marked dirty.
    ///
    /// When the resolved definition differs from the current one (an empty
    /// result replacing an empty one counts as no change), the attributes
    /// either defines under the active pseudo-classes are handed to
    /// transitions or marked dirty, and decorators are rebuilt. Returns
    /// `true` on a switch.
    pub fn update_definition<H: StyleHost>(&self, host: &mut H, key: H::Key) -> bool {
        if !host.style(key).is_definition_dirty() {
            return false;
        }
        host.style_mut(key).clear_definition_dirty();

        let new = host.element_definition(key);
        let style = host.style(key);
        let old = style.definition().cloned();
        let unchanged = match (&old, &new) {
            (Some(old), Some(new)) => old.ptr_eq(new),
            (None, None) => true,
            _ => false,
        };
        if unchanged {
            return false;
        }

        let active: PseudoClassList = style.active_pseudo_classes().iter().cloned().collect();
        let mut properties = PropertyIdSet::empty();
        if let Some(old) = &old {
            properties |= old.defined_properties(&active);
        }
        if let Some(new) = &new {
            properties |= new.defined_properties(&active);
        }

        self.transition_property_changes(
            host,
            key,
            &mut properties,
            old.as_ref(),
            new.as_ref(),
            &active,
            &active,
        );

        debug!(
            ?key,
            empty = new.is_none(),
            dirty = properties.len(),
            "switched definition"
        );
        let style = host.style_mut(key);
        style.set_definition(new);
        style.dirty_properties(properties);
        host.dirty_decorators(key, true);
        true
    }

    /// Offers the attributes in `properties` to the host's transitions.
    ///
    /// Applies only when both definitions exist and the `transition` value
    /// of `key` under `new` and `after` is not `none`. An attribute is
    /// offered when it has a matching transition and its value under
    /// (`old`, `before`) differs from its value under (`new`, `after`).
    /// Attributes whose transition the host accepts are removed from
    /// `properties`.
    pub fn transition_property_changes<H: StyleHost>(
        &self,
        host: &mut H,
        key: H::Key,
        properties: &mut PropertyIdSet,
        old: Option<&Definition>,
        new: Option<&Definition>,
        before: &[String],
        after: &[String],
    ) {
        let (Some(old), Some(new)) = (old, new) else {
            return;
        };
        if properties.is_empty() {
            return;
        }

        let list: Rc<TransitionList> = {
            let transition = host
                .style(key)
                .local_override(PropertyId::Transition)
                .or_else(|| new.get_property(PropertyId::Transition, after));
            match transition.map(|p| &p.value) {
                Some(Value::Transitions(list)) => Rc::clone(list),
                _ => return,
            }
        };
        if list.none {
            return;
        }

        let candidates: Vec<Transition> = if list.all {
            let Some(timing) = list.transitions.first() else {
                return;
            };
            properties
                .iter()
                .map(|id| Transition { id, ..*timing })
                .collect()
        } else {
            list.transitions.clone()
        };

        for transition in candidates {
            if !properties.contains(transition.id) {
                continue;
            }
            let values = {
                let view: &H = host;
                let from = self.resolve(view, key, Some(old), before, transition.id);
                let to = self.resolve(view, key, Some(new), after, transition.id);
                match (from, to) {
                    (Some(from), Some(to)) if from != to => Some((from.clone(), to.clone())),
                    _ => None,
                }
            };
            if let Some((from, to)) = values {
                if host.start_transition(key, &transition, &from, &to) {
                    properties.remove(transition.id);
                }
            }
        }
    }

    /// Recomputes the values of `key` and marks the inherited attributes it
    /// drained dirty on each direct child.
    ///
    /// The parent's values must already be up to date. Returns the drained
    /// set; see [`ElementStyle::compute_values`](crate::ElementStyle::compute_values).
    pub fn compute_values<H: StyleHost>(
        &self,
        host: &mut H,
        key: H::Key,
        dp_ratio: f32,
    ) -> DirtySet<PropertyId> {
        if !host.style(key).any_properties_dirty() {
            return DirtySet::new();
        }

        let parent = host
            .parent(key)
            .map(|p| host.style(p).computed_values().clone());
        let document = Some(host.owner_document(key))
            .filter(|d| *d != key)
            .map(|d| host.style(d).computed_values().clone());

        let dirty = host
            .style_mut(key)
            .compute_values(self.registry, parent.as_ref(), document.as_ref(), dp_ratio);

        let inherited = inherited_dirty(&dirty, self.registry);
        if !inherited.is_empty() {
            let kids: Vec<H::Key> = children(&*host, key).collect();
            for child in kids {
                host.style_mut(child).dirty_properties(inherited);
            }
        }
        dirty
    }

    /// Updates definitions and values of `root` and all its descendants,
    /// parents before children. Returns the number of elements whose values
    /// were recomputed.
    pub fn update_subtree<H: StyleHost>(&self, host: &mut H, root: H::Key, dp_ratio: f32) -> usize {
        let mut recomputed = 0;
        let mut pending = vec![root];
        while let Some(key) = pending.pop() {
            self.update_definition(host, key);
            if !self.compute_values(host, key, dp_ratio).is_empty() {
                recomputed += 1;
            }
            let start = pending.len();
            pending.extend(children(&*host, key));
            pending[start..].reverse();
        }
        recomputed
    }

    /// Marks, on `key` and every descendant, the attributes whose current
    /// value is in `rem`. Call after the document font size changes.
    pub fn dirty_rem_properties<H: StyleHost>(&self, host: &mut H, key: H::Key) {
        self.dirty_unit_properties(host, key, Unit::REM);
    }

    /// Marks, on `key` and every descendant, the attributes whose current
    /// value is in `dp`. Call after the device pixel ratio changes.
    pub fn dirty_dp_properties<H: StyleHost>(&self, host: &mut H, key: H::Key) {
        self.dirty_unit_properties(host, key, Unit::DP);
    }

    fn dirty_unit_properties<H: StyleHost>(&self, host: &mut H, key: H::Key, unit: Unit) {
        let registered = self.registry.registered_properties();
        let mut pending = vec![key];
        while let Some(next) = pending.pop() {
            let matching: PropertyIdSet = {
                let view: &H = host;
                registered
                    .iter()
                    .filter(|id| {
                        self.get_property(view, next, *id)
                            .is_some_and(|p| p.unit == unit)
                    })
                    .collect()
            };
            if !matching.is_empty() {
                host.style_mut(next).dirty_properties(matching);
            }
            pending.extend(children(&*host, next));
        }
    }

    /// Gathers the reference quantities for resolving the relative lengths
    /// of `key`, whose values must be computed.
    #[must_use]
    pub fn resolve_context<H: StyleHost>(
        &self,
        host: &H,
        key: H::Key,
        containing_block: Size,
        dp_ratio: f32,
    ) -> ResolveContext {
        let values = host.style(key).computed_values();
        let font_size_of = |k: H::Key| host.style(k).computed_values().font_size;
        ResolveContext {
            font_size: values.font_size,
            parent_font_size: host.parent(key).map_or(DEFAULT_FONT_SIZE, font_size_of),
            document_font_size: font_size_of(host.owner_document(key)),
            dp_ratio,
            line_height: values.line_height.value,
            containing_block,
        }
    }
}
