// Copyright 2025 the Cascara Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-element style state.

use alloc::string::String;
use alloc::vec::Vec;
use core::mem;

use cascara_dirty::DirtySet;
use cascara_property::{ParseError, Property, PropertyDictionary, PropertyId, PropertyRegistry};
use tracing::{trace, warn};

use crate::compute::{UnitBasis, apply_property, compute_font_size, compute_line_height};
use crate::computed::{ComputedValues, DEFAULT_FONT_SIZE, LineHeight, LineHeightInherit};
use crate::definition::Definition;
use crate::iter::StyleIterator;
use crate::selector::PseudoClassList;

/// The style state one element owns.
///
/// An `ElementStyle` holds the element's local overrides, its active
/// pseudo-classes and classes, the [`Definition`] it currently matches, the
/// set of attributes awaiting recomputation and the last computed values.
///
/// Operations that need the document tree (ancestor lookup, invalidating
/// descendants, transitions) live on [`StyleCx`](crate::StyleCx); the methods
/// here only touch this element.
///
/// # Example
///
/// ```rust
/// use cascara_property::{PropertyId, PropertyRegistry};
/// use cascara_style::ElementStyle;
///
/// let registry = PropertyRegistry::with_defaults();
/// let mut style = ElementStyle::new();
///
/// style.set_property_text(&registry, "width", "50%").unwrap();
/// assert!(style.set_property_text(&registry, "width", "wide").is_err());
///
/// let dirty = style.compute_values(&registry, None, None, 1.0);
/// assert!(dirty.is_all());
/// assert!(!style.any_properties_dirty());
///
/// style.remove_property(PropertyId::Width);
/// let dirty = style.compute_values(&registry, None, None, 1.0);
/// assert_eq!(dirty.iter().collect::<Vec<_>>(), [PropertyId::Width]);
/// ```
#[derive(Debug)]
pub struct ElementStyle {
    local: Option<PropertyDictionary>,
    pseudo_classes: PseudoClassList,
    classes: Vec<String>,
    definition: Option<Definition>,
    definition_dirty: bool,
    dirty: DirtySet<PropertyId>,
    computed: ComputedValues,
    default_initialized: bool,
}

impl Default for ElementStyle {
    fn default() -> Self {
        Self {
            local: None,
            pseudo_classes: PseudoClassList::new(),
            classes: Vec::new(),
            definition: None,
            definition_dirty: true,
            dirty: DirtySet::new_all(),
            computed: ComputedValues::default(),
            default_initialized: true,
        }
    }
}

fn lookup<'a>(
    local: Option<&'a PropertyDictionary>,
    definition: Option<&'a Definition>,
    active: &[String],
    id: PropertyId,
) -> Option<&'a Property> {
    local
        .and_then(|local| local.get(id))
        .or_else(|| definition.and_then(|d| d.get_property(id, active)))
}

impl ElementStyle {
    /// Creates the state of a new element: no definition yet, every
    /// attribute dirty.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the local override of `id`, if any.
    #[must_use]
    pub fn local_override(&self, id: PropertyId) -> Option<&Property> {
        self.local.as_ref().and_then(|local| local.get(id))
    }

    /// Returns the local overrides, if any were ever set.
    #[must_use]
    pub fn local_properties(&self) -> Option<&PropertyDictionary> {
        self.local.as_ref()
    }

    /// Returns the value of `id` from this element alone: its local override,
    /// else its definition under the active pseudo-classes.
    #[must_use]
    pub fn get_local_property(&self, id: PropertyId) -> Option<&Property> {
        lookup(
            self.local.as_ref(),
            self.definition.as_ref(),
            &self.pseudo_classes,
            id,
        )
    }

    /// Sets a local override to an already parsed value.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Unregistered`] if `id` has no definition in
    /// `registry`; nothing changes in that case.
    pub fn set_property(
        &mut self,
        registry: &PropertyRegistry,
        id: PropertyId,
        property: Property,
    ) -> Result<(), ParseError> {
        if registry.property(id).is_none() {
            return Err(ParseError::Unregistered { property: id });
        }
        self.local
            .get_or_insert_with(PropertyDictionary::new)
            .set(id, property);
        self.dirty.mark(id);
        Ok(())
    }

    /// Parses `text` as the value of the attribute called `name` and sets it
    /// as a local override.
    ///
    /// # Errors
    ///
    /// Returns the parse error after logging a warning; nothing changes in
    /// that case.
    pub fn set_property_text(
        &mut self,
        registry: &PropertyRegistry,
        name: &str,
        text: &str,
    ) -> Result<PropertyId, ParseError> {
        match registry.parse_property_declaration(name, text) {
            Ok((id, property)) => {
                self.local
                    .get_or_insert_with(PropertyDictionary::new)
                    .set(id, property);
                self.dirty.mark(id);
                Ok(id)
            }
            Err(error) => {
                warn!(
                    property = name,
                    value = text,
                    %error,
                    "syntax error in local property declaration"
                );
                Err(error)
            }
        }
    }

    /// Removes the local override of `id`. Returns `false` if there was none.
    pub fn remove_property(&mut self, id: PropertyId) -> bool {
        let removed = self
            .local
            .as_mut()
            .and_then(|local| local.remove(id))
            .is_some();
        if removed {
            self.dirty.mark(id);
        }
        removed
    }

    /// Marks `id` for recomputation.
    pub fn dirty_property(&mut self, id: PropertyId) {
        self.dirty.mark(id);
    }

    /// Marks several attributes for recomputation.
    pub fn dirty_properties(&mut self, ids: impl IntoIterator<Item = PropertyId>) {
        self.dirty.mark_many(ids);
    }

    /// Marks every attribute for recomputation.
    pub fn dirty_all_properties(&mut self) {
        self.dirty.mark_all();
    }

    /// Returns `true` if any attribute awaits recomputation.
    #[must_use]
    pub fn any_properties_dirty(&self) -> bool {
        !self.dirty.is_empty()
    }

    /// Returns the attributes awaiting recomputation.
    #[must_use]
    pub fn dirty_set(&self) -> &DirtySet<PropertyId> {
        &self.dirty
    }

    /// Iterates over every declaration that applies to this element.
    ///
    /// See [`StyleIterator`] for the ordering guarantees.
    #[must_use]
    pub fn iter(&self) -> StyleIterator<'_> {
        let locals = self.local.as_ref().map_or(&[][..], PropertyDictionary::as_slice);
        StyleIterator::new(locals, self.definition.as_ref(), &self.pseudo_classes)
    }

    /// Returns `true` if `pseudo_class` is active.
    #[must_use]
    pub fn is_pseudo_class_set(&self, pseudo_class: &str) -> bool {
        self.pseudo_classes.iter().any(|p| p == pseudo_class)
    }

    /// Returns the active pseudo-classes in activation order, duplicates
    /// included.
    #[must_use]
    pub fn active_pseudo_classes(&self) -> &[String] {
        &self.pseudo_classes
    }

    /// Returns `true` if `class` is set.
    #[must_use]
    pub fn is_class_set(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Returns the classes in the order they were set.
    #[must_use]
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Returns the classes joined by single spaces.
    #[must_use]
    pub fn class_names(&self) -> String {
        self.classes.join(" ")
    }

    /// Returns the definition this element currently matches.
    #[must_use]
    pub fn definition(&self) -> Option<&Definition> {
        self.definition.as_ref()
    }

    /// Returns `true` if the definition must be re-resolved.
    #[must_use]
    pub fn is_definition_dirty(&self) -> bool {
        self.definition_dirty
    }

    /// Requests that the definition be re-resolved on the next update.
    pub fn mark_definition_dirty(&mut self) {
        self.definition_dirty = true;
    }

    /// Returns the values of the last [`compute_values`](Self::compute_values).
    #[must_use]
    pub fn computed_values(&self) -> &ComputedValues {
        &self.computed
    }

    /// Adds (`activate`) or removes every occurrence of (`!activate`) a
    /// pseudo-class. Returns `true` if the list length changed.
    pub(crate) fn apply_pseudo_class(&mut self, pseudo_class: &str, activate: bool) -> bool {
        let before = self.pseudo_classes.len();
        if activate {
            self.pseudo_classes.push(String::from(pseudo_class));
        } else {
            self.pseudo_classes.retain(|p| p.as_str() != pseudo_class);
        }
        self.pseudo_classes.len() != before
    }

    pub(crate) fn apply_class(&mut self, class: &str, activate: bool) -> bool {
        let position = self.classes.iter().position(|c| c == class);
        match (activate, position) {
            (true, None) => {
                self.classes.push(String::from(class));
                true
            }
            (false, Some(index)) => {
                self.classes.remove(index);
                true
            }
            _ => false,
        }
    }

    /// Replaces the classes with the whitespace-separated `names`. Returns
    /// `true` if the set of classes differs; order alone is not a change.
    pub(crate) fn apply_class_names(&mut self, names: &str) -> bool {
        let mut classes: Vec<String> = Vec::new();
        for name in names.split_whitespace() {
            if !classes.iter().any(|c| c == name) {
                classes.push(String::from(name));
            }
        }
        let changed = classes.len() != self.classes.len()
            || classes.iter().any(|c| !self.classes.contains(c));
        self.classes = classes;
        changed
    }

    pub(crate) fn set_definition(&mut self, definition: Option<Definition>) -> Option<Definition> {
        mem::replace(&mut self.definition, definition)
    }

    pub(crate) fn clear_definition_dirty(&mut self) {
        self.definition_dirty = false;
    }

    /// Recomputes the typed values and drains the dirty set.
    ///
    /// `parent` and `document` are the computed values of the parent and of
    /// the owning document, when they exist. Returns the drained set, which
    /// is empty (and nothing is recomputed) if nothing was dirty.
    ///
    /// Font size is resolved first; if it changes, every attribute is marked
    /// dirty before draining. Line height follows; if it changes,
    /// `vertical-align` is marked dirty. The attributes `registry` lists as
    /// inherited are copied from `parent`, and then every applicable
    /// declaration is applied in cascade order.
    pub fn compute_values(
        &mut self,
        registry: &PropertyRegistry,
        parent: Option<&ComputedValues>,
        document: Option<&ComputedValues>,
        dp_ratio: f32,
    ) -> DirtySet<PropertyId> {
        if self.dirty.is_empty() {
            return DirtySet::new();
        }

        let values = &mut self.computed;
        let local = self.local.as_ref();
        let definition = self.definition.as_ref();
        let active = &self.pseudo_classes[..];

        let font_size_before = values.font_size;
        let line_height_before = values.line_height.value;

        if !self.default_initialized {
            *values = ComputedValues::default();
        }
        self.default_initialized = false;

        let document_font_size = document.map_or(DEFAULT_FONT_SIZE, |d| d.font_size);

        if let Some(p) = lookup(local, definition, active, PropertyId::FontSize) {
            let parent_font_size = parent.map_or(DEFAULT_FONT_SIZE, |v| v.font_size);
            values.font_size = compute_font_size(p, parent_font_size, document_font_size, dp_ratio);
        } else if let Some(parent) = parent {
            values.font_size = parent.font_size;
        }
        if values.font_size != font_size_before {
            self.dirty.mark_all();
        }
        let font_size = values.font_size;

        if let Some(p) = lookup(local, definition, active, PropertyId::LineHeight) {
            values.line_height = compute_line_height(p, font_size, document_font_size, dp_ratio);
        } else if let Some(parent) = parent {
            let inherited = parent.line_height;
            values.line_height = match inherited.inherit_type {
                LineHeightInherit::Number => LineHeight::new(
                    font_size * inherited.inherit_value,
                    LineHeightInherit::Number,
                    inherited.inherit_value,
                ),
                LineHeightInherit::Length => inherited,
            };
        }
        if values.line_height.value != line_height_before {
            self.dirty.mark(PropertyId::VerticalAlign);
        }

        if let Some(parent) = parent {
            values.inherit_from(parent, registry.registered_inherited_properties());
        }

        let basis = UnitBasis {
            font_size,
            document_font_size,
            dp_ratio,
        };
        let locals = local.map_or(&[][..], PropertyDictionary::as_slice);
        for entry in StyleIterator::new(locals, definition, active) {
            apply_property(values, entry.id, entry.property, basis);
        }

        let drained = self.dirty.take();
        trace!(
            all = drained.is_all(),
            count = drained.len(),
            "drained dirty properties"
        );
        drained
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::computed::LengthPercentageAuto;
    use crate::definition::{NoEffects, RuleId, RuleNode};
    use crate::selector::{PseudoClassSet, Specificity};
    use cascara_property::Unit;

    fn registry() -> PropertyRegistry {
        PropertyRegistry::with_defaults()
    }

    #[test]
    fn new_element_is_all_dirty() {
        let style = ElementStyle::new();
        assert!(style.dirty_set().is_all());
        assert!(style.is_definition_dirty());
        assert!(style.local_properties().is_none());
    }

    #[test]
    fn local_overrides_beat_definition() {
        let registry = registry();
        let rule = RuleNode::new(RuleId(0), Specificity(0, 1, 0))
            .with_property(PropertyId::Width, Property::px(10.0));
        let mut style = ElementStyle::new();
        style.set_definition(Some(Definition::new(
            &[rule],
            &PseudoClassSet::new(),
            false,
            &NoEffects,
        )));

        assert_eq!(
            style.get_local_property(PropertyId::Width),
            Some(&Property::px(10.0))
        );
        style
            .set_property(&registry, PropertyId::Width, Property::px(20.0))
            .unwrap();
        assert_eq!(
            style.get_local_property(PropertyId::Width),
            Some(&Property::px(20.0))
        );
        assert!(style.remove_property(PropertyId::Width));
        assert!(!style.remove_property(PropertyId::Width));
        assert_eq!(
            style.get_local_property(PropertyId::Width),
            Some(&Property::px(10.0))
        );
    }

    #[test]
    fn parse_failure_leaves_state_untouched() {
        let registry = registry();
        let mut style = ElementStyle::new();
        style.compute_values(&registry, None, None, 1.0);

        assert!(style.set_property_text(&registry, "opacity", "lots").is_err());
        assert!(style.set_property_text(&registry, "no-such", "1").is_err());
        assert!(!style.any_properties_dirty());
        assert!(style.local_properties().is_none());
    }

    #[test]
    fn unregistered_attribute_is_rejected() {
        let mut style = ElementStyle::new();
        let empty = PropertyRegistry::new();
        assert_eq!(
            style.set_property(&empty, PropertyId::Color, Property::number(1.0)),
            Err(ParseError::Unregistered {
                property: PropertyId::Color
            })
        );
    }

    #[test]
    fn pseudo_class_duplicates() {
        let mut style = ElementStyle::new();
        assert!(style.apply_pseudo_class("hover", true));
        assert!(style.apply_pseudo_class("hover", true));
        assert!(style.is_pseudo_class_set("hover"));
        assert!(style.apply_pseudo_class("hover", false));
        assert!(!style.is_pseudo_class_set("hover"));
        assert!(!style.apply_pseudo_class("hover", false));
    }

    #[test]
    fn class_names_round_trip() {
        let mut style = ElementStyle::new();
        assert!(style.apply_class_names("a  b a"));
        assert_eq!(style.class_names(), "a b");
        assert!(!style.apply_class_names("a b"));
        assert!(!style.apply_class_names("b a"));
        assert_eq!(style.class_names(), "b a");
        assert!(style.apply_class_names("a b c"));
        assert!(style.apply_class_names("a b"));
        assert!(style.apply_class("c", true));
        assert!(!style.apply_class("c", true));
        assert!(style.is_class_set("c"));
        assert!(style.apply_class("b", false));
        assert_eq!(style.classes(), ["a", "c"]);
    }

    #[test]
    fn drained_set_matches_dirtied_properties() {
        let registry = registry();
        let mut style = ElementStyle::new();
        assert!(style.compute_values(&registry, None, None, 1.0).is_all());
        assert!(style.compute_values(&registry, None, None, 1.0).is_empty());

        style
            .set_property(&registry, PropertyId::Width, Property::px(5.0))
            .unwrap();
        style.dirty_property(PropertyId::Opacity);
        let drained = style.compute_values(&registry, None, None, 1.0);
        let mut ids: Vec<_> = drained.iter().collect();
        ids.sort();
        assert_eq!(ids, [PropertyId::Width, PropertyId::Opacity]);
        assert_eq!(
            style.computed_values().width,
            LengthPercentageAuto::Length(5.0)
        );
    }

    #[test]
    fn font_size_change_marks_everything() {
        let registry = registry();
        let mut style = ElementStyle::new();
        style.compute_values(&registry, None, None, 1.0);

        style
            .set_property(&registry, PropertyId::FontSize, Property::length(2.0, Unit::EM))
            .unwrap();
        let drained = style.compute_values(&registry, None, None, 1.0);
        assert!(drained.is_all());
        assert_eq!(style.computed_values().font_size, 24.0);
    }

    #[test]
    fn line_height_number_is_reapplied_to_child_font_size() {
        let registry = registry();
        let mut parent = ComputedValues::default();
        parent.line_height = LineHeight::new(20.0, LineHeightInherit::Number, 1.25);

        let mut child = ElementStyle::new();
        child
            .set_property(&registry, PropertyId::FontSize, Property::px(16.0))
            .unwrap();
        child.compute_values(&registry, Some(&parent), None, 1.0);
        assert_eq!(
            child.computed_values().line_height,
            LineHeight::new(20.0, LineHeightInherit::Number, 1.25)
        );

        parent.line_height = LineHeight::new(30.0, LineHeightInherit::Length, 30.0);
        child.dirty_property(PropertyId::LineHeight);
        let drained = child.compute_values(&registry, Some(&parent), None, 1.0);
        assert_eq!(child.computed_values().line_height.value, 30.0);
        assert!(drained.is_dirty(PropertyId::VerticalAlign));
    }
}
