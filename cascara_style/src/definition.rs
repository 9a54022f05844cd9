// Copyright 2025 the Cascara Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compiled, shared rule tables.
//!
//! This module provides [`Definition`]: everything the matched rules of a
//! style sheet say about one class of elements, compiled once and shared by
//! every element that matches the same rules.
//!
//! # Storage
//!
//! Unconditioned declarations collapse into one sorted dictionary. Declarations
//! that require pseudo-classes are kept per attribute in descending
//! specificity order (ties broken by later declaration first), so the first
//! entry whose pseudo-classes are all active is the winner.

use alloc::collections::BTreeMap;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::any::Any;
use core::cmp::Reverse;
use core::fmt;

use cascara_property::{Property, PropertyDictionary, PropertyId, PropertyIdSet};
use hashbrown::HashMap;
use tracing::warn;

use crate::iter::StyleIterator;
use crate::selector::{PseudoClassSet, Specificity};

/// Identifier of a rule node, assigned by the style sheet.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RuleId(pub u32);

/// A decorator or font effect declared by a rule: a name, an instancer type
/// and its raw parameters.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EffectDeclaration {
    /// The declared name; later declarations of a name replace earlier ones.
    pub name: String,
    /// The type the [`EffectInstancer`] dispatches on.
    pub type_name: String,
    /// Raw `(key, value)` parameters, in declaration order.
    pub parameters: Vec<(String, String)>,
}

impl EffectDeclaration {
    /// Creates a declaration with no parameters.
    #[must_use]
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            parameters: Vec::new(),
        }
    }

    /// Adds a parameter.
    #[must_use]
    pub fn with_parameter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.push((key.into(), value.into()));
        self
    }
}

/// One matched rule, as handed over by the style sheet.
///
/// # Example
///
/// ```rust
/// use cascara_property::{Property, PropertyId};
/// use cascara_style::{PseudoClassSet, RuleId, RuleNode, Specificity};
///
/// let hover = RuleNode::new(RuleId(7), Specificity(0, 1, 1))
///     .with_pseudo_classes(PseudoClassSet::from_names(["hover"]))
///     .with_property(PropertyId::Opacity, Property::number(0.5));
///
/// assert_eq!(hover.properties.len(), 1);
/// ```
#[derive(Clone, Debug)]
pub struct RuleNode {
    /// Stable identifier, used to key the definition cache.
    pub id: RuleId,
    /// Specificity of the rule's selector.
    pub specificity: Specificity,
    /// Pseudo-classes the rule still requires at runtime.
    pub pseudo_classes: PseudoClassSet,
    /// Declared attributes.
    pub properties: PropertyDictionary,
    /// Declared decorators.
    pub decorators: Vec<EffectDeclaration>,
    /// Declared font effects.
    pub font_effects: Vec<EffectDeclaration>,
}

impl RuleNode {
    /// Creates an unconditioned rule with no declarations.
    #[must_use]
    pub fn new(id: RuleId, specificity: Specificity) -> Self {
        Self {
            id,
            specificity,
            pseudo_classes: PseudoClassSet::new(),
            properties: PropertyDictionary::new(),
            decorators: Vec::new(),
            font_effects: Vec::new(),
        }
    }

    /// Sets the pseudo-classes the rule requires.
    #[must_use]
    pub fn with_pseudo_classes(mut self, pseudo_classes: PseudoClassSet) -> Self {
        self.pseudo_classes = pseudo_classes;
        self
    }

    /// Declares an attribute.
    #[must_use]
    pub fn with_property(mut self, id: PropertyId, property: Property) -> Self {
        self.properties.set(id, property);
        self
    }

    /// Declares a decorator.
    #[must_use]
    pub fn with_decorator(mut self, declaration: EffectDeclaration) -> Self {
        self.decorators.push(declaration);
        self
    }

    /// Declares a font effect.
    #[must_use]
    pub fn with_font_effect(mut self, declaration: EffectDeclaration) -> Self {
        self.font_effects.push(declaration);
        self
    }
}

/// How far the effects of toggling a pseudo-class reach.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum PseudoClassVolatility {
    /// Only the element's own attributes can change.
    #[default]
    Stable,
    /// Font attributes or font effects can change; font metrics must be
    /// rebuilt.
    FontVolatile,
    /// Selectors on other elements depend on it; descendant definitions must
    /// be re-resolved.
    StructureVolatile,
}

/// An instanced decorator. Downcast through `&dyn Any` to reach the concrete
/// type.
pub trait Decorator: Any + fmt::Debug {}

/// An instanced font effect. Downcast through `&dyn Any` to reach the
/// concrete type.
pub trait FontEffect: Any + fmt::Debug {}

/// Instances decorators and font effects from their declarations.
///
/// Returning `None` drops the declaration with a warning.
pub trait EffectInstancer {
    /// Instances a decorator.
    fn instance_decorator(&self, declaration: &EffectDeclaration) -> Option<Rc<dyn Decorator>>;

    /// Instances a font effect.
    fn instance_font_effect(&self, declaration: &EffectDeclaration)
    -> Option<Rc<dyn FontEffect>>;
}

/// An [`EffectInstancer`] for rule sets that declare no effects.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoEffects;

impl EffectInstancer for NoEffects {
    fn instance_decorator(&self, _: &EffectDeclaration) -> Option<Rc<dyn Decorator>> {
        None
    }

    fn instance_font_effect(&self, _: &EffectDeclaration) -> Option<Rc<dyn FontEffect>> {
        None
    }
}

/// Decorators by declared name.
pub type DecoratorMap = HashMap<String, Rc<dyn Decorator>>;

/// A declaration that applies while its pseudo-classes are active.
#[derive(Clone, Debug, PartialEq)]
pub struct ConditionedProperty {
    /// Pseudo-classes that must all be active.
    pub pseudo_classes: PseudoClassSet,
    /// The declared value.
    pub property: Property,
    /// Specificity of the declaring rule.
    pub specificity: Specificity,
}

/// An instanced font effect and the pseudo-classes it requires.
#[derive(Clone, Debug)]
pub struct FontEffectEntry {
    /// The declared name.
    pub name: String,
    /// Pseudo-classes that must all be active.
    pub pseudo_classes: PseudoClassSet,
    /// Specificity of the declaring rule.
    pub specificity: Specificity,
    /// The instanced effect.
    pub effect: Rc<dyn FontEffect>,
}

/// Per-attribute conditioned declarations, sorted by attribute id.
pub(crate) type ConditionedTable = [(PropertyId, Vec<ConditionedProperty>)];

/// Attributes whose change affects font metrics.
const FONT_PROPERTIES: [PropertyId; 5] = [
    PropertyId::FontFamily,
    PropertyId::FontCharset,
    PropertyId::FontSize,
    PropertyId::FontStyle,
    PropertyId::FontWeight,
];

#[derive(Debug, Default)]
struct DefinitionData {
    base: PropertyDictionary,
    conditioned: Vec<(PropertyId, Vec<ConditionedProperty>)>,
    decorators: DecoratorMap,
    pseudo_class_decorators: HashMap<PseudoClassSet, DecoratorMap>,
    font_effects: Vec<FontEffectEntry>,
    volatility: HashMap<String, PseudoClassVolatility>,
    structurally_volatile: bool,
}

/// The compiled rule table for a class of elements.
///
/// A `Definition` is immutable once built and cheap to clone: clones share
/// the same table, and [`ptr_eq`](Self::ptr_eq) tells whether two handles
/// name the same one. The table is freed when its last holder drops it.
///
/// # Example
///
/// ```rust
/// use cascara_property::{Property, PropertyId};
/// use cascara_style::{
///     Definition, NoEffects, PseudoClassSet, RuleId, RuleNode, Specificity,
/// };
///
/// let button = RuleNode::new(RuleId(0), Specificity(0, 1, 0))
///     .with_property(PropertyId::Opacity, Property::number(1.0));
/// let hover = RuleNode::new(RuleId(1), Specificity(0, 1, 0))
///     .with_pseudo_classes(PseudoClassSet::from_names(["hover"]))
///     .with_property(PropertyId::Opacity, Property::number(0.8));
///
/// let definition = Definition::new(&[button, hover], &PseudoClassSet::new(), false, &NoEffects);
///
/// let idle: [String; 0] = [];
/// let hovered = ["hover".to_string()];
/// assert_eq!(definition.get_property(PropertyId::Opacity, &idle), Some(&Property::number(1.0)));
/// assert_eq!(
///     definition.get_property(PropertyId::Opacity, &hovered),
///     Some(&Property::number(0.8))
/// );
/// assert_eq!(definition.get_property(PropertyId::Width, &hovered), None);
/// ```
#[derive(Clone, Debug)]
pub struct Definition {
    inner: Rc<DefinitionData>,
}

impl Definition {
    /// Compiles matched rule nodes into a definition.
    ///
    /// Nodes are ordered by ascending specificity with a stable sort, so the
    /// input order only breaks ties. For each attribute, a later node's
    /// declaration replaces an earlier one with the same pseudo-class
    /// requirement. A conditioned declaration is dropped when an unconditioned
    /// one for the same attribute is more specific, or equally specific and
    /// later. Pseudo-classes in `volatile_pseudo_classes` are
    /// [`StructureVolatile`](PseudoClassVolatility::StructureVolatile);
    /// pseudo-classes conditioning font attributes or font effects are
    /// [`FontVolatile`](PseudoClassVolatility::FontVolatile).
    #[must_use]
    pub fn new(
        nodes: &[RuleNode],
        volatile_pseudo_classes: &PseudoClassSet,
        structurally_volatile: bool,
        instancer: &dyn EffectInstancer,
    ) -> Self {
        let mut order: Vec<&RuleNode> = nodes.iter().collect();
        order.sort_by_key(|node| node.specificity);

        let mut data = DefinitionData {
            structurally_volatile,
            ..DefinitionData::default()
        };
        let mut conditioned: BTreeMap<PropertyId, Vec<(ConditionedProperty, usize)>> =
            BTreeMap::new();
        let mut font_effects: Vec<(FontEffectEntry, usize)> = Vec::new();
        let mut base_precedence: BTreeMap<PropertyId, (Specificity, usize)> = BTreeMap::new();

        for (sequence, node) in order.iter().enumerate() {
            if node.pseudo_classes.is_empty() {
                data.base.merge(&node.properties);
                for (id, _) in node.properties.iter() {
                    base_precedence.insert(id, (node.specificity, sequence));
                }
            } else {
                for (id, property) in node.properties.iter() {
                    let entry = ConditionedProperty {
                        pseudo_classes: node.pseudo_classes.clone(),
                        property: property.clone(),
                        specificity: node.specificity,
                    };
                    let list = conditioned.entry(id).or_default();
                    match list
                        .iter_mut()
                        .find(|(e, _)| e.pseudo_classes == node.pseudo_classes)
                    {
                        Some(slot) => *slot = (entry, sequence),
                        None => list.push((entry, sequence)),
                    }
                }
            }

            for declaration in &node.decorators {
                let Some(decorator) = instancer.instance_decorator(declaration) else {
                    warn!(
                        decorator = %declaration.name,
                        kind = %declaration.type_name,
                        "could not instance decorator"
                    );
                    continue;
                };
                let map = if node.pseudo_classes.is_empty() {
                    &mut data.decorators
                } else {
                    data.pseudo_class_decorators
                        .entry(node.pseudo_classes.clone())
                        .or_default()
                };
                map.insert(declaration.name.clone(), decorator);
            }

            for declaration in &node.font_effects {
                let Some(effect) = instancer.instance_font_effect(declaration) else {
                    warn!(
                        font_effect = %declaration.name,
                        kind = %declaration.type_name,
                        "could not instance font effect"
                    );
                    continue;
                };
                let entry = FontEffectEntry {
                    name: declaration.name.clone(),
                    pseudo_classes: node.pseudo_classes.clone(),
                    specificity: node.specificity,
                    effect,
                };
                match font_effects.iter_mut().find(|(e, _)| {
                    e.name == entry.name && e.pseudo_classes == entry.pseudo_classes
                }) {
                    Some(slot) => *slot = (entry, sequence),
                    None => font_effects.push((entry, sequence)),
                }
            }
        }

        data.conditioned = conditioned
            .into_iter()
            .filter_map(|(id, mut list)| {
                // Only declarations that outrank the base one can win.
                if let Some(&base) = base_precedence.get(&id) {
                    list.retain(|(e, sequence)| (e.specificity, *sequence) > base);
                }
                list.sort_by_key(|(e, sequence)| Reverse((e.specificity, *sequence)));
                (!list.is_empty()).then(|| (id, list.into_iter().map(|(e, _)| e).collect()))
            })
            .collect();
        font_effects.sort_by_key(|(e, sequence)| Reverse((e.specificity, *sequence)));
        data.font_effects = font_effects.into_iter().map(|(e, _)| e).collect();

        for name in volatile_pseudo_classes.as_slice() {
            data.volatility
                .insert(name.clone(), PseudoClassVolatility::StructureVolatile);
        }
        let font_conditions = data
            .conditioned
            .iter()
            .filter(|(id, _)| FONT_PROPERTIES.contains(id))
            .flat_map(|(_, list)| list.iter().map(|e| &e.pseudo_classes))
            .chain(data.font_effects.iter().map(|e| &e.pseudo_classes));
        let mut font_volatile: Vec<String> = Vec::new();
        for set in font_conditions {
            font_volatile.extend(set.as_slice().iter().cloned());
        }
        for name in font_volatile {
            data.volatility
                .entry(name)
                .or_insert(PseudoClassVolatility::FontVolatile);
        }

        Self {
            inner: Rc::new(data),
        }
    }

    /// Creates a definition with no rules.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            inner: Rc::new(DefinitionData::default()),
        }
    }

    /// Returns `true` if both handles share the same table.
    #[must_use]
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Returns the number of handles sharing this table.
    #[must_use]
    pub fn holder_count(&self) -> usize {
        Rc::strong_count(&self.inner)
    }

    /// Returns the value of `id` for an element with the `active`
    /// pseudo-classes.
    ///
    /// The most specific satisfied conditioned declaration wins; otherwise the
    /// unconditioned declaration, if any.
    #[must_use]
    pub fn get_property(&self, id: PropertyId, active: &[String]) -> Option<&Property> {
        self.conditioned_properties(id)
            .iter()
            .find(|e| e.pseudo_classes.is_satisfied_by(active))
            .map(|e| &e.property)
            .or_else(|| self.inner.base.get(id))
    }

    /// Returns the unconditioned declarations.
    #[must_use]
    pub fn base_properties(&self) -> &PropertyDictionary {
        &self.inner.base
    }

    /// Returns the conditioned declarations of `id`, most specific first.
    #[must_use]
    pub fn conditioned_properties(&self, id: PropertyId) -> &[ConditionedProperty] {
        self.inner
            .conditioned
            .binary_search_by_key(&id, |(pid, _)| *pid)
            .map(|i| self.inner.conditioned[i].1.as_slice())
            .unwrap_or(&[])
    }

    pub(crate) fn conditioned_table(&self) -> &ConditionedTable {
        &self.inner.conditioned
    }

    /// Returns every attribute with a declaration that applies under `active`.
    #[must_use]
    pub fn defined_properties(&self, active: &[String]) -> PropertyIdSet {
        let mut ids = self.inner.base.ids();
        for (id, list) in &self.inner.conditioned {
            if list.iter().any(|e| e.pseudo_classes.is_satisfied_by(active)) {
                ids.insert(*id);
            }
        }
        ids
    }

    /// Returns the attributes whose value may change when `pseudo_class` is
    /// toggled.
    ///
    /// These are the attributes with a conditioned declaration mentioning
    /// `pseudo_class`, plus every unconditioned attribute when the
    /// pseudo-class is not [`Stable`](PseudoClassVolatility::Stable).
    #[must_use]
    pub fn defined_properties_for(&self, pseudo_class: &str) -> PropertyIdSet {
        let mut ids = PropertyIdSet::empty();
        for (id, list) in &self.inner.conditioned {
            if list.iter().any(|e| e.pseudo_classes.contains(pseudo_class)) {
                ids.insert(*id);
            }
        }
        if self.pseudo_class_volatility(pseudo_class) != PseudoClassVolatility::Stable {
            ids |= self.inner.base.ids();
        }
        ids
    }

    /// Returns how far toggling `pseudo_class` reaches.
    #[must_use]
    pub fn pseudo_class_volatility(&self, pseudo_class: &str) -> PseudoClassVolatility {
        self.inner
            .volatility
            .get(pseudo_class)
            .copied()
            .unwrap_or_default()
    }

    /// Returns `true` if the matched selectors depend on sibling position or
    /// count.
    #[must_use]
    pub fn is_structurally_volatile(&self) -> bool {
        self.inner.structurally_volatile
    }

    /// Returns the unconditioned decorators.
    #[must_use]
    pub fn decorators(&self) -> &DecoratorMap {
        &self.inner.decorators
    }

    /// Returns the decorators of each exact pseudo-class requirement.
    #[must_use]
    pub fn pseudo_class_decorators(&self) -> &HashMap<PseudoClassSet, DecoratorMap> {
        &self.inner.pseudo_class_decorators
    }

    /// Returns, for each font effect name, the most specific entry that
    /// applies under `active`.
    #[must_use]
    pub fn font_effects(&self, active: &[String]) -> Vec<&FontEffectEntry> {
        let mut applied: Vec<&FontEffectEntry> = Vec::new();
        for entry in &self.inner.font_effects {
            if entry.pseudo_classes.is_satisfied_by(active)
                && !applied.iter().any(|e| e.name == entry.name)
            {
                applied.push(entry);
            }
        }
        applied
    }

    /// Iterates over every declaration that applies under `active`.
    ///
    /// Assigning entries in order, with later entries overwriting earlier
    /// ones, reproduces [`get_property`](Self::get_property).
    #[must_use]
    pub fn iter<'a>(&'a self, active: &'a [String]) -> StyleIterator<'a> {
        StyleIterator::new(&[], Some(self), active)
    }
}
