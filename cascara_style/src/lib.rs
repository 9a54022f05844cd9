// Copyright 2025 the Cascara Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cascara Style: an incremental style cascade.
//!
//! This crate resolves, for each element of a document tree, which attribute
//! values apply and what they compute to, and keeps that answer up to date
//! as classes, pseudo-classes and local overrides change.
//!
//! ## Core Concepts
//!
//! - [`Definition`] - the compiled rules matching a class of elements, shared
//!   by reference count; [`DefinitionCache`] memoises them
//! - [`ElementStyle`] - the state one element owns: local overrides, active
//!   pseudo-classes, classes, current definition, dirty set and
//!   [`ComputedValues`]
//! - [`StyleIterator`] - lazily merges local overrides with the definition's
//!   applicable declarations in cascade order
//! - [`StyleHost`] - the document tree and the transition, decorator and font
//!   collaborators, implemented by the embedder
//! - [`StyleCx`] - operations that cross elements: ancestor lookup,
//!   invalidation of descendants, definition switches, value computation
//!
//! ## Update cycle
//!
//! Mutations only record what changed. Per frame, the embedder walks the
//! tree parents first, calling [`StyleCx::update_definition`] and then
//! [`StyleCx::compute_values`] on each element ([`StyleCx::update_subtree`]
//! does exactly that). Each computation returns the attributes it drained so
//! layout and paint can react.
//!
//! ## Example
//!
//! ```rust
//! use cascara_property::{Property, PropertyId, PropertyRegistry};
//! use cascara_style::{
//!     Definition, ElementStyle, NoEffects, PseudoClassSet, RuleId, RuleNode, Specificity,
//!     StyleCx, StyleHost,
//! };
//! use peniko::color::Rgba8;
//!
//! const RED: Rgba8 = Rgba8 { r: 255, g: 0, b: 0, a: 255 };
//!
//! // A two-element document: a root and one child.
//! struct Doc {
//!     styles: [ElementStyle; 2],
//!     rules: Definition,
//! }
//!
//! impl StyleHost for Doc {
//!     type Key = usize;
//!     fn parent(&self, key: usize) -> Option<usize> { (key == 1).then_some(0) }
//!     fn child_count(&self, key: usize) -> usize { usize::from(key == 0) }
//!     fn child(&self, key: usize, index: usize) -> Option<usize> {
//!         (key == 0 && index == 0).then_some(1)
//!     }
//!     fn style(&self, key: usize) -> &ElementStyle { &self.styles[key] }
//!     fn style_mut(&mut self, key: usize) -> &mut ElementStyle { &mut self.styles[key] }
//!     fn element_definition(&mut self, key: usize) -> Option<Definition> {
//!         self.styles[key].is_class_set("warning").then(|| self.rules.clone())
//!     }
//! }
//!
//! let warning = RuleNode::new(RuleId(0), Specificity(0, 1, 0))
//!     .with_property(PropertyId::Color, Property::colour(RED));
//! let mut doc = Doc {
//!     styles: [ElementStyle::new(), ElementStyle::new()],
//!     rules: Definition::new(&[warning], &PseudoClassSet::new(), false, &NoEffects),
//! };
//!
//! let registry = PropertyRegistry::with_defaults();
//! let cx = StyleCx::new(&registry);
//! cx.update_subtree(&mut doc, 0, 1.0);
//!
//! // Setting a class re-resolves the root's definition; `color` inherits.
//! cx.set_class(&mut doc, 0, "warning", true);
//! cx.update_subtree(&mut doc, 0, 1.0);
//! assert_eq!(doc.style(1).computed_values().color, RED);
//! ```
//!
//! ## `no_std` Support
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod cache;
mod compute;
mod computed;
mod cx;
mod definition;
mod element;
mod host;
mod iter;
mod resolve;
mod selector;

pub use cache::DefinitionCache;
pub use compute::{
    compute_absolute_length, compute_clip, compute_font_size, compute_length,
    compute_length_percentage, compute_length_percentage_auto, compute_line_height,
    compute_origin, compute_vertical_align, compute_z_index, inherited_dirty,
};
pub use computed::{
    Clip, ComputedValues, DEFAULT_FONT_SIZE, LengthPercentage, LengthPercentageAuto, LineHeight,
    LineHeightInherit, VerticalAlign, ZIndex,
};
pub use cx::StyleCx;
pub use definition::{
    ConditionedProperty, Decorator, DecoratorMap, Definition, EffectDeclaration, EffectInstancer,
    FontEffect, FontEffectEntry, NoEffects, PseudoClassVolatility, RuleId, RuleNode,
};
pub use element::ElementStyle;
pub use host::StyleHost;
pub use iter::{StyleEntry, StyleIterator, StyleSource};
pub use resolve::{RelativeTarget, ResolveContext};
pub use selector::{PseudoClassList, PseudoClassSet, Specificity};
