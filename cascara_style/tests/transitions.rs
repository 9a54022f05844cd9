// Copyright 2025 the Cascara Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Interception of attribute changes by declared transitions.

mod common;

use cascara_property::{Property, PropertyId, PropertyIdSet, PropertyRegistry};
use cascara_style::{PseudoClassSet, RuleId, RuleNode, Specificity, StyleCx, StyleHost};
use common::{BLUE, Document, RED};

fn transition(registry: &PropertyRegistry, text: &str) -> Property {
    registry
        .parse_property(PropertyId::Transition, text)
        .unwrap()
}

/// An element of class `a`: red with `transition`, blue while hovered.
fn hover_document(registry: &PropertyRegistry, transition_text: &str) -> (Document, usize) {
    let cx = StyleCx::new(registry);
    let mut doc = Document::new();
    let key = doc.add_child(0);
    doc.add_rule(
        &["a"],
        RuleNode::new(RuleId(0), Specificity(0, 1, 0))
            .with_property(PropertyId::Color, Property::colour(RED))
            .with_property(PropertyId::Transition, transition(registry, transition_text)),
    );
    doc.add_rule(
        &["a"],
        RuleNode::new(RuleId(1), Specificity(0, 2, 0))
            .with_pseudo_classes(PseudoClassSet::from_names(["hover"]))
            .with_property(PropertyId::Color, Property::colour(BLUE)),
    );
    cx.set_class(&mut doc, key, "a", true);
    cx.update_subtree(&mut doc, 0, 1.0);
    (doc, key)
}

#[test]
fn accepted_transition_replaces_the_dirty_mark() {
    let registry = Document::registry();
    let cx = StyleCx::new(&registry);
    let (mut doc, key) = hover_document(&registry, "color 0.2s");
    assert!(doc.transitions.is_empty());

    cx.set_pseudo_class(&mut doc, key, "hover", true);

    assert_eq!(doc.transitions.len(), 1);
    let started = &doc.transitions[0];
    assert_eq!(started.key, key);
    assert_eq!(started.transition.id, PropertyId::Color);
    assert_eq!(started.transition.duration, 0.2);
    assert_eq!(started.from, Property::colour(RED));
    assert_eq!(started.to, Property::colour(BLUE));
    assert!(!doc.style(key).dirty_set().is_dirty(PropertyId::Color));
}

#[test]
fn rejected_transition_leaves_the_attribute_dirty() {
    let registry = Document::registry();
    let cx = StyleCx::new(&registry);
    let (mut doc, key) = hover_document(&registry, "color 0.2s");
    doc.accept_transitions = false;

    cx.set_pseudo_class(&mut doc, key, "hover", true);

    assert_eq!(doc.transitions.len(), 1);
    assert!(doc.style(key).dirty_set().is_dirty(PropertyId::Color));
}

#[test]
fn unlisted_attributes_are_not_offered() {
    let registry = Document::registry();
    let cx = StyleCx::new(&registry);
    let (mut doc, key) = hover_document(&registry, "opacity 1s");

    cx.set_pseudo_class(&mut doc, key, "hover", true);

    assert!(doc.transitions.is_empty());
    assert!(doc.style(key).dirty_set().is_dirty(PropertyId::Color));
}

#[test]
fn local_none_disables_transitions() {
    let registry = Document::registry();
    let cx = StyleCx::new(&registry);
    let (mut doc, key) = hover_document(&registry, "color 0.2s");
    doc.element(key)
        .set_property_text(&registry, "transition", "none")
        .unwrap();

    cx.set_pseudo_class(&mut doc, key, "hover", true);

    assert!(doc.transitions.is_empty());
    assert!(doc.style(key).dirty_set().is_dirty(PropertyId::Color));
}

#[test]
fn all_offers_every_changed_attribute_on_a_switch() {
    let registry = Document::registry();
    let cx = StyleCx::new(&registry);
    let mut doc = Document::new();
    let key = doc.add_child(0);
    doc.add_rule(
        &["a"],
        RuleNode::new(RuleId(0), Specificity(0, 1, 0))
            .with_property(PropertyId::Color, Property::colour(RED))
            .with_property(PropertyId::Transition, transition(&registry, "all 1s")),
    );
    doc.add_rule(
        &["b"],
        RuleNode::new(RuleId(1), Specificity(0, 1, 0))
            .with_property(PropertyId::Color, Property::colour(BLUE))
            .with_property(PropertyId::Opacity, Property::number(0.5))
            .with_property(PropertyId::Transition, transition(&registry, "all 1s")),
    );
    cx.set_class_names(&mut doc, key, "a");
    cx.update_subtree(&mut doc, 0, 1.0);

    cx.set_class_names(&mut doc, key, "b");
    assert!(cx.update_definition(&mut doc, key));

    let offered: PropertyIdSet = doc.transitions.iter().map(|t| t.transition.id).collect();
    assert_eq!(
        offered,
        [PropertyId::Color, PropertyId::Opacity]
            .into_iter()
            .collect::<PropertyIdSet>()
    );
    assert!(doc.transitions.iter().all(|t| t.transition.duration == 1.0));

    // `transition` itself did not change value, so it is only marked dirty.
    let dirty = doc.style(key).dirty_set();
    assert!(dirty.is_dirty(PropertyId::Transition));
    assert!(!dirty.is_dirty(PropertyId::Color));
    assert!(!dirty.is_dirty(PropertyId::Opacity));
}

#[test]
fn no_transition_without_a_previous_definition() {
    let registry = Document::registry();
    let cx = StyleCx::new(&registry);
    let mut doc = Document::new();
    let key = doc.add_child(0);
    doc.add_rule(
        &["a"],
        RuleNode::new(RuleId(0), Specificity(0, 1, 0))
            .with_property(PropertyId::Color, Property::colour(RED))
            .with_property(PropertyId::Transition, transition(&registry, "color 1s")),
    );
    cx.update_subtree(&mut doc, 0, 1.0);

    cx.set_class(&mut doc, key, "a", true);
    assert!(cx.update_definition(&mut doc, key));
    assert!(doc.transitions.is_empty());
    assert!(doc.style(key).dirty_set().is_dirty(PropertyId::Color));
}
