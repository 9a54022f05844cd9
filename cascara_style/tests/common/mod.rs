// Copyright 2025 the Cascara Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A small document tree with a class-selector style sheet, for driving
//! `StyleCx` end to end.

#![allow(
    dead_code,
    unreachable_pub,
    reason = "shared by several test crates, each using a different subset"
)]

use cascara_property::{Property, PropertyRegistry, Transition};
use cascara_style::{
    Definition, DefinitionCache, ElementStyle, NoEffects, PseudoClassSet, RuleNode, StyleHost,
};
use peniko::color::Rgba8;

pub const RED: Rgba8 = Rgba8 {
    r: 255,
    g: 0,
    b: 0,
    a: 255,
};
pub const BLUE: Rgba8 = Rgba8 {
    r: 0,
    g: 0,
    b: 255,
    a: 255,
};

/// A rule and the classes its selector requires.
pub struct Rule {
    /// Classes the element itself must have.
    pub classes: Vec<&'static str>,
    /// A class some ancestor must have (a descendant combinator).
    pub ancestor: Option<&'static str>,
    pub node: RuleNode,
}

pub struct Node {
    pub parent: Option<usize>,
    pub children: Vec<usize>,
    pub style: ElementStyle,
}

/// A recorded `start_transition` call.
#[derive(Clone, Debug, PartialEq)]
pub struct StartedTransition {
    pub key: usize,
    pub transition: Transition,
    pub from: Property,
    pub to: Property,
}

pub struct Document {
    pub nodes: Vec<Node>,
    pub rules: Vec<Rule>,
    pub volatile: PseudoClassSet,
    pub cache: DefinitionCache,
    pub accept_transitions: bool,
    pub transitions: Vec<StartedTransition>,
    pub decorator_calls: Vec<(usize, bool)>,
    pub font_calls: Vec<usize>,
}

impl Document {
    /// Creates a document holding only the root, key `0`.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                parent: None,
                children: Vec::new(),
                style: ElementStyle::new(),
            }],
            rules: Vec::new(),
            volatile: PseudoClassSet::new(),
            cache: DefinitionCache::new(),
            accept_transitions: true,
            transitions: Vec::new(),
            decorator_calls: Vec::new(),
            font_calls: Vec::new(),
        }
    }

    pub fn add_child(&mut self, parent: usize) -> usize {
        let key = self.nodes.len();
        self.nodes.push(Node {
            parent: Some(parent),
            children: Vec::new(),
            style: ElementStyle::new(),
        });
        self.nodes[parent].children.push(key);
        key
    }

    pub fn add_rule(&mut self, classes: &[&'static str], node: RuleNode) {
        self.rules.push(Rule {
            classes: classes.to_vec(),
            ancestor: None,
            node,
        });
    }

    pub fn add_descendant_rule(
        &mut self,
        ancestor: &'static str,
        classes: &[&'static str],
        node: RuleNode,
    ) {
        self.rules.push(Rule {
            classes: classes.to_vec(),
            ancestor: Some(ancestor),
            node,
        });
    }

    fn has_ancestor_with_class(&self, key: usize, class: &str) -> bool {
        let mut ancestor = self.nodes[key].parent;
        while let Some(a) = ancestor {
            if self.nodes[a].style.is_class_set(class) {
                return true;
            }
            ancestor = self.nodes[a].parent;
        }
        false
    }

    fn matches(&self, key: usize, rule: &Rule) -> bool {
        let style = &self.nodes[key].style;
        rule.classes.iter().all(|c| style.is_class_set(c))
            && rule
                .ancestor
                .is_none_or(|a| self.has_ancestor_with_class(key, a))
    }

    /// Mutable access to every node's style state, for direct manipulation.
    pub fn element(&mut self, key: usize) -> &mut ElementStyle {
        &mut self.nodes[key].style
    }

    pub fn registry() -> PropertyRegistry {
        PropertyRegistry::with_defaults()
    }
}

impl StyleHost for Document {
    type Key = usize;

    fn parent(&self, key: usize) -> Option<usize> {
        self.nodes[key].parent
    }

    fn child_count(&self, key: usize) -> usize {
        self.nodes[key].children.len()
    }

    fn child(&self, key: usize, index: usize) -> Option<usize> {
        self.nodes[key].children.get(index).copied()
    }

    fn style(&self, key: usize) -> &ElementStyle {
        &self.nodes[key].style
    }

    fn style_mut(&mut self, key: usize) -> &mut ElementStyle {
        &mut self.nodes[key].style
    }

    fn element_definition(&mut self, key: usize) -> Option<Definition> {
        let matched: Vec<RuleNode> = self
            .rules
            .iter()
            .filter(|rule| self.matches(key, rule))
            .map(|rule| rule.node.clone())
            .collect();
        self.cache
            .get_or_build(&matched, &self.volatile, false, &NoEffects)
    }

    fn start_transition(
        &mut self,
        key: usize,
        transition: &Transition,
        from: &Property,
        to: &Property,
    ) -> bool {
        self.transitions.push(StartedTransition {
            key,
            transition: *transition,
            from: from.clone(),
            to: to.clone(),
        });
        self.accept_transitions
    }

    fn dirty_decorators(&mut self, key: usize, force_rebuild: bool) {
        self.decorator_calls.push((key, force_rebuild));
    }

    fn dirty_font(&mut self, key: usize) {
        self.font_calls.push(key);
    }
}
