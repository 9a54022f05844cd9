// Copyright 2025 the Cascara Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Transition declarations.

use alloc::vec::Vec;

use crate::id::PropertyId;

/// A single declared transition: which attribute animates, and how long.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Transition {
    /// The attribute that transitions.
    pub id: PropertyId,
    /// Duration in seconds.
    pub duration: f32,
    /// Delay before the transition starts, in seconds.
    pub delay: f32,
}

/// The value of the `transition` attribute.
///
/// `none` disables transitions, `all` applies one timing to every attribute,
/// otherwise each listed attribute carries its own timing.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TransitionList {
    /// `transition: none`.
    pub none: bool,
    /// `transition: all ...`; the timing is the single entry of `transitions`.
    pub all: bool,
    /// Declared transitions, in declaration order.
    pub transitions: Vec<Transition>,
}

impl TransitionList {
    /// Returns the list for `transition: none`.
    #[must_use]
    pub fn none() -> Self {
        Self {
            none: true,
            all: false,
            transitions: Vec::new(),
        }
    }

    /// Returns the transition that applies to `id`, if any.
    ///
    /// For an `all` list every attribute uses the shared timing, reported with
    /// `id` filled in.
    #[must_use]
    pub fn find(&self, id: PropertyId) -> Option<Transition> {
        if self.none {
            return None;
        }
        if self.all {
            return self.transitions.first().map(|t| Transition { id, ..*t });
        }
        self.transitions.iter().rev().find(|t| t.id == id).copied()
    }
}
