// Copyright 2025 the Cascara Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The document tree and its collaborators, as seen by the cascade.

use core::fmt::Debug;

use cascara_property::{Property, Transition};

use crate::definition::Definition;
use crate::element::ElementStyle;

/// A document tree whose elements carry an [`ElementStyle`].
///
/// Keys are cheap handles chosen by the host (indices, ids, arena keys).
/// Every key passed to these methods was obtained from the host, and the
/// host may panic if it is not.
///
/// Besides tree access, the host routes the notifications the cascade
/// emits: transitions, decorator invalidation and font invalidation. Their
/// default implementations ignore them.
pub trait StyleHost {
    /// Handle to an element.
    type Key: Copy + Eq + Debug;

    /// Returns the parent of `key`, or `None` for the root.
    fn parent(&self, key: Self::Key) -> Option<Self::Key>;

    /// Returns the number of children of `key`, including children that are
    /// not rendered.
    fn child_count(&self, key: Self::Key) -> usize;

    /// Returns the `index`th child of `key`.
    fn child(&self, key: Self::Key, index: usize) -> Option<Self::Key>;

    /// Returns the style state of `key`.
    fn style(&self, key: Self::Key) -> &ElementStyle;

    /// Returns the style state of `key` for mutation.
    fn style_mut(&mut self, key: Self::Key) -> &mut ElementStyle;

    /// Resolves the definition `key` matches under its current classes and
    /// tree position, or `None` if no rule matches.
    fn element_definition(&mut self, key: Self::Key) -> Option<Definition>;

    /// Returns the root of the document containing `key`.
    fn owner_document(&self, key: Self::Key) -> Self::Key {
        let mut root = key;
        while let Some(parent) = self.parent(root) {
            root = parent;
        }
        root
    }

    /// Starts animating `transition.id` on `key` from `from` to `to`.
    /// Returns `true` if the transition was accepted; the attribute is then
    /// not marked dirty.
    fn start_transition(
        &mut self,
        key: Self::Key,
        transition: &Transition,
        from: &Property,
        to: &Property,
    ) -> bool {
        let _ = (key, transition, from, to);
        false
    }

    /// Invalidates the decorators of `key`. With `force_rebuild` they are
    /// re-instanced rather than just redrawn.
    fn dirty_decorators(&mut self, key: Self::Key, force_rebuild: bool) {
        let _ = (key, force_rebuild);
    }

    /// Invalidates the font metrics of `key`.
    fn dirty_font(&mut self, key: Self::Key) {
        let _ = key;
    }
}

/// Iterates over the children of `key`.
pub(crate) fn children<H: StyleHost + ?Sized>(
    host: &H,
    key: H::Key,
) -> impl Iterator<Item = H::Key> + '_ {
    (0..host.child_count(key)).filter_map(move |index| host.child(key, index))
}
