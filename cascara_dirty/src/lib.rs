// Copyright 2025 the Cascara Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cascara Dirty: set-or-all dirty tracking.
//!
//! Style recomputation is driven by the set of attributes that changed since
//! the last pass. Most changes touch a handful of attributes, but some (a new
//! font size, a freshly created node) invalidate everything at once. A
//! [`DirtySet`] models both cases without materializing "everything":
//!
//! - **Explicit keys**: the keys marked one at a time with [`DirtySet::mark`].
//! - **All dirty**: a sentinel set by [`DirtySet::mark_all`] that subsumes
//!   every key, registered or not.
//!
//! ## Quick Start
//!
//! ```rust
//! use cascara_dirty::DirtySet;
//!
//! let mut dirty = DirtySet::<u16>::new();
//! dirty.mark(3);
//! dirty.mark(7);
//! assert!(dirty.is_dirty(3));
//! assert!(!dirty.is_dirty(4));
//!
//! // Consume everything marked so far.
//! let consumed = dirty.take();
//! assert_eq!(consumed.len(), 2);
//! assert!(dirty.is_empty());
//!
//! // The sentinel answers "dirty" for any key.
//! dirty.mark_all();
//! assert!(dirty.is_dirty(4));
//! ```
//!
//! ## Intersecting with a universe
//!
//! Consumers frequently need "the dirty keys that are also in some registered
//! set" (for example, the inheritable attributes to push down to children).
//! [`DirtySet::intersection`] expands the sentinel against the universe you
//! supply, so callers never have to special-case it:
//!
//! ```rust
//! use cascara_dirty::DirtySet;
//!
//! let inherited = [1_u16, 2, 5];
//!
//! let mut dirty = DirtySet::new();
//! dirty.mark(2);
//! dirty.mark(9);
//! let hits: Vec<_> = dirty.intersection(inherited).collect();
//! assert_eq!(hits, vec![2]);
//!
//! dirty.mark_all();
//! let hits: Vec<_> = dirty.intersection(inherited).collect();
//! assert_eq!(hits, vec![1, 2, 5]);
//! ```
//!
//! ## `no_std` Support
//!
//! This crate is `no_std` and uses `alloc`. It does not depend on `std`.

#![no_std]

extern crate alloc;

mod set;

pub use set::DirtySet;
