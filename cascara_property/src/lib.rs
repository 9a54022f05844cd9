// Copyright 2025 the Cascara Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cascara Property: style attribute ids, values and their registry.
//!
//! This crate names every style attribute the cascade understands and says,
//! for each one, whether it inherits, what its default is and which values a
//! declaration may give it. Cascade resolution, per-element state and
//! computed values live in `cascara_style`.
//!
//! ## Core Concepts
//!
//! - [`PropertyId`] - closed enumeration of attributes, with name lookup
//! - [`PropertyIdSet`] - a compact bitset of attributes
//! - [`Property`] - a raw declared value ([`Value`]) tagged with a [`Unit`]
//! - [`PropertyDictionary`] - sparse, sorted attribute → value storage
//! - [`PropertyRegistry`] - inherited flags, defaults and parsers
//!
//! ## Quick Start
//!
//! ```rust
//! use cascara_property::{Property, PropertyDictionary, PropertyId, PropertyRegistry, Unit};
//!
//! let registry = PropertyRegistry::with_defaults();
//!
//! // Parse a declaration block into a dictionary.
//! let mut block = PropertyDictionary::new();
//! for (name, text) in [("font-size", "1.5em"), ("color", "#336699"), ("display", "block")] {
//!     let (id, value) = registry.parse_property_declaration(name, text).unwrap();
//!     block.set(id, value);
//! }
//!
//! assert_eq!(
//!     block.get(PropertyId::FontSize),
//!     Some(&Property::length(1.5, Unit::EM))
//! );
//!
//! // Which of these would a child element inherit?
//! let inherited = block.ids() & registry.registered_inherited_properties();
//! assert!(inherited.contains(PropertyId::Color));
//! assert!(!inherited.contains(PropertyId::Display));
//! ```
//!
//! ## Keywords
//!
//! Keyword-valued attributes store the keyword's index into a table such as
//! [`Display::KEYWORDS`]; each keyword enumeration converts back with
//! `from_keyword`.
//!
//! ## `no_std` Support
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod definition;
mod dictionary;
mod error;
mod id;
mod keyword;
mod parse;
mod registry;
mod set;
mod transition;
mod unit;
mod value;

pub use definition::{PropertyDefinition, PropertyDefinitionBuilder};
pub use dictionary::PropertyDictionary;
pub use error::ParseError;
pub use id::PropertyId;
pub use keyword::{
    AUTO_KEYWORDS, Clear, ClipKeyword, Display, Drag, Float, Focus, FontStyle, FontWeight,
    NONE_KEYWORDS, ORIGIN_X_KEYWORDS, ORIGIN_Y_KEYWORDS, Overflow, PointerEvents, Position,
    TabIndex, TextAlign, TextDecoration, TextTransform, VerticalAlignKeyword, Visibility,
    WhiteSpace,
};
pub use parse::ValueParser;
pub use registry::PropertyRegistry;
pub use set::{PropertyIdSet, PropertyIdSetIter};
pub use transition::{Transition, TransitionList};
pub use unit::Unit;
pub use value::{Property, Value};
