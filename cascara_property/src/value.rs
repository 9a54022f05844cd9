// Copyright 2025 the Cascara Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Raw (specified) attribute values.
//!
//! A [`Property`] is what a rule or a local override declares: a [`Value`]
//! tagged with its [`Unit`]. Conversion into computed values happens later,
//! once font sizes and the device pixel ratio are known.

use alloc::rc::Rc;
use peniko::color::Rgba8;

use crate::transition::TransitionList;
use crate::unit::Unit;

/// The payload of a [`Property`].
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// A number, interpreted through the property's [`Unit`].
    Number(f32),
    /// A keyword index into the attribute's keyword table.
    Keyword(u8),
    /// A colour.
    Colour(Rgba8),
    /// A string, such as a font family or cursor name.
    String(Rc<str>),
    /// A transition list. Shared, since lists are copied into every node
    /// that inherits the declaring rule.
    Transitions(Rc<TransitionList>),
}

/// A raw attribute value and its unit.
///
/// # Example
///
/// ```rust
/// use cascara_property::{Property, Unit};
///
/// let width = Property::length(12.0, Unit::EM);
/// assert_eq!(width.as_number(), Some(12.0));
/// assert!(width.unit.intersects(Unit::LENGTH));
///
/// let auto = Property::keyword(0);
/// assert_eq!(auto.as_keyword(), Some(0));
/// assert_eq!(auto.as_number(), None);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Property {
    /// The declared value.
    pub value: Value,
    /// The unit of `value`.
    pub unit: Unit,
}

impl Property {
    /// Creates a bare number.
    #[must_use]
    pub fn number(value: f32) -> Self {
        Self {
            value: Value::Number(value),
            unit: Unit::NUMBER,
        }
    }

    /// Creates a number with a length or percentage unit.
    #[must_use]
    pub fn length(value: f32, unit: Unit) -> Self {
        Self {
            value: Value::Number(value),
            unit,
        }
    }

    /// Creates a pixel length.
    #[must_use]
    pub fn px(value: f32) -> Self {
        Self::length(value, Unit::PX)
    }

    /// Creates a percentage.
    #[must_use]
    pub fn percent(value: f32) -> Self {
        Self::length(value, Unit::PERCENT)
    }

    /// Creates a keyword value.
    #[must_use]
    pub fn keyword(keyword: u8) -> Self {
        Self {
            value: Value::Keyword(keyword),
            unit: Unit::KEYWORD,
        }
    }

    /// Creates a colour value.
    #[must_use]
    pub fn colour(colour: Rgba8) -> Self {
        Self {
            value: Value::Colour(colour),
            unit: Unit::COLOUR,
        }
    }

    /// Creates a string value.
    #[must_use]
    pub fn string(value: &str) -> Self {
        Self {
            value: Value::String(Rc::from(value)),
            unit: Unit::STRING,
        }
    }

    /// Creates a transition-list value.
    #[must_use]
    pub fn transitions(list: TransitionList) -> Self {
        Self {
            value: Value::Transitions(Rc::new(list)),
            unit: Unit::TRANSITION,
        }
    }

    /// Returns the numeric payload, if this is a number in any unit.
    #[must_use]
    pub fn as_number(&self) -> Option<f32> {
        match self.value {
            Value::Number(n) => Some(n),
            _ => None,
        }
    }

    /// Returns the keyword index, if this is a keyword.
    #[must_use]
    pub fn as_keyword(&self) -> Option<u8> {
        match self.value {
            Value::Keyword(k) => Some(k),
            _ => None,
        }
    }

    /// Returns the colour, if this is a colour.
    #[must_use]
    pub fn as_colour(&self) -> Option<Rgba8> {
        match self.value {
            Value::Colour(c) => Some(c),
            _ => None,
        }
    }

    /// Returns the string payload, if this is a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match &self.value {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the transition list, if this is one.
    #[must_use]
    pub fn as_transitions(&self) -> Option<&TransitionList> {
        match &self.value {
            Value::Transitions(list) => Some(list),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_match_payload() {
        let red = Rgba8 {
            r: 255,
            g: 0,
            b: 0,
            a: 255,
        };
        let colour = Property::colour(red);
        assert_eq!(colour.as_colour(), Some(red));
        assert_eq!(colour.unit, Unit::COLOUR);
        assert_eq!(colour.as_number(), None);

        let family = Property::string("Delicious");
        assert_eq!(family.as_str(), Some("Delicious"));
        assert_eq!(family.as_keyword(), None);
    }

    #[test]
    fn equality_includes_unit() {
        assert_eq!(Property::px(4.0), Property::length(4.0, Unit::PX));
        assert_ne!(Property::px(4.0), Property::length(4.0, Unit::DP));
        assert_ne!(Property::number(4.0), Property::px(4.0));
    }
}
