// Copyright 2025 the Cascara Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-attribute registration data.
//!
//! This module provides [`PropertyDefinition`] and
//! [`PropertyDefinitionBuilder`] for ergonomic construction.

use crate::id::PropertyId;
use crate::parse::ValueParser;
use crate::value::Property;

/// How an attribute is declared, parsed and defaulted.
///
/// # Example
///
/// ```rust
/// use cascara_property::{Property, PropertyDefinitionBuilder, PropertyId, Unit, ValueParser};
///
/// let definition = PropertyDefinitionBuilder::new(PropertyId::Opacity, Property::number(1.0))
///     .inherited(true)
///     .parser(ValueParser::new(Unit::NUMBER))
///     .build();
///
/// assert!(definition.is_inherited());
/// assert_eq!(definition.default_value(), &Property::number(1.0));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct PropertyDefinition {
    id: PropertyId,
    inherited: bool,
    default_value: Property,
    parser: ValueParser,
}

impl PropertyDefinition {
    /// Returns the attribute this definition describes.
    #[must_use]
    #[inline]
    pub fn id(&self) -> PropertyId {
        self.id
    }

    /// Returns whether the attribute inherits from parent elements.
    #[must_use]
    #[inline]
    pub fn is_inherited(&self) -> bool {
        self.inherited
    }

    /// Returns the default value.
    #[must_use]
    #[inline]
    pub fn default_value(&self) -> &Property {
        &self.default_value
    }

    /// Returns the parser for declared values.
    #[must_use]
    #[inline]
    pub fn parser(&self) -> &ValueParser {
        &self.parser
    }
}

/// Builder for [`PropertyDefinition`].
#[derive(Clone, Debug)]
pub struct PropertyDefinitionBuilder {
    definition: PropertyDefinition,
}

impl PropertyDefinitionBuilder {
    /// Starts a definition of a non-inherited attribute.
    ///
    /// The parser defaults to accepting the unit of `default_value`.
    #[must_use]
    pub fn new(id: PropertyId, default_value: Property) -> Self {
        let parser = ValueParser::new(default_value.unit);
        Self {
            definition: PropertyDefinition {
                id,
                inherited: false,
                default_value,
                parser,
            },
        }
    }

    /// Sets whether the attribute inherits from parent elements.
    #[must_use]
    pub fn inherited(mut self, inherited: bool) -> Self {
        self.definition.inherited = inherited;
        self
    }

    /// Sets the parser for declared values.
    #[must_use]
    pub fn parser(mut self, parser: ValueParser) -> Self {
        self.definition.parser = parser;
        self
    }

    /// Builds the definition.
    #[must_use]
    pub fn build(self) -> PropertyDefinition {
        self.definition
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unit::Unit;

    #[test]
    fn builder_defaults() {
        let definition =
            PropertyDefinitionBuilder::new(PropertyId::Width, Property::px(0.0)).build();
        assert_eq!(definition.id(), PropertyId::Width);
        assert!(!definition.is_inherited());
        assert_eq!(definition.parser().units(), Unit::PX);
    }
}
