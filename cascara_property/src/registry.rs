// Copyright 2025 the Cascara Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Attribute registry.
//!
//! This module provides [`PropertyRegistry`], which answers for each
//! attribute whether it inherits, what its default is and how declarations
//! of it are parsed.

use alloc::string::String;
use alloc::vec::Vec;
use peniko::color::Rgba8;

use crate::definition::{PropertyDefinition, PropertyDefinitionBuilder};
use crate::error::ParseError;
use crate::id::PropertyId;
use crate::keyword::{
    AUTO_KEYWORDS, ClipKeyword, Clear, Display, Drag, Float, Focus, FontStyle, FontWeight,
    NONE_KEYWORDS, ORIGIN_X_KEYWORDS, ORIGIN_Y_KEYWORDS, Overflow, PointerEvents, Position,
    TabIndex, TextAlign, TextDecoration, TextTransform, VerticalAlignKeyword, Visibility,
    WhiteSpace,
};
use crate::parse::ValueParser;
use crate::set::PropertyIdSet;
use crate::transition::TransitionList;
use crate::unit::Unit;
use crate::value::Property;

/// The set of registered attributes.
///
/// [`with_defaults`](Self::with_defaults) registers every built-in attribute;
/// embedders may [`register`](Self::register) a replacement definition to
/// change a default, the inherited flag or the accepted values.
///
/// # Example
///
/// ```rust
/// use cascara_property::{Property, PropertyId, PropertyRegistry};
///
/// let registry = PropertyRegistry::with_defaults();
///
/// assert!(registry.is_inherited(PropertyId::Color));
/// assert!(!registry.is_inherited(PropertyId::Width));
///
/// let (id, value) = registry.parse_property_declaration("margin-left", "4px").unwrap();
/// assert_eq!(id, PropertyId::MarginLeft);
/// assert_eq!(value, Property::px(4.0));
///
/// assert!(registry.parse_property_declaration("margin", "4px").is_err());
/// ```
#[derive(Clone, Debug, Default)]
pub struct PropertyRegistry {
    definitions: Vec<Option<PropertyDefinition>>,
    registered: PropertyIdSet,
    inherited: PropertyIdSet,
}

impl PropertyRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding every built-in attribute.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for definition in builtin_definitions() {
            registry.register(definition);
        }
        registry
    }

    /// Registers a definition, returning the one it replaced.
    pub fn register(&mut self, definition: PropertyDefinition) -> Option<PropertyDefinition> {
        let id = definition.id();
        let index = usize::from(id.index());
        if self.definitions.len() <= index {
            self.definitions.resize(index + 1, None);
        }

        self.registered.insert(id);
        if definition.is_inherited() {
            self.inherited.insert(id);
        } else {
            self.inherited.remove(id);
        }
        self.definitions[index].replace(definition)
    }

    /// Returns the number of registered attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.registered.len()
    }

    /// Returns `true` if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.registered.is_empty()
    }

    /// Returns the definition of `id`, if registered.
    #[must_use]
    pub fn property(&self, id: PropertyId) -> Option<&PropertyDefinition> {
        self.definitions
            .get(usize::from(id.index()))
            .and_then(Option::as_ref)
    }

    /// Returns whether `id` is registered as inherited.
    #[must_use]
    pub fn is_inherited(&self, id: PropertyId) -> bool {
        self.inherited.contains(id)
    }

    /// Returns the default value of `id`, if registered.
    #[must_use]
    pub fn default_value(&self, id: PropertyId) -> Option<&Property> {
        self.property(id).map(PropertyDefinition::default_value)
    }

    /// Returns every registered attribute.
    #[must_use]
    pub fn registered_properties(&self) -> PropertyIdSet {
        self.registered
    }

    /// Returns every registered attribute that inherits.
    #[must_use]
    pub fn registered_inherited_properties(&self) -> PropertyIdSet {
        self.inherited
    }

    /// Parses a value for a registered attribute.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Unregistered`] if `id` is not registered, or
    /// [`ParseError::InvalidValue`] if `text` is not accepted.
    pub fn parse_property(&self, id: PropertyId, text: &str) -> Result<Property, ParseError> {
        let definition = self
            .property(id)
            .ok_or(ParseError::Unregistered { property: id })?;
        definition.parser().parse(id, text)
    }

    /// Parses a `name: text` declaration.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::UnknownProperty`] if `name` is not an attribute
    /// name, otherwise the errors of [`parse_property`](Self::parse_property).
    pub fn parse_property_declaration(
        &self,
        name: &str,
        text: &str,
    ) -> Result<(PropertyId, Property), ParseError> {
        let name = name.trim();
        let id = PropertyId::from_name(&name.to_ascii_lowercase()).ok_or_else(|| {
            ParseError::UnknownProperty {
                name: String::from(name),
            }
        })?;
        self.parse_property(id, text).map(|value| (id, value))
    }
}

fn colour(r: u8, g: u8, b: u8, a: u8) -> Property {
    Property::colour(Rgba8 { r, g, b, a })
}

/// The built-in attribute table.
fn builtin_definitions() -> Vec<PropertyDefinition> {
    use PropertyId as P;

    let length = ValueParser::new(Unit::LENGTH);
    let length_percent = ValueParser::new(Unit::LENGTH_PERCENT);
    let length_percent_auto = length_percent.with_keywords(AUTO_KEYWORDS);
    let colour_parser = ValueParser::new(Unit::COLOUR);
    let string = ValueParser::new(Unit::STRING);
    let number = ValueParser::new(Unit::NUMBER);

    let black = colour(0, 0, 0, 255);
    let white = colour(255, 255, 255, 255);
    let auto = Property::keyword(0);

    let def = |id: PropertyId, default: Property, inherited: bool, parser: ValueParser| {
        PropertyDefinitionBuilder::new(id, default)
            .inherited(inherited)
            .parser(parser)
            .build()
    };
    let keywords = |id: PropertyId, default: u8, inherited: bool, names: &'static [&'static str]| {
        def(id, Property::keyword(default), inherited, ValueParser::keywords(names))
    };

    let mut table = Vec::with_capacity(PropertyId::COUNT);
    table.extend([
        def(P::FontSize, Property::px(12.0), true, length_percent),
        def(
            P::LineHeight,
            Property::number(1.2),
            true,
            ValueParser::new(Unit::NUMBER_LENGTH_PERCENT),
        ),
        def(
            P::VerticalAlign,
            Property::keyword(VerticalAlignKeyword::Baseline.keyword()),
            false,
            length_percent.with_keywords(VerticalAlignKeyword::KEYWORDS),
        ),
    ]);

    for id in [P::MarginTop, P::MarginRight, P::MarginBottom, P::MarginLeft] {
        table.push(def(id, Property::px(0.0), false, length_percent_auto));
    }
    for id in [P::PaddingTop, P::PaddingRight, P::PaddingBottom, P::PaddingLeft] {
        table.push(def(id, Property::px(0.0), false, length_percent));
    }
    for id in [
        P::BorderTopWidth,
        P::BorderRightWidth,
        P::BorderBottomWidth,
        P::BorderLeftWidth,
        P::ScrollbarMargin,
        P::TransformOriginZ,
    ] {
        table.push(def(id, Property::px(0.0), false, length));
    }
    for id in [
        P::BorderTopColor,
        P::BorderRightColor,
        P::BorderBottomColor,
        P::BorderLeftColor,
    ] {
        table.push(def(id, black.clone(), false, colour_parser));
    }
    for id in [P::Top, P::Right, P::Bottom, P::Left, P::Width, P::Height] {
        table.push(def(id, auto.clone(), false, length_percent_auto));
    }
    for id in [P::MinWidth, P::MinHeight] {
        table.push(def(id, Property::px(0.0), false, length_percent));
    }
    // A negative maximum means "none".
    for id in [P::MaxWidth, P::MaxHeight] {
        table.push(def(id, Property::px(-1.0), false, length_percent));
    }
    for (id, names) in [
        (P::PerspectiveOriginX, ORIGIN_X_KEYWORDS),
        (P::PerspectiveOriginY, ORIGIN_Y_KEYWORDS),
        (P::TransformOriginX, ORIGIN_X_KEYWORDS),
        (P::TransformOriginY, ORIGIN_Y_KEYWORDS),
    ] {
        table.push(def(
            id,
            Property::percent(50.0),
            false,
            length_percent.with_keywords(names),
        ));
    }

    table.extend([
        keywords(P::Display, Display::Inline.keyword(), false, Display::KEYWORDS),
        keywords(P::Position, Position::Static.keyword(), false, Position::KEYWORDS),
        keywords(P::Float, Float::None.keyword(), false, Float::KEYWORDS),
        keywords(P::Clear, Clear::None.keyword(), false, Clear::KEYWORDS),
        def(
            P::ZIndex,
            auto.clone(),
            false,
            number.with_keywords(AUTO_KEYWORDS),
        ),
        keywords(P::OverflowX, Overflow::Visible.keyword(), false, Overflow::KEYWORDS),
        keywords(P::OverflowY, Overflow::Visible.keyword(), false, Overflow::KEYWORDS),
        def(
            P::Clip,
            Property::keyword(ClipKeyword::Auto.keyword()),
            true,
            number.with_keywords(ClipKeyword::KEYWORDS),
        ),
        keywords(
            P::Visibility,
            Visibility::Visible.keyword(),
            false,
            Visibility::KEYWORDS,
        ),
        def(
            P::BackgroundColor,
            colour(255, 255, 255, 0),
            false,
            colour_parser,
        ),
        def(P::Color, white.clone(), true, colour_parser),
        def(P::ImageColor, white, false, colour_parser),
        def(P::Opacity, Property::number(1.0), true, number),
        def(P::FontFamily, Property::string(""), true, string),
        def(P::FontCharset, Property::string("U+0020-007E"), true, string),
        keywords(P::FontStyle, FontStyle::Normal.keyword(), true, FontStyle::KEYWORDS),
        keywords(P::FontWeight, FontWeight::Normal.keyword(), true, FontWeight::KEYWORDS),
        keywords(P::TextAlign, TextAlign::Left.keyword(), true, TextAlign::KEYWORDS),
        keywords(
            P::TextDecoration,
            TextDecoration::None.keyword(),
            true,
            TextDecoration::KEYWORDS,
        ),
        keywords(
            P::TextTransform,
            TextTransform::None.keyword(),
            true,
            TextTransform::KEYWORDS,
        ),
        keywords(P::WhiteSpace, WhiteSpace::Normal.keyword(), true, WhiteSpace::KEYWORDS),
        def(P::Cursor, Property::string(""), true, string),
        keywords(P::Drag, Drag::None.keyword(), false, Drag::KEYWORDS),
        keywords(P::TabIndex, TabIndex::None.keyword(), false, TabIndex::KEYWORDS),
        keywords(P::Focus, Focus::Auto.keyword(), true, Focus::KEYWORDS),
        keywords(
            P::PointerEvents,
            PointerEvents::Auto.keyword(),
            true,
            PointerEvents::KEYWORDS,
        ),
        def(
            P::Perspective,
            Property::keyword(0),
            false,
            length.with_keywords(NONE_KEYWORDS),
        ),
        def(
            P::Transition,
            Property::transitions(TransitionList::none()),
            false,
            ValueParser::new(Unit::TRANSITION),
        ),
    ]);
    table
}
