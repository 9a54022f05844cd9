// Copyright 2025 the Cascara Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Value grammar for attribute declarations.
//!
//! Each registered attribute carries a [`ValueParser`] describing which
//! units and keywords it accepts. Shorthands are not supported: every
//! declaration names exactly one attribute.

use alloc::string::String;
use alloc::vec::Vec;
use peniko::color::Rgba8;

use crate::error::ParseError;
use crate::id::PropertyId;
use crate::transition::{Transition, TransitionList};
use crate::unit::Unit;
use crate::value::Property;

/// Describes the values an attribute accepts.
///
/// Keywords are tried first and stored by their index in `keywords`. The
/// remaining forms are selected by `units`: [`Unit::COLOUR`],
/// [`Unit::STRING`], [`Unit::TRANSITION`], or any mix of numeric units.
///
/// # Example
///
/// ```rust
/// use cascara_property::{Property, PropertyId, Unit, ValueParser};
///
/// let width = ValueParser::new(Unit::LENGTH_PERCENT).with_keywords(&["auto"]);
///
/// assert_eq!(width.parse(PropertyId::Width, "auto"), Ok(Property::keyword(0)));
/// assert_eq!(width.parse(PropertyId::Width, "50%"), Ok(Property::percent(50.0)));
/// assert_eq!(width.parse(PropertyId::Width, "2em"), Ok(Property::length(2.0, Unit::EM)));
/// assert!(width.parse(PropertyId::Width, "wide").is_err());
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ValueParser {
    units: Unit,
    keywords: &'static [&'static str],
}

impl ValueParser {
    /// Creates a parser accepting the given units and no keywords.
    #[must_use]
    pub const fn new(units: Unit) -> Self {
        Self {
            units,
            keywords: &[],
        }
    }

    /// Creates a parser accepting only the given keywords.
    #[must_use]
    pub const fn keywords(keywords: &'static [&'static str]) -> Self {
        Self {
            units: Unit::empty(),
            keywords,
        }
    }

    /// Adds a keyword table to this parser.
    #[must_use]
    pub const fn with_keywords(mut self, keywords: &'static [&'static str]) -> Self {
        self.keywords = keywords;
        self
    }

    /// Returns the accepted units.
    #[must_use]
    pub const fn units(&self) -> Unit {
        self.units
    }

    /// Returns the accepted keywords.
    #[must_use]
    pub const fn keyword_names(&self) -> &'static [&'static str] {
        self.keywords
    }

    /// Parses `text` as a value of attribute `id`.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::InvalidValue`] if `text` matches none of the
    /// accepted forms.
    pub fn parse(&self, id: PropertyId, text: &str) -> Result<Property, ParseError> {
        let text = text.trim();
        let invalid = || ParseError::InvalidValue {
            property: id,
            value: String::from(text),
        };
        if text.is_empty() {
            return Err(invalid());
        }

        if let Some(index) = self
            .keywords
            .iter()
            .position(|k| k.eq_ignore_ascii_case(text))
        {
            return u8::try_from(index)
                .map(Property::keyword)
                .map_err(|_| invalid());
        }

        if self.units.contains(Unit::COLOUR) {
            return parse_colour(text).map(Property::colour).ok_or_else(invalid);
        }
        if self.units.contains(Unit::TRANSITION) {
            return parse_transitions(text)
                .map(Property::transitions)
                .ok_or_else(invalid);
        }
        if self.units.contains(Unit::STRING) {
            return Ok(Property::string(unquote(text)));
        }

        parse_number(text, self.units).ok_or_else(invalid)
    }
}

/// Parses a number with an optional unit suffix, restricted to `accepted`.
///
/// A unitless zero is accepted as `0px` where lengths are accepted but bare
/// numbers are not.
fn parse_number(text: &str, accepted: Unit) -> Option<Property> {
    let split = text
        .find(|c: char| c.is_ascii_alphabetic() || c == '%')
        .unwrap_or(text.len());
    let (number, suffix) = text.split_at(split);
    let value: f32 = number.trim_end().parse().ok()?;
    let unit = Unit::from_suffix(&suffix.to_ascii_lowercase())?;

    if accepted.contains(unit) {
        Some(Property::length(value, unit))
    } else if unit == Unit::NUMBER && value == 0.0 && accepted.intersects(Unit::LENGTH) {
        Some(Property::px(0.0))
    } else {
        None
    }
}

fn unquote(text: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = text
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    text
}

const NAMED_COLOURS: &[(&str, [u8; 4])] = &[
    ("transparent", [0, 0, 0, 0]),
    ("black", [0, 0, 0, 255]),
    ("white", [255, 255, 255, 255]),
    ("silver", [192, 192, 192, 255]),
    ("gray", [128, 128, 128, 255]),
    ("grey", [128, 128, 128, 255]),
    ("red", [255, 0, 0, 255]),
    ("maroon", [128, 0, 0, 255]),
    ("lime", [0, 255, 0, 255]),
    ("green", [0, 128, 0, 255]),
    ("blue", [0, 0, 255, 255]),
    ("navy", [0, 0, 128, 255]),
    ("yellow", [255, 255, 0, 255]),
    ("olive", [128, 128, 0, 255]),
    ("cyan", [0, 255, 255, 255]),
    ("aqua", [0, 255, 255, 255]),
    ("teal", [0, 128, 128, 255]),
    ("magenta", [255, 0, 255, 255]),
    ("fuchsia", [255, 0, 255, 255]),
    ("purple", [128, 0, 128, 255]),
];

const fn rgba([r, g, b, a]: [u8; 4]) -> Rgba8 {
    Rgba8 { r, g, b, a }
}

/// Parses `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`, `rgb(r, g, b)`,
/// `rgba(r, g, b, a)` or a named colour.
///
/// Channels in the functional forms, alpha included, range over 0 to 255.
fn parse_colour(text: &str) -> Option<Rgba8> {
    if let Some(hex) = text.strip_prefix('#') {
        return parse_hex_colour(hex);
    }

    let lower = text.to_ascii_lowercase();
    if let Some(args) = lower
        .strip_prefix("rgba(")
        .or_else(|| lower.strip_prefix("rgb("))
    {
        let args = args.strip_suffix(')')?;
        let channels: Vec<u8> = args
            .split(',')
            .map(|c| c.trim().parse::<u8>().ok())
            .collect::<Option<_>>()?;
        let has_alpha = lower.starts_with("rgba(");
        return match (has_alpha, channels.as_slice()) {
            (false, &[r, g, b]) => Some(Rgba8 { r, g, b, a: 255 }),
            (true, &[r, g, b, a]) => Some(Rgba8 { r, g, b, a }),
            _ => None,
        };
    }

    NAMED_COLOURS
        .iter()
        .find(|(name, _)| *name == lower)
        .map(|(_, channels)| rgba(*channels))
}

fn parse_hex_colour(hex: &str) -> Option<Rgba8> {
    if !hex.is_ascii() {
        return None;
    }
    let nibble = |i: usize| u8::from_str_radix(hex.get(i..=i)?, 16).ok();
    let byte = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    match hex.len() {
        3 | 4 => {
            let mut channels = [0, 0, 0, 255];
            for (i, channel) in channels.iter_mut().enumerate().take(hex.len()) {
                *channel = nibble(i)? * 0x11;
            }
            Some(rgba(channels))
        }
        6 | 8 => {
            let mut channels = [0, 0, 0, 255];
            for (i, channel) in channels.iter_mut().enumerate().take(hex.len() / 2) {
                *channel = byte(i * 2)?;
            }
            Some(rgba(channels))
        }
        _ => None,
    }
}

/// Parses a time in seconds: `0.2s`, `150ms`, or a bare number of seconds.
fn parse_time(text: &str) -> Option<f32> {
    if let Some(ms) = text.strip_suffix("ms") {
        return ms.parse::<f32>().ok().map(|ms| ms / 1000.0);
    }
    text.strip_suffix('s').unwrap_or(text).parse().ok()
}

/// Parses `none`, `all <duration> [<delay>]`, or a comma-separated list of
/// `<attribute> <duration> [<delay>]`.
fn parse_transitions(text: &str) -> Option<TransitionList> {
    if text.eq_ignore_ascii_case("none") {
        return Some(TransitionList::none());
    }

    let mut list = TransitionList::default();
    for entry in text.split(',') {
        let mut tokens = entry.split_whitespace();
        let target = tokens.next()?;
        let duration = parse_time(tokens.next()?)?;
        let delay = match tokens.next() {
            Some(token) => parse_time(token)?,
            None => 0.0,
        };
        if tokens.next().is_some() || duration < 0.0 {
            return None;
        }

        let id = if target.eq_ignore_ascii_case("all") {
            list.all = true;
            PropertyId::Transition
        } else {
            PropertyId::from_name(&target.to_ascii_lowercase())?
        };
        list.transitions.push(Transition {
            id,
            duration,
            delay,
        });
    }

    // `all` only stands alone.
    if list.all && list.transitions.len() != 1 {
        return None;
    }
    Some(list)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LENGTH: ValueParser = ValueParser::new(Unit::LENGTH);
    const COLOUR: ValueParser = ValueParser::new(Unit::COLOUR);
    const TRANSITION: ValueParser = ValueParser::new(Unit::TRANSITION);

    #[test]
    fn numbers_and_units() {
        let p = ValueParser::new(Unit::NUMBER_LENGTH_PERCENT);
        assert_eq!(p.parse(PropertyId::LineHeight, "1.5"), Ok(Property::number(1.5)));
        assert_eq!(
            p.parse(PropertyId::LineHeight, " 12PX "),
            Ok(Property::px(12.0))
        );
        assert_eq!(
            p.parse(PropertyId::LineHeight, "-2rem"),
            Ok(Property::length(-2.0, Unit::REM))
        );
        assert!(p.parse(PropertyId::LineHeight, "12vw").is_err());
        assert!(p.parse(PropertyId::LineHeight, "px").is_err());
    }

    #[test]
    fn lengths_reject_bare_numbers_except_zero() {
        assert_eq!(LENGTH.parse(PropertyId::Perspective, "0"), Ok(Property::px(0.0)));
        assert!(LENGTH.parse(PropertyId::Perspective, "3").is_err());
        assert!(LENGTH.parse(PropertyId::Perspective, "10%").is_err());
    }

    #[test]
    fn keywords_are_case_insensitive() {
        let p = ValueParser::keywords(&["visible", "hidden"]);
        assert_eq!(p.parse(PropertyId::Visibility, "Hidden"), Ok(Property::keyword(1)));
        assert!(p.parse(PropertyId::Visibility, "collapse").is_err());
    }

    #[test]
    fn colours() {
        let red = Rgba8 {
            r: 255,
            g: 0,
            b: 0,
            a: 255,
        };
        for text in ["#f00", "#f00f", "#ff0000", "#FF0000FF", "rgb(255, 0, 0)", "red"] {
            assert_eq!(
                COLOUR.parse(PropertyId::Color, text),
                Ok(Property::colour(red)),
                "{text}"
            );
        }
        assert_eq!(
            COLOUR.parse(PropertyId::Color, "rgba(0, 0, 255, 128)"),
            Ok(Property::colour(Rgba8 {
                r: 0,
                g: 0,
                b: 255,
                a: 128
            }))
        );
        for text in ["#ff", "#gg0000", "rgb(1, 2)", "rgba(1, 2, 3)", "rgb(256, 0, 0)", "reddish"] {
            assert!(COLOUR.parse(PropertyId::Color, text).is_err(), "{text}");
        }
    }

    #[test]
    fn strings_drop_quotes() {
        let p = ValueParser::new(Unit::STRING);
        assert_eq!(
            p.parse(PropertyId::FontFamily, "\"Delicious\""),
            Ok(Property::string("Delicious"))
        );
        assert_eq!(
            p.parse(PropertyId::Cursor, "pointer"),
            Ok(Property::string("pointer"))
        );
    }

    #[test]
    fn transition_lists() {
        let parsed = TRANSITION.parse(PropertyId::Transition, "color 0.2s").unwrap();
        let list = parsed.as_transitions().unwrap();
        assert!(!list.none && !list.all);
        assert_eq!(
            list.transitions,
            [Transition {
                id: PropertyId::Color,
                duration: 0.2,
                delay: 0.0
            }]
        );

        let parsed = TRANSITION
            .parse(PropertyId::Transition, "width 1s 250ms, opacity 2s")
            .unwrap();
        let list = parsed.as_transitions().unwrap();
        assert_eq!(list.transitions.len(), 2);
        assert_eq!(list.transitions[0].delay, 0.25);

        let parsed = TRANSITION.parse(PropertyId::Transition, "all 0.5s").unwrap();
        assert!(parsed.as_transitions().unwrap().all);

        let parsed = TRANSITION.parse(PropertyId::Transition, "none").unwrap();
        assert!(parsed.as_transitions().unwrap().none);

        for text in ["color", "colour 1s", "all 1s, color 1s", "color 1s 1s 1s"] {
            assert!(TRANSITION.parse(PropertyId::Transition, text).is_err(), "{text}");
        }
    }
}
