// Copyright 2025 the Cascara Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Raw value → computed value conversions.
//!
//! Every function here is pure. Lengths resolve at 96 pixels per inch; `dp`
//! scales by the device pixel ratio; `em` is relative to the element's font
//! size (the parent's, for `font-size` itself) and `rem` to the document's.

use alloc::rc::Rc;
use alloc::string::String;

use cascara_property::{
    Clear, ClipKeyword, Display, Drag, Float, Focus, FontStyle, FontWeight, Overflow,
    PointerEvents, Position, Property, PropertyId, PropertyIdSet, PropertyRegistry, TabIndex,
    TextAlign, TextDecoration, TextTransform, Unit, Value, VerticalAlignKeyword, Visibility,
    WhiteSpace,
};
use cascara_dirty::DirtySet;
use peniko::color::Rgba8;

use crate::computed::{
    Clip, ComputedValues, LengthPercentage, LengthPercentageAuto, LineHeight, LineHeightInherit,
    VerticalAlign, ZIndex,
};

const PIXELS_PER_INCH: f32 = 96.0;

const ABSOLUTE_SCALES: [(Unit, f32); 6] = [
    (Unit::PX, 1.0),
    (Unit::IN, PIXELS_PER_INCH),
    (Unit::CM, PIXELS_PER_INCH / 2.54),
    (Unit::MM, PIXELS_PER_INCH / 25.4),
    (Unit::PT, PIXELS_PER_INCH / 72.0),
    (Unit::PC, PIXELS_PER_INCH / 6.0),
];

const TRANSPARENT: Rgba8 = Rgba8 {
    r: 0,
    g: 0,
    b: 0,
    a: 0,
};

fn number(p: &Property) -> f32 {
    p.as_number().unwrap_or(0.0)
}

/// Converts an absolute length (`px`, `dp`, `in`, `cm`, `mm`, `pt`, `pc`) to
/// pixels. Any other unit yields `0`.
#[must_use]
pub fn compute_absolute_length(p: &Property, dp_ratio: f32) -> f32 {
    let value = number(p);
    if p.unit == Unit::DP {
        return value * dp_ratio;
    }
    ABSOLUTE_SCALES
        .iter()
        .find(|(unit, _)| *unit == p.unit)
        .map_or(0.0, |(_, scale)| value * scale)
}

/// Converts a length to pixels. Bare numbers count as pixels; `em` and `rem`
/// resolve against the given font sizes. Any other unit yields `0`.
///
/// # Example
///
/// ```rust
/// use cascara_property::{Property, Unit};
/// use cascara_style::compute_length;
///
/// assert_eq!(compute_length(&Property::length(2.0, Unit::EM), 10.0, 16.0, 1.0), 20.0);
/// assert_eq!(compute_length(&Property::length(2.0, Unit::REM), 10.0, 16.0, 1.0), 32.0);
/// assert_eq!(compute_length(&Property::length(1.0, Unit::IN), 10.0, 16.0, 1.0), 96.0);
/// assert_eq!(compute_length(&Property::length(3.0, Unit::DP), 10.0, 16.0, 2.0), 6.0);
/// ```
#[must_use]
pub fn compute_length(
    p: &Property,
    font_size: f32,
    document_font_size: f32,
    dp_ratio: f32,
) -> f32 {
    let value = number(p);
    if p.unit == Unit::NUMBER || p.unit == Unit::PX {
        value
    } else if p.unit == Unit::EM {
        value * font_size
    } else if p.unit == Unit::REM {
        value * document_font_size
    } else {
        compute_absolute_length(p, dp_ratio)
    }
}

/// Converts a length or percentage.
#[must_use]
pub fn compute_length_percentage(
    p: &Property,
    font_size: f32,
    document_font_size: f32,
    dp_ratio: f32,
) -> LengthPercentage {
    if p.unit == Unit::PERCENT {
        LengthPercentage::Percentage(number(p))
    } else {
        LengthPercentage::Length(compute_length(p, font_size, document_font_size, dp_ratio))
    }
}

/// Converts a length, percentage or the `auto` keyword.
#[must_use]
pub fn compute_length_percentage_auto(
    p: &Property,
    font_size: f32,
    document_font_size: f32,
    dp_ratio: f32,
) -> LengthPercentageAuto {
    if p.unit == Unit::KEYWORD {
        LengthPercentageAuto::Auto
    } else if p.unit == Unit::PERCENT {
        LengthPercentageAuto::Percentage(number(p))
    } else {
        LengthPercentageAuto::Length(compute_length(p, font_size, document_font_size, dp_ratio))
    }
}

/// Converts a `font-size` declaration. `em` and `%` are relative to the
/// parent's font size.
#[must_use]
pub fn compute_font_size(
    p: &Property,
    parent_font_size: f32,
    document_font_size: f32,
    dp_ratio: f32,
) -> f32 {
    let value = number(p);
    if p.unit == Unit::EM {
        value * parent_font_size
    } else if p.unit == Unit::PERCENT {
        value * parent_font_size / 100.0
    } else {
        compute_length(p, parent_font_size, document_font_size, dp_ratio)
    }
}

/// Converts a `line-height` declaration.
///
/// Numbers and percentages become multipliers that children re-apply to
/// their own font size; lengths are inherited as is.
///
/// # Example
///
/// ```rust
/// use cascara_property::Property;
/// use cascara_style::{LineHeightInherit, compute_line_height};
///
/// let lh = compute_line_height(&Property::percent(150.0), 10.0, 12.0, 1.0);
/// assert_eq!(lh.value, 15.0);
/// assert_eq!(lh.inherit_type, LineHeightInherit::Number);
/// assert_eq!(lh.inherit_value, 1.5);
/// ```
#[must_use]
pub fn compute_line_height(
    p: &Property,
    font_size: f32,
    document_font_size: f32,
    dp_ratio: f32,
) -> LineHeight {
    let value = number(p);
    if p.unit == Unit::NUMBER {
        LineHeight::new(value * font_size, LineHeightInherit::Number, value)
    } else if p.unit == Unit::PERCENT {
        let scale = value / 100.0;
        LineHeight::new(scale * font_size, LineHeightInherit::Number, scale)
    } else {
        let length = compute_length(p, font_size, document_font_size, dp_ratio);
        LineHeight::new(length, LineHeightInherit::Length, length)
    }
}

/// Converts a `vertical-align` declaration. Percentages resolve against the
/// element's line height.
#[must_use]
pub fn compute_vertical_align(
    p: &Property,
    line_height: f32,
    font_size: f32,
    document_font_size: f32,
    dp_ratio: f32,
) -> VerticalAlign {
    if p.unit == Unit::KEYWORD {
        let keyword = p
            .as_keyword()
            .and_then(VerticalAlignKeyword::from_keyword)
            .unwrap_or_default();
        VerticalAlign::Keyword(keyword)
    } else if p.unit == Unit::PERCENT {
        VerticalAlign::Length(number(p) * line_height / 100.0)
    } else {
        VerticalAlign::Length(compute_length(p, font_size, document_font_size, dp_ratio))
    }
}

/// Converts a perspective or transform origin. The keywords
/// `left`/`top`, `center` and `right`/`bottom` become 0 %, 50 % and 100 %.
#[must_use]
pub fn compute_origin(
    p: &Property,
    font_size: f32,
    document_font_size: f32,
    dp_ratio: f32,
) -> LengthPercentage {
    if p.unit == Unit::KEYWORD {
        let percent = match p.as_keyword() {
            Some(0) => 0.0,
            Some(2) => 100.0,
            _ => 50.0,
        };
        LengthPercentage::Percentage(percent)
    } else {
        compute_length_percentage(p, font_size, document_font_size, dp_ratio)
    }
}

/// Converts a `clip` declaration.
#[must_use]
pub fn compute_clip(p: &Property) -> Clip {
    if p.unit == Unit::KEYWORD {
        match p.as_keyword().and_then(ClipKeyword::from_keyword) {
            Some(ClipKeyword::None) => Clip::None,
            Some(ClipKeyword::Always) => Clip::Always,
            Some(ClipKeyword::Auto) | None => Clip::Auto,
        }
    } else {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "clip levels are small integers"
        )]
        let levels = number(p) as i32;
        Clip::Number(levels)
    }
}

/// Converts a `z-index` declaration.
#[must_use]
pub fn compute_z_index(p: &Property) -> ZIndex {
    if p.unit == Unit::KEYWORD {
        ZIndex::Auto
    } else {
        ZIndex::Number(number(p))
    }
}

fn keyword<T: Default>(p: &Property, from_keyword: fn(u8) -> Option<T>) -> T {
    p.as_keyword().and_then(from_keyword).unwrap_or_default()
}

fn string(p: &Property) -> Rc<str> {
    match &p.value {
        Value::String(s) => Rc::clone(s),
        _ => Rc::from(""),
    }
}

/// Font sizes and pixel ratio that relative units resolve against.
#[derive(Copy, Clone, Debug)]
pub(crate) struct UnitBasis {
    pub(crate) font_size: f32,
    pub(crate) document_font_size: f32,
    pub(crate) dp_ratio: f32,
}

/// Assigns the computed form of `p` to the field of `id`.
///
/// `font-size` and `line-height` are resolved before iteration and ignored
/// here.
pub(crate) fn apply_property(
    values: &mut ComputedValues,
    id: PropertyId,
    p: &Property,
    basis: UnitBasis,
) {
    use PropertyId as P;

    let UnitBasis {
        font_size,
        document_font_size,
        dp_ratio,
    } = basis;
    let length = |p: &Property| compute_length(p, font_size, document_font_size, dp_ratio);
    let lp = |p: &Property| compute_length_percentage(p, font_size, document_font_size, dp_ratio);
    let lpa =
        |p: &Property| compute_length_percentage_auto(p, font_size, document_font_size, dp_ratio);
    let origin = |p: &Property| compute_origin(p, font_size, document_font_size, dp_ratio);
    let colour = |p: &Property| p.as_colour().unwrap_or(TRANSPARENT);

    match id {
        P::FontSize | P::LineHeight => {}
        P::VerticalAlign => {
            values.vertical_align = compute_vertical_align(
                p,
                values.line_height.value,
                font_size,
                document_font_size,
                dp_ratio,
            );
        }

        P::MarginTop => values.margin_top = lpa(p),
        P::MarginRight => values.margin_right = lpa(p),
        P::MarginBottom => values.margin_bottom = lpa(p),
        P::MarginLeft => values.margin_left = lpa(p),

        P::PaddingTop => values.padding_top = lp(p),
        P::PaddingRight => values.padding_right = lp(p),
        P::PaddingBottom => values.padding_bottom = lp(p),
        P::PaddingLeft => values.padding_left = lp(p),

        P::BorderTopWidth => values.border_top_width = length(p),
        P::BorderRightWidth => values.border_right_width = length(p),
        P::BorderBottomWidth => values.border_bottom_width = length(p),
        P::BorderLeftWidth => values.border_left_width = length(p),

        P::BorderTopColor => values.border_top_color = colour(p),
        P::BorderRightColor => values.border_right_color = colour(p),
        P::BorderBottomColor => values.border_bottom_color = colour(p),
        P::BorderLeftColor => values.border_left_color = colour(p),

        P::Display => values.display = keyword(p, Display::from_keyword),
        P::Position => values.position = keyword(p, Position::from_keyword),

        P::Top => values.top = lpa(p),
        P::Right => values.right = lpa(p),
        P::Bottom => values.bottom = lpa(p),
        P::Left => values.left = lpa(p),

        P::Float => values.float = keyword(p, Float::from_keyword),
        P::Clear => values.clear = keyword(p, Clear::from_keyword),
        P::ZIndex => values.z_index = compute_z_index(p),

        P::Width => values.width = lpa(p),
        P::MinWidth => values.min_width = lp(p),
        P::MaxWidth => values.max_width = lp(p),
        P::Height => values.height = lpa(p),
        P::MinHeight => values.min_height = lp(p),
        P::MaxHeight => values.max_height = lp(p),

        P::OverflowX => values.overflow_x = keyword(p, Overflow::from_keyword),
        P::OverflowY => values.overflow_y = keyword(p, Overflow::from_keyword),
        P::Clip => values.clip = compute_clip(p),
        P::Visibility => values.visibility = keyword(p, Visibility::from_keyword),

        P::BackgroundColor => values.background_color = colour(p),
        P::Color => values.color = colour(p),
        P::ImageColor => values.image_color = colour(p),
        P::Opacity => values.opacity = number(p),

        P::FontFamily => {
            let family = p.as_str().map(str::to_lowercase).unwrap_or_else(String::new);
            values.font_family = Rc::from(family);
        }
        P::FontCharset => values.font_charset = string(p),
        P::FontStyle => values.font_style = keyword(p, FontStyle::from_keyword),
        P::FontWeight => values.font_weight = keyword(p, FontWeight::from_keyword),

        P::TextAlign => values.text_align = keyword(p, TextAlign::from_keyword),
        P::TextDecoration => values.text_decoration = keyword(p, TextDecoration::from_keyword),
        P::TextTransform => values.text_transform = keyword(p, TextTransform::from_keyword),
        P::WhiteSpace => values.white_space = keyword(p, WhiteSpace::from_keyword),

        P::Cursor => values.cursor = string(p),
        P::Drag => values.drag = keyword(p, Drag::from_keyword),
        P::TabIndex => values.tab_index = keyword(p, TabIndex::from_keyword),
        P::Focus => values.focus = keyword(p, Focus::from_keyword),
        P::ScrollbarMargin => values.scrollbar_margin = length(p),
        P::PointerEvents => values.pointer_events = keyword(p, PointerEvents::from_keyword),

        P::Perspective => values.perspective = length(p),
        P::PerspectiveOriginX => values.perspective_origin_x = origin(p),
        P::PerspectiveOriginY => values.perspective_origin_y = origin(p),

        P::TransformOriginX => values.transform_origin_x = origin(p),
        P::TransformOriginY => values.transform_origin_y = origin(p),
        P::TransformOriginZ => values.transform_origin_z = length(p),

        P::Transition => {
            if let Value::Transitions(list) = &p.value {
                values.transition = Rc::clone(list);
            }
        }
    }
}

/// Returns the attributes a child must recompute after its parent drained
/// `dirty`: every registered inherited attribute if `dirty` is "all",
/// otherwise the inherited attributes in `dirty`.
#[must_use]
pub fn inherited_dirty(dirty: &DirtySet<PropertyId>, registry: &PropertyRegistry) -> PropertyIdSet {
    let inherited = registry.registered_inherited_properties();
    if dirty.is_all() {
        inherited
    } else {
        dirty.iter().filter(|id| inherited.contains(*id)).collect()
    }
}
