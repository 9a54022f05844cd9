// Copyright 2025 the Cascara Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Typed computed values.
//!
//! [`ComputedValues`] is the output of the value computation pass: one typed
//! field per built-in attribute, with lengths resolved to pixels wherever
//! that does not need layout information.

use alloc::rc::Rc;

use cascara_property::{
    Clear, Display, Drag, Float, Focus, FontStyle, FontWeight, Overflow, PointerEvents, Position,
    PropertyId, PropertyIdSet, TabIndex, TextAlign, TextDecoration, TextTransform, TransitionList, VerticalAlignKeyword,
    Visibility, WhiteSpace,
};
use peniko::color::Rgba8;

/// A length in pixels, or a percentage resolved during layout.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum LengthPercentage {
    /// Pixels.
    Length(f32),
    /// Percent of a reference length.
    Percentage(f32),
}

/// A [`LengthPercentage`] that may also be `auto`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum LengthPercentageAuto {
    /// Determined by layout.
    Auto,
    /// Pixels.
    Length(f32),
    /// Percent of a reference length.
    Percentage(f32),
}

/// How a [`LineHeight`] is inherited.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LineHeightInherit {
    /// Children re-apply the multiplier to their own font size.
    Number,
    /// Children inherit the resolved length.
    Length,
}

/// Computed line height.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LineHeight {
    /// Resolved height in pixels.
    pub value: f32,
    /// How children inherit it.
    pub inherit_type: LineHeightInherit,
    /// The multiplier for [`LineHeightInherit::Number`], or the length.
    pub inherit_value: f32,
}

impl LineHeight {
    /// Creates a line height.
    #[must_use]
    pub const fn new(value: f32, inherit_type: LineHeightInherit, inherit_value: f32) -> Self {
        Self {
            value,
            inherit_type,
            inherit_value,
        }
    }
}

/// Computed vertical alignment.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum VerticalAlign {
    /// A keyword alignment.
    Keyword(VerticalAlignKeyword),
    /// A baseline shift in pixels.
    Length(f32),
}

/// Computed stacking order.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ZIndex {
    /// No stacking context of its own.
    Auto,
    /// An explicit stacking order.
    Number(f32),
}

/// Computed clipping behaviour.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Clip {
    /// Clip when content overflows.
    Auto,
    /// Never clip.
    None,
    /// Always clip.
    Always,
    /// Clip, ignoring this many levels of ancestor clipping.
    Number(i32),
}

/// The resolved value of every built-in attribute for one element.
///
/// `ComputedValues::default()` is the record an element starts from before
/// any inheritance or declaration is applied.
#[derive(Clone, Debug, PartialEq)]
#[expect(missing_docs, reason = "fields are named after their attributes")]
pub struct ComputedValues {
    pub margin_top: LengthPercentageAuto,
    pub margin_right: LengthPercentageAuto,
    pub margin_bottom: LengthPercentageAuto,
    pub margin_left: LengthPercentageAuto,

    pub padding_top: LengthPercentage,
    pub padding_right: LengthPercentage,
    pub padding_bottom: LengthPercentage,
    pub padding_left: LengthPercentage,

    pub border_top_width: f32,
    pub border_right_width: f32,
    pub border_bottom_width: f32,
    pub border_left_width: f32,

    pub border_top_color: Rgba8,
    pub border_right_color: Rgba8,
    pub border_bottom_color: Rgba8,
    pub border_left_color: Rgba8,

    pub display: Display,
    pub position: Position,

    pub top: LengthPercentageAuto,
    pub right: LengthPercentageAuto,
    pub bottom: LengthPercentageAuto,
    pub left: LengthPercentageAuto,

    pub float: Float,
    pub clear: Clear,
    pub z_index: ZIndex,

    pub width: LengthPercentageAuto,
    pub min_width: LengthPercentage,
    pub max_width: LengthPercentage,
    pub height: LengthPercentageAuto,
    pub min_height: LengthPercentage,
    pub max_height: LengthPercentage,

    pub line_height: LineHeight,
    pub vertical_align: VerticalAlign,

    pub overflow_x: Overflow,
    pub overflow_y: Overflow,
    pub clip: Clip,
    pub visibility: Visibility,

    pub background_color: Rgba8,
    pub color: Rgba8,
    pub image_color: Rgba8,
    pub opacity: f32,

    /// Lowercased.
    pub font_family: Rc<str>,
    pub font_charset: Rc<str>,
    pub font_style: FontStyle,
    pub font_weight: FontWeight,
    pub font_size: f32,

    pub text_align: TextAlign,
    pub text_decoration: TextDecoration,
    pub text_transform: TextTransform,
    pub white_space: WhiteSpace,

    pub cursor: Rc<str>,
    pub drag: Drag,
    pub tab_index: TabIndex,
    pub focus: Focus,
    pub scrollbar_margin: f32,
    pub pointer_events: PointerEvents,

    pub perspective: f32,
    pub perspective_origin_x: LengthPercentage,
    pub perspective_origin_y: LengthPercentage,

    pub transform_origin_x: LengthPercentage,
    pub transform_origin_y: LengthPercentage,
    pub transform_origin_z: f32,

    pub transition: Rc<TransitionList>,
}

/// Font size of an element with no declarations and no parent.
pub const DEFAULT_FONT_SIZE: f32 = 12.0;

const BLACK: Rgba8 = Rgba8 {
    r: 0,
    g: 0,
    b: 0,
    a: 255,
};

const WHITE: Rgba8 = Rgba8 {
    r: 255,
    g: 255,
    b: 255,
    a: 255,
};

impl Default for ComputedValues {
    fn default() -> Self {
        use LengthPercentage as LP;
        use LengthPercentageAuto as LPA;

        let centre = LP::Percentage(50.0);
        Self {
            margin_top: LPA::Length(0.0),
            margin_right: LPA::Length(0.0),
            margin_bottom: LPA::Length(0.0),
            margin_left: LPA::Length(0.0),

            padding_top: LP::Length(0.0),
            padding_right: LP::Length(0.0),
            padding_bottom: LP::Length(0.0),
            padding_left: LP::Length(0.0),

            border_top_width: 0.0,
            border_right_width: 0.0,
            border_bottom_width: 0.0,
            border_left_width: 0.0,

            border_top_color: BLACK,
            border_right_color: BLACK,
            border_bottom_color: BLACK,
            border_left_color: BLACK,

            display: Display::Inline,
            position: Position::Static,

            top: LPA::Auto,
            right: LPA::Auto,
            bottom: LPA::Auto,
            left: LPA::Auto,

            float: Float::None,
            clear: Clear::None,
            z_index: ZIndex::Auto,

            width: LPA::Auto,
            min_width: LP::Length(0.0),
            max_width: LP::Length(-1.0),
            height: LPA::Auto,
            min_height: LP::Length(0.0),
            max_height: LP::Length(-1.0),

            line_height: LineHeight::new(DEFAULT_FONT_SIZE * 1.2, LineHeightInherit::Number, 1.2),
            vertical_align: VerticalAlign::Keyword(VerticalAlignKeyword::Baseline),

            overflow_x: Overflow::Visible,
            overflow_y: Overflow::Visible,
            clip: Clip::Auto,
            visibility: Visibility::Visible,

            background_color: Rgba8 {
                r: 255,
                g: 255,
                b: 255,
                a: 0,
            },
            color: WHITE,
            image_color: WHITE,
            opacity: 1.0,

            font_family: Rc::from(""),
            font_charset: Rc::from("U+0020-007E"),
            font_style: FontStyle::Normal,
            font_weight: FontWeight::Normal,
            font_size: DEFAULT_FONT_SIZE,

            text_align: TextAlign::Left,
            text_decoration: TextDecoration::None,
            text_transform: TextTransform::None,
            white_space: WhiteSpace::Normal,

            cursor: Rc::from(""),
            drag: Drag::None,
            tab_index: TabIndex::None,
            focus: Focus::Auto,
            scrollbar_margin: 0.0,
            pointer_events: PointerEvents::Auto,

            perspective: 0.0,
            perspective_origin_x: centre,
            perspective_origin_y: centre,

            transform_origin_x: centre,
            transform_origin_y: centre,
            transform_origin_z: 0.0,

            transition: Rc::new(TransitionList::none()),
        }
    }
}

impl ComputedValues {
    /// Copies each attribute in `inherited` from `parent`, except font size
    /// and line height, which are resolved first.
    pub(crate) fn inherit_from(&mut self, parent: &Self, inherited: PropertyIdSet) {
        for id in inherited.iter() {
            self.copy_from(parent, id);
        }
    }

    fn copy_from(&mut self, parent: &Self, id: PropertyId) {
        use PropertyId as P;

        match id {
            P::FontSize | P::LineHeight => {}
            P::VerticalAlign => self.vertical_align = parent.vertical_align,

            P::MarginTop => self.margin_top = parent.margin_top,
            P::MarginRight => self.margin_right = parent.margin_right,
            P::MarginBottom => self.margin_bottom = parent.margin_bottom,
            P::MarginLeft => self.margin_left = parent.margin_left,
            P::PaddingTop => self.padding_top = parent.padding_top,
            P::PaddingRight => self.padding_right = parent.padding_right,
            P::PaddingBottom => self.padding_bottom = parent.padding_bottom,
            P::PaddingLeft => self.padding_left = parent.padding_left,
            P::BorderTopWidth => self.border_top_width = parent.border_top_width,
            P::BorderRightWidth => self.border_right_width = parent.border_right_width,
            P::BorderBottomWidth => self.border_bottom_width = parent.border_bottom_width,
            P::BorderLeftWidth => self.border_left_width = parent.border_left_width,
            P::BorderTopColor => self.border_top_color = parent.border_top_color,
            P::BorderRightColor => self.border_right_color = parent.border_right_color,
            P::BorderBottomColor => self.border_bottom_color = parent.border_bottom_color,
            P::BorderLeftColor => self.border_left_color = parent.border_left_color,

            P::Display => self.display = parent.display,
            P::Position => self.position = parent.position,
            P::Top => self.top = parent.top,
            P::Right => self.right = parent.right,
            P::Bottom => self.bottom = parent.bottom,
            P::Left => self.left = parent.left,
            P::Float => self.float = parent.float,
            P::Clear => self.clear = parent.clear,
            P::ZIndex => self.z_index = parent.z_index,

            P::Width => self.width = parent.width,
            P::MinWidth => self.min_width = parent.min_width,
            P::MaxWidth => self.max_width = parent.max_width,
            P::Height => self.height = parent.height,
            P::MinHeight => self.min_height = parent.min_height,
            P::MaxHeight => self.max_height = parent.max_height,

            P::OverflowX => self.overflow_x = parent.overflow_x,
            P::OverflowY => self.overflow_y = parent.overflow_y,
            P::Clip => self.clip = parent.clip,
            P::Visibility => self.visibility = parent.visibility,

            P::BackgroundColor => self.background_color = parent.background_color,
            P::Color => self.color = parent.color,
            P::ImageColor => self.image_color = parent.image_color,
            P::Opacity => self.opacity = parent.opacity,

            P::FontFamily => self.font_family = parent.font_family.clone(),
            P::FontCharset => self.font_charset = parent.font_charset.clone(),
            P::FontStyle => self.font_style = parent.font_style,
            P::FontWeight => self.font_weight = parent.font_weight,

            P::TextAlign => self.text_align = parent.text_align,
            P::TextDecoration => self.text_decoration = parent.text_decoration,
            P::TextTransform => self.text_transform = parent.text_transform,
            P::WhiteSpace => self.white_space = parent.white_space,

            P::Cursor => self.cursor = parent.cursor.clone(),
            P::Drag => self.drag = parent.drag,
            P::TabIndex => self.tab_index = parent.tab_index,
            P::Focus => self.focus = parent.focus,
            P::ScrollbarMargin => self.scrollbar_margin = parent.scrollbar_margin,
            P::PointerEvents => self.pointer_events = parent.pointer_events,

            P::Perspective => self.perspective = parent.perspective,
            P::PerspectiveOriginX => self.perspective_origin_x = parent.perspective_origin_x,
            P::PerspectiveOriginY => self.perspective_origin_y = parent.perspective_origin_y,
            P::TransformOriginX => self.transform_origin_x = parent.transform_origin_x,
            P::TransformOriginY => self.transform_origin_y = parent.transform_origin_y,
            P::TransformOriginZ => self.transform_origin_z = parent.transform_origin_z,

            P::Transition => self.transition = parent.transition.clone(),
        }
    }
}
