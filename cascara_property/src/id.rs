// Copyright 2025 the Cascara Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Closed enumeration of style attributes.
//!
//! This module provides [`PropertyId`], one variant per built-in attribute,
//! with a name lookup table generated alongside the enumeration.

macro_rules! properties {
    ($($variant:ident => $name:literal,)*) => {
        /// Identifier of a built-in style attribute.
        ///
        /// Variants are declared in a fixed order; [`index`](Self::index) is
        /// stable and dense, so a `PropertyId` can address a bitset or a table.
        ///
        /// # Example
        ///
        /// ```rust
        /// use cascara_property::PropertyId;
        ///
        /// let id = PropertyId::from_name("font-size").unwrap();
        /// assert_eq!(id, PropertyId::FontSize);
        /// assert_eq!(id.name(), "font-size");
        /// assert_eq!(PropertyId::from_index(id.index()), Some(id));
        /// ```
        #[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[repr(u8)]
        pub enum PropertyId {
            $(
                #[doc = concat!("The `", $name, "` attribute.")]
                $variant,
            )*
        }

        impl PropertyId {
            /// Every attribute, in index order.
            pub const ALL: &'static [Self] = &[$(Self::$variant,)*];

            /// Returns the attribute's name as written in declarations.
            #[must_use]
            pub const fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)*
                }
            }

            /// Looks up an attribute by its declaration name.
            #[must_use]
            pub fn from_name(name: &str) -> Option<Self> {
                match name {
                    $($name => Some(Self::$variant),)*
                    _ => None,
                }
            }
        }
    };
}

properties! {
    FontSize => "font-size",
    LineHeight => "line-height",
    VerticalAlign => "vertical-align",

    MarginTop => "margin-top",
    MarginRight => "margin-right",
    MarginBottom => "margin-bottom",
    MarginLeft => "margin-left",
    PaddingTop => "padding-top",
    PaddingRight => "padding-right",
    PaddingBottom => "padding-bottom",
    PaddingLeft => "padding-left",
    BorderTopWidth => "border-top-width",
    BorderRightWidth => "border-right-width",
    BorderBottomWidth => "border-bottom-width",
    BorderLeftWidth => "border-left-width",
    BorderTopColor => "border-top-color",
    BorderRightColor => "border-right-color",
    BorderBottomColor => "border-bottom-color",
    BorderLeftColor => "border-left-color",

    Display => "display",
    Position => "position",
    Top => "top",
    Right => "right",
    Bottom => "bottom",
    Left => "left",
    Float => "float",
    Clear => "clear",
    ZIndex => "z-index",

    Width => "width",
    MinWidth => "min-width",
    MaxWidth => "max-width",
    Height => "height",
    MinHeight => "min-height",
    MaxHeight => "max-height",

    OverflowX => "overflow-x",
    OverflowY => "overflow-y",
    Clip => "clip",
    Visibility => "visibility",

    BackgroundColor => "background-color",
    Color => "color",
    ImageColor => "image-color",
    Opacity => "opacity",

    FontFamily => "font-family",
    FontCharset => "font-charset",
    FontStyle => "font-style",
    FontWeight => "font-weight",

    TextAlign => "text-align",
    TextDecoration => "text-decoration",
    TextTransform => "text-transform",
    WhiteSpace => "white-space",

    Cursor => "cursor",
    Drag => "drag",
    TabIndex => "tab-index",
    Focus => "focus",
    ScrollbarMargin => "scrollbar-margin",
    PointerEvents => "pointer-events",

    Perspective => "perspective",
    PerspectiveOriginX => "perspective-origin-x",
    PerspectiveOriginY => "perspective-origin-y",
    TransformOriginX => "transform-origin-x",
    TransformOriginY => "transform-origin-y",
    TransformOriginZ => "transform-origin-z",

    Transition => "transition",
}

impl PropertyId {
    /// Number of built-in attributes.
    pub const COUNT: usize = Self::ALL.len();

    /// Returns the dense index of this attribute.
    #[must_use]
    #[inline]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Returns the attribute at `index`, if any.
    #[must_use]
    #[inline]
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(usize::from(index)).copied()
    }
}

impl core::fmt::Display for PropertyId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}
