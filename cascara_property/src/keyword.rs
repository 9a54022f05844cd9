// Copyright 2025 the Cascara Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyword enumerations for keyword-valued attributes.
//!
//! A keyword is stored in a [`Property`](crate::Property) as its index into
//! the owning enumeration's `KEYWORDS` table. The parser registered for an
//! attribute uses the same table, so `from_keyword` is the exact inverse.

macro_rules! keywords {
    ($(
        $(#[$meta:meta])*
        $ty:ident {
            $($(#[$vmeta:meta])* $variant:ident => $name:literal,)*
        }
    )*) => {$(
        $(#[$meta])*
        #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
        #[repr(u8)]
        pub enum $ty {
            $(
                #[doc = concat!("`", $name, "`")]
                $(#[$vmeta])*
                $variant,
            )*
        }

        impl $ty {
            /// Keyword names, indexed by keyword value.
            pub const KEYWORDS: &'static [&'static str] = &[$($name,)*];

            /// Returns the variant stored as keyword index `keyword`.
            #[must_use]
            pub fn from_keyword(keyword: u8) -> Option<Self> {
                const VARIANTS: &[$ty] = &[$($ty::$variant,)*];
                VARIANTS.get(usize::from(keyword)).copied()
            }

            /// Returns the keyword index of this variant.
            #[must_use]
            pub const fn keyword(self) -> u8 {
                self as u8
            }

            /// Returns the keyword as written in declarations.
            #[must_use]
            pub fn name(self) -> &'static str {
                Self::KEYWORDS[usize::from(self.keyword())]
            }
        }
    )*};
}

keywords! {
    /// Box generation mode.
    Display {
        #[default]
        Inline => "inline",
        None => "none",
        Block => "block",
        InlineBlock => "inline-block",
    }

    /// Positioning scheme.
    Position {
        #[default]
        Static => "static",
        Relative => "relative",
        Absolute => "absolute",
        Fixed => "fixed",
    }

    /// Floating behaviour.
    Float {
        #[default]
        None => "none",
        Left => "left",
        Right => "right",
    }

    /// Sides on which floats are cleared.
    Clear {
        #[default]
        None => "none",
        Left => "left",
        Right => "right",
        Both => "both",
    }

    /// Overflow handling along one axis.
    Overflow {
        #[default]
        Visible => "visible",
        Hidden => "hidden",
        Auto => "auto",
        Scroll => "scroll",
    }

    /// Whether an element is drawn.
    Visibility {
        #[default]
        Visible => "visible",
        Hidden => "hidden",
    }

    /// Font slant.
    FontStyle {
        #[default]
        Normal => "normal",
        Italic => "italic",
    }

    /// Font weight.
    FontWeight {
        #[default]
        Normal => "normal",
        Bold => "bold",
    }

    /// Horizontal alignment of inline content.
    TextAlign {
        #[default]
        Left => "left",
        Right => "right",
        Center => "center",
        Justify => "justify",
    }

    /// Line decoration drawn with text.
    TextDecoration {
        #[default]
        None => "none",
        Underline => "underline",
        Overline => "overline",
        LineThrough => "line-through",
    }

    /// Case transformation applied to text.
    TextTransform {
        #[default]
        None => "none",
        Capitalize => "capitalize",
        Uppercase => "uppercase",
        Lowercase => "lowercase",
    }

    /// White-space collapsing and wrapping.
    WhiteSpace {
        #[default]
        Normal => "normal",
        Pre => "pre",
        Nowrap => "nowrap",
        PreWrap => "pre-wrap",
        PreLine => "pre-line",
    }

    /// Drag behaviour.
    Drag {
        #[default]
        None => "none",
        Drag => "drag",
        DragDrop => "drag-drop",
        Block => "block",
        Clone => "clone",
    }

    /// Participation in tab navigation.
    TabIndex {
        #[default]
        None => "none",
        Auto => "auto",
    }

    /// Whether an element can take focus.
    Focus {
        None => "none",
        #[default]
        Auto => "auto",
    }

    /// Whether an element receives pointer events.
    PointerEvents {
        None => "none",
        #[default]
        Auto => "auto",
    }

    /// Keyword forms of `vertical-align`.
    VerticalAlignKeyword {
        #[default]
        Baseline => "baseline",
        Middle => "middle",
        Sub => "sub",
        Super => "super",
        TextTop => "text-top",
        TextBottom => "text-bottom",
        Top => "top",
        Bottom => "bottom",
    }

    /// Keyword forms of `clip`.
    ClipKeyword {
        #[default]
        Auto => "auto",
        None => "none",
        Always => "always",
    }
}

/// Keyword for lengths that may be `auto`.
pub const AUTO_KEYWORDS: &[&str] = &["auto"];

/// Keyword for `perspective: none`.
pub const NONE_KEYWORDS: &[&str] = &["none"];

/// Keyword forms of a horizontal origin: 0%, 50% and 100%.
pub const ORIGIN_X_KEYWORDS: &[&str] = &["left", "center", "right"];

/// Keyword forms of a vertical origin: 0%, 50% and 100%.
pub const ORIGIN_Y_KEYWORDS: &[&str] = &["top", "center", "bottom"];
