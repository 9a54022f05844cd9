// Copyright 2025 the Cascara Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Resolving relative lengths against layout quantities.
//!
//! Computed values keep percentages unresolved, since their reference
//! lengths are only known during layout. [`ResolveContext`] carries those
//! reference lengths for one element.

use cascara_property::{Property, Unit};
use kurbo::Size;

use crate::compute::{compute_length, compute_length_percentage};
use crate::computed::LengthPercentage;

/// What a number or percentage is relative to.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum RelativeTarget {
    /// A plain scale factor of `1`.
    #[default]
    None,
    /// The containing block's width.
    ContainingBlockWidth,
    /// The containing block's height.
    ContainingBlockHeight,
    /// The element's font size.
    FontSize,
    /// The parent's font size. `em` resolves against it too.
    ParentFontSize,
    /// The element's line height.
    LineHeight,
}

/// The reference quantities an element's relative lengths resolve against.
///
/// Every field is required, so a resolution without a containing block or a
/// parent cannot be expressed.
///
/// # Example
///
/// ```rust
/// use cascara_property::{Property, Unit};
/// use cascara_style::{RelativeTarget, ResolveContext};
/// use kurbo::Size;
///
/// let cx = ResolveContext {
///     font_size: 10.0,
///     parent_font_size: 20.0,
///     document_font_size: 16.0,
///     dp_ratio: 1.0,
///     line_height: 12.0,
///     containing_block: Size::new(200.0, 100.0),
/// };
///
/// let half = Property::percent(50.0);
/// let width = cx.resolve_number_length_percentage(&half, RelativeTarget::ContainingBlockWidth);
/// assert_eq!(width, 100.0);
///
/// // `em` on a font-size target is relative to the parent.
/// let em = Property::length(1.5, Unit::EM);
/// assert_eq!(cx.resolve_number_length_percentage(&em, RelativeTarget::FontSize), 15.0);
/// assert_eq!(cx.resolve_number_length_percentage(&em, RelativeTarget::ParentFontSize), 30.0);
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ResolveContext {
    /// The element's computed font size.
    pub font_size: f32,
    /// The parent's computed font size.
    pub parent_font_size: f32,
    /// The owning document's computed font size.
    pub document_font_size: f32,
    /// Device pixel ratio for `dp`.
    pub dp_ratio: f32,
    /// The element's computed line height.
    pub line_height: f32,
    /// The containing block's size.
    pub containing_block: Size,
}

impl ResolveContext {
    #[expect(
        clippy::cast_possible_truncation,
        reason = "layout sizes fit comfortably in f32"
    )]
    fn base_value(&self, target: RelativeTarget) -> f32 {
        match target {
            RelativeTarget::None => 1.0,
            RelativeTarget::ContainingBlockWidth => self.containing_block.width as f32,
            RelativeTarget::ContainingBlockHeight => self.containing_block.height as f32,
            RelativeTarget::FontSize => self.font_size,
            RelativeTarget::ParentFontSize => self.parent_font_size,
            RelativeTarget::LineHeight => self.line_height,
        }
    }

    /// Resolves a number, length or percentage to pixels.
    ///
    /// Lengths resolve on their own; numbers scale and percentages divide
    /// `target`'s value. `em` against [`RelativeTarget::ParentFontSize`]
    /// scales the parent's font size.
    #[must_use]
    pub fn resolve_number_length_percentage(&self, p: &Property, target: RelativeTarget) -> f32 {
        let em_on_parent = p.unit == Unit::EM && target == RelativeTarget::ParentFontSize;
        if p.unit.intersects(Unit::LENGTH) && !em_on_parent {
            return compute_length(p, self.font_size, self.document_font_size, self.dp_ratio);
        }

        let value = p.as_number().unwrap_or(0.0);
        let scale = if p.unit == Unit::EM || p.unit == Unit::NUMBER {
            value
        } else if p.unit == Unit::PERCENT {
            value / 100.0
        } else {
            0.0
        };
        self.base_value(target) * scale
    }

    /// Resolves a length or percentage to pixels, percentages against `base`.
    #[must_use]
    pub fn resolve_length_percentage(&self, p: &Property, base: f32) -> f32 {
        debug_assert!(
            p.unit.intersects(Unit::LENGTH_PERCENT),
            "expected a length or percentage, got {:?}",
            p.unit
        );
        let computed =
            compute_length_percentage(p, self.font_size, self.document_font_size, self.dp_ratio);
        match computed {
            LengthPercentage::Length(length) => length,
            LengthPercentage::Percentage(percent) => base * percent / 100.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> ResolveContext {
        ResolveContext {
            font_size: 10.0,
            parent_font_size: 20.0,
            document_font_size: 16.0,
            dp_ratio: 2.0,
            line_height: 12.0,
            containing_block: Size::new(300.0, 80.0),
        }
    }

    #[test]
    fn lengths_ignore_the_target() {
        let cx = context();
        let p = Property::length(2.0, Unit::DP);
        assert_eq!(
            cx.resolve_number_length_percentage(&p, RelativeTarget::LineHeight),
            4.0
        );
        let rem = Property::length(1.0, Unit::REM);
        assert_eq!(
            cx.resolve_number_length_percentage(&rem, RelativeTarget::None),
            16.0
        );
    }

    #[test]
    fn numbers_and_percentages_scale_the_target() {
        let cx = context();
        assert_eq!(
            cx.resolve_number_length_percentage(&Property::number(1.5), RelativeTarget::LineHeight),
            18.0
        );
        assert_eq!(
            cx.resolve_number_length_percentage(
                &Property::percent(25.0),
                RelativeTarget::ContainingBlockHeight
            ),
            20.0
        );
        assert_eq!(
            cx.resolve_number_length_percentage(&Property::number(3.0), RelativeTarget::None),
            3.0
        );
        assert_eq!(
            cx.resolve_number_length_percentage(&Property::keyword(0), RelativeTarget::FontSize),
            0.0
        );
    }

    #[test]
    fn length_percentage_against_base() {
        let cx = context();
        assert_eq!(cx.resolve_length_percentage(&Property::percent(10.0), 500.0), 50.0);
        assert_eq!(
            cx.resolve_length_percentage(&Property::length(2.0, Unit::EM), 500.0),
            20.0
        );
    }
}
