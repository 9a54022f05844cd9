// Copyright 2025 the Cascara Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Units attached to raw attribute values.

use bitflags::bitflags;

bitflags! {
    /// The unit of a raw [`Property`](crate::Property) value.
    ///
    /// A value carries exactly one unit bit. The composite constants
    /// ([`LENGTH`](Self::LENGTH), [`LENGTH_PERCENT`](Self::LENGTH_PERCENT), ...)
    /// are masks for testing membership with [`intersects`](Self::intersects).
    ///
    /// ```rust
    /// use cascara_property::Unit;
    ///
    /// assert!(Unit::EM.intersects(Unit::LENGTH));
    /// assert!(Unit::PERCENT.intersects(Unit::LENGTH_PERCENT));
    /// assert!(!Unit::PERCENT.intersects(Unit::LENGTH));
    /// ```
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    pub struct Unit: u32 {
        /// A bare number.
        const NUMBER = 1 << 0;
        /// A percentage; the stored value is in percent, not a fraction.
        const PERCENT = 1 << 1;
        /// CSS pixels.
        const PX = 1 << 2;
        /// Density-independent pixels, scaled by the device pixel ratio.
        const DP = 1 << 3;
        /// Relative to the element's font size.
        const EM = 1 << 4;
        /// Relative to the document root's font size.
        const REM = 1 << 5;
        /// Inches.
        const IN = 1 << 6;
        /// Centimetres.
        const CM = 1 << 7;
        /// Millimetres.
        const MM = 1 << 8;
        /// Points.
        const PT = 1 << 9;
        /// Picas.
        const PC = 1 << 10;
        /// An attribute-specific keyword index.
        const KEYWORD = 1 << 11;
        /// A string.
        const STRING = 1 << 12;
        /// A colour.
        const COLOUR = 1 << 13;
        /// A transition list.
        const TRANSITION = 1 << 14;

        /// Lengths with a fixed size on the reference display.
        const ABSOLUTE_LENGTH = Self::PX.bits() | Self::DP.bits() | Self::IN.bits()
            | Self::CM.bits() | Self::MM.bits() | Self::PT.bits() | Self::PC.bits();
        /// Every length unit.
        const LENGTH = Self::ABSOLUTE_LENGTH.bits() | Self::EM.bits() | Self::REM.bits();
        /// Lengths or percentages.
        const LENGTH_PERCENT = Self::LENGTH.bits() | Self::PERCENT.bits();
        /// Numbers, lengths or percentages.
        const NUMBER_LENGTH_PERCENT = Self::NUMBER.bits() | Self::LENGTH_PERCENT.bits();
    }
}

/// Numeric units and their written suffixes.
const SUFFIXES: [(Unit, &str); 11] = [
    (Unit::NUMBER, ""),
    (Unit::PERCENT, "%"),
    (Unit::PX, "px"),
    (Unit::DP, "dp"),
    (Unit::EM, "em"),
    (Unit::REM, "rem"),
    (Unit::IN, "in"),
    (Unit::CM, "cm"),
    (Unit::MM, "mm"),
    (Unit::PT, "pt"),
    (Unit::PC, "pc"),
];

impl Unit {
    /// Returns the suffix used when writing a number in this unit.
    ///
    /// Returns `None` for units that are not numeric or for composite masks.
    #[must_use]
    pub fn suffix(self) -> Option<&'static str> {
        SUFFIXES
            .iter()
            .find(|(unit, _)| *unit == self)
            .map(|(_, suffix)| *suffix)
    }

    /// Parses a numeric unit suffix.
    ///
    /// The empty suffix is [`NUMBER`](Self::NUMBER).
    #[must_use]
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        SUFFIXES
            .iter()
            .find(|(_, s)| *s == suffix)
            .map(|(unit, _)| *unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suffixes_round_trip() {
        for unit in [Unit::NUMBER, Unit::PERCENT, Unit::PX, Unit::REM, Unit::PC] {
            let suffix = unit.suffix().unwrap();
            assert_eq!(Unit::from_suffix(suffix), Some(unit));
        }
        assert_eq!(Unit::LENGTH.suffix(), None);
        assert_eq!(Unit::from_suffix("vw"), None);
    }

    #[test]
    fn composites_cover_their_members() {
        assert!(Unit::LENGTH.contains(Unit::ABSOLUTE_LENGTH));
        assert!(Unit::LENGTH_PERCENT.contains(Unit::LENGTH));
        assert!(Unit::NUMBER_LENGTH_PERCENT.contains(Unit::NUMBER));
        assert!(!Unit::LENGTH.intersects(Unit::KEYWORD));
    }
}
