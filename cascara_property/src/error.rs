// Copyright 2025 the Cascara Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Declaration parsing errors.

use alloc::string::String;

use crate::id::PropertyId;

/// Errors produced when parsing an attribute declaration.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The attribute name is not a known attribute.
    #[error("unknown attribute `{name}`")]
    UnknownProperty {
        /// The name as written.
        name: String,
    },
    /// The value text is not valid for the attribute.
    #[error("invalid value `{value}` for `{property}`")]
    InvalidValue {
        /// The attribute being declared.
        property: PropertyId,
        /// The value text as written.
        value: String,
    },
    /// The attribute is known but has not been registered.
    #[error("attribute `{property}` is not registered")]
    Unregistered {
        /// The unregistered attribute.
        property: PropertyId,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn messages_name_the_attribute() {
        let err = ParseError::InvalidValue {
            property: PropertyId::Color,
            value: "rgb(".into(),
        };
        assert_eq!(err.to_string(), "invalid value `rgb(` for `color`");
    }
}
