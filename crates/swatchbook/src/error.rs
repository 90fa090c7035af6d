//! Utility module with swatchbook's errors.

use crate::Float;

/// An erroneous color format.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ColorFormatError {
    /// A color format that is neither hashed hexadecimal, nor a known CSS
    /// function, nor a CSS named color.
    UnknownFormat,

    /// A color format with unexpected characters or an unexpected number of
    /// characters. For example, `#00` is missing a hexadecimal digit, whereas
    /// `#💩00` has the correct length but contains an unsuitable character.
    UnexpectedCharacters,

    /// A CSS function without the opening parenthesis. For example,
    /// `rgb 0, 0, 0)` is missing the opening parenthesis.
    NoOpeningParenthesis,

    /// A CSS function without the closing parenthesis. For example,
    /// `rgb(1, 2, 3` is missing the closing parenthesis.
    NoClosingParenthesis,

    /// A CSS function that is missing a channel or alpha. For example,
    /// `rgb(0, 0)` is missing the third channel.
    MissingCoordinate,

    /// A CSS function with too many arguments. For example, `rgb(1, 2, 3, 4)`
    /// has one argument too many.
    TooManyCoordinates,

    /// A hashed color with a malformed hexadecimal digit. For example, `#efg`
    /// has a malformed third component.
    MalformedHex,

    /// A channel that is not an integer between 0 and 255, inclusive. For
    /// example, `rgb(0, 256, 0)` has a malformed second channel.
    MalformedInteger,

    /// An alpha value that is not `0`, `1`, or a decimal fraction. For
    /// example, `rgba(0, 0, 0, 1.0)` has a malformed alpha.
    MalformedAlpha,
}

impl std::fmt::Display for ColorFormatError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use ColorFormatError::*;

        match self {
            UnknownFormat => f.write_str(
                "color format should start with `#`, `rgb()`, or `rgba()` or be a named color",
            ),
            UnexpectedCharacters => f.write_str(
                "hashed color format should have 3, 4, 6, or 8 ASCII hexadecimal digits",
            ),
            NoOpeningParenthesis => {
                f.write_str("color format should include an opening parenthesis but has none")
            }
            NoClosingParenthesis => {
                f.write_str("color format should include a closing parenthesis but has none")
            }
            MissingCoordinate => f.write_str("color format is missing a channel or alpha"),
            TooManyCoordinates => f.write_str("color format has too many arguments"),
            MalformedHex => {
                f.write_str("color format components should be hexadecimal integers but are not")
            }
            MalformedInteger => {
                f.write_str("color format channels should be integers between 0 and 255")
            }
            MalformedAlpha => f.write_str("color format alpha should be 0, 1, or a fraction"),
        }
    }
}

impl std::error::Error for ColorFormatError {}

// ====================================================================================================================

/// An invalid argument to a [`ColorScale`](crate::ColorScale).
#[derive(Clone, Debug, PartialEq)]
pub enum ScaleError {
    /// A color scale without any stops.
    NoStops,

    /// Trimming bounds that fall outside unit range, are inverted, or are
    /// not-a-number.
    InvalidBounds { lower: Float, upper: Float },
}

impl std::fmt::Display for ScaleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoStops => f.write_str("color scale should have at least one stop"),
            Self::InvalidBounds { lower, upper } => f.write_fmt(format_args!(
                "trimming bounds {}..={} should be ordered and within 0..=1",
                lower, upper
            )),
        }
    }
}

impl std::error::Error for ScaleError {}

// ====================================================================================================================

/// An error while creating or evaluating design tokens.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TokenError {
    /// A token with the same name has already been created.
    DuplicateName(String),

    /// No token with the name exists.
    UnknownName(String),

    /// A token value does not have the token's type.
    TypeMismatch { name: String, expected: &'static str },

    /// A derived token depends on itself, directly or transitively.
    Cycle(String),
}

impl std::fmt::Display for TokenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateName(name) => {
                f.write_fmt(format_args!("design token `{}` already exists", name))
            }
            Self::UnknownName(name) => {
                f.write_fmt(format_args!("design token `{}` does not exist", name))
            }
            Self::TypeMismatch { name, expected } => f.write_fmt(format_args!(
                "design token `{}` should have value of type {}",
                name, expected
            )),
            Self::Cycle(name) => {
                f.write_fmt(format_args!("design token `{}` depends on itself", name))
            }
        }
    }
}

impl std::error::Error for TokenError {}
