//! Error types shared by the hex codec and the entity parsers.

use thiserror::Error;

/// Broad classification of codec failures.
///
/// Transport layers map kinds onto their own status codes; this crate
/// deliberately knows nothing about any transport. `kind()` is the entire
/// interface that mapping consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad characters or odd digit count in a hex string.
    MalformedHex,
    /// A numeric field that parses as neither hex nor decimal.
    InvalidNumeral,
    /// A numeric field whose value exceeds the target width.
    Overflow,
    /// A required field is absent from the wire object.
    MissingRequiredField,
    /// A field has the wrong JSON shape (e.g. an access-list entry that is
    /// not an object).
    UnsupportedShape,
}

/// Error raised by the leaf hex/numeric codec.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HexError {
    #[error("malformed hex string: {0:?}")]
    MalformedHex(String),

    #[error("neither hex nor decimal numeral: {0:?}")]
    InvalidNumeral(String),

    #[error("value {value:?} overflows u{width}")]
    Overflow { value: String, width: u32 },
}

impl HexError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MalformedHex(_) => ErrorKind::MalformedHex,
            Self::InvalidNumeral(_) => ErrorKind::InvalidNumeral,
            Self::Overflow { .. } => ErrorKind::Overflow,
        }
    }
}

/// Error returned by entity parsers.
///
/// Every parser either produces a fully populated entity or one error naming
/// the first field that failed; there are no partial results.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("failed to parse {field}: {source}")]
    Field { field: &'static str, source: HexError },

    #[error("missing required field: {0}")]
    MissingRequiredField(&'static str),

    #[error("unsupported shape for {field}: expected {expected}")]
    UnsupportedShape { field: &'static str, expected: &'static str },
}

impl CodecError {
    /// Wraps a hex codec failure with the name of the offending field.
    #[must_use]
    pub fn field(field: &'static str, source: HexError) -> Self {
        Self::Field { field, source }
    }

    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Field { source, .. } => source.kind(),
            Self::MissingRequiredField(_) => ErrorKind::MissingRequiredField,
            Self::UnsupportedShape { .. } => ErrorKind::UnsupportedShape,
        }
    }

    /// Name of the field that caused the failure.
    #[must_use]
    pub fn field_name(&self) -> &'static str {
        match self {
            Self::Field { field, .. }
            | Self::MissingRequiredField(field)
            | Self::UnsupportedShape { field, .. } => field,
        }
    }
}
