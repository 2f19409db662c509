//! Error types for wire format operations.

use std::fmt;

use primitives::PrimError;

/// Result type for wire format decoding.
pub type WireResult<T> = Result<T, DecodeError>;

/// Decode errors for tags and framing.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DecodeError {
    /// A primitive read failed (truncated input, bad varint).
    Primitive(PrimError),

    /// Tag carried a wire type outside the supported set.
    UnknownWireType { raw: u8 },

    /// Tag carried field number zero.
    InvalidFieldNumber { field: u32 },

    /// Block declared more bytes than remain in the buffer.
    BlockTruncated { declared: usize, available: usize },

    /// Limits exceeded.
    LimitsExceeded {
        kind: LimitKind,
        limit: usize,
        actual: usize,
    },
}

/// Specific wire limits that can be exceeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitKind {
    BlockLength,
}

/// Errors that can occur during encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    BufferTooSmall { needed: usize, available: usize },
    LengthOverflow { length: usize },
    InvalidFieldNumber { field: u32 },
    Primitive(PrimError),
}

impl DecodeError {
    /// Returns `true` if the input simply ended too early.
    #[must_use]
    pub const fn is_truncated(&self) -> bool {
        match self {
            Self::Primitive(err) => err.is_buffer_too_small(),
            Self::BlockTruncated { .. } => true,
            _ => false,
        }
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(err) => write!(f, "primitive decode error: {err}"),
            Self::UnknownWireType { raw } => write!(f, "unknown wire type: {raw}"),
            Self::InvalidFieldNumber { field } => write!(f, "invalid field number: {field}"),
            Self::BlockTruncated {
                declared,
                available,
            } => {
                write!(
                    f,
                    "truncated block: declared {declared} bytes, have {available}"
                )
            }
            Self::LimitsExceeded {
                kind,
                limit,
                actual,
            } => {
                write!(f, "{kind} limit exceeded: {actual} > {limit}")
            }
        }
    }
}

impl fmt::Display for LimitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::BlockLength => "block length",
        };
        write!(f, "{name}")
    }
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BufferTooSmall { needed, available } => {
                write!(f, "buffer too small: need {needed}, have {available}")
            }
            Self::LengthOverflow { length } => {
                write!(f, "length overflow: {length}")
            }
            Self::InvalidFieldNumber { field } => {
                write!(f, "field number {field} cannot be tagged")
            }
            Self::Primitive(err) => write!(f, "primitive encode error: {err}"),
        }
    }
}

impl std::error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Primitive(e) => Some(e),
            _ => None,
        }
    }
}

impl std::error::Error for EncodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Primitive(e) => Some(e),
            _ => None,
        }
    }
}

impl From<PrimError> for DecodeError {
    fn from(err: PrimError) -> Self {
        Self::Primitive(err)
    }
}

impl From<PrimError> for EncodeError {
    fn from(err: PrimError) -> Self {
        match err {
            PrimError::BufferTooSmall { needed, available } => {
                Self::BufferTooSmall { needed, available }
            }
            PrimError::LengthOverflow { length } => Self::LengthOverflow { length },
            other => Self::Primitive(other),
        }
    }
}
