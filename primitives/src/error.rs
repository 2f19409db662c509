//! Error types for primitive operations.

use std::fmt;

/// Result type for primitive operations.
pub type PrimResult<T> = Result<T, PrimError>;

/// Errors that can occur while encoding or decoding a primitive value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrimError {
    /// Attempted to read past the end of the source buffer.
    UnexpectedEof {
        /// Number of bytes requested.
        requested: usize,
        /// Number of bytes available.
        available: usize,
    },

    /// Destination buffer cannot hold the value being written.
    BufferTooSmall {
        /// Number of bytes the write needs.
        needed: usize,
        /// Number of bytes left in the destination.
        available: usize,
    },

    /// Varint does not fit in 32 bits.
    InvalidVarint,

    /// Strict boolean byte was neither 0 nor 1.
    InvalidBool {
        /// The offending byte.
        value: u8,
    },

    /// Declared string bytes are not valid UTF-8.
    InvalidUtf8 {
        /// Length of the valid prefix.
        valid_up_to: usize,
    },

    /// Length cannot be represented by the 32-bit length prefix.
    LengthOverflow {
        /// The unrepresentable length.
        length: usize,
    },
}

impl PrimError {
    /// Returns `true` if the error was caused by a short buffer rather than
    /// by malformed content.
    #[must_use]
    pub const fn is_buffer_too_small(&self) -> bool {
        matches!(
            self,
            Self::UnexpectedEof { .. } | Self::BufferTooSmall { .. }
        )
    }
}

impl fmt::Display for PrimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedEof {
                requested,
                available,
            } => {
                write!(
                    f,
                    "attempted to read {requested} bytes but only {available} bytes available"
                )
            }
            Self::BufferTooSmall { needed, available } => {
                write!(
                    f,
                    "attempted to write {needed} bytes but only {available} bytes remain"
                )
            }
            Self::InvalidVarint => write!(f, "varint exceeds 32 bits"),
            Self::InvalidBool { value } => {
                write!(f, "invalid boolean byte 0x{value:02X}, expected 0 or 1")
            }
            Self::InvalidUtf8 { valid_up_to } => {
                write!(f, "invalid utf-8 after {valid_up_to} bytes")
            }
            Self::LengthOverflow { length } => {
                write!(f, "length {length} does not fit a 32-bit prefix")
            }
        }
    }
}

impl std::error::Error for PrimError {}
