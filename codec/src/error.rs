//! Error types for codec operations.

use std::fmt;

use primitives::PrimError;
use wire::WireType;

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors that can occur during packet encoding/decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Primitive read/write error.
    Primitive(PrimError),

    /// Wire framing error while decoding.
    Wire(wire::DecodeError),

    /// Wire framing error while encoding.
    Encode(wire::EncodeError),

    /// Output buffer is too small. Nothing was written.
    OutputTooSmall { needed: usize, available: usize },

    /// A known field arrived with a wire type other than its kind's.
    WireTypeMismatch {
        message: String,
        field: u32,
        expected: WireType,
        found: WireType,
    },

    /// Field value does not fit the field definition.
    InvalidValue {
        message: String,
        field: u32,
        reason: ValueReason,
    },

    /// Field number is not part of the message schema.
    UnknownField { message: String, field: u32 },

    /// Field name is not part of the message schema.
    UnknownFieldName { message: String, name: String },

    /// Packet was built for a different schema than the one expected.
    SchemaMismatch { expected: String, found: String },

    /// Limits exceeded.
    LimitsExceeded {
        kind: LimitKind,
        limit: usize,
        actual: usize,
    },
}

/// Specific limit that was exceeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitKind {
    MessageBytes,
    NestingDepth,
    ArrayElements,
}

/// Details for invalid value errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueReason {
    /// Bool varint other than 0 or 1.
    InvalidBool { value: u32 },
    /// GUID block of the wrong size.
    InvalidGuidLength { len: usize },
    /// Value variant does not match the field kind.
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
    /// Nested packet was built from a different schema.
    NestedSchemaMismatch { expected: u64, found: u64 },
}

impl CodecError {
    /// Returns `true` if the destination or source buffer was too short.
    #[must_use]
    pub const fn is_buffer_too_small(&self) -> bool {
        match self {
            Self::OutputTooSmall { .. } => true,
            Self::Primitive(err) => matches!(err, PrimError::BufferTooSmall { .. }),
            Self::Encode(err) => matches!(err, wire::EncodeError::BufferTooSmall { .. }),
            _ => false,
        }
    }

    /// Returns `true` if the input bytes could not be decoded.
    ///
    /// Covers truncation, bad varints and tags, wire type mismatches, bad
    /// values and limit violations.
    #[must_use]
    pub const fn is_malformed(&self) -> bool {
        match self {
            Self::Wire(_) | Self::WireTypeMismatch { .. } | Self::LimitsExceeded { .. } => true,
            Self::Primitive(err) => !matches!(
                err,
                PrimError::BufferTooSmall { .. } | PrimError::LengthOverflow { .. }
            ),
            Self::InvalidValue { reason, .. } => matches!(
                reason,
                ValueReason::InvalidBool { .. } | ValueReason::InvalidGuidLength { .. }
            ),
            _ => false,
        }
    }
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(e) => write!(f, "primitive error: {e}"),
            Self::Wire(e) => write!(f, "wire error: {e}"),
            Self::Encode(e) => write!(f, "encode error: {e}"),
            Self::OutputTooSmall { needed, available } => {
                write!(f, "output too small: need {needed}, have {available}")
            }
            Self::WireTypeMismatch {
                message,
                field,
                expected,
                found,
            } => {
                write!(
                    f,
                    "{message}.{field}: expected wire type {expected:?}, found {found:?}"
                )
            }
            Self::InvalidValue {
                message,
                field,
                reason,
            } => {
                write!(f, "invalid value for {message}.{field}: {reason}")
            }
            Self::UnknownField { message, field } => {
                write!(f, "{message} has no field {field}")
            }
            Self::UnknownFieldName { message, name } => {
                write!(f, "{message} has no field named '{name}'")
            }
            Self::SchemaMismatch { expected, found } => {
                write!(f, "schema mismatch: expected {expected}, found {found}")
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
            Self::MessageBytes => "message bytes",
            Self::NestingDepth => "nesting depth",
            Self::ArrayElements => "array elements",
        };
        write!(f, "{name}")
    }
}

impl fmt::Display for ValueReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidBool { value } => write!(f, "bool must be 0 or 1, got {value}"),
            Self::InvalidGuidLength { len } => {
                write!(f, "guid must be 16 bytes, got {len}")
            }
            Self::TypeMismatch { expected, found } => {
                write!(f, "expected {expected} but got {found}")
            }
            Self::NestedSchemaMismatch { expected, found } => {
                write!(
                    f,
                    "nested schema hash 0x{found:016X} does not match 0x{expected:016X}"
                )
            }
        }
    }
}

impl std::error::Error for CodecError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Primitive(e) => Some(e),
            Self::Wire(e) => Some(e),
            Self::Encode(e) => Some(e),
            _ => None,
        }
    }
}

impl From<PrimError> for CodecError {
    fn from(err: PrimError) -> Self {
        Self::Primitive(err)
    }
}

impl From<wire::DecodeError> for CodecError {
    fn from(err: wire::DecodeError) -> Self {
        Self::Wire(err)
    }
}

impl From<wire::EncodeError> for CodecError {
    fn from(err: wire::EncodeError) -> Self {
        match err {
            wire::EncodeError::BufferTooSmall { needed, available } => {
                Self::OutputTooSmall { needed, available }
            }
            other => Self::Encode(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_wire_type_mismatch() {
        let err = CodecError::WireTypeMismatch {
            message: "Player".to_string(),
            field: 2,
            expected: WireType::Varint,
            found: WireType::Fixed32,
        };
        let msg = err.to_string();
        assert!(msg.contains("Player.2"), "should name message and field");
        assert!(msg.contains("Fixed32"), "should name found wire type");
    }

    #[test]
    fn error_display_invalid_value() {
        let err = CodecError::InvalidValue {
            message: "Player".to_string(),
            field: 3,
            reason: ValueReason::InvalidBool { value: 7 },
        };
        let msg = err.to_string();
        assert!(msg.contains("Player.3"));
        assert!(msg.contains('7'));
    }

    #[test]
    fn error_display_limits() {
        let err = CodecError::LimitsExceeded {
            kind: LimitKind::NestingDepth,
            limit: 4,
            actual: 5,
        };
        assert!(err.to_string().contains("nesting depth"));
    }

    #[test]
    fn error_from_wire_error() {
        let wire_err = wire::DecodeError::UnknownWireType { raw: 6 };
        let codec_err: CodecError = wire_err.into();
        assert!(matches!(codec_err, CodecError::Wire(_)));
        assert!(codec_err.is_malformed());
    }

    #[test]
    fn encode_buffer_error_becomes_output_too_small() {
        let err: CodecError = wire::EncodeError::BufferTooSmall {
            needed: 9,
            available: 3,
        }
        .into();
        assert_eq!(
            err,
            CodecError::OutputTooSmall {
                needed: 9,
                available: 3
            }
        );
        assert!(err.is_buffer_too_small());
        assert!(!err.is_malformed());
    }

    #[test]
    fn classification() {
        let eof = CodecError::Primitive(PrimError::UnexpectedEof {
            requested: 2,
            available: 1,
        });
        assert!(eof.is_malformed());
        assert!(!eof.is_buffer_too_small());

        let overflow = CodecError::Primitive(PrimError::InvalidVarint);
        assert!(overflow.is_malformed());

        let mismatch = CodecError::InvalidValue {
            message: "M".to_string(),
            field: 1,
            reason: ValueReason::TypeMismatch {
                expected: "bool",
                found: "int32",
            },
        };
        assert!(!mismatch.is_malformed());
        assert!(!mismatch.is_buffer_too_small());
    }

    #[test]
    fn error_source_none_for_others() {
        let err = CodecError::UnknownField {
            message: "M".to_string(),
            field: 4,
        };
        assert!(std::error::Error::source(&err).is_none());
        let err = CodecError::Wire(wire::DecodeError::InvalidFieldNumber { field: 0 });
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn error_is_std_error() {
        fn assert_error<E: std::error::Error>() {}
        assert_error::<CodecError>();
    }
}
