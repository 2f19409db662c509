//! Field numbers, field kinds and field definitions.

use std::fmt;
use std::num::NonZeroU32;
use std::sync::Arc;

use wire::{WireType, MAX_FIELD_NUMBER};

use crate::MessageSchema;

/// A field number within a message.
///
/// Always in `1..=MAX_FIELD_NUMBER`, so `number << 3 | wire_type` fits a
/// 32-bit varint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct FieldNumber(NonZeroU32);

impl FieldNumber {
    /// Creates a field number, or `None` if it is zero or too large to tag.
    #[must_use]
    pub const fn new(value: u32) -> Option<Self> {
        if value > MAX_FIELD_NUMBER {
            return None;
        }
        match NonZeroU32::new(value) {
            Some(value) => Some(Self(value)),
            None => None,
        }
    }

    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }
}

impl fmt::Display for FieldNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The semantic type of a field, which fixes its wire type and default.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum FieldKind {
    /// Varint 0 or 1. Default `false`.
    Bool,
    /// Zigzag varint. Default `0`.
    Int32,
    /// Plain varint. Default `0`.
    UInt32,
    /// Four little-endian IEEE-754 bytes. Default `0.0`.
    Float32,
    /// Length-prefixed UTF-8. Default empty.
    String,
    /// Sixteen mixed-endian bytes in a block. Default nil.
    Guid,
    /// A nested sub-message in a block. Default absent.
    Message(Arc<MessageSchema>),
    /// A block of back-to-back sub-message blocks. Default empty.
    MessageArray(Arc<MessageSchema>),
}

impl FieldKind {
    /// Creates a nested message kind.
    #[must_use]
    pub fn message(schema: &Arc<MessageSchema>) -> Self {
        Self::Message(Arc::clone(schema))
    }

    /// Creates a repeated message kind.
    #[must_use]
    pub fn message_array(schema: &Arc<MessageSchema>) -> Self {
        Self::MessageArray(Arc::clone(schema))
    }

    /// Returns the wire type values of this kind travel as.
    #[must_use]
    pub const fn wire_type(&self) -> WireType {
        match self {
            Self::Bool | Self::Int32 | Self::UInt32 => WireType::Varint,
            Self::Float32 => WireType::Fixed32,
            Self::String | Self::Guid | Self::Message(_) | Self::MessageArray(_) => {
                WireType::LengthDelimited
            }
        }
    }

    /// Returns the schema of the nested message, if any.
    #[must_use]
    pub const fn nested_schema(&self) -> Option<&Arc<MessageSchema>> {
        match self {
            Self::Message(schema) | Self::MessageArray(schema) => Some(schema),
            _ => None,
        }
    }

    /// Short lowercase name used in diagnostics.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int32 => "int32",
            Self::UInt32 => "uint32",
            Self::Float32 => "float32",
            Self::String => "string",
            Self::Guid => "guid",
            Self::Message(_) => "message",
            Self::MessageArray(_) => "message array",
        }
    }
}

/// Field definition within a message.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FieldDef {
    pub number: FieldNumber,
    pub name: String,
    pub kind: FieldKind,
}

impl FieldDef {
    /// Creates a field definition.
    #[must_use]
    pub fn new(number: FieldNumber, name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            number,
            name: name.into(),
            kind,
        }
    }

    /// Returns the wire type implied by the field kind.
    #[must_use]
    pub const fn wire_type(&self) -> WireType {
        self.kind.wire_type()
    }
}
