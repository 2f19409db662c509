//! Schema validation errors.

use std::fmt;

/// Result type for schema operations.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Errors that can occur when building or validating a message schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// Message name is empty.
    EmptyMessageName,

    /// Field name is empty.
    EmptyFieldName { message: String, number: u32 },

    /// Field number is zero or does not fit in a tag.
    InvalidFieldNumber { number: u32 },

    /// Duplicate field number within a message.
    DuplicateFieldNumber { message: String, number: u32 },

    /// Duplicate field name within a message.
    DuplicateFieldName { message: String, name: String },
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyMessageName => write!(f, "message name is empty"),
            Self::EmptyFieldName { message, number } => {
                write!(f, "{message}: field {number} has an empty name")
            }
            Self::InvalidFieldNumber { number } => {
                write!(f, "invalid field number: {number}")
            }
            Self::DuplicateFieldNumber { message, number } => {
                write!(f, "{message}: duplicate field number {number}")
            }
            Self::DuplicateFieldName { message, name } => {
                write!(f, "{message}: duplicate field name '{name}'")
            }
        }
    }
}

impl std::error::Error for SchemaError {}
