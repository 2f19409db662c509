//! Message schema definitions and validation.

use std::collections::HashSet;
use std::sync::Arc;

use crate::error::{SchemaError, SchemaResult};
use crate::hash::message_hash;
use crate::{FieldDef, FieldNumber};

/// An ordered, validated list of field definitions for one message type.
///
/// Schemas are immutable once built and are shared through `Arc`; nested
/// kinds hold an `Arc` to the element schema, so schemas form a tree and
/// cannot refer to themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MessageSchema {
    name: String,
    fields: Vec<FieldDef>,
    #[cfg_attr(feature = "serde", serde(skip))]
    hash: u64,
}

impl MessageSchema {
    /// Creates a schema after validation. Field order is encode order.
    pub fn new(name: impl Into<String>, fields: Vec<FieldDef>) -> SchemaResult<Self> {
        let name = name.into();
        validate(&name, &fields)?;
        let hash = message_hash(&name, &fields);
        Ok(Self { name, fields, hash })
    }

    /// Creates a schema builder.
    #[must_use]
    pub fn builder(name: impl Into<String>) -> MessageSchemaBuilder {
        MessageSchemaBuilder {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Field definitions in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns the position of the field with this number.
    #[must_use]
    pub fn index_of(&self, number: u32) -> Option<usize> {
        self.fields.iter().position(|f| f.number.get() == number)
    }

    /// Returns the position of the field with this name.
    #[must_use]
    pub fn index_of_name(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    #[must_use]
    pub fn field_by_number(&self, number: u32) -> Option<&FieldDef> {
        self.index_of(number).map(|index| &self.fields[index])
    }

    #[must_use]
    pub fn field_by_name(&self, name: &str) -> Option<&FieldDef> {
        self.index_of_name(name).map(|index| &self.fields[index])
    }

    /// Deterministic hash of the name, field layout and nested schemas.
    #[must_use]
    pub const fn hash(&self) -> u64 {
        self.hash
    }

    /// Wraps the schema in an `Arc` for sharing.
    #[must_use]
    pub fn into_shared(self) -> Arc<Self> {
        Arc::new(self)
    }
}

/// Builder for `MessageSchema`.
#[derive(Debug)]
pub struct MessageSchemaBuilder {
    name: String,
    fields: Vec<FieldDef>,
}

impl MessageSchemaBuilder {
    /// Appends a field definition.
    #[must_use]
    pub fn field(mut self, field: FieldDef) -> Self {
        self.fields.push(field);
        self
    }

    /// Builds the schema after validation.
    pub fn build(self) -> SchemaResult<MessageSchema> {
        MessageSchema::new(self.name, self.fields)
    }
}

impl TryFrom<u32> for FieldNumber {
    type Error = SchemaError;

    fn try_from(number: u32) -> SchemaResult<Self> {
        Self::new(number).ok_or(SchemaError::InvalidFieldNumber { number })
    }
}

fn validate(name: &str, fields: &[FieldDef]) -> SchemaResult<()> {
    if name.is_empty() {
        return Err(SchemaError::EmptyMessageName);
    }

    let mut numbers = HashSet::new();
    let mut names = HashSet::new();
    for field in fields {
        if field.name.is_empty() {
            return Err(SchemaError::EmptyFieldName {
                message: name.to_string(),
                number: field.number.get(),
            });
        }
        if !numbers.insert(field.number) {
            return Err(SchemaError::DuplicateFieldNumber {
                message: name.to_string(),
                number: field.number.get(),
            });
        }
        if !names.insert(field.name.as_str()) {
            return Err(SchemaError::DuplicateFieldName {
                message: name.to_string(),
                name: field.name.clone(),
            });
        }
    }
    Ok(())
}
