//! Dynamic packet values.

use std::sync::Arc;

use primitives::Uuid;
use schema::{FieldDef, FieldKind, MessageSchema};

use crate::error::{CodecError, CodecResult, ValueReason};

/// A field value in decoded form.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Bool(bool),
    Int32(i32),
    UInt32(u32),
    Float32(f32),
    String(String),
    Guid(Uuid),
    /// Absent until set.
    Message(Option<Box<Packet>>),
    MessageArray(Vec<Packet>),
}

impl FieldValue {
    /// Returns the default value for a field kind.
    #[must_use]
    pub fn default_for(kind: &FieldKind) -> Self {
        match kind {
            FieldKind::Bool => Self::Bool(false),
            FieldKind::Int32 => Self::Int32(0),
            FieldKind::UInt32 => Self::UInt32(0),
            FieldKind::Float32 => Self::Float32(0.0),
            FieldKind::String => Self::String(String::new()),
            FieldKind::Guid => Self::Guid(Uuid::nil()),
            FieldKind::Message(_) => Self::Message(None),
            FieldKind::MessageArray(_) => Self::MessageArray(Vec::new()),
        }
    }

    /// Returns `true` if the value equals its kind's default and is
    /// therefore omitted from the wire. `-0.0` counts as default.
    #[must_use]
    pub fn is_default(&self) -> bool {
        match self {
            Self::Bool(v) => !v,
            Self::Int32(v) => *v == 0,
            Self::UInt32(v) => *v == 0,
            Self::Float32(v) => *v == 0.0,
            Self::String(v) => v.is_empty(),
            Self::Guid(v) => v.is_nil(),
            Self::Message(v) => v.is_none(),
            Self::MessageArray(v) => v.is_empty(),
        }
    }

    /// Name of the kind this value belongs to, for diagnostics.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Int32(_) => "int32",
            Self::UInt32(_) => "uint32",
            Self::Float32(_) => "float32",
            Self::String(_) => "string",
            Self::Guid(_) => "guid",
            Self::Message(_) => "message",
            Self::MessageArray(_) => "message array",
        }
    }

    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_i32(&self) -> Option<i32> {
        match self {
            Self::Int32(v) => Some(*v),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_u32(&self) -> Option<u32> {
        match self {
            Self::UInt32(v) => Some(*v),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_f32(&self) -> Option<f32> {
        match self {
            Self::Float32(v) => Some(*v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_guid(&self) -> Option<Uuid> {
        match self {
            Self::Guid(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the nested packet, or `None` if absent or not a message.
    #[must_use]
    pub fn as_message(&self) -> Option<&Packet> {
        match self {
            Self::Message(v) => v.as_deref(),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_array(&self) -> Option<&[Packet]> {
        match self {
            Self::MessageArray(v) => Some(v),
            _ => None,
        }
    }

    /// Checks that this value can be stored in a field of `kind`.
    pub(crate) fn check_kind(&self, kind: &FieldKind) -> Result<(), ValueReason> {
        match (kind, self) {
            (FieldKind::Bool, Self::Bool(_))
            | (FieldKind::Int32, Self::Int32(_))
            | (FieldKind::UInt32, Self::UInt32(_))
            | (FieldKind::Float32, Self::Float32(_))
            | (FieldKind::String, Self::String(_))
            | (FieldKind::Guid, Self::Guid(_))
            | (FieldKind::Message(_), Self::Message(None)) => Ok(()),
            (FieldKind::Message(expected), Self::Message(Some(packet))) => {
                check_nested(expected, packet)
            }
            (FieldKind::MessageArray(expected), Self::MessageArray(items)) => items
                .iter()
                .try_for_each(|packet| check_nested(expected, packet)),
            _ => Err(ValueReason::TypeMismatch {
                expected: kind.name(),
                found: self.kind_name(),
            }),
        }
    }
}

fn check_nested(expected: &MessageSchema, packet: &Packet) -> Result<(), ValueReason> {
    let found = packet.schema().hash();
    if found != expected.hash() {
        return Err(ValueReason::NestedSchemaMismatch {
            expected: expected.hash(),
            found,
        });
    }
    Ok(())
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        Self::Int32(value)
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        Self::UInt32(value)
    }
}

impl From<f32> for FieldValue {
    fn from(value: f32) -> Self {
        Self::Float32(value)
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<Uuid> for FieldValue {
    fn from(value: Uuid) -> Self {
        Self::Guid(value)
    }
}

impl From<Packet> for FieldValue {
    fn from(value: Packet) -> Self {
        Self::Message(Some(Box::new(value)))
    }
}

impl From<Option<Packet>> for FieldValue {
    fn from(value: Option<Packet>) -> Self {
        Self::Message(value.map(Box::new))
    }
}

impl From<Vec<Packet>> for FieldValue {
    fn from(value: Vec<Packet>) -> Self {
        Self::MessageArray(value)
    }
}

/// One instance of a message: a value for every schema field, in schema
/// order.
#[derive(Debug, Clone, PartialEq)]
pub struct Packet {
    schema: Arc<MessageSchema>,
    values: Vec<FieldValue>,
}

impl Packet {
    /// Creates a packet with every field at its default.
    #[must_use]
    pub fn new(schema: &Arc<MessageSchema>) -> Self {
        let values = schema
            .fields()
            .iter()
            .map(|field| FieldValue::default_for(&field.kind))
            .collect();
        Self {
            schema: Arc::clone(schema),
            values,
        }
    }

    #[must_use]
    pub fn schema(&self) -> &Arc<MessageSchema> {
        &self.schema
    }

    /// Values in schema order.
    #[must_use]
    pub fn values(&self) -> &[FieldValue] {
        &self.values
    }

    /// Iterates `(definition, value)` pairs in schema order.
    pub fn fields(&self) -> impl Iterator<Item = (&FieldDef, &FieldValue)> {
        self.schema.fields().iter().zip(&self.values)
    }

    #[must_use]
    pub fn get(&self, number: u32) -> Option<&FieldValue> {
        self.schema.index_of(number).map(|index| &self.values[index])
    }

    #[must_use]
    pub fn get_by_name(&self, name: &str) -> Option<&FieldValue> {
        self.schema
            .index_of_name(name)
            .map(|index| &self.values[index])
    }

    /// Sets field `number`, checking the value against the field kind.
    pub fn set(&mut self, number: u32, value: impl Into<FieldValue>) -> CodecResult<()> {
        let index = self
            .schema
            .index_of(number)
            .ok_or_else(|| CodecError::UnknownField {
                message: self.schema.name().to_string(),
                field: number,
            })?;
        self.set_at(index, value.into())
    }

    /// Sets the field called `name`, checking the value against the field kind.
    pub fn set_by_name(&mut self, name: &str, value: impl Into<FieldValue>) -> CodecResult<()> {
        let index = self
            .schema
            .index_of_name(name)
            .ok_or_else(|| CodecError::UnknownFieldName {
                message: self.schema.name().to_string(),
                name: name.to_string(),
            })?;
        self.set_at(index, value.into())
    }

    /// Builder-style [`set_by_name`](Self::set_by_name).
    pub fn with(mut self, name: &str, value: impl Into<FieldValue>) -> CodecResult<Self> {
        self.set_by_name(name, value)?;
        Ok(self)
    }

    /// Returns `true` if every field holds its default, i.e. the packet
    /// encodes to zero bytes.
    #[must_use]
    pub fn is_default(&self) -> bool {
        self.values.iter().all(FieldValue::is_default)
    }

    /// Resets every field to its default.
    pub fn clear(&mut self) {
        for (field, value) in self.schema.fields().iter().zip(&mut self.values) {
            *value = FieldValue::default_for(&field.kind);
        }
    }

    fn set_at(&mut self, index: usize, value: FieldValue) -> CodecResult<()> {
        let field = &self.schema.fields()[index];
        value
            .check_kind(&field.kind)
            .map_err(|reason| CodecError::InvalidValue {
                message: self.schema.name().to_string(),
                field: field.number.get(),
                reason,
            })?;
        self.values[index] = value;
        Ok(())
    }

    /// Stores a decoded value without rechecking it.
    pub(crate) fn store(&mut self, index: usize, value: FieldValue) {
        self.values[index] = value;
    }
}
