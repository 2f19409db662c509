//! Schema-less inspection of encoded packets.
//!
//! Walks the tags in a buffer without interpreting values, so a packet can
//! be dumped even when its schema is unknown or has drifted. Field names are
//! filled in from a [`FieldRegistry`] when one is supplied.

use std::fmt;
use std::ops::Range;

use primitives::ByteReader;
use schema::FieldRegistry;
use wire::{read_field, Limits, RawValue, WireType};

use crate::error::CodecResult;

/// One field found while walking encoded bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InspectedField<'a> {
    pub field: u32,
    pub wire_type: WireType,
    /// Byte range of the tag and payload within the input.
    pub span: Range<usize>,
    pub value: RawValue<'a>,
    pub name: Option<String>,
}

/// Lists every field in `bytes` in wire order.
pub fn inspect<'a>(bytes: &'a [u8], limits: &Limits) -> CodecResult<Vec<InspectedField<'a>>> {
    let mut reader = ByteReader::new(bytes);
    let mut fields = Vec::new();
    while !reader.is_empty() {
        let start = reader.position();
        let raw = read_field(&mut reader, limits)?;
        fields.push(InspectedField {
            field: raw.tag.field(),
            wire_type: raw.tag.wire_type(),
            span: start..reader.position(),
            value: raw.value,
            name: None,
        });
    }
    Ok(fields)
}

/// Lists every field in `bytes`, naming fields `message` has registered.
pub fn inspect_message<'a>(
    message: &str,
    bytes: &'a [u8],
    registry: &FieldRegistry,
    limits: &Limits,
) -> CodecResult<Vec<InspectedField<'a>>> {
    let mut fields = inspect(bytes, limits)?;
    if let Some(schema) = registry.schema(message) {
        for inspected in &mut fields {
            inspected.name = schema
                .field_by_number(inspected.field)
                .map(|f| f.name.clone());
        }
    } else {
        log::debug!("inspecting unregistered message {message}");
    }
    Ok(fields)
}

impl fmt::Display for InspectedField<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.name.as_deref().unwrap_or("?");
        write!(
            f,
            "#{} {name} @{}..{}: ",
            self.field, self.span.start, self.span.end
        )?;
        match self.value {
            RawValue::Varint(v) => write!(f, "varint {v}"),
            RawValue::Fixed64(bytes) => write!(f, "fixed64 {:#018x}", u64::from_le_bytes(bytes)),
            RawValue::LengthDelimited(bytes) => write!(f, "{} bytes", bytes.len()),
            RawValue::Fixed32(bytes) => write!(f, "fixed32 {:#010x}", u32::from_le_bytes(bytes)),
        }
    }
}

#[cfg(test)]
mod tests {
    use schema::{FieldDef, FieldKind, FieldNumber, MessageSchema};

    use super::*;

    #[test]
    fn inspect_lists_fields_with_spans() {
        let bytes = b"\x0A\x05Alice\x10\xC8\x01\x18\x01";
        let fields = inspect(bytes, &Limits::default()).unwrap();
        assert_eq!(fields.len(), 3);
        assert_eq!(fields[0].field, 1);
        assert_eq!(fields[0].span, 0..7);
        assert_eq!(fields[0].value, RawValue::LengthDelimited(b"Alice"));
        assert_eq!(fields[1].span, 7..10);
        assert_eq!(fields[1].value, RawValue::Varint(200));
        assert_eq!(fields[2].wire_type, WireType::Varint);
        assert!(fields.iter().all(|f| f.name.is_none()));
    }

    #[test]
    fn inspect_resolves_registered_names() {
        let schema = MessageSchema::builder("Player")
            .field(FieldDef::new(
                FieldNumber::new(1).unwrap(),
                "name",
                FieldKind::String,
            ))
            .build()
            .unwrap()
            .into_shared();
        let registry = FieldRegistry::new();
        registry.register(&schema);

        // field 1 known, field 7 unknown to the schema
        let bytes = b"\x0A\x02Al\x38\x01";
        let fields = inspect_message("Player", bytes, &registry, &Limits::default()).unwrap();
        assert_eq!(fields[0].name.as_deref(), Some("name"));
        assert_eq!(fields[1].field, 7);
        assert_eq!(fields[1].name, None);
        assert_eq!(fields[0].to_string(), "#1 name @0..4: 2 bytes");
        assert_eq!(fields[1].to_string(), "#7 ? @4..6: varint 1");
    }

    #[test]
    fn inspect_unregistered_message_has_no_names() {
        let registry = FieldRegistry::new();
        let fields = inspect_message("Nope", b"\x08\x01", &registry, &Limits::default()).unwrap();
        assert_eq!(fields.len(), 1);
        assert!(fields[0].name.is_none());
    }

    #[test]
    fn inspect_fails_on_truncation() {
        let err = inspect(b"\x0A\x05Al", &Limits::default()).unwrap_err();
        assert!(err.is_malformed());
    }
}
