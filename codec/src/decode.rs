//! Packet decoding.

use std::sync::Arc;

use primitives::{guid_from_bytes, unzigzag32, ByteReader, GuidLayout, PrimError, GUID_LEN};
use schema::{FieldDef, FieldKind, MessageSchema};
use wire::{read_tag, read_value, skip_field, BlockIter, RawValue};

use crate::error::{CodecError, CodecResult, LimitKind, ValueReason};
use crate::limits::CodecLimits;
use crate::packet::{FieldValue, Packet};

/// Decodes a packet with default limits.
///
/// The whole slice is consumed. Unknown fields are skipped; a repeated
/// field keeps the last value seen.
pub fn decode_packet(schema: &Arc<MessageSchema>, bytes: &[u8]) -> CodecResult<Packet> {
    decode_packet_with_limits(schema, bytes, &CodecLimits::default())
}

/// Decodes a packet, enforcing the given limits.
pub fn decode_packet_with_limits(
    schema: &Arc<MessageSchema>,
    bytes: &[u8],
    limits: &CodecLimits,
) -> CodecResult<Packet> {
    if bytes.len() > limits.max_message_bytes {
        return Err(CodecError::LimitsExceeded {
            kind: LimitKind::MessageBytes,
            limit: limits.max_message_bytes,
            actual: bytes.len(),
        });
    }

    match decode_message(schema, bytes, limits, 0) {
        Ok(packet) => {
            log::trace!("decoded {} from {} bytes", schema.name(), bytes.len());
            Ok(packet)
        }
        Err(err) => {
            log::debug!("failed to decode {}: {err}", schema.name());
            Err(err)
        }
    }
}

fn decode_message(
    schema: &Arc<MessageSchema>,
    bytes: &[u8],
    limits: &CodecLimits,
    depth: usize,
) -> CodecResult<Packet> {
    if depth > limits.max_depth {
        return Err(CodecError::LimitsExceeded {
            kind: LimitKind::NestingDepth,
            limit: limits.max_depth,
            actual: depth,
        });
    }

    let mut packet = Packet::new(schema);
    let mut reader = ByteReader::new(bytes);
    while !reader.is_empty() {
        let tag = read_tag(&mut reader)?;
        let Some(index) = schema.index_of(tag.field()) else {
            skip_field(&mut reader, tag.wire_type(), &limits.wire)?;
            continue;
        };

        let field = &schema.fields()[index];
        if field.wire_type() != tag.wire_type() {
            return Err(CodecError::WireTypeMismatch {
                message: schema.name().to_string(),
                field: tag.field(),
                expected: field.wire_type(),
                found: tag.wire_type(),
            });
        }

        let raw = read_value(&mut reader, tag.wire_type(), &limits.wire)?;
        let value = decode_value(schema, field, raw, limits, depth)?;
        packet.store(index, value);
    }
    Ok(packet)
}

fn decode_value(
    schema: &MessageSchema,
    field: &FieldDef,
    raw: RawValue<'_>,
    limits: &CodecLimits,
    depth: usize,
) -> CodecResult<FieldValue> {
    let invalid = |reason| CodecError::InvalidValue {
        message: schema.name().to_string(),
        field: field.number.get(),
        reason,
    };

    let value = match (&field.kind, raw) {
        (FieldKind::Bool, RawValue::Varint(v)) => match v {
            0 => FieldValue::Bool(false),
            1 => FieldValue::Bool(true),
            _ => return Err(invalid(ValueReason::InvalidBool { value: v })),
        },
        (FieldKind::Int32, RawValue::Varint(v)) => FieldValue::Int32(unzigzag32(v)),
        (FieldKind::UInt32, RawValue::Varint(v)) => FieldValue::UInt32(v),
        (FieldKind::Float32, RawValue::Fixed32(bytes)) => {
            FieldValue::Float32(f32::from_le_bytes(bytes))
        }
        (FieldKind::String, RawValue::LengthDelimited(bytes)) => {
            let text = std::str::from_utf8(bytes).map_err(|e| PrimError::InvalidUtf8 {
                valid_up_to: e.valid_up_to(),
            })?;
            FieldValue::String(text.to_string())
        }
        (FieldKind::Guid, RawValue::LengthDelimited(bytes)) => {
            let bytes: [u8; GUID_LEN] = bytes
                .try_into()
                .map_err(|_| invalid(ValueReason::InvalidGuidLength { len: bytes.len() }))?;
            FieldValue::Guid(guid_from_bytes(bytes, GuidLayout::Mixed))
        }
        (FieldKind::Message(nested), RawValue::LengthDelimited(bytes)) => {
            let packet = decode_message(nested, bytes, limits, depth + 1)?;
            FieldValue::Message(Some(Box::new(packet)))
        }
        (FieldKind::MessageArray(nested), RawValue::LengthDelimited(bytes)) => {
            FieldValue::MessageArray(decode_array(nested, bytes, limits, depth)?)
        }
        (kind, raw) => {
            return Err(CodecError::WireTypeMismatch {
                message: schema.name().to_string(),
                field: field.number.get(),
                expected: kind.wire_type(),
                found: raw.wire_type(),
            });
        }
    };
    Ok(value)
}

fn decode_array(
    schema: &Arc<MessageSchema>,
    bytes: &[u8],
    limits: &CodecLimits,
    depth: usize,
) -> CodecResult<Vec<Packet>> {
    let mut items = Vec::new();
    for block in BlockIter::new(bytes, &limits.wire) {
        let block = block?;
        if items.len() >= limits.max_array_elements {
            return Err(CodecError::LimitsExceeded {
                kind: LimitKind::ArrayElements,
                limit: limits.max_array_elements,
                actual: items.len() + 1,
            });
        }
        items.push(decode_message(schema, block, limits, depth + 1)?);
    }
    Ok(items)
}

#[cfg(test)]
mod tests {
    use primitives::Uuid;
    use schema::FieldNumber;
    use wire::WireType;

    use super::*;

    fn fnum(value: u32) -> FieldNumber {
        FieldNumber::new(value).unwrap()
    }

    fn player() -> Arc<MessageSchema> {
        MessageSchema::builder("Player")
            .field(FieldDef::new(fnum(1), "name", FieldKind::String))
            .field(FieldDef::new(fnum(2), "health", FieldKind::Int32))
            .field(FieldDef::new(fnum(3), "is_alive", FieldKind::Bool))
            .build()
            .unwrap()
            .into_shared()
    }

    fn team(player: &Arc<MessageSchema>) -> Arc<MessageSchema> {
        MessageSchema::builder("Team")
            .field(FieldDef::new(fnum(1), "captain", FieldKind::message(player)))
            .field(FieldDef::new(fnum(2), "members", FieldKind::message_array(player)))
            .build()
            .unwrap()
            .into_shared()
    }

    #[test]
    fn empty_input_yields_defaults() {
        let packet = decode_packet(&player(), &[]).unwrap();
        assert!(packet.is_default());
    }

    #[test]
    fn decode_player_golden() {
        let bytes = b"\x0A\x05Alice\x10\xC8\x01\x18\x01";
        let packet = decode_packet(&player(), bytes).unwrap();
        assert_eq!(packet.get(1).and_then(FieldValue::as_str), Some("Alice"));
        assert_eq!(packet.get(2).and_then(FieldValue::as_i32), Some(100));
        assert_eq!(packet.get(3).and_then(FieldValue::as_bool), Some(true));
    }

    #[test]
    fn fields_may_arrive_in_any_order() {
        let bytes = b"\x18\x01\x0A\x03Bob";
        let packet = decode_packet(&player(), bytes).unwrap();
        assert_eq!(packet.get(1).and_then(FieldValue::as_str), Some("Bob"));
        assert_eq!(packet.get(3).and_then(FieldValue::as_bool), Some(true));
    }

    #[test]
    fn last_write_wins() {
        let bytes = b"\x10\x02\x10\x04";
        let packet = decode_packet(&player(), bytes).unwrap();
        assert_eq!(packet.get(2).and_then(FieldValue::as_i32), Some(2));
    }

    #[test]
    fn unknown_fields_are_skipped() {
        let mut bytes = vec![0x48, 0x07]; // field 9 varint
        bytes.extend_from_slice(&[0x51, 1, 2, 3, 4, 5, 6, 7, 8]); // field 10 fixed64
        bytes.extend_from_slice(b"\x5A\x02hi"); // field 11 block
        bytes.extend_from_slice(&[0x65, 1, 2, 3, 4]); // field 12 fixed32
        bytes.extend_from_slice(&[0x10, 0x06]); // health 3
        let packet = decode_packet(&player(), &bytes).unwrap();
        assert_eq!(packet.get(2).and_then(FieldValue::as_i32), Some(3));
    }

    #[test]
    fn truncated_unknown_field_fails() {
        let bytes = [0x65, 1, 2];
        let err = decode_packet(&player(), &bytes).unwrap_err();
        assert!(err.is_malformed());
    }

    #[test]
    fn wire_type_mismatch_is_error() {
        let bytes = [0x15, 0, 0, 0, 0]; // health as fixed32
        let err = decode_packet(&player(), &bytes).unwrap_err();
        assert_eq!(
            err,
            CodecError::WireTypeMismatch {
                message: "Player".to_string(),
                field: 2,
                expected: WireType::Varint,
                found: WireType::Fixed32,
            }
        );
    }

    #[test]
    fn bool_must_be_zero_or_one() {
        let err = decode_packet(&player(), &[0x18, 0x02]).unwrap_err();
        assert!(matches!(
            err,
            CodecError::InvalidValue {
                field: 3,
                reason: ValueReason::InvalidBool { value: 2 },
                ..
            }
        ));
        assert!(err.is_malformed());
    }

    #[test]
    fn varint_overflow_is_malformed() {
        let bytes = [0x10, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF];
        let err = decode_packet(&player(), &bytes).unwrap_err();
        assert!(err.is_malformed());
        assert!(!err.is_buffer_too_small());
    }

    #[test]
    fn invalid_utf8_is_rejected() {
        let bytes = [0x0A, 0x02, 0xC3, 0x28];
        let err = decode_packet(&player(), &bytes).unwrap_err();
        assert_eq!(
            err,
            CodecError::Primitive(PrimError::InvalidUtf8 { valid_up_to: 0 })
        );
    }

    #[test]
    fn guid_block_must_be_sixteen_bytes() {
        let schema = MessageSchema::builder("Entity")
            .field(FieldDef::new(fnum(1), "id", FieldKind::Guid))
            .build()
            .unwrap()
            .into_shared();
        let err = decode_packet(&schema, &[0x0A, 0x02, 0x01, 0x02]).unwrap_err();
        assert!(matches!(
            err,
            CodecError::InvalidValue {
                reason: ValueReason::InvalidGuidLength { len: 2 },
                ..
            }
        ));

        let mut bytes = vec![0x0A, 0x10];
        bytes.extend_from_slice(&[0x33, 0x22, 0x11, 0x00, 0x55, 0x44, 0x77, 0x66]);
        bytes.extend_from_slice(&[0x88, 0x99, 0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF]);
        let packet = decode_packet(&schema, &bytes).unwrap();
        assert_eq!(
            packet.get(1).and_then(FieldValue::as_guid),
            Some(Uuid::from_u128(0x0011_2233_4455_6677_8899_AABB_CCDD_EEFF))
        );
    }

    #[test]
    fn nested_and_array_decode() {
        let player = player();
        let team = team(&player);
        let bytes = [0x0A, 0x02, 0x10, 0x02, 0x12, 0x04, 0x02, 0x18, 0x01, 0x00];
        let packet = decode_packet(&team, &bytes).unwrap();

        let captain = packet.get(1).and_then(FieldValue::as_message).unwrap();
        assert_eq!(captain.get(2).and_then(FieldValue::as_i32), Some(1));

        let members = packet.get(2).and_then(FieldValue::as_array).unwrap();
        assert_eq!(members.len(), 2);
        assert_eq!(members[0].get(3).and_then(FieldValue::as_bool), Some(true));
        assert!(members[1].is_default());
    }

    #[test]
    fn repeated_array_field_replaces_earlier_one() {
        let player = player();
        let team = team(&player);
        let bytes = [0x12, 0x02, 0x00, 0x00, 0x12, 0x01, 0x00];
        let packet = decode_packet(&team, &bytes).unwrap();
        let members = packet.get(2).and_then(FieldValue::as_array).unwrap();
        assert_eq!(members.len(), 1);
    }

    #[test]
    fn truncated_nested_block_fails() {
        let player = player();
        let team = team(&player);
        let bytes = [0x0A, 0x05, 0x10, 0x02];
        let err = decode_packet(&team, &bytes).unwrap_err();
        assert!(matches!(
            err,
            CodecError::Wire(wire::DecodeError::BlockTruncated { .. })
        ));
    }

    #[test]
    fn array_element_limit() {
        let player = player();
        let team = team(&player);
        let mut bytes = vec![0x12, 0x05];
        bytes.extend_from_slice(&[0x00; 5]);
        let limits = CodecLimits {
            max_array_elements: 4,
            ..CodecLimits::default()
        };
        let err = decode_packet_with_limits(&team, &bytes, &limits).unwrap_err();
        assert!(matches!(
            err,
            CodecError::LimitsExceeded {
                kind: LimitKind::ArrayElements,
                limit: 4,
                actual: 5
            }
        ));
    }

    #[test]
    fn depth_limit() {
        let leaf = player();
        let mid = team(&leaf);
        let top = MessageSchema::builder("League")
            .field(FieldDef::new(fnum(1), "team", FieldKind::message(&mid)))
            .build()
            .unwrap()
            .into_shared();
        // league { team { captain { health: 1 } } }
        let bytes = [0x0A, 0x04, 0x0A, 0x02, 0x10, 0x02];

        let packet = decode_packet(&top, &bytes).unwrap();
        assert!(!packet.is_default());

        let limits = CodecLimits {
            max_depth: 1,
            ..CodecLimits::default()
        };
        let err = decode_packet_with_limits(&top, &bytes, &limits).unwrap_err();
        assert!(matches!(
            err,
            CodecError::LimitsExceeded {
                kind: LimitKind::NestingDepth,
                ..
            }
        ));
    }

    #[test]
    fn message_size_limit() {
        let limits = CodecLimits {
            max_message_bytes: 2,
            ..CodecLimits::default()
        };
        let err = decode_packet_with_limits(&player(), b"\x0A\x01x", &limits).unwrap_err();
        assert!(matches!(
            err,
            CodecError::LimitsExceeded {
                kind: LimitKind::MessageBytes,
                ..
            }
        ));
    }

    #[test]
    fn field_number_zero_is_malformed() {
        let err = decode_packet(&player(), &[0x00, 0x01]).unwrap_err();
        assert!(matches!(
            err,
            CodecError::Wire(wire::DecodeError::InvalidFieldNumber { field: 0 })
        ));
    }
}
