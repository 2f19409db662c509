//! Packet encoding.
//!
//! Encoding runs in two passes. The sizing pass validates every value and
//! records each nested payload length in [`EncodeScratch`]; the write pass
//! then emits bytes front to back. The destination is only touched once the
//! sizing pass has proven the whole packet fits.

use primitives::string::string_len;
use primitives::{varu32_len, zigzag32, ByteWriter, GuidLayout, GUID_LEN};
use schema::FieldDef;
use wire::{block_len, tag_len, write_block_prefix, write_tag, EncodeError, Tag};

use crate::error::{CodecError, CodecResult, ValueReason};
use crate::packet::{FieldValue, Packet};
use crate::scratch::EncodeScratch;

/// Encodes a packet into `out` and returns the number of bytes written.
///
/// Default-valued fields are omitted, so an all-default packet writes
/// nothing. On error `out` is left untouched.
pub fn encode_packet(packet: &Packet, out: &mut [u8]) -> CodecResult<usize> {
    let mut scratch = EncodeScratch::new();
    encode_packet_with_scratch(packet, &mut scratch, out)
}

/// Encodes a packet using caller-provided scratch state.
pub fn encode_packet_with_scratch(
    packet: &Packet,
    scratch: &mut EncodeScratch,
    out: &mut [u8],
) -> CodecResult<usize> {
    scratch.clear();
    let needed = size_message(packet, scratch)?;
    if needed > out.len() {
        return Err(CodecError::OutputTooSmall {
            needed,
            available: out.len(),
        });
    }

    let mut writer = ByteWriter::new(&mut out[..needed]);
    let mut cursor = 0;
    write_message(packet, scratch, &mut cursor, &mut writer)?;
    let written = writer.finish();
    debug_assert_eq!(written, needed);

    log::trace!("encoded {} in {written} bytes", packet.schema().name());
    Ok(written)
}

/// Returns the exact number of bytes `packet` encodes to.
pub fn encoded_len(packet: &Packet) -> CodecResult<usize> {
    let mut scratch = EncodeScratch::new();
    size_message(packet, &mut scratch)
}

/// Encodes a packet into a freshly allocated, exactly sized vector.
pub fn encode_packet_to_vec(packet: &Packet) -> CodecResult<Vec<u8>> {
    let mut scratch = EncodeScratch::new();
    let len = size_message(packet, &mut scratch)?;
    let mut out = vec![0u8; len];
    let mut writer = ByteWriter::new(&mut out);
    let mut cursor = 0;
    write_message(packet, &scratch, &mut cursor, &mut writer)?;
    debug_assert_eq!(writer.finish(), len);
    Ok(out)
}

fn size_message(packet: &Packet, scratch: &mut EncodeScratch) -> CodecResult<usize> {
    let mut total = 0usize;
    for (field, value) in packet.fields() {
        if value.is_default() {
            continue;
        }
        value
            .check_kind(&field.kind)
            .map_err(|reason| invalid_value(packet, field, reason))?;
        let payload = size_value(value, scratch)?;
        total = add_len(total, tag_len(field.number.get()))?;
        total = add_len(total, payload)?;
    }
    Ok(total)
}

fn size_value(value: &FieldValue, scratch: &mut EncodeScratch) -> CodecResult<usize> {
    let len = match value {
        FieldValue::Bool(_) => 1,
        FieldValue::Int32(v) => varu32_len(zigzag32(*v)),
        FieldValue::UInt32(v) => varu32_len(*v),
        FieldValue::Float32(_) => 4,
        FieldValue::String(v) => string_len(Some(v))?,
        FieldValue::Guid(_) => block_len(GUID_LEN)?,
        FieldValue::Message(None) => 0,
        FieldValue::Message(Some(nested)) => {
            let slot = scratch.reserve_slot();
            let inner = size_message(nested, scratch)?;
            scratch.fill_slot(slot, inner);
            block_len(inner)?
        }
        FieldValue::MessageArray(items) => {
            let slot = scratch.reserve_slot();
            let mut inner = 0usize;
            for item in items {
                let item_slot = scratch.reserve_slot();
                let item_len = size_message(item, scratch)?;
                scratch.fill_slot(item_slot, item_len);
                inner = add_len(inner, block_len(item_len)?)?;
            }
            scratch.fill_slot(slot, inner);
            block_len(inner)?
        }
    };
    Ok(len)
}

fn write_message(
    packet: &Packet,
    scratch: &EncodeScratch,
    cursor: &mut usize,
    writer: &mut ByteWriter<'_>,
) -> CodecResult<()> {
    for (field, value) in packet.fields() {
        if value.is_default() {
            continue;
        }
        let tag = Tag::new(field.number.get(), field.wire_type())?;
        write_tag(writer, tag)?;
        match value {
            FieldValue::Bool(v) => writer.write_varu32(u32::from(*v))?,
            FieldValue::Int32(v) => writer.write_vars32(*v)?,
            FieldValue::UInt32(v) => writer.write_varu32(*v)?,
            FieldValue::Float32(v) => writer.write_f32(*v)?,
            FieldValue::String(v) => writer.write_str(Some(v))?,
            FieldValue::Guid(v) => {
                write_block_prefix(writer, GUID_LEN)?;
                writer.write_guid(*v, GuidLayout::Mixed)?;
            }
            FieldValue::Message(None) => {}
            FieldValue::Message(Some(nested)) => {
                write_block_prefix(writer, next_slot(scratch, cursor))?;
                write_message(nested, scratch, cursor, writer)?;
            }
            FieldValue::MessageArray(items) => {
                write_block_prefix(writer, next_slot(scratch, cursor))?;
                for item in items {
                    write_block_prefix(writer, next_slot(scratch, cursor))?;
                    write_message(item, scratch, cursor, writer)?;
                }
            }
        }
    }
    Ok(())
}

fn next_slot(scratch: &EncodeScratch, cursor: &mut usize) -> usize {
    let len = scratch.slot(*cursor);
    *cursor += 1;
    len
}

fn add_len(total: usize, len: usize) -> CodecResult<usize> {
    total
        .checked_add(len)
        .ok_or(CodecError::Encode(EncodeError::LengthOverflow { length: len }))
}

fn invalid_value(packet: &Packet, field: &FieldDef, reason: ValueReason) -> CodecError {
    CodecError::InvalidValue {
        message: packet.schema().name().to_string(),
        field: field.number.get(),
        reason,
    }
}
