//! Deterministic schema hashing.

use blake3::Hasher;

use crate::{FieldDef, FieldKind};

/// Computes a deterministic hash over a message name and its field layout.
///
/// Nested kinds fold in the element schema's own hash, so two schemas hash
/// equal only if their whole trees match.
#[must_use]
pub(crate) fn message_hash(name: &str, fields: &[FieldDef]) -> u64 {
    let mut hasher = Hasher::new();
    write_str(&mut hasher, name);
    write_u32(&mut hasher, fields.len() as u32);

    for field in fields {
        write_u32(&mut hasher, field.number.get());
        write_str(&mut hasher, &field.name);
        write_kind(&mut hasher, &field.kind);
    }

    let hash = hasher.finalize();
    let mut out = [0u8; 8];
    out.copy_from_slice(&hash.as_bytes()[..8]);
    u64::from_le_bytes(out)
}

fn write_kind(hasher: &mut Hasher, kind: &FieldKind) {
    match kind {
        FieldKind::Bool => write_u8(hasher, 0),
        FieldKind::Int32 => write_u8(hasher, 1),
        FieldKind::UInt32 => write_u8(hasher, 2),
        FieldKind::Float32 => write_u8(hasher, 3),
        FieldKind::String => write_u8(hasher, 4),
        FieldKind::Guid => write_u8(hasher, 5),
        FieldKind::Message(schema) => {
            write_u8(hasher, 6);
            write_u64(hasher, schema.hash());
        }
        FieldKind::MessageArray(schema) => {
            write_u8(hasher, 7);
            write_u64(hasher, schema.hash());
        }
    }
}

fn write_str(hasher: &mut Hasher, value: &str) {
    write_u32(hasher, value.len() as u32);
    hasher.update(value.as_bytes());
}

fn write_u8(hasher: &mut Hasher, value: u8) {
    hasher.update(&[value]);
}

fn write_u32(hasher: &mut Hasher, value: u32) {
    hasher.update(&value.to_le_bytes());
}

fn write_u64(hasher: &mut Hasher, value: u64) {
    hasher.update(&value.to_le_bytes());
}
