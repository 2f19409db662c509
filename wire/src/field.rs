//! Field-level framing: a tag followed by a payload of its wire type.

use primitives::ByteReader;

use crate::block::read_block;
use crate::error::WireResult;
use crate::limits::Limits;
use crate::tag::{read_tag, Tag, WireType};

/// An undecoded field payload, borrowed from the input buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawValue<'a> {
    Varint(u32),
    Fixed64([u8; 8]),
    LengthDelimited(&'a [u8]),
    Fixed32([u8; 4]),
}

impl RawValue<'_> {
    /// Returns the wire type this value was read as.
    #[must_use]
    pub const fn wire_type(&self) -> WireType {
        match self {
            Self::Varint(_) => WireType::Varint,
            Self::Fixed64(_) => WireType::Fixed64,
            Self::LengthDelimited(_) => WireType::LengthDelimited,
            Self::Fixed32(_) => WireType::Fixed32,
        }
    }
}

/// A tag together with its raw payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawField<'a> {
    pub tag: Tag,
    pub value: RawValue<'a>,
}

/// Reads the payload for `wire_type` from the reader.
pub fn read_value<'a>(
    reader: &mut ByteReader<'a>,
    wire_type: WireType,
    limits: &Limits,
) -> WireResult<RawValue<'a>> {
    let value = match wire_type {
        WireType::Varint => RawValue::Varint(reader.read_varu32()?),
        WireType::Fixed64 => RawValue::Fixed64(reader.read_u64()?.to_le_bytes()),
        WireType::LengthDelimited => RawValue::LengthDelimited(read_block(reader, limits)?),
        WireType::Fixed32 => RawValue::Fixed32(reader.read_u32()?.to_le_bytes()),
    };
    Ok(value)
}

/// Reads a complete field. A failed read leaves the reader where it was.
pub fn read_field<'a>(reader: &mut ByteReader<'a>, limits: &Limits) -> WireResult<RawField<'a>> {
    let mut probe = reader.clone();
    let tag = read_tag(&mut probe)?;
    let value = read_value(&mut probe, tag.wire_type(), limits)?;
    *reader = probe;
    Ok(RawField { tag, value })
}

/// Skips over the payload of a field whose tag was already read.
pub fn skip_field(reader: &mut ByteReader<'_>, wire_type: WireType, limits: &Limits) -> WireResult<()> {
    match wire_type {
        WireType::Varint => {
            reader.read_varu32()?;
        }
        WireType::Fixed64 => reader.skip(8)?,
        WireType::LengthDelimited => {
            read_block(reader, limits)?;
        }
        WireType::Fixed32 => reader.skip(4)?,
    }
    Ok(())
}

/// Iterator over the fields of a message body.
///
/// After the first error the iterator is exhausted.
#[derive(Debug, Clone)]
pub struct FieldIter<'a> {
    reader: ByteReader<'a>,
    limits: Limits,
    failed: bool,
}

impl<'a> FieldIter<'a> {
    #[must_use]
    pub fn new(data: &'a [u8], limits: &Limits) -> Self {
        Self {
            reader: ByteReader::new(data),
            limits: limits.clone(),
            failed: false,
        }
    }

    /// Returns how many bytes have been consumed so far.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.reader.position()
    }
}

impl<'a> Iterator for FieldIter<'a> {
    type Item = WireResult<RawField<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.reader.is_empty() {
            return None;
        }
        let result = read_field(&mut self.reader, &self.limits);
        if result.is_err() {
            self.failed = true;
        }
        Some(result)
    }
}

impl std::iter::FusedIterator for FieldIter<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DecodeError;

    #[test]
    fn read_varint_field() {
        let mut reader = ByteReader::new(&[0x08, 0x96, 0x01]);
        let field = read_field(&mut reader, &Limits::default()).unwrap();
        assert_eq!(field.tag.field(), 1);
        assert_eq!(field.value, RawValue::Varint(150));
        assert!(reader.is_empty());
    }

    #[test]
    fn read_fixed32_field() {
        let mut reader = ByteReader::new(&[0x1D, 0x00, 0x00, 0x80, 0x3F]);
        let field = read_field(&mut reader, &Limits::default()).unwrap();
        assert_eq!(field.tag.field(), 3);
        assert_eq!(field.value, RawValue::Fixed32(1.0f32.to_le_bytes()));
    }

    #[test]
    fn read_length_delimited_field() {
        let mut reader = ByteReader::new(b"\x12\x03Bob");
        let field = read_field(&mut reader, &Limits::default()).unwrap();
        assert_eq!(field.tag.field(), 2);
        assert_eq!(field.value, RawValue::LengthDelimited(b"Bob"));
        assert_eq!(field.value.wire_type(), WireType::LengthDelimited);
    }

    #[test]
    fn read_fixed64_field() {
        let mut data = vec![0x21];
        data.extend_from_slice(&7u64.to_le_bytes());
        let mut reader = ByteReader::new(&data);
        let field = read_field(&mut reader, &Limits::default()).unwrap();
        assert_eq!(field.value, RawValue::Fixed64(7u64.to_le_bytes()));
    }

    #[test]
    fn truncated_payload_does_not_advance() {
        let mut reader = ByteReader::new(&[0x1D, 0x00, 0x00]);
        let err = read_field(&mut reader, &Limits::default()).unwrap_err();
        assert!(err.is_truncated());
        assert_eq!(reader.position(), 0);
    }

    #[test]
    fn skip_each_wire_type() {
        let mut data = Vec::new();
        data.extend_from_slice(&[0xAC, 0x02]);
        data.extend_from_slice(&[0; 8]);
        data.extend_from_slice(b"\x02hi");
        data.extend_from_slice(&[0; 4]);
        data.push(0x42);

        let limits = Limits::default();
        let mut reader = ByteReader::new(&data);
        skip_field(&mut reader, WireType::Varint, &limits).unwrap();
        skip_field(&mut reader, WireType::Fixed64, &limits).unwrap();
        skip_field(&mut reader, WireType::LengthDelimited, &limits).unwrap();
        skip_field(&mut reader, WireType::Fixed32, &limits).unwrap();
        assert_eq!(reader.read_u8().unwrap(), 0x42);
    }

    #[test]
    fn field_iter_walks_message_body() {
        let data = b"\x08\x01\x12\x05Alice\x18\x54";
        let fields: Vec<_> = FieldIter::new(data, &Limits::default())
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(fields.len(), 3);
        assert_eq!(fields[0].value, RawValue::Varint(1));
        assert_eq!(fields[1].value, RawValue::LengthDelimited(b"Alice"));
        assert_eq!(fields[2].tag.field(), 3);
        assert_eq!(fields[2].value, RawValue::Varint(84));
    }

    #[test]
    fn field_iter_fuses_on_error() {
        let data = [0x08, 0x01, 0x0F, 0x00];
        let mut iter = FieldIter::new(&data, &Limits::default());
        assert!(iter.next().unwrap().is_ok());
        let err = iter.next().unwrap().unwrap_err();
        assert_eq!(err, DecodeError::UnknownWireType { raw: 7 });
        assert_eq!(iter.position(), 2);
        assert!(iter.next().is_none());
    }
}
