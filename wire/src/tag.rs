//! Field tags: a field number and wire type packed into one varint.

use primitives::{varu32_len, ByteReader, ByteWriter};

use crate::error::{DecodeError, EncodeError, WireResult};

/// Largest field number that fits in a tag after the 3-bit wire type shift.
pub const MAX_FIELD_NUMBER: u32 = (1 << 29) - 1;

const WIRE_TYPE_BITS: u32 = 3;
const WIRE_TYPE_MASK: u32 = 0b111;

/// Physical encoding of a field payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum WireType {
    /// A single base-128 varint.
    Varint = 0,
    /// Eight raw bytes. Never emitted, but skippable.
    Fixed64 = 1,
    /// A varint byte count followed by that many bytes.
    LengthDelimited = 2,
    /// Four raw little-endian bytes.
    Fixed32 = 5,
}

impl WireType {
    /// Parses a raw 3-bit wire type.
    pub fn parse(raw: u8) -> WireResult<Self> {
        match raw {
            0 => Ok(Self::Varint),
            1 => Ok(Self::Fixed64),
            2 => Ok(Self::LengthDelimited),
            5 => Ok(Self::Fixed32),
            _ => Err(DecodeError::UnknownWireType { raw }),
        }
    }

    /// Returns the raw 3-bit value.
    #[must_use]
    pub const fn raw(self) -> u8 {
        self as u8
    }
}

/// A decoded field tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tag {
    field: u32,
    wire_type: WireType,
}

impl Tag {
    /// Creates a tag, rejecting field numbers that cannot be encoded.
    pub fn new(field: u32, wire_type: WireType) -> Result<Self, EncodeError> {
        if field == 0 || field > MAX_FIELD_NUMBER {
            return Err(EncodeError::InvalidFieldNumber { field });
        }
        Ok(Self { field, wire_type })
    }

    /// Splits a raw tag value into field number and wire type.
    pub fn from_raw(raw: u32) -> WireResult<Self> {
        let wire_type = WireType::parse((raw & WIRE_TYPE_MASK) as u8)?;
        let field = raw >> WIRE_TYPE_BITS;
        if field == 0 {
            return Err(DecodeError::InvalidFieldNumber { field });
        }
        Ok(Self { field, wire_type })
    }

    #[must_use]
    pub const fn field(self) -> u32 {
        self.field
    }

    #[must_use]
    pub const fn wire_type(self) -> WireType {
        self.wire_type
    }

    /// Returns the packed `field << 3 | wire_type` value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        (self.field << WIRE_TYPE_BITS) | self.wire_type as u32
    }

    /// Returns the encoded size of this tag in bytes.
    #[must_use]
    pub const fn encoded_len(self) -> usize {
        varu32_len(self.raw())
    }
}

/// Returns the encoded size of a tag for `field` in bytes.
///
/// The wire type never changes the size, since it only occupies the low
/// three bits of the first byte.
#[must_use]
pub const fn tag_len(field: u32) -> usize {
    varu32_len(field << WIRE_TYPE_BITS)
}

/// Reads one tag. A failed read leaves the reader where it was.
pub fn read_tag(reader: &mut ByteReader<'_>) -> WireResult<Tag> {
    let mut probe = reader.clone();
    let raw = probe.read_varu32()?;
    let tag = Tag::from_raw(raw)?;
    *reader = probe;
    Ok(tag)
}

/// Writes one tag.
pub fn write_tag(writer: &mut ByteWriter<'_>, tag: Tag) -> Result<(), EncodeError> {
    writer.write_varu32(tag.raw())?;
    Ok(())
}
