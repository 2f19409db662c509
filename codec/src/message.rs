//! Typed messages on top of the dynamic packet codec.

use std::sync::Arc;

use schema::MessageSchema;

use crate::decode::decode_packet_with_limits;
use crate::encode::{encode_packet, encode_packet_to_vec, encoded_len};
use crate::error::{CodecError, CodecResult};
use crate::limits::CodecLimits;
use crate::packet::Packet;

/// A Rust type with a fixed message schema.
///
/// Implementors convert to and from [`Packet`]; the provided methods handle
/// the wire format.
pub trait Message: Sized {
    /// The schema every instance of this type encodes with.
    fn schema() -> Arc<MessageSchema>;

    /// Builds a packet holding this value's fields.
    fn to_packet(&self) -> CodecResult<Packet>;

    /// Rebuilds a value from a packet produced with [`Message::schema`].
    fn from_packet(packet: &Packet) -> CodecResult<Self>;

    /// Encodes into `out` and returns the number of bytes written.
    fn write(&self, out: &mut [u8]) -> CodecResult<usize> {
        encode_packet(&self.to_packet()?, out)
    }

    /// Decodes a value from the whole of `bytes`, returning it together with
    /// the number of bytes consumed.
    fn try_read(bytes: &[u8]) -> CodecResult<(Self, usize)> {
        Self::try_read_with_limits(bytes, &CodecLimits::default())
    }

    /// Like [`try_read`](Self::try_read) with explicit limits.
    fn try_read_with_limits(bytes: &[u8], limits: &CodecLimits) -> CodecResult<(Self, usize)> {
        let packet = decode_packet_with_limits(&Self::schema(), bytes, limits)?;
        Ok((Self::from_packet(&packet)?, bytes.len()))
    }

    /// Returns the exact encoded size.
    fn encoded_len(&self) -> CodecResult<usize> {
        encoded_len(&self.to_packet()?)
    }

    /// Encodes into a new vector.
    fn to_vec(&self) -> CodecResult<Vec<u8>> {
        encode_packet_to_vec(&self.to_packet()?)
    }
}

/// Checks that `packet` was built from `expected`.
///
/// Intended for [`Message::from_packet`] implementations.
pub fn ensure_schema(packet: &Packet, expected: &MessageSchema) -> CodecResult<()> {
    let found = packet.schema();
    if found.hash() != expected.hash() {
        return Err(CodecError::SchemaMismatch {
            expected: expected.name().to_string(),
            found: found.name().to_string(),
        });
    }
    Ok(())
}
