//! Byte-level writer for encoding into a caller-provided buffer.

use uuid::Uuid;

use crate::error::{PrimError, PrimResult};
use crate::guid::{guid_to_bytes, GuidLayout};
use crate::string::try_write_string;
use crate::varint::{try_write_varu32, zigzag32};

/// A bounded writer over a borrowed output buffer.
///
/// Every write checks that the whole value fits before touching the buffer,
/// so a failed write leaves both the buffer and the position unchanged.
/// Call [`finish`](Self::finish) to get the number of bytes written.
#[derive(Debug)]
pub struct ByteWriter<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> ByteWriter<'a> {
    /// Creates a new writer at the start of `buf`.
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Returns the number of bytes written so far.
    #[must_use]
    pub fn bytes_written(&self) -> usize {
        self.pos
    }

    /// Returns the number of bytes still available.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Writes a varint `u32`.
    pub fn write_varu32(&mut self, value: u32) -> PrimResult<()> {
        self.pos += try_write_varu32(&mut self.buf[self.pos..], value)?;
        Ok(())
    }

    /// Writes a zigzag varint `i32`.
    pub fn write_vars32(&mut self, value: i32) -> PrimResult<()> {
        self.write_varu32(zigzag32(value))
    }

    /// Writes a boolean as a single 0/1 byte.
    pub fn write_bool(&mut self, value: bool) -> PrimResult<()> {
        self.write_u8(u8::from(value))
    }

    /// Writes a `u8`.
    pub fn write_u8(&mut self, value: u8) -> PrimResult<()> {
        self.write_array([value])
    }

    /// Writes an `i8`.
    pub fn write_i8(&mut self, value: i8) -> PrimResult<()> {
        self.write_array(value.to_le_bytes())
    }

    /// Writes a little-endian `u16`.
    pub fn write_u16(&mut self, value: u16) -> PrimResult<()> {
        self.write_array(value.to_le_bytes())
    }

    /// Writes a little-endian `i16`.
    pub fn write_i16(&mut self, value: i16) -> PrimResult<()> {
        self.write_array(value.to_le_bytes())
    }

    /// Writes a little-endian `u32`.
    pub fn write_u32(&mut self, value: u32) -> PrimResult<()> {
        self.write_array(value.to_le_bytes())
    }

    /// Writes a little-endian `i32`.
    pub fn write_i32(&mut self, value: i32) -> PrimResult<()> {
        self.write_array(value.to_le_bytes())
    }

    /// Writes a little-endian `u64`.
    pub fn write_u64(&mut self, value: u64) -> PrimResult<()> {
        self.write_array(value.to_le_bytes())
    }

    /// Writes a little-endian `i64`.
    pub fn write_i64(&mut self, value: i64) -> PrimResult<()> {
        self.write_array(value.to_le_bytes())
    }

    /// Writes a little-endian IEEE-754 `f32`.
    pub fn write_f32(&mut self, value: f32) -> PrimResult<()> {
        self.write_array(value.to_le_bytes())
    }

    /// Writes a little-endian IEEE-754 `f64`.
    pub fn write_f64(&mut self, value: f64) -> PrimResult<()> {
        self.write_array(value.to_le_bytes())
    }

    /// Writes a 16-byte GUID in the given layout.
    pub fn write_guid(&mut self, value: Uuid, layout: GuidLayout) -> PrimResult<()> {
        self.write_array(guid_to_bytes(value, layout))
    }

    /// Writes a length-prefixed UTF-8 string. `None` encodes like `""`.
    pub fn write_str(&mut self, value: Option<&str>) -> PrimResult<()> {
        self.pos += try_write_string(&mut self.buf[self.pos..], value)?;
        Ok(())
    }

    /// Copies raw bytes verbatim.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> PrimResult<()> {
        self.ensure(bytes.len())?;
        self.buf[self.pos..self.pos + bytes.len()].copy_from_slice(bytes);
        self.pos += bytes.len();
        Ok(())
    }

    /// Finishes writing and returns the number of bytes used.
    #[must_use]
    pub fn finish(self) -> usize {
        self.pos
    }

    fn ensure(&self, len: usize) -> PrimResult<()> {
        let available = self.remaining();
        if len > available {
            return Err(PrimError::BufferTooSmall {
                needed: len,
                available,
            });
        }
        Ok(())
    }

    fn write_array<const N: usize>(&mut self, bytes: [u8; N]) -> PrimResult<()> {
        self.write_bytes(&bytes)
    }
}
