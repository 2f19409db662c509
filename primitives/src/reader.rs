//! Byte-level reader with bounded operations.

use uuid::Uuid;

use crate::error::{PrimError, PrimResult};
use crate::guid::{guid_from_bytes, GuidLayout, GUID_LEN};
use crate::string::try_read_str;
use crate::varint::{try_read_varu32, unzigzag32};

/// A cursor over a borrowed byte slice.
///
/// All read operations are bounds-checked and return errors on failure.
/// A failed read does not advance the cursor. The reader never panics on
/// malformed input.
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    /// Creates a new `ByteReader` over a byte slice.
    #[must_use]
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Returns the number of bytes remaining to read.
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Returns `true` if there are no more bytes to read.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Returns the current byte position.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// Returns the unread part of the buffer.
    #[must_use]
    pub fn rest(&self) -> &'a [u8] {
        &self.data[self.pos..]
    }

    /// Reads a varint `u32`.
    pub fn read_varu32(&mut self) -> PrimResult<u32> {
        let (value, read) = try_read_varu32(self.rest())?;
        self.pos += read;
        Ok(value)
    }

    /// Reads a zigzag varint `i32`.
    pub fn read_vars32(&mut self) -> PrimResult<i32> {
        self.read_varu32().map(unzigzag32)
    }

    /// Reads a boolean byte; any non-zero value is `true`.
    pub fn read_bool(&mut self) -> PrimResult<bool> {
        Ok(self.read_u8()? != 0)
    }

    /// Reads a boolean byte, rejecting anything other than 0 or 1.
    pub fn read_bool_strict(&mut self) -> PrimResult<bool> {
        self.ensure(1)?;
        match self.data[self.pos] {
            0 => {
                self.pos += 1;
                Ok(false)
            }
            1 => {
                self.pos += 1;
                Ok(true)
            }
            value => Err(PrimError::InvalidBool { value }),
        }
    }

    /// Reads a `u8`.
    pub fn read_u8(&mut self) -> PrimResult<u8> {
        let [byte] = self.read_array::<1>()?;
        Ok(byte)
    }

    /// Reads an `i8`.
    pub fn read_i8(&mut self) -> PrimResult<i8> {
        Ok(i8::from_le_bytes(self.read_array::<1>()?))
    }

    /// Reads a little-endian `u16`.
    pub fn read_u16(&mut self) -> PrimResult<u16> {
        Ok(u16::from_le_bytes(self.read_array::<2>()?))
    }

    /// Reads a little-endian `i16`.
    pub fn read_i16(&mut self) -> PrimResult<i16> {
        Ok(i16::from_le_bytes(self.read_array::<2>()?))
    }

    /// Reads a little-endian `u32`.
    pub fn read_u32(&mut self) -> PrimResult<u32> {
        Ok(u32::from_le_bytes(self.read_array::<4>()?))
    }

    /// Reads a little-endian `i32`.
    pub fn read_i32(&mut self) -> PrimResult<i32> {
        Ok(i32::from_le_bytes(self.read_array::<4>()?))
    }

    /// Reads a little-endian `u64`.
    pub fn read_u64(&mut self) -> PrimResult<u64> {
        Ok(u64::from_le_bytes(self.read_array::<8>()?))
    }

    /// Reads a little-endian `i64`.
    pub fn read_i64(&mut self) -> PrimResult<i64> {
        Ok(i64::from_le_bytes(self.read_array::<8>()?))
    }

    /// Reads a little-endian IEEE-754 `f32`.
    pub fn read_f32(&mut self) -> PrimResult<f32> {
        Ok(f32::from_le_bytes(self.read_array::<4>()?))
    }

    /// Reads a little-endian IEEE-754 `f64`.
    pub fn read_f64(&mut self) -> PrimResult<f64> {
        Ok(f64::from_le_bytes(self.read_array::<8>()?))
    }

    /// Reads a 16-byte GUID in the given layout.
    pub fn read_guid(&mut self, layout: GuidLayout) -> PrimResult<Uuid> {
        let bytes = self.read_array::<GUID_LEN>()?;
        Ok(guid_from_bytes(bytes, layout))
    }

    /// Reads a length-prefixed UTF-8 string without copying.
    pub fn read_str(&mut self) -> PrimResult<&'a str> {
        let (text, read) = try_read_str(self.rest())?;
        self.pos += read;
        Ok(text)
    }

    /// Reads `len` raw bytes without copying.
    pub fn read_bytes(&mut self, len: usize) -> PrimResult<&'a [u8]> {
        self.ensure(len)?;
        let bytes = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }

    /// Skips `len` bytes.
    pub fn skip(&mut self, len: usize) -> PrimResult<()> {
        self.ensure(len)?;
        self.pos += len;
        Ok(())
    }

    fn ensure(&self, len: usize) -> PrimResult<()> {
        let available = self.remaining();
        if len > available {
            return Err(PrimError::UnexpectedEof {
                requested: len,
                available,
            });
        }
        Ok(())
    }

    fn read_array<const N: usize>(&mut self) -> PrimResult<[u8; N]> {
        self.ensure(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(&self.data[self.pos..self.pos + N]);
        self.pos += N;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_reader() {
        let reader = ByteReader::new(&[]);
        assert!(reader.is_empty());
        assert_eq!(reader.remaining(), 0);
        assert_eq!(reader.position(), 0);
    }

    #[test]
    fn read_from_empty_fails() {
        let mut reader = ByteReader::new(&[]);
        let result = reader.read_u8();
        assert!(matches!(result, Err(PrimError::UnexpectedEof { .. })));
    }

    #[test]
    fn read_u32_little_endian() {
        let mut reader = ByteReader::new(&[0x78, 0x56, 0x34, 0x12]);
        assert_eq!(reader.read_u32().unwrap(), 0x1234_5678);
        assert!(reader.is_empty());
    }

    #[test]
    fn short_fixed_read_does_not_advance() {
        let mut reader = ByteReader::new(&[0x01, 0x02, 0x03]);
        let err = reader.read_u32().unwrap_err();
        assert_eq!(
            err,
            PrimError::UnexpectedEof {
                requested: 4,
                available: 3
            }
        );
        assert_eq!(reader.position(), 0);
        assert_eq!(reader.read_u16().unwrap(), 0x0201);
    }

    #[test]
    fn read_varu32() {
        let mut reader = ByteReader::new(&[0xAC, 0x02]);
        assert_eq!(reader.read_varu32().unwrap(), 300);
        assert_eq!(reader.position(), 2);
    }

    #[test]
    fn read_vars32() {
        let mut reader = ByteReader::new(&[0x01]);
        assert_eq!(reader.read_vars32().unwrap(), -1);
    }

    #[test]
    fn read_varu32_invalid() {
        let mut reader = ByteReader::new(&[0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x01]);
        let err = reader.read_varu32().unwrap_err();
        assert!(matches!(err, PrimError::InvalidVarint));
        assert_eq!(reader.position(), 0);
    }

    #[test]
    fn strict_bool_rejects_other_bytes() {
        let mut reader = ByteReader::new(&[0x00, 0x01, 0x02]);
        assert!(!reader.read_bool_strict().unwrap());
        assert!(reader.read_bool_strict().unwrap());
        let err = reader.read_bool_strict().unwrap_err();
        assert_eq!(err, PrimError::InvalidBool { value: 2 });
        assert_eq!(reader.remaining(), 1);
    }

    #[test]
    fn relaxed_bool_accepts_any_nonzero() {
        let mut reader = ByteReader::new(&[0x00, 0x02, 0xFF]);
        assert!(!reader.read_bool().unwrap());
        assert!(reader.read_bool().unwrap());
        assert!(reader.read_bool().unwrap());
    }

    #[test]
    fn read_str_borrows_from_source() {
        let data = b"\x05Alice\x03Bob";
        let mut reader = ByteReader::new(data);
        assert_eq!(reader.read_str().unwrap(), "Alice");
        assert_eq!(reader.read_str().unwrap(), "Bob");
        assert!(reader.is_empty());
    }

    #[test]
    fn read_bytes_and_skip() {
        let mut reader = ByteReader::new(&[1, 2, 3, 4, 5]);
        reader.skip(1).unwrap();
        assert_eq!(reader.read_bytes(3).unwrap(), &[2, 3, 4]);
        assert!(reader.skip(2).is_err());
        assert_eq!(reader.rest(), &[5]);
    }

    #[test]
    fn read_floats() {
        let mut data = Vec::new();
        data.extend_from_slice(&1.5f32.to_le_bytes());
        data.extend_from_slice(&(-2.25f64).to_le_bytes());
        let mut reader = ByteReader::new(&data);
        assert!((reader.read_f32().unwrap() - 1.5).abs() < f32::EPSILON);
        assert!((reader.read_f64().unwrap() + 2.25).abs() < f64::EPSILON);
    }
}
