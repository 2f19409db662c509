//! Length-delimited blocks.
//!
//! A block is a varint byte count followed by exactly that many bytes.
//! Strings, nested messages and message arrays all travel as blocks; an
//! array is itself a block holding back-to-back element blocks.

use primitives::{varu32_len, ByteReader, ByteWriter};

use crate::error::{DecodeError, EncodeError, LimitKind, WireResult};
use crate::limits::Limits;

/// Returns the encoded size of a block carrying `payload_len` bytes.
pub fn block_len(payload_len: usize) -> Result<usize, EncodeError> {
    let prefix = u32::try_from(payload_len).map_err(|_| EncodeError::LengthOverflow {
        length: payload_len,
    })?;
    payload_len
        .checked_add(varu32_len(prefix))
        .ok_or(EncodeError::LengthOverflow {
            length: payload_len,
        })
}

/// Writes only the length prefix of a block.
///
/// The caller is responsible for writing exactly `len` payload bytes next.
pub fn write_block_prefix(writer: &mut ByteWriter<'_>, len: usize) -> Result<(), EncodeError> {
    let prefix = u32::try_from(len).map_err(|_| EncodeError::LengthOverflow { length: len })?;
    writer.write_varu32(prefix)?;
    Ok(())
}

/// Writes a complete block. Nothing is written unless the whole block fits.
pub fn write_block(writer: &mut ByteWriter<'_>, payload: &[u8]) -> Result<(), EncodeError> {
    let needed = block_len(payload.len())?;
    let available = writer.remaining();
    if needed > available {
        return Err(EncodeError::BufferTooSmall { needed, available });
    }
    write_block_prefix(writer, payload.len())?;
    writer.write_bytes(payload)?;
    Ok(())
}

/// Reads one block and returns its payload without copying.
///
/// A failed read leaves the reader where it was.
pub fn read_block<'a>(reader: &mut ByteReader<'a>, limits: &Limits) -> WireResult<&'a [u8]> {
    let mut probe = reader.clone();
    let declared = probe.read_varu32()? as usize;
    if declared > limits.max_block_len {
        return Err(DecodeError::LimitsExceeded {
            kind: LimitKind::BlockLength,
            limit: limits.max_block_len,
            actual: declared,
        });
    }
    let available = probe.remaining();
    if declared > available {
        return Err(DecodeError::BlockTruncated {
            declared,
            available,
        });
    }
    let payload = probe.read_bytes(declared)?;
    *reader = probe;
    Ok(payload)
}

/// Iterator over consecutive blocks in a buffer.
///
/// Yields each payload in order. After the first error the iterator is
/// exhausted.
#[derive(Debug, Clone)]
pub struct BlockIter<'a> {
    reader: ByteReader<'a>,
    limits: Limits,
    failed: bool,
}

impl<'a> BlockIter<'a> {
    /// Creates an iterator over the blocks packed into `data`.
    #[must_use]
    pub fn new(data: &'a [u8], limits: &Limits) -> Self {
        Self {
            reader: ByteReader::new(data),
            limits: limits.clone(),
            failed: false,
        }
    }
}

impl<'a> Iterator for BlockIter<'a> {
    type Item = WireResult<&'a [u8]>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.reader.is_empty() {
            return None;
        }
        let result = read_block(&mut self.reader, &self.limits);
        if result.is_err() {
            self.failed = true;
        }
        Some(result)
    }
}

impl std::iter::FusedIterator for BlockIter<'_> {}
