//! Base-128 varints and zigzag mapping over 32-bit values.

use crate::error::{PrimError, PrimResult};

/// Maximum encoded size of a `u32` varint.
pub const MAX_VARU32_BYTES: usize = 5;

/// Returns the number of bytes `value` occupies as a varint.
#[must_use]
pub const fn varu32_len(value: u32) -> usize {
    let mut value = value;
    let mut len = 1;
    while value >= 0x80 {
        value >>= 7;
        len += 1;
    }
    len
}

/// Writes `value` as a varint at the start of `dst`.
///
/// Nothing is written if `dst` is shorter than [`varu32_len`] of `value`.
pub fn try_write_varu32(dst: &mut [u8], value: u32) -> PrimResult<usize> {
    let needed = varu32_len(value);
    if dst.len() < needed {
        return Err(PrimError::BufferTooSmall {
            needed,
            available: dst.len(),
        });
    }

    let mut value = value;
    let mut offset = 0;
    loop {
        let mut byte = (value & 0x7F) as u8;
        value >>= 7;
        if value != 0 {
            byte |= 0x80;
        }
        dst[offset] = byte;
        offset += 1;
        if value == 0 {
            break;
        }
    }
    Ok(offset)
}

/// Reads a varint from the start of `src`, returning the value and the
/// number of bytes consumed.
///
/// Fails with [`PrimError::InvalidVarint`] if the encoding needs more than
/// 32 bits and with [`PrimError::UnexpectedEof`] if `src` ends while the
/// continuation bit is still set.
pub fn try_read_varu32(src: &[u8]) -> PrimResult<(u32, usize)> {
    let mut value = 0u32;
    let mut shift = 0u32;
    for (index, &byte) in src.iter().take(MAX_VARU32_BYTES).enumerate() {
        // Fifth byte may only carry the top 4 bits and no continuation.
        if index == MAX_VARU32_BYTES - 1 && byte & 0xF0 != 0 {
            return Err(PrimError::InvalidVarint);
        }
        value |= u32::from(byte & 0x7F) << shift;
        if byte & 0x80 == 0 {
            return Ok((value, index + 1));
        }
        shift += 7;
    }
    Err(PrimError::UnexpectedEof {
        requested: src.len() + 1,
        available: src.len(),
    })
}

/// Maps a signed value onto an unsigned one so small magnitudes stay small.
#[must_use]
pub const fn zigzag32(value: i32) -> u32 {
    ((value << 1) ^ (value >> 31)) as u32
}

/// Inverse of [`zigzag32`].
#[must_use]
pub const fn unzigzag32(value: u32) -> i32 {
    ((value >> 1) as i32) ^ -((value & 1) as i32)
}
