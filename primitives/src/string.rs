//! Length-prefixed UTF-8 strings.
//!
//! A string is a varint byte length followed by that many UTF-8 bytes. An
//! absent string and an empty string share the same encoding (a single zero
//! byte) and both decode to `""`.

use crate::error::{PrimError, PrimResult};
use crate::varint::{try_read_varu32, try_write_varu32, varu32_len};

/// Returns the encoded size of `value`, prefix included.
pub fn string_len(value: Option<&str>) -> PrimResult<usize> {
    let bytes = value.map_or(0, str::len);
    let len = u32::try_from(bytes).map_err(|_| PrimError::LengthOverflow { length: bytes })?;
    Ok(varu32_len(len) + bytes)
}

/// Writes `value` at the start of `dst`.
///
/// Nothing is written unless the whole string fits.
pub fn try_write_string(dst: &mut [u8], value: Option<&str>) -> PrimResult<usize> {
    let bytes = value.map_or(&[][..], str::as_bytes);
    let needed = string_len(value)?;
    if dst.len() < needed {
        return Err(PrimError::BufferTooSmall {
            needed,
            available: dst.len(),
        });
    }

    // Length fits u32: string_len checked it.
    let prefix = try_write_varu32(dst, bytes.len() as u32)?;
    dst[prefix..prefix + bytes.len()].copy_from_slice(bytes);
    Ok(needed)
}

/// Reads a string from the start of `src` without copying.
pub fn try_read_str(src: &[u8]) -> PrimResult<(&str, usize)> {
    let (len, prefix) = try_read_varu32(src)?;
    let len = len as usize;
    let available = src.len() - prefix;
    if len > available {
        return Err(PrimError::UnexpectedEof {
            requested: len,
            available,
        });
    }

    let bytes = &src[prefix..prefix + len];
    let text = std::str::from_utf8(bytes).map_err(|err| PrimError::InvalidUtf8 {
        valid_up_to: err.valid_up_to(),
    })?;
    Ok((text, prefix + len))
}
