//! Byte-level encoding primitives for the tagpack codec.
//!
//! This crate provides the leaf codecs every tagpack message is built from:
//!
//! - 32-bit base-128 varints and the zigzag mapping for signed values
//! - Fixed-width little-endian integers, floats and booleans
//! - 128-bit GUIDs in mixed-endian or network byte order
//! - Varint length-prefixed UTF-8 strings
//!
//! [`ByteReader`] and [`ByteWriter`] are cursors over caller-owned memory;
//! the free functions in [`varint`] and [`string`] work on raw slices.
//!
//! # Design Principles
//!
//! - **No unsafe code** - Safety is paramount.
//! - **Bounded operations** - All reads/writes are bounds-checked.
//! - **No partial writes** - A failed write leaves the destination untouched.
//! - **No domain knowledge** - This crate knows nothing about tags, fields or messages.
//!
//! # Example
//!
//! ```
//! use primitives::{ByteReader, ByteWriter};
//!
//! let mut buf = [0u8; 16];
//! let mut writer = ByteWriter::new(&mut buf);
//! writer.write_vars32(-3).unwrap();
//! writer.write_str(Some("hi")).unwrap();
//! let used = writer.finish();
//!
//! let mut reader = ByteReader::new(&buf[..used]);
//! assert_eq!(reader.read_vars32().unwrap(), -3);
//! assert_eq!(reader.read_str().unwrap(), "hi");
//! ```

mod error;
mod guid;
mod reader;
pub mod string;
pub mod varint;
mod writer;

pub use error::{PrimError, PrimResult};
pub use guid::{guid_from_bytes, guid_to_bytes, GuidLayout, GUID_LEN};
pub use reader::ByteReader;
pub use uuid::Uuid;
pub use varint::{unzigzag32, varu32_len, zigzag32, MAX_VARU32_BYTES};
pub use writer::ByteWriter;
