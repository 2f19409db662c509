//! Tag and block framing for the tagpack codec.
//!
//! This crate handles the field-level wire format: tags that pack a field
//! number with a wire type, length-delimited blocks, and skipping payloads
//! of any wire type. It does not know about schemas or field kinds, only
//! the structure every field shares.
//!
//! # Design Principles
//!
//! - **Stable wire format** - Tag and block layout never change between versions.
//! - **Bounded decoding** - Block lengths are validated against limits before use.
//! - **Zero-copy reads** - Block payloads borrow from the input buffer.
//! - **No domain knowledge** - This crate frames fields, it does not interpret them.
//!
//! The byte layout is described in the repository `README.md`.

mod block;
mod error;
mod field;
mod limits;
mod tag;

pub use block::{block_len, read_block, write_block, write_block_prefix, BlockIter};
pub use error::{DecodeError, EncodeError, LimitKind, WireResult};
pub use field::{read_field, read_value, skip_field, FieldIter, RawField, RawValue};
pub use limits::Limits;
pub use tag::{read_tag, tag_len, write_tag, Tag, WireType, MAX_FIELD_NUMBER};
