//! Schema-driven packet encoding/decoding for the tagpack wire format.
//!
//! This is the main codec crate that ties together primitives, wire, and
//! schema to turn packets into compact tag/value bytes and back.
//!
//! # Features
//!
//! - Default omission: only fields that differ from their default are written
//! - Nested messages and message arrays framed as length-delimited blocks
//! - Forward compatibility: unknown fields are skipped on decode
//! - Typed messages through the [`Message`] trait
//! - Schema-less inspection with registry-resolved field names
//!
//! # Design Principles
//!
//! - **Atomic writes** - Output is sized before the first byte is written.
//! - **Bounded decoding** - Nesting depth, array length and block sizes are limited.
//! - **Deterministic** - Same inputs produce same outputs.
//!
//! # Example
//!
//! ```
//! use codec::{decode_packet, encode_packet_to_vec, Packet};
//! use schema::{FieldDef, FieldKind, FieldNumber, MessageSchema};
//!
//! let schema = MessageSchema::builder("Player")
//!     .field(FieldDef::new(FieldNumber::new(1).unwrap(), "name", FieldKind::String))
//!     .field(FieldDef::new(FieldNumber::new(2).unwrap(), "health", FieldKind::Int32))
//!     .build()
//!     .unwrap()
//!     .into_shared();
//!
//! let packet = Packet::new(&schema).with("name", "Alice").unwrap();
//! let bytes = encode_packet_to_vec(&packet).unwrap();
//! assert_eq!(bytes, b"\x0A\x05Alice");
//!
//! let decoded = decode_packet(&schema, &bytes).unwrap();
//! assert_eq!(decoded, packet);
//! ```

mod decode;
mod encode;
mod error;
pub mod inspect;
mod limits;
mod message;
mod packet;
mod scratch;

pub use decode::{decode_packet, decode_packet_with_limits};
pub use encode::{encode_packet, encode_packet_to_vec, encode_packet_with_scratch, encoded_len};
pub use error::{CodecError, CodecResult, LimitKind, ValueReason};
pub use limits::CodecLimits;
pub use message::{ensure_schema, Message};
pub use packet::{FieldValue, Packet};
pub use scratch::EncodeScratch;
pub use wire::Limits as WireLimits;
