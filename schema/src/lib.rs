//! Message schemas and field kinds for the tagpack codec.
//!
//! This crate defines how a packet type is described to the codec:
//! - Field numbers, field kinds and their wire types
//! - Validated, immutable message schemas shared through `Arc`
//! - Deterministic schema hashing
//! - A thread-safe field-name registry for diagnostics
//!
//! # Design Principles
//!
//! - **Explicit schemas** - No reflection on arbitrary Rust types.
//! - **Validated once** - A built schema never changes and never needs rechecking.
//! - **Deterministic hashing** - Schema hash is stable given the same definition.

mod error;
mod field;
mod hash;
mod registry;
mod schema;

pub use error::{SchemaError, SchemaResult};
pub use field::{FieldDef, FieldKind, FieldNumber};
pub use registry::FieldRegistry;
pub use schema::{MessageSchema, MessageSchemaBuilder};
