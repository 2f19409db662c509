//! Reference packet types for the tagpack codec.
//!
//! Each type pairs a plain Rust struct with a hand-written [`Message`]
//! implementation and a lazily built, shared schema. Together they cover
//! every field kind, a nested message, a message array and three levels of
//! nesting.

use std::sync::Arc;

use codec::{CodecResult, FieldValue, Message, Packet};
use primitives::Uuid;
use schema::{
    FieldDef, FieldKind, FieldNumber, FieldRegistry, MessageSchema, MessageSchemaBuilder,
};

mod geometry;
mod inventory;
mod player;
mod world;

pub use geometry::{TransformPacket, Vector3Packet};
pub use inventory::{InventoryPacket, ItemPacket};
pub use player::PlayerPacket;
pub use world::WorldPacket;

/// Registers every reference schema, including nested ones.
pub fn register_all(registry: &FieldRegistry) {
    for schema in [
        PlayerPacket::schema(),
        TransformPacket::schema(),
        InventoryPacket::schema(),
        WorldPacket::schema(),
    ] {
        registry.register(&schema);
    }
    log::debug!("registered {} demo message types", registry.len());
}

fn field(number: u32, name: &str, kind: FieldKind) -> FieldDef {
    let number = FieldNumber::new(number).expect("field number must be valid");
    FieldDef::new(number, name, kind)
}

fn build(builder: MessageSchemaBuilder) -> Arc<MessageSchema> {
    builder
        .build()
        .expect("demo schema must be valid")
        .into_shared()
}

fn get_bool(packet: &Packet, number: u32) -> bool {
    packet
        .get(number)
        .and_then(FieldValue::as_bool)
        .unwrap_or_default()
}

fn get_i32(packet: &Packet, number: u32) -> i32 {
    packet
        .get(number)
        .and_then(FieldValue::as_i32)
        .unwrap_or_default()
}

fn get_u32(packet: &Packet, number: u32) -> u32 {
    packet
        .get(number)
        .and_then(FieldValue::as_u32)
        .unwrap_or_default()
}

fn get_f32(packet: &Packet, number: u32) -> f32 {
    packet
        .get(number)
        .and_then(FieldValue::as_f32)
        .unwrap_or_default()
}

fn get_string(packet: &Packet, number: u32) -> String {
    packet
        .get(number)
        .and_then(FieldValue::as_str)
        .unwrap_or_default()
        .to_string()
}

fn get_guid(packet: &Packet, number: u32) -> Uuid {
    packet
        .get(number)
        .and_then(FieldValue::as_guid)
        .unwrap_or_default()
}

fn get_message<T: Message>(packet: &Packet, number: u32) -> CodecResult<Option<T>> {
    packet
        .get(number)
        .and_then(FieldValue::as_message)
        .map(T::from_packet)
        .transpose()
}

fn get_array<T: Message>(packet: &Packet, number: u32) -> CodecResult<Vec<T>> {
    packet
        .get(number)
        .and_then(FieldValue::as_array)
        .unwrap_or_default()
        .iter()
        .map(T::from_packet)
        .collect()
}

fn message_value<T: Message>(value: Option<&T>) -> CodecResult<FieldValue> {
    Ok(value.map(Message::to_packet).transpose()?.into())
}

fn array_value<T: Message>(values: &[T]) -> CodecResult<FieldValue> {
    let packets = values
        .iter()
        .map(Message::to_packet)
        .collect::<CodecResult<Vec<_>>>()?;
    Ok(packets.into())
}
