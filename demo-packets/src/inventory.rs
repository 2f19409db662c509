use std::sync::{Arc, OnceLock};

use codec::{ensure_schema, CodecResult, Message, Packet};
use primitives::Uuid;
use schema::{FieldKind, MessageSchema};

use crate::{array_value, build, field, get_array, get_guid, get_i32, get_string, get_u32};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemPacket {
    pub id: i32,
    pub name: String,
    pub quantity: u32,
}

impl Message for ItemPacket {
    fn schema() -> Arc<MessageSchema> {
        static SCHEMA: OnceLock<Arc<MessageSchema>> = OnceLock::new();
        Arc::clone(SCHEMA.get_or_init(|| {
            build(
                MessageSchema::builder("Item")
                    .field(field(1, "id", FieldKind::Int32))
                    .field(field(2, "name", FieldKind::String))
                    .field(field(3, "quantity", FieldKind::UInt32)),
            )
        }))
    }

    fn to_packet(&self) -> CodecResult<Packet> {
        Packet::new(&Self::schema())
            .with("id", self.id)?
            .with("name", self.name.as_str())?
            .with("quantity", self.quantity)
    }

    fn from_packet(packet: &Packet) -> CodecResult<Self> {
        ensure_schema(packet, &Self::schema())?;
        Ok(Self {
            id: get_i32(packet, 1),
            name: get_string(packet, 2),
            quantity: get_u32(packet, 3),
        })
    }
}

/// A list of items owned by one entity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InventoryPacket {
    pub owner: Uuid,
    pub items: Vec<ItemPacket>,
    pub capacity: u32,
}

impl Message for InventoryPacket {
    fn schema() -> Arc<MessageSchema> {
        static SCHEMA: OnceLock<Arc<MessageSchema>> = OnceLock::new();
        Arc::clone(SCHEMA.get_or_init(|| {
            let item = ItemPacket::schema();
            build(
                MessageSchema::builder("Inventory")
                    .field(field(1, "owner", FieldKind::Guid))
                    .field(field(2, "items", FieldKind::message_array(&item)))
                    .field(field(3, "capacity", FieldKind::UInt32)),
            )
        }))
    }

    fn to_packet(&self) -> CodecResult<Packet> {
        let mut packet = Packet::new(&Self::schema());
        packet.set(1, self.owner)?;
        packet.set(2, array_value(&self.items)?)?;
        packet.set(3, self.capacity)?;
        Ok(packet)
    }

    fn from_packet(packet: &Packet) -> CodecResult<Self> {
        ensure_schema(packet, &Self::schema())?;
        Ok(Self {
            owner: get_guid(packet, 1),
            items: get_array(packet, 2)?,
            capacity: get_u32(packet, 3),
        })
    }
}
