use std::sync::{Arc, OnceLock};

use codec::{ensure_schema, CodecResult, Message, Packet};
use schema::{FieldKind, MessageSchema};

use crate::{
    array_value, build, field, get_array, get_message, get_string, message_value,
    InventoryPacket, PlayerPacket, TransformPacket,
};

/// Top-level snapshot; reaches three levels of nesting through
/// `spawn.position` and `inventories[].items[]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorldPacket {
    pub name: String,
    pub spawn: Option<TransformPacket>,
    pub inventories: Vec<InventoryPacket>,
    pub players: Vec<PlayerPacket>,
}

impl Message for WorldPacket {
    fn schema() -> Arc<MessageSchema> {
        static SCHEMA: OnceLock<Arc<MessageSchema>> = OnceLock::new();
        Arc::clone(SCHEMA.get_or_init(|| {
            build(
                MessageSchema::builder("World")
                    .field(field(1, "name", FieldKind::String))
                    .field(field(
                        2,
                        "spawn",
                        FieldKind::message(&TransformPacket::schema()),
                    ))
                    .field(field(
                        3,
                        "inventories",
                        FieldKind::message_array(&InventoryPacket::schema()),
                    ))
                    .field(field(
                        4,
                        "players",
                        FieldKind::message_array(&PlayerPacket::schema()),
                    )),
            )
        }))
    }

    fn to_packet(&self) -> CodecResult<Packet> {
        let mut packet = Packet::new(&Self::schema());
        packet.set(1, self.name.as_str())?;
        packet.set(2, message_value(self.spawn.as_ref())?)?;
        packet.set(3, array_value(&self.inventories)?)?;
        packet.set(4, array_value(&self.players)?)?;
        Ok(packet)
    }

    fn from_packet(packet: &Packet) -> CodecResult<Self> {
        ensure_schema(packet, &Self::schema())?;
        Ok(Self {
            name: get_string(packet, 1),
            spawn: get_message(packet, 2)?,
            inventories: get_array(packet, 3)?,
            players: get_array(packet, 4)?,
        })
    }
}
