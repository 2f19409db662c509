use std::sync::{Arc, OnceLock};

use codec::{ensure_schema, CodecResult, Message, Packet};
use primitives::Uuid;
use schema::{FieldKind, MessageSchema};

use crate::{build, field, get_bool, get_f32, get_guid, get_i32, get_string, get_u32};

/// A player record covering every scalar kind.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerPacket {
    pub name: String,
    pub health: i32,
    pub is_alive: bool,
    pub id: Uuid,
    pub score: u32,
    pub speed: f32,
}

impl Message for PlayerPacket {
    fn schema() -> Arc<MessageSchema> {
        static SCHEMA: OnceLock<Arc<MessageSchema>> = OnceLock::new();
        Arc::clone(SCHEMA.get_or_init(|| {
            build(
                MessageSchema::builder("Player")
                    .field(field(1, "name", FieldKind::String))
                    .field(field(2, "health", FieldKind::Int32))
                    .field(field(3, "is_alive", FieldKind::Bool))
                    .field(field(4, "id", FieldKind::Guid))
                    .field(field(5, "score", FieldKind::UInt32))
                    .field(field(6, "speed", FieldKind::Float32)),
            )
        }))
    }

    fn to_packet(&self) -> CodecResult<Packet> {
        let mut packet = Packet::new(&Self::schema());
        packet.set(1, self.name.as_str())?;
        packet.set(2, self.health)?;
        packet.set(3, self.is_alive)?;
        packet.set(4, self.id)?;
        packet.set(5, self.score)?;
        packet.set(6, self.speed)?;
        Ok(packet)
    }

    fn from_packet(packet: &Packet) -> CodecResult<Self> {
        ensure_schema(packet, &Self::schema())?;
        Ok(Self {
            name: get_string(packet, 1),
            health: get_i32(packet, 2),
            is_alive: get_bool(packet, 3),
            id: get_guid(packet, 4),
            score: get_u32(packet, 5),
            speed: get_f32(packet, 6),
        })
    }
}
