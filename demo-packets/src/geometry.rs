use std::sync::{Arc, OnceLock};

use codec::{ensure_schema, CodecResult, Message, Packet};
use schema::{FieldKind, MessageSchema};

use crate::{build, field, get_f32, get_message, message_value};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vector3Packet {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3Packet {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

impl Message for Vector3Packet {
    fn schema() -> Arc<MessageSchema> {
        static SCHEMA: OnceLock<Arc<MessageSchema>> = OnceLock::new();
        Arc::clone(SCHEMA.get_or_init(|| {
            build(
                MessageSchema::builder("Vector3")
                    .field(field(1, "x", FieldKind::Float32))
                    .field(field(2, "y", FieldKind::Float32))
                    .field(field(3, "z", FieldKind::Float32)),
            )
        }))
    }

    fn to_packet(&self) -> CodecResult<Packet> {
        Packet::new(&Self::schema())
            .with("x", self.x)?
            .with("y", self.y)?
            .with("z", self.z)
    }

    fn from_packet(packet: &Packet) -> CodecResult<Self> {
        ensure_schema(packet, &Self::schema())?;
        Ok(Self::new(
            get_f32(packet, 1),
            get_f32(packet, 2),
            get_f32(packet, 3),
        ))
    }
}

/// Position, rotation and scale; absent components are `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransformPacket {
    pub position: Option<Vector3Packet>,
    pub rotation: Option<Vector3Packet>,
    pub scale: Option<Vector3Packet>,
}

impl Message for TransformPacket {
    fn schema() -> Arc<MessageSchema> {
        static SCHEMA: OnceLock<Arc<MessageSchema>> = OnceLock::new();
        Arc::clone(SCHEMA.get_or_init(|| {
            let vector = Vector3Packet::schema();
            build(
                MessageSchema::builder("Transform")
                    .field(field(1, "position", FieldKind::message(&vector)))
                    .field(field(2, "rotation", FieldKind::message(&vector)))
                    .field(field(3, "scale", FieldKind::message(&vector))),
            )
        }))
    }

    fn to_packet(&self) -> CodecResult<Packet> {
        let mut packet = Packet::new(&Self::schema());
        packet.set(1, message_value(self.position.as_ref())?)?;
        packet.set(2, message_value(self.rotation.as_ref())?)?;
        packet.set(3, message_value(self.scale.as_ref())?)?;
        Ok(packet)
    }

    fn from_packet(packet: &Packet) -> CodecResult<Self> {
        ensure_schema(packet, &Self::schema())?;
        Ok(Self {
            position: get_message(packet, 1)?,
            rotation: get_message(packet, 2)?,
            scale: get_message(packet, 3)?,
        })
    }
}
