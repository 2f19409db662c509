//! 128-bit GUID byte layouts.

use uuid::Uuid;

/// Encoded size of a GUID in bytes.
pub const GUID_LEN: usize = 16;

/// Byte layout used when a GUID is written to the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GuidLayout {
    /// First three fields little-endian, remaining 8 bytes as-is.
    #[default]
    Mixed,
    /// RFC-4122 network order: every field big-endian.
    Network,
}

/// Converts a GUID into its 16-byte representation for `layout`.
#[must_use]
pub fn guid_to_bytes(guid: Uuid, layout: GuidLayout) -> [u8; GUID_LEN] {
    match layout {
        GuidLayout::Mixed => guid.to_bytes_le(),
        GuidLayout::Network => *guid.as_bytes(),
    }
}

/// Rebuilds a GUID from its 16-byte representation for `layout`.
#[must_use]
pub fn guid_from_bytes(bytes: [u8; GUID_LEN], layout: GuidLayout) -> Uuid {
    match layout {
        GuidLayout::Mixed => Uuid::from_bytes_le(bytes),
        GuidLayout::Network => Uuid::from_bytes(bytes),
    }
}
