use codec::Message;
use demo_packets::{InventoryPacket, ItemPacket, PlayerPacket};
use primitives::Uuid;
use proptest::prelude::*;

fn player_strategy() -> impl Strategy<Value = PlayerPacket> {
    (
        ".{0,16}",
        any::<i32>(),
        any::<bool>(),
        any::<u128>(),
        any::<u32>(),
        prop_oneof![Just(0.0f32), -1.0e9f32..1.0e9f32],
    )
        .prop_map(|(name, health, is_alive, id, score, speed)| PlayerPacket {
            name,
            health,
            is_alive,
            id: Uuid::from_u128(id),
            score,
            speed,
        })
}

fn inventory_strategy() -> impl Strategy<Value = InventoryPacket> {
    let item = (any::<i32>(), "[a-z]{0,8}", any::<u32>()).prop_map(|(id, name, quantity)| {
        ItemPacket { id, name, quantity }
    });
    (any::<u128>(), prop::collection::vec(item, 0..8), any::<u32>()).prop_map(
        |(owner, items, capacity)| InventoryPacket {
            owner: Uuid::from_u128(owner),
            items,
            capacity,
        },
    )
}

proptest! {
    #[test]
    fn player_roundtrip(player in player_strategy()) {
        let bytes = player.to_vec().unwrap();
        prop_assert_eq!(bytes.len(), player.encoded_len().unwrap());
        let (decoded, read) = PlayerPacket::try_read(&bytes).unwrap();
        prop_assert_eq!(read, bytes.len());
        prop_assert_eq!(decoded, player);
    }

    #[test]
    fn inventory_roundtrip(inventory in inventory_strategy()) {
        let bytes = inventory.to_vec().unwrap();
        let (decoded, _) = InventoryPacket::try_read(&bytes).unwrap();
        prop_assert_eq!(decoded, inventory);
    }

    #[test]
    fn last_occurrence_wins(first in player_strategy(), second in player_strategy()) {
        // concatenating two encodings overrides every non-default field of the first
        let mut bytes = first.to_vec().unwrap();
        bytes.extend(second.to_vec().unwrap());
        let (decoded, _) = PlayerPacket::try_read(&bytes).unwrap();
        let expect_name = if second.name.is_empty() { &first.name } else { &second.name };
        prop_assert_eq!(&decoded.name, expect_name);
        let expect_score = if second.score == 0 { first.score } else { second.score };
        prop_assert_eq!(decoded.score, expect_score);
    }

    #[test]
    fn garbage_never_panics(bytes in prop::collection::vec(any::<u8>(), 0..128)) {
        let _ = PlayerPacket::try_read(&bytes);
        let _ = InventoryPacket::try_read(&bytes);
    }
}
