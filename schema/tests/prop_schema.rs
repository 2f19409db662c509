use proptest::prelude::*;
use schema::{FieldDef, FieldKind, FieldNumber, MessageSchema, SchemaError};

fn kind_strategy() -> impl Strategy<Value = FieldKind> {
    prop_oneof![
        Just(FieldKind::Bool),
        Just(FieldKind::Int32),
        Just(FieldKind::UInt32),
        Just(FieldKind::Float32),
        Just(FieldKind::String),
        Just(FieldKind::Guid),
    ]
}

fn fields_from(numbers: &[u32], kinds: &[FieldKind]) -> Vec<FieldDef> {
    numbers
        .iter()
        .zip(kinds)
        .map(|(n, k)| FieldDef::new(FieldNumber::new(*n).unwrap(), format!("f{n}"), k.clone()))
        .collect()
}

proptest! {
    #[test]
    fn unique_numbers_always_build(
        numbers in prop::collection::hash_set(1u32..10_000, 0..24),
        kinds in prop::collection::vec(kind_strategy(), 24),
    ) {
        let numbers: Vec<u32> = numbers.into_iter().collect();
        let schema = MessageSchema::new("M", fields_from(&numbers, &kinds)).unwrap();
        prop_assert_eq!(schema.len(), numbers.len());
        for (index, number) in numbers.iter().enumerate() {
            prop_assert_eq!(schema.index_of(*number), Some(index));
        }
    }

    #[test]
    fn duplicate_number_is_rejected(
        number in 1u32..10_000,
        kinds in prop::collection::vec(kind_strategy(), 2),
    ) {
        let fields = vec![
            FieldDef::new(FieldNumber::new(number).unwrap(), "a", kinds[0].clone()),
            FieldDef::new(FieldNumber::new(number).unwrap(), "b", kinds[1].clone()),
        ];
        let err = MessageSchema::new("M", fields).unwrap_err();
        let is_duplicate = matches!(err, SchemaError::DuplicateFieldNumber { .. });
        prop_assert!(is_duplicate);
    }

    #[test]
    fn hash_is_deterministic(
        numbers in prop::collection::hash_set(1u32..10_000, 0..12),
        kinds in prop::collection::vec(kind_strategy(), 12),
    ) {
        let numbers: Vec<u32> = numbers.into_iter().collect();
        let a = MessageSchema::new("M", fields_from(&numbers, &kinds)).unwrap();
        let b = MessageSchema::new("M", fields_from(&numbers, &kinds)).unwrap();
        prop_assert_eq!(a.hash(), b.hash());
    }
}
