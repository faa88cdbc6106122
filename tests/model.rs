use std::collections::HashMap;

use chain_hash::HashTable;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Insert(Option<u8>, u32),
    Get(Option<u8>),
    Remove(Option<u8>),
    Entry(Option<u8>, u32),
    Reserve(u8),
    Clear,
}

fn key_strategy() -> impl Strategy<Value = Option<u8>> {
    prop_oneof![
        1 => Just(None),
        15 => (0u8..64).prop_map(Some),
    ]
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        40 => (key_strategy(), any::<u32>()).prop_map(|(k, v)| Op::Insert(k, v)),
        20 => key_strategy().prop_map(Op::Get),
        25 => key_strategy().prop_map(Op::Remove),
        10 => (key_strategy(), any::<u32>()).prop_map(|(k, v)| Op::Entry(k, v)),
        4 => any::<u8>().prop_map(Op::Reserve),
        1 => Just(Op::Clear),
    ]
}

fn insert(table: &mut HashTable<u8, u32>, key: Option<u8>, value: u32) -> Option<u32> {
    match key {
        Some(key) => table.insert(key, value),
        None => table.insert_null(value),
    }
}

fn get(table: &HashTable<u8, u32>, key: Option<u8>) -> Option<&u32> {
    match key {
        Some(key) => table.get(&key),
        None => table.get_null(),
    }
}

fn remove(table: &mut HashTable<u8, u32>, key: Option<u8>) -> Option<u32> {
    match key {
        Some(key) => table.remove(&key),
        None => table.remove_null(),
    }
}

fn run_model(initial_capacity: usize, ops: Vec<Op>) {
    let mut table = HashTable::with_capacity(initial_capacity);
    let mut model: HashMap<Option<u8>, u32> = HashMap::new();
    let mut capacity = table.capacity();

    for op in ops {
        match op {
            Op::Insert(key, value) => {
                assert_eq!(insert(&mut table, key, value), model.insert(key, value));
                assert_eq!(get(&table, key), Some(&value));
            }
            Op::Get(key) => assert_eq!(get(&table, key), model.get(&key)),
            Op::Remove(key) => {
                assert_eq!(remove(&mut table, key), model.remove(&key));
                assert_eq!(get(&table, key), None);
            }
            Op::Entry(key, value) => {
                let entry = match key {
                    Some(key) => table.entry(key),
                    None => table.null_entry(),
                };
                *entry.or_insert(0) ^= value;
                *model.entry(key).or_insert(0) ^= value;
            }
            Op::Reserve(additional) => table.reserve(additional as usize),
            Op::Clear => {
                table.clear();
                model.clear();
            }
        }

        assert_eq!(table.len(), model.len());
        assert_eq!(table.is_empty(), model.is_empty());

        // Capacity only ever grows, and only by doubling.
        let current = table.capacity();
        assert!(current >= capacity);
        assert!(current % capacity == 0 && (current / capacity).is_power_of_two());
        capacity = current;
    }

    let contents: HashMap<Option<u8>, u32> = table.iter().map(|(k, v)| (k.copied(), *v)).collect();
    assert_eq!(contents, model);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn table_matches_std_hash_map(ops in prop::collection::vec(op_strategy(), 0..400)) {
        run_model(16, ops);
    }

    #[test]
    fn any_initial_capacity_matches_std_hash_map(
        initial_capacity in 1usize..40,
        ops in prop::collection::vec(op_strategy(), 0..200),
    ) {
        run_model(initial_capacity, ops);
    }

    #[test]
    fn load_stays_below_threshold_after_inserts(
        keys in prop::collection::hash_set(any::<u32>(), 0..2000),
    ) {
        let mut table = HashTable::new();
        for (i, key) in keys.iter().enumerate() {
            table.insert(*key, i);
            prop_assert!(table.len() * 4 <= table.capacity() * 3 + 3);
        }
        prop_assert_eq!(table.len(), keys.len());
        for (i, key) in keys.iter().enumerate() {
            prop_assert_eq!(table.get(key), Some(&i));
        }
    }
}
