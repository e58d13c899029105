use jsonhash::constants::LOAD_FACTOR;
use jsonhash::{HashTable, Value};
use rstest::rstest;

fn int(n: i64) -> Value {
    Value::from(n)
}

#[rstest]
fn thirteen_keys_trigger_one_resize_at_the_twelfth() {
    let mut table = HashTable::new();
    let mut capacities = Vec::new();
    for n in 0..13 {
        table.set(format!("field_{n}"), int(n));
        capacities.push(table.capacity());
    }
    assert_eq!(&capacities[..11], &[16; 11]);
    assert_eq!(&capacities[11..], &[32, 32]);
    assert_eq!(table.len(), 13);
}

#[rstest]
fn absent_lookup_is_not_an_error() {
    let table: HashTable = [("here", Value::TRUE)].into_iter().collect();
    assert_eq!(table.get("there"), None);
    assert_eq!(table.len(), 1);
}

#[rstest]
fn reinsert_updates_value_without_growing() {
    let mut table = HashTable::new();
    for n in 0..50 {
        table.set(format!("k{n}"), int(n));
    }
    let capacity = table.capacity();
    for n in 0..50 {
        let previous = table.set(format!("k{n}"), int(n * 10));
        assert_eq!(previous, Some(int(n)));
    }
    assert_eq!(table.len(), 50);
    assert_eq!(table.capacity(), capacity);
    for n in 0..50 {
        assert_eq!(table.get(&format!("k{n}")), Some(&int(n * 10)));
    }
}

#[rstest]
#[case(1)]
#[case(12)]
#[case(13)]
#[case(24)]
#[case(97)]
#[case(4096)]
fn unique_insertions_survive_resizes(#[case] count: i64) {
    let mut table = HashTable::new();
    for n in 0..count {
        table.set(format!("user:{n}:name"), Value::from(format!("name {n}")));
        assert!((table.len() as f64 / table.capacity() as f64) < LOAD_FACTOR);
    }
    assert_eq!(table.len() as i64, count);
    assert_eq!(table.iter().count() as i64, count);
    for n in 0..count {
        assert_eq!(
            table.get(&format!("user:{n}:name")).and_then(Value::as_str),
            Some(format!("name {n}").as_str())
        );
    }
}

#[rstest]
fn capacity_never_shrinks() {
    let mut table = HashTable::with_capacity(4);
    let mut last = table.capacity();
    for n in 0..200 {
        table.set(format!("{n}"), Value::NULL);
        assert!(table.capacity() >= last);
        last = table.capacity();
    }
}

#[rstest]
fn equality_is_order_independent() {
    let forward: HashTable = (0..40).map(|n| (format!("{n}"), int(n))).collect();
    let backward: HashTable = (0..40).rev().map(|n| (format!("{n}"), int(n))).collect();
    assert_eq!(forward, backward);

    let mut sized = HashTable::with_capacity(1024);
    sized.extend((0..40).map(|n| (format!("{n}"), int(n))));
    assert_eq!(forward, sized);
}

#[rstest]
fn iteration_visits_every_entry_once() {
    let table: HashTable = (0..100).map(|n| (format!("key-{n}"), int(n))).collect();
    let mut seen: Vec<i64> = table.values().filter_map(Value::as_i64).collect();
    seen.sort_unstable();
    assert_eq!(seen, (0..100).collect::<Vec<_>>());
}

#[rstest]
fn serializes_as_json_object() {
    let table: HashTable = [("a", int(1)), ("b", Value::from("two"))]
        .into_iter()
        .collect();
    let json = serde_json::to_value(&table).unwrap();
    assert_eq!(json, serde_json::json!({"a": 1, "b": "two"}));
}
