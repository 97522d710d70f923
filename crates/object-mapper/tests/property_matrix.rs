use std::sync::Arc;
use std::thread;

use object_mapper::{obj, MappingEntry, MappingSet};
use proptest::prelude::*;
use serde_json::{json, Value};

fn json_strategy() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| json!(n)),
        "[a-z]{0,6}".prop_map(Value::String),
    ];
    leaf.prop_recursive(4, 32, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map("[a-z]{1,4}", inner, 0..4)
                .prop_map(|map| Value::Object(map.into_iter().collect())),
        ]
    })
}

proptest! {
    #[test]
    fn root_mapping_is_identity(value in json_strategy()) {
        let set = MappingSet::register([MappingEntry::new(obj(), obj())], None).unwrap();
        prop_assert_eq!(set.map(&value).unwrap(), value.clone());
        prop_assert_eq!(set.reverse_map(&value).unwrap(), value);
    }

    #[test]
    fn covered_values_round_trip(value in json_strategy(), index in 0usize..6) {
        let set = MappingSet::register(
            [MappingEntry::new(obj().key("payload"), obj().index(index as i64).key("at"))],
            None,
        )
        .unwrap();
        let input = json!({"payload": value});
        let mapped = set.map(&input).unwrap();
        let Value::Array(items) = &mapped else {
            panic!("expected a sequence, got {mapped}");
        };
        prop_assert_eq!(items.len(), index + 1);
        prop_assert!(items[..index].iter().all(Value::is_null));
        prop_assert_eq!(set.reverse_map(&mapped).unwrap(), input);
    }
}

#[test]
fn shared_set_maps_concurrently() {
    let set = Arc::new(
        MappingSet::register(
            [
                MappingEntry::new(obj().key("n"), obj().index(0)),
                MappingEntry::new(obj().key("tag"), obj().index(1).key("tag")),
            ],
            None,
        )
        .unwrap(),
    );

    thread::scope(|scope| {
        for worker in 0..8i64 {
            let set = Arc::clone(&set);
            scope.spawn(move || {
                for round in 0..100 {
                    let n = worker * 1000 + round;
                    let input = json!({"n": n, "tag": format!("w{worker}")});
                    let mapped = set.map(&input).unwrap();
                    assert_eq!(mapped, json!([n, {"tag": format!("w{worker}")}]));
                    assert_eq!(set.reverse_map(&mapped).unwrap(), input);
                }
            });
        }
    });
}
