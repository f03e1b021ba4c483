mod common;

use docparse_core::{CoerceState, DumpState, Model};
use proptest::prelude::*;
use serde_json::{json, Map, Value};

fn arb_record() -> impl Strategy<Value = Value> {
    (
        "[a-z0-9]{1,12}",
        prop::option::of(prop_oneof![Just("text".to_string()), Just("table".to_string()), "[A-Z_]{1,10}"]),
        prop::option::of(prop::option::of(0i64..10_000)),
        prop::option::of(-1.0e6f64..1.0e6),
        prop::option::of(prop::collection::vec("[ -~]{0,8}", 0..6)),
        prop::option::of(prop::collection::vec(("[a-z]{1,6}", "[a-z]{0,6}"), 0..6)),
        prop::option::of(prop::collection::vec("[a-z]{0,5}", 0..4)),
    )
        .prop_map(|(id, kind, pages, score, tags, labels, leaves)| {
            let mut obj = Map::new();
            obj.insert("record_id".into(), json!(id));
            if let Some(kind) = kind {
                obj.insert("kind".into(), json!(kind));
            }
            if let Some(pages) = pages {
                obj.insert("page_count".into(), json!(pages));
            }
            obj.insert("score".into(), score.map_or(Value::Null, |s| json!(s)));
            if let Some(tags) = tags {
                obj.insert("tags".into(), json!(tags));
            }
            if let Some(labels) = labels {
                let map: Map<String, Value> = labels.into_iter().map(|(k, v)| (k, json!(v))).collect();
                obj.insert("labels".into(), Value::Object(map));
            }
            if let Some(leaves) = leaves {
                let leaves: Vec<Value> = leaves.into_iter().map(|c| json!({"c": c})).collect();
                obj.insert("leaves".into(), json!(leaves));
            }
            Value::Object(obj)
        })
}

proptest! {
    #[test]
    fn coerce_of_dump_is_identity(wire in arb_record()) {
        let first = Model::coerce(common::record(), &wire, &mut CoerceState::new()).unwrap();
        let dumped = first.dump(&mut DumpState::new()).unwrap();
        let second = Model::coerce(common::record(), &dumped, &mut CoerceState::new()).unwrap();
        prop_assert_eq!(&first, &second);
        // Everything in the generated input is declared, so nothing is lost.
        prop_assert_eq!(dumped, wire);
    }

    #[test]
    fn list_order_and_map_keys_survive(tags in prop::collection::vec("[a-z]{0,4}", 0..10),
                                       keys in prop::collection::vec("[a-z]{1,4}", 0..10)) {
        let labels: Map<String, Value> = keys.iter().map(|k| (k.clone(), json!(k))).collect();
        let wire = json!({"record_id": "r", "score": 1.0, "tags": tags, "labels": labels});
        let model = Model::coerce(common::record(), &wire, &mut CoerceState::new()).unwrap();
        let out = model.dump(&mut DumpState::new()).unwrap();

        prop_assert_eq!(&out["tags"], &json!(tags));
        let in_keys: Vec<&String> = labels.keys().collect();
        let out_keys: Vec<&String> = out["labels"].as_object().unwrap().keys().collect();
        prop_assert_eq!(in_keys, out_keys);
    }
}
