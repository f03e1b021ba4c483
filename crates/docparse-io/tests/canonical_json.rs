use docparse_io::canonical_json::{canonical_model_json, canonicalize_value, model_to_canonical_json};
use docparse_io::prelude::*;
use serde_json::json;

#[test]
fn keys_are_sorted_deeply_and_arrays_kept() {
    let v = json!({"b": 1, "a": {"z": [3, {"y": 1, "x": 2}], "c": null}});
    assert_eq!(
        canonicalize_value(v).to_string(),
        r#"{"a":{"c":null,"z":[3,{"x":2,"y":1}]},"b":1}"#
    );
}

#[test]
fn canonical_form_ignores_wire_order() {
    let a = json!({"job_id": "j", "status": "completed", "result": null});
    let b = json!({"result": null, "job_id": "j", "status": "completed"});
    assert_eq!(canonicalize_value(a).to_string(), canonicalize_value(b).to_string());
}

#[test]
fn model_canonical_form_sorts_dumped_keys() {
    let range = PageRange::new(1).with_end(9);
    assert_eq!(model_to_canonical_json(&range).unwrap(), r#"{"end":9,"start":1}"#);
}

#[test]
fn untyped_and_typed_canonical_forms_agree() {
    let range = PageRange::new(2).with_end(5);
    let model = range.to_model().unwrap();
    assert_eq!(canonical_model_json(&model).unwrap(), model_to_canonical_json(&range).unwrap());
}
