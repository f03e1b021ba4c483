use docparse_io::model_json::{ModelJsonError, parse_model_json, parse_model_json_str};
use docparse_io::prelude::*;
use pretty_assertions::assert_eq;

#[test]
fn lists_every_missing_top_level_field() {
    let err = parse_model_json_str::<ParseResponse>(r#"{"status": "pending"}"#).unwrap_err();
    assert!(matches!(err, ModelJsonError::MissingRequiredTopLevelFields { .. }));
    assert_eq!(
        err.to_string(),
        "Invalid ParseResponse JSON: missing required top-level field(s): job_id, result. \
         Required top-level fields: job_id, status, result."
    );
}

#[test]
fn invalid_json_keeps_serde_message() {
    let err = parse_model_json_str::<ParseUsage>("{not json").unwrap_err();
    assert!(matches!(err, ModelJsonError::InvalidJson(_)));
    assert!(err.to_string().starts_with("Invalid JSON: "));
}

#[test]
fn non_object_reports_shape() {
    let err = parse_model_json_str::<ParseUsage>("[1, 2]").unwrap_err();
    assert_eq!(err.to_string(), "Invalid ParseUsage JSON: expected an object, found array.");
}

#[test]
fn nested_failures_come_from_the_engine() {
    let err = parse_model_json_str::<ParseUsage>(r#"{"num_pages": "two"}"#).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Invalid ParseUsage JSON: expected integer at `num_pages`, found string."
    );
    assert!(err.convert_error().is_some());
}

#[test]
fn untyped_parse_uses_registry_schema() {
    let schema = registry().get("PageRange").unwrap();
    let model = parse_model_json(schema, r#"{"start": 3}"#).unwrap();
    assert_eq!(model.get("start"), Some(&Field::Value(TypedValue::Int(3))));
    assert_eq!(model.get("end"), Some(&Field::Unset));
}

#[test]
fn missing_fields_become_one_diagnostic_each() {
    let err = parse_model_json_str::<ParseResponse>("{}").unwrap_err();
    let paths: Vec<Option<String>> = err.diagnostics().into_iter().map(|d| d.path).collect();
    assert_eq!(
        paths,
        [Some("job_id".to_string()), Some("status".to_string()), Some("result".to_string())]
    );
}
