use docparse_core::{CoerceState, Field, Model, TypedValue, UploadResource};
use docparse_models::{JobStatus, PageRange, ParseOptions, ParseRequest, ParseResponse, registry};
use docparse_request::{
    DiagnosticCode, RequestOptions, ResponseError, RetryPolicy, build_body, parse_response,
    parse_response_model, prepare_model, prepare_request,
};
use pretty_assertions::assert_eq;
use serde_json::{Map, json};

#[test]
fn extra_body_overrides_dumped_keys() {
    let request = ParseRequest::from_url("https://docs.example/a.pdf").with_options(ParseOptions::default());
    let options = RequestOptions::default()
        .with_extra("options", json!({"beta_layout": true}))
        .with_extra("trace_id", json!("t-1"));

    let prepared = prepare_request(&request, &options, &RetryPolicy::default()).unwrap();
    assert_eq!(
        prepared.body.json,
        json!({
            "document_url": "https://docs.example/a.pdf",
            "options": {"beta_layout": true},
            "trace_id": "t-1"
        })
    );
    assert_eq!(prepared.max_retries, 2);
}

#[test]
fn extra_body_does_not_affect_retry_safety() {
    let body = build_body(
        &ParseRequest::from_upload(UploadResource::from_bytes(vec![1, 2])),
        &Map::new(),
    )
    .unwrap();
    assert!(body.can_retry);
    assert_eq!(body.uploads.len(), 1);
}

#[test]
fn dump_failure_carries_diagnostics() {
    let mut opts = ParseOptions::default();
    opts.page_range = Field::Value(PageRange::default());
    let request = ParseRequest::from_url("u").with_options(opts);

    let err = prepare_request(&request, &RequestOptions::default(), &RetryPolicy::default()).unwrap_err();
    assert_eq!(
        err.to_string(),
        "failed to build request body: missing required field `options.page_range.start`"
    );
    let diags = err.diagnostics();
    assert_eq!(diags[0].code, DiagnosticCode::MissingRequiredField);
    assert_eq!(diags[0].path.as_deref(), Some("options.page_range.start"));
}

#[test]
fn resending_a_consumed_upload_is_rejected() {
    let request = ParseRequest::from_upload(UploadResource::from_reader(std::io::Cursor::new(vec![9u8])));
    prepare_request(&request, &RequestOptions::default(), &RetryPolicy::default()).unwrap();

    let err = prepare_request(&request, &RequestOptions::default(), &RetryPolicy::default()).unwrap_err();
    assert_eq!(err.diagnostics()[0].code, DiagnosticCode::UnresumableResource);
    assert_eq!(err.diagnostics()[0].path.as_deref(), Some("file"));
}

#[test]
fn untyped_models_prepare_the_same_way() {
    let schema = registry().get("ParseRequest").unwrap();
    let model = Model::new(schema)
        .with("documentUrl", Field::Value(TypedValue::String("https://x.example".into())))
        .unwrap();
    let prepared = prepare_model(&model, &RequestOptions::default(), &RetryPolicy::default()).unwrap();
    assert_eq!(prepared.body.json, json!({"document_url": "https://x.example"}));
    assert_eq!(prepared.max_retries, 2);
}

#[test]
fn response_bytes_coerce_to_typed_model() {
    let bytes = br#"{"job_id": "j1", "status": "processing", "result": null, "extra": 1}"#;
    let response: ParseResponse = parse_response(bytes).unwrap();
    assert_eq!(response.status.value().and_then(|s| s.known()), Some(JobStatus::Processing));
    assert_eq!(response.result, Field::Null);
}

#[test]
fn invalid_json_response_is_distinguished() {
    let err = parse_response::<ParseResponse>(b"<html>502</html>").unwrap_err();
    assert!(matches!(err, ResponseError::InvalidJson(_)));
    assert_eq!(err.diagnostics()[0].code, DiagnosticCode::InvalidJson);
    assert_eq!(err.diagnostics()[0].path, None);
}

#[test]
fn union_failures_flatten_into_tagged_diagnostics() {
    let bytes = br#"{"job_id": "j", "status": "completed", "result": {"type": "full"}}"#;
    let err = parse_response::<ParseResponse>(bytes).unwrap_err();

    let diags = err.diagnostics();
    let summary: Vec<(DiagnosticCode, Option<&str>, Option<&str>)> = diags
        .iter()
        .map(|d| (d.code, d.variant.as_deref(), d.path.as_deref()))
        .collect();
    assert_eq!(
        summary,
        [
            (DiagnosticCode::UnionExhausted, None, Some("result")),
            (DiagnosticCode::MissingRequiredField, Some("full"), Some("result.chunks")),
            (DiagnosticCode::MissingRequiredField, Some("url"), Some("result.url")),
        ]
    );

    let json = serde_json::to_value(&diags[1]).unwrap();
    assert_eq!(
        json,
        json!({
            "code": "missing_required_field",
            "path": "result.chunks",
            "variant": "full",
            "message": "missing required field `result.chunks`"
        })
    );
}

#[test]
fn runtime_schema_lookup_parses_responses() {
    let schema = registry().get("ParseUsage").unwrap();
    let model = parse_response_model(schema, br#"{"num_pages": 4, "credits": null}"#).unwrap();
    assert_eq!(model.get("numPages"), Some(&Field::Value(TypedValue::Int(4))));
    assert_eq!(model.get("credits"), Some(&Field::Null));

    let direct = Model::coerce(schema, &json!({"num_pages": 4, "credits": null}), &mut CoerceState::new()).unwrap();
    assert_eq!(model, direct);
}

#[test]
fn failed_build_leaves_stream_unread() {
    let upload = UploadResource::from_reader(std::io::Cursor::new(b"%PDF".to_vec()));
    let broken_range = PageRange {
        start: Field::Unset,
        end: Field::Value(3),
    };
    let request = ParseRequest::from_upload(upload.clone())
        .with_options(ParseOptions::default().with_page_range(broken_range));

    let err = prepare_request(&request, &RequestOptions::default(), &RetryPolicy::default()).unwrap_err();
    assert_eq!(err.diagnostics()[0].path.as_deref(), Some("options.page_range.start"));
    assert!(!upload.is_consumed());

    let fixed = request.with_options(ParseOptions::default().with_page_range(PageRange::new(1).with_end(3)));
    let prepared = prepare_request(&fixed, &RequestOptions::default(), &RetryPolicy::default()).unwrap();
    assert_eq!(prepared.body.uploads.len(), 1);
    assert_eq!(&*prepared.body.uploads[0].bytes, b"%PDF");
    assert_eq!(prepared.max_retries, 0);
    assert!(upload.is_consumed());
}
