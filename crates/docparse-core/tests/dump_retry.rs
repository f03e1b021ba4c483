mod common;

use std::io::{self, Read};

use docparse_core::{ConvertError, DumpState, Field, Model, TypedValue, UploadResource};
use pretty_assertions::assert_eq;
use serde_json::json;

fn body_with(upload: UploadResource) -> Model {
    Model::new(common::upload_body())
        .with("file", Field::Value(TypedValue::Upload(upload)))
        .unwrap()
        .with("note", Field::Value(TypedValue::String("scan".into())))
        .unwrap()
}

#[test]
fn body_without_upload_stays_retryable() {
    let body = Model::new(common::upload_body())
        .with("note", Field::Value(TypedValue::String("hi".into())))
        .unwrap();
    let mut state = DumpState::new();
    let out = body.dump(&mut state).unwrap();

    assert_eq!(out, json!({"note": "hi"}));
    assert!(state.can_retry());
    assert!(state.uploads().is_empty());
}

#[test]
fn streamed_upload_disables_retry_and_records_part() {
    let upload = UploadResource::from_reader(io::Cursor::new(b"%PDF-1.7".to_vec()))
        .with_filename("scan.pdf")
        .with_content_type("application/pdf");
    let body = body_with(upload.clone());

    let mut state = DumpState::new();
    let out = body.dump(&mut state).unwrap();

    assert_eq!(out, json!({"file": "scan.pdf", "note": "scan"}));
    assert!(!state.can_retry());
    assert!(upload.is_consumed());

    let (can_retry, parts) = state.finish();
    assert!(!can_retry);
    assert_eq!(parts.len(), 1);
    assert_eq!(parts[0].path, "file");
    assert_eq!(parts[0].filename, "scan.pdf");
    assert_eq!(parts[0].content_type.as_deref(), Some("application/pdf"));
    assert_eq!(&*parts[0].bytes, b"%PDF-1.7");
}

#[test]
fn nested_upload_flag_bubbles_to_the_root() {
    let inner = body_with(UploadResource::from_reader(io::Cursor::new(vec![1, 2, 3])));
    let outer = Model::new(common::envelope())
        .with("payload", Field::Value(TypedValue::Model(inner)))
        .unwrap();

    let mut state = DumpState::new();
    let out = outer.dump(&mut state).unwrap();

    assert_eq!(out["payload"]["file"], json!("upload"));
    assert!(!state.can_retry());
    assert_eq!(state.uploads()[0].path, "payload.file");
}

#[test]
fn redumping_a_consumed_stream_fails() {
    let body = body_with(UploadResource::from_reader(io::Cursor::new(vec![0u8; 4])));
    body.dump(&mut DumpState::new()).unwrap();

    let err = body.dump(&mut DumpState::new()).unwrap_err();
    assert_eq!(
        err,
        ConvertError::UnresumableResource {
            path: docparse_core::FieldPath::root().child("file"),
        }
    );
}

#[test]
fn buffered_upload_is_replayable() {
    let upload = UploadResource::from_bytes(b"hello".to_vec()).with_filename("a.txt");
    assert!(upload.is_replayable());
    let body = body_with(upload);

    for _ in 0..2 {
        let mut state = DumpState::new();
        body.dump(&mut state).unwrap();
        assert!(state.can_retry());
        assert_eq!(&*state.uploads()[0].bytes, b"hello");
    }
}

struct Broken;

impl Read for Broken {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::other("disk on fire"))
    }
}

#[test]
fn read_failure_is_reported_and_still_blocks_retry() {
    let body = body_with(UploadResource::from_reader(Broken));
    let mut state = DumpState::new();
    let err = body.dump(&mut state).unwrap_err();

    assert!(matches!(err, ConvertError::ResourceRead { .. }));
    assert!(err.to_string().contains("disk on fire"));
    assert!(!state.can_retry());
}

#[test]
fn uploads_are_never_coerced_from_the_wire() {
    let err = Model::coerce(
        common::upload_body(),
        &json!({"file": "scan.pdf"}),
        &mut docparse_core::CoerceState::new(),
    )
    .unwrap_err();
    assert_eq!(err.path().to_string(), "file");
}

#[test]
fn mismatch_after_upload_does_not_read_stream() {
    let upload = UploadResource::from_reader(io::Cursor::new(b"abc".to_vec()));
    let body = Model::new(common::upload_body())
        .with("file", Field::Value(TypedValue::Upload(upload.clone())))
        .unwrap()
        .with("note", Field::Value(TypedValue::Int(7)))
        .unwrap();

    let mut state = DumpState::new();
    let err = body.dump(&mut state).unwrap_err();
    assert_eq!(err.path().to_string(), "note");
    assert!(!upload.is_consumed());
    assert!(state.can_retry());
    assert!(state.uploads().is_empty());

    let fixed = body.with("note", Field::Value(TypedValue::String("ok".into()))).unwrap();
    let mut state = DumpState::new();
    assert_eq!(fixed.dump(&mut state).unwrap(), json!({"file": "upload", "note": "ok"}));
    assert!(upload.is_consumed());
    assert!(!state.can_retry());
}

#[test]
fn nested_failure_leaves_stream_unread() {
    let inner = Model::new(common::upload_body())
        .with("file", Field::Value(TypedValue::Upload(UploadResource::from_reader(io::Cursor::new(vec![1u8])))))
        .unwrap()
        .with("note", Field::Null)
        .unwrap();
    let Some(Field::Value(TypedValue::Upload(upload))) = inner.get("file").cloned() else {
        panic!("upload cell missing");
    };
    let envelope = Model::new(common::envelope())
        .with("payload", Field::Value(TypedValue::Model(inner)))
        .unwrap();

    let err = envelope.dump(&mut DumpState::new()).unwrap_err();
    assert!(matches!(err, ConvertError::UnexpectedNull { .. }));
    assert_eq!(err.path().to_string(), "payload.note");
    assert!(!upload.is_consumed());
}
