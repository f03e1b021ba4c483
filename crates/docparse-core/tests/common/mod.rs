#![allow(dead_code)]

use docparse_core::{Converter, EnumLiteral, FieldSchema, ModelSchema, WireEnum};
use once_cell::sync::Lazy;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Text,
    Table,
}

impl WireEnum for Kind {
    const NAME: &'static str = "Kind";

    fn members() -> &'static [Self] {
        &[Kind::Text, Kind::Table]
    }

    fn literal(self) -> EnumLiteral {
        match self {
            Kind::Text => "text".into(),
            Kind::Table => "table".into(),
        }
    }
}

static LEAF: Lazy<ModelSchema> = Lazy::new(|| {
    ModelSchema::new("Leaf", vec![FieldSchema::new("c", Converter::string()).required()])
});

pub fn leaf() -> &'static ModelSchema {
    &LEAF
}

/// `{"a": int, "b": [int | Leaf]}`
static MIXED: Lazy<ModelSchema> = Lazy::new(|| {
    ModelSchema::new(
        "Mixed",
        vec![
            FieldSchema::new("a", Converter::int()).required(),
            FieldSchema::new(
                "b",
                Converter::list_of(Converter::union_of(
                    "Item",
                    vec![("int", Converter::int()), ("leaf", Converter::Model(leaf))],
                )),
            ),
        ],
    )
});

pub fn mixed() -> &'static ModelSchema {
    &MIXED
}

/// A record exercising every field flavour.
static RECORD: Lazy<ModelSchema> = Lazy::new(|| {
    ModelSchema::new(
        "Record",
        vec![
            FieldSchema::renamed("recordId", "record_id", Converter::string()).required(),
            FieldSchema::new("kind", Converter::enum_of::<Kind>()),
            FieldSchema::renamed("pageCount", "page_count", Converter::int()).nullable(),
            FieldSchema::new("score", Converter::float()).required().nullable(),
            FieldSchema::renamed("createdAt", "created_at", Converter::timestamp()),
            FieldSchema::new("tags", Converter::list_of(Converter::string())),
            FieldSchema::new("labels", Converter::map_of(Converter::string())),
            FieldSchema::new("leaves", Converter::list_of(Converter::Model(leaf))),
            FieldSchema::new("extra", Converter::json()),
        ],
    )
});

pub fn record() -> &'static ModelSchema {
    &RECORD
}

/// Request body with an upload slot.
static UPLOAD_BODY: Lazy<ModelSchema> = Lazy::new(|| {
    ModelSchema::new(
        "UploadBody",
        vec![
            FieldSchema::new("file", Converter::Upload),
            FieldSchema::new("note", Converter::string()),
        ],
    )
});

pub fn upload_body() -> &'static ModelSchema {
    &UPLOAD_BODY
}

/// Wrapper holding an upload body one level down.
static ENVELOPE: Lazy<ModelSchema> = Lazy::new(|| {
    ModelSchema::new(
        "Envelope",
        vec![FieldSchema::new("payload", Converter::Model(upload_body)).required()],
    )
});

pub fn envelope() -> &'static ModelSchema {
    &ENVELOPE
}
