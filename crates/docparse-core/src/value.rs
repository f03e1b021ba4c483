use chrono::{DateTime, FixedOffset, NaiveDate};
use indexmap::IndexMap;
use serde_json::Value;

use crate::enumeration::EnumValue;
use crate::model::Model;
use crate::upload::UploadResource;

/// In-memory result of coercion, and the input to dump.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedValue {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Timestamp(DateTime<FixedOffset>),
    Date(NaiveDate),
    /// Untyped passthrough for fields declared as arbitrary JSON.
    Json(Value),
    List(Vec<TypedValue>),
    /// Map entries in wire order.
    Map(IndexMap<String, TypedValue>),
    Enum(EnumValue),
    Union(UnionValue),
    Model(Model),
    Upload(UploadResource),
}

/// A union member tagged with the variant that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct UnionValue {
    pub variant: &'static str,
    pub value: Box<TypedValue>,
}

impl UnionValue {
    pub fn new(variant: &'static str, value: TypedValue) -> Self {
        Self {
            variant,
            value: Box::new(value),
        }
    }
}

impl TypedValue {
    /// Short name of the value's kind, used in dump mismatch messages.
    pub fn kind(&self) -> &'static str {
        match self {
            TypedValue::String(_) => "string",
            TypedValue::Int(_) => "integer",
            TypedValue::Float(_) => "float",
            TypedValue::Bool(_) => "boolean",
            TypedValue::Timestamp(_) => "timestamp",
            TypedValue::Date(_) => "date",
            TypedValue::Json(_) => "json",
            TypedValue::List(_) => "list",
            TypedValue::Map(_) => "map",
            TypedValue::Enum(_) => "enum",
            TypedValue::Union(_) => "union",
            TypedValue::Model(_) => "model",
            TypedValue::Upload(_) => "upload",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            TypedValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_model(&self) -> Option<&Model> {
        match self {
            TypedValue::Model(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[TypedValue]> {
        match self {
            TypedValue::List(items) => Some(items),
            _ => None,
        }
    }
}
