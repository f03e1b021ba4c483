//! Conversions between [`TypedValue`] and plain Rust types.
//!
//! These let model structs use ordinary field types (`String`, `Vec<T>`,
//! `OpenEnum<E>`, ...) while the converters work on [`TypedValue`] trees.

use chrono::{DateTime, FixedOffset, NaiveDate};
use indexmap::IndexMap;
use serde_json::Value;

use crate::enumeration::{OpenEnum, WireEnum};
use crate::error::ConvertError;
use crate::model::{Model, ModelType};
use crate::path::FieldPath;
use crate::upload::UploadResource;
use crate::value::TypedValue;

pub trait FromTyped: Sized {
    fn from_typed(value: TypedValue, path: &FieldPath) -> Result<Self, ConvertError>;
}

pub trait IntoTyped {
    fn into_typed(self) -> Result<TypedValue, ConvertError>;
}

fn unexpected(path: &FieldPath, expected: &str, value: &TypedValue) -> ConvertError {
    ConvertError::TypeMismatch {
        path: path.clone(),
        expected: expected.to_string(),
        actual: value.kind().to_string(),
    }
}

macro_rules! scalar {
    ($ty:ty, $variant:ident, $expected:literal) => {
        impl FromTyped for $ty {
            fn from_typed(value: TypedValue, path: &FieldPath) -> Result<Self, ConvertError> {
                match value {
                    TypedValue::$variant(v) => Ok(v),
                    other => Err(unexpected(path, $expected, &other)),
                }
            }
        }

        impl IntoTyped for $ty {
            fn into_typed(self) -> Result<TypedValue, ConvertError> {
                Ok(TypedValue::$variant(self))
            }
        }
    };
}

scalar!(String, String, "string");
scalar!(i64, Int, "integer");
scalar!(f64, Float, "float");
scalar!(bool, Bool, "boolean");
scalar!(DateTime<FixedOffset>, Timestamp, "timestamp");
scalar!(NaiveDate, Date, "date");
scalar!(Value, Json, "json");
scalar!(Model, Model, "model");
scalar!(UploadResource, Upload, "upload");

impl IntoTyped for &str {
    fn into_typed(self) -> Result<TypedValue, ConvertError> {
        Ok(TypedValue::String(self.to_string()))
    }
}

impl<T: FromTyped> FromTyped for Vec<T> {
    fn from_typed(value: TypedValue, path: &FieldPath) -> Result<Self, ConvertError> {
        match value {
            TypedValue::List(items) => items
                .into_iter()
                .enumerate()
                .map(|(i, item)| T::from_typed(item, &path.child(i)))
                .collect(),
            other => Err(unexpected(path, "list", &other)),
        }
    }
}

impl<T: IntoTyped> IntoTyped for Vec<T> {
    fn into_typed(self) -> Result<TypedValue, ConvertError> {
        self.into_iter()
            .map(IntoTyped::into_typed)
            .collect::<Result<Vec<_>, _>>()
            .map(TypedValue::List)
    }
}

impl<T: FromTyped> FromTyped for IndexMap<String, T> {
    fn from_typed(value: TypedValue, path: &FieldPath) -> Result<Self, ConvertError> {
        match value {
            TypedValue::Map(entries) => entries
                .into_iter()
                .map(|(k, v)| {
                    let item = T::from_typed(v, &path.child(k.as_str()))?;
                    Ok::<_, ConvertError>((k, item))
                })
                .collect(),
            other => Err(unexpected(path, "map", &other)),
        }
    }
}

impl<T: IntoTyped> IntoTyped for IndexMap<String, T> {
    fn into_typed(self) -> Result<TypedValue, ConvertError> {
        self.into_iter()
            .map(|(k, v)| Ok::<_, ConvertError>((k, v.into_typed()?)))
            .collect::<Result<IndexMap<_, _>, ConvertError>>()
            .map(TypedValue::Map)
    }
}

impl<E: WireEnum> FromTyped for OpenEnum<E> {
    fn from_typed(value: TypedValue, path: &FieldPath) -> Result<Self, ConvertError> {
        match value {
            TypedValue::Enum(e) => Ok(OpenEnum::from_enum_value(e)),
            other => Err(unexpected(path, E::NAME, &other)),
        }
    }
}

impl<E: WireEnum> IntoTyped for OpenEnum<E> {
    fn into_typed(self) -> Result<TypedValue, ConvertError> {
        Ok(TypedValue::Enum(self.into_enum_value()))
    }
}

/// `FromTyped` body for model structs.
pub fn model_from_typed<T: ModelType>(value: TypedValue, path: &FieldPath) -> Result<T, ConvertError> {
    match value {
        TypedValue::Model(model) if model.schema().name() == T::schema().name() => T::from_model(model),
        other => Err(unexpected(path, T::schema().name(), &other)),
    }
}

/// `IntoTyped` body for model structs.
pub fn model_into_typed<T: ModelType>(model: &T) -> Result<TypedValue, ConvertError> {
    model.to_model().map(TypedValue::Model)
}
