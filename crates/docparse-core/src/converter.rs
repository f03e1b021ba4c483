//! The converter family: one variant per wire shape.
//!
//! Every converter implements the same pair of operations:
//! - `coerce(wire, state) -> TypedValue`
//! - `dump(typed, state) -> wire`
//!
//! Containers push the element index or key onto the state's path before
//! recursing, so failures report exactly where they happened.

use indexmap::IndexMap;
use serde_json::{Map, Number, Value};

use crate::enumeration::{EnumSet, WireEnum};
use crate::error::{ConvertError, VariantFailure};
use crate::model::{Model, ModelType};
use crate::schema::ModelRef;
use crate::state::{CoerceState, DumpState, Traversal};
use crate::timestamp::{format_date, format_timestamp, parse_date, parse_timestamp};
use crate::value::{TypedValue, UnionValue};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    String,
    Int,
    Float,
    Bool,
    /// ISO-8601 date-time string.
    Timestamp,
    /// `YYYY-MM-DD` string.
    Date,
    /// Any JSON value, kept untyped. The only converter that accepts `null`
    /// outside of a nullable field.
    Json,
}

impl Primitive {
    fn describe(self) -> &'static str {
        match self {
            Primitive::String => "string",
            Primitive::Int => "integer",
            Primitive::Float => "number",
            Primitive::Bool => "boolean",
            Primitive::Timestamp => "ISO-8601 timestamp",
            Primitive::Date => "date (YYYY-MM-DD)",
            Primitive::Json => "json",
        }
    }

    fn coerce(self, wire: &Value, state: &mut CoerceState) -> Result<TypedValue, ConvertError> {
        let out = match (self, wire) {
            (Primitive::String, Value::String(s)) => Some(TypedValue::String(s.clone())),
            (Primitive::Int, Value::Number(n)) => n.as_i64().map(TypedValue::Int),
            (Primitive::Float, Value::Number(n)) => n.as_f64().map(TypedValue::Float),
            (Primitive::Bool, Value::Bool(b)) => Some(TypedValue::Bool(*b)),
            (Primitive::Timestamp, Value::String(s)) => parse_timestamp(s).map(TypedValue::Timestamp),
            (Primitive::Date, Value::String(s)) => parse_date(s).map(TypedValue::Date),
            (Primitive::Json, v) => Some(TypedValue::Json(v.clone())),
            _ => None,
        };
        out.ok_or_else(|| ConvertError::mismatch(state.path(), self.describe(), wire))
    }

    fn dump(self, value: &TypedValue, state: &mut DumpState) -> Result<Value, ConvertError> {
        let out = match (self, value) {
            (Primitive::String, TypedValue::String(s)) => Some(Value::String(s.clone())),
            (Primitive::Int, TypedValue::Int(i)) => Some(Value::from(*i)),
            (Primitive::Float, TypedValue::Float(f)) => Number::from_f64(*f).map(Value::Number),
            (Primitive::Bool, TypedValue::Bool(b)) => Some(Value::Bool(*b)),
            (Primitive::Timestamp, TypedValue::Timestamp(ts)) => Some(Value::String(format_timestamp(ts))),
            (Primitive::Date, TypedValue::Date(d)) => Some(Value::String(format_date(d))),
            (Primitive::Json, TypedValue::Json(v)) => Some(v.clone()),
            _ => None,
        };
        out.ok_or_else(|| ConvertError::TypeMismatch {
            path: state.path().clone(),
            expected: self.describe().to_string(),
            actual: match value {
                TypedValue::Float(f) if !f.is_finite() => "non-finite float".to_string(),
                other => other.kind().to_string(),
            },
        })
    }
}

/// Ordered candidate converters for a polymorphic field.
#[derive(Debug, Clone)]
pub struct UnionSet {
    name: &'static str,
    variants: Vec<(&'static str, Converter)>,
}

impl UnionSet {
    pub fn new(name: &'static str, variants: Vec<(&'static str, Converter)>) -> Self {
        Self { name, variants }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn variants(&self) -> &[(&'static str, Converter)] {
        &self.variants
    }

    /// First variant that coerces wins. When none do, every variant's failure
    /// is reported.
    fn coerce(&self, wire: &Value, state: &mut CoerceState) -> Result<UnionValue, ConvertError> {
        let mut failures = Vec::with_capacity(self.variants.len());
        for (variant, converter) in &self.variants {
            match converter.coerce(wire, state) {
                Ok(value) => {
                    tracing::debug!(path = %state.path(), union = self.name, variant, "union variant matched");
                    return Ok(UnionValue::new(*variant, value));
                }
                Err(error) => failures.push(VariantFailure {
                    variant: variant.to_string(),
                    error: Box::new(error),
                }),
            }
        }
        Err(ConvertError::UnionExhausted {
            path: state.path().clone(),
            union: self.name.to_string(),
            failures,
        })
    }

    fn dump(&self, value: &UnionValue, state: &mut DumpState) -> Result<Value, ConvertError> {
        let (_, converter) = self
            .variants
            .iter()
            .find(|(name, _)| *name == value.variant)
            .ok_or_else(|| ConvertError::TypeMismatch {
                path: state.path().clone(),
                expected: format!("variant of {}", self.name),
                actual: format!("variant `{}`", value.variant),
            })?;
        converter.dump(&value.value, state)
    }
}

#[derive(Debug, Clone)]
pub enum Converter {
    Primitive(Primitive),
    ListOf(Box<Converter>),
    MapOf(Box<Converter>),
    EnumOf(EnumSet),
    UnionOf(UnionSet),
    Model(ModelRef),
    /// File upload. Request bodies only; never coerced from the wire.
    Upload,
}

impl Converter {
    pub fn string() -> Self {
        Converter::Primitive(Primitive::String)
    }

    pub fn int() -> Self {
        Converter::Primitive(Primitive::Int)
    }

    pub fn float() -> Self {
        Converter::Primitive(Primitive::Float)
    }

    pub fn bool() -> Self {
        Converter::Primitive(Primitive::Bool)
    }

    pub fn timestamp() -> Self {
        Converter::Primitive(Primitive::Timestamp)
    }

    pub fn date() -> Self {
        Converter::Primitive(Primitive::Date)
    }

    pub fn json() -> Self {
        Converter::Primitive(Primitive::Json)
    }

    pub fn list_of(inner: Converter) -> Self {
        Converter::ListOf(Box::new(inner))
    }

    pub fn map_of(inner: Converter) -> Self {
        Converter::MapOf(Box::new(inner))
    }

    pub fn enum_of<E: WireEnum>() -> Self {
        Converter::EnumOf(EnumSet::of::<E>())
    }

    pub fn union_of(name: &'static str, variants: Vec<(&'static str, Converter)>) -> Self {
        Converter::UnionOf(UnionSet::new(name, variants))
    }

    pub fn model<T: ModelType>() -> Self {
        Converter::Model(T::schema)
    }

    /// Human-readable type, e.g. `list<model Block>`.
    pub fn describe(&self) -> String {
        match self {
            Converter::Primitive(p) => p.describe().to_string(),
            Converter::ListOf(inner) => format!("list<{}>", inner.describe()),
            Converter::MapOf(inner) => format!("map<{}>", inner.describe()),
            Converter::EnumOf(set) => format!("enum {}", set.name()),
            Converter::UnionOf(union) => {
                let names: Vec<&str> = union.variants.iter().map(|(n, _)| *n).collect();
                format!("union {}({})", union.name, names.join("|"))
            }
            Converter::Model(schema) => format!("model {}", schema().name()),
            Converter::Upload => "upload".to_string(),
        }
    }

    pub fn coerce(&self, wire: &Value, state: &mut CoerceState) -> Result<TypedValue, ConvertError> {
        if wire.is_null() && !matches!(self, Converter::Primitive(Primitive::Json)) {
            return Err(ConvertError::UnexpectedNull {
                path: state.path().clone(),
            });
        }

        match self {
            Converter::Primitive(p) => p.coerce(wire, state),

            Converter::ListOf(inner) => {
                let items = wire
                    .as_array()
                    .ok_or_else(|| ConvertError::mismatch(state.path(), "array", wire))?;
                let mut out = Vec::with_capacity(items.len());
                for (i, item) in items.iter().enumerate() {
                    out.push(state.scoped(i, |s| inner.coerce(item, s))?);
                }
                Ok(TypedValue::List(out))
            }

            Converter::MapOf(inner) => {
                let entries = wire
                    .as_object()
                    .ok_or_else(|| ConvertError::mismatch(state.path(), "object", wire))?;
                let mut out = IndexMap::with_capacity(entries.len());
                for (key, item) in entries {
                    let value = state.scoped(key.as_str(), |s| inner.coerce(item, s))?;
                    out.insert(key.clone(), value);
                }
                Ok(TypedValue::Map(out))
            }

            Converter::EnumOf(set) => set.coerce(wire, state).map(TypedValue::Enum),

            Converter::UnionOf(union) => union.coerce(wire, state).map(TypedValue::Union),

            Converter::Model(schema) => Model::coerce(schema(), wire, state).map(TypedValue::Model),

            Converter::Upload => Err(ConvertError::mismatch(
                state.path(),
                "upload (request bodies only)",
                wire,
            )),
        }
    }

    pub fn dump(&self, value: &TypedValue, state: &mut DumpState) -> Result<Value, ConvertError> {
        match (self, value) {
            (Converter::Primitive(p), v) => p.dump(v, state),

            (Converter::ListOf(inner), TypedValue::List(items)) => {
                let mut out = Vec::with_capacity(items.len());
                for (i, item) in items.iter().enumerate() {
                    out.push(state.scoped(i, |s| inner.dump(item, s))?);
                }
                Ok(Value::Array(out))
            }

            (Converter::MapOf(inner), TypedValue::Map(entries)) => {
                let mut out = Map::with_capacity(entries.len());
                for (key, item) in entries {
                    let value = state.scoped(key.as_str(), |s| inner.dump(item, s))?;
                    out.insert(key.clone(), value);
                }
                Ok(Value::Object(out))
            }

            (Converter::EnumOf(set), TypedValue::Enum(e)) => set.dump(e, state),

            (Converter::UnionOf(union), TypedValue::Union(u)) => union.dump(u, state),

            (Converter::Model(schema), TypedValue::Model(model)) => {
                let schema = schema();
                if model.schema().name() != schema.name() {
                    return Err(ConvertError::TypeMismatch {
                        path: state.path().clone(),
                        expected: format!("model {}", schema.name()),
                        actual: format!("model {}", model.schema().name()),
                    });
                }
                model.dump(state)
            }

            (Converter::Upload, TypedValue::Upload(upload)) => upload.dump(state),

            (converter, other) => Err(ConvertError::TypeMismatch {
                path: state.path().clone(),
                expected: converter.describe(),
                actual: other.kind().to_string(),
            }),
        }
    }
}
