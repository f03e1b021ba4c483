//! Model instances and the schema-driven model converter.

use std::fmt;

use serde_json::{Map, Value};

use crate::error::ConvertError;
use crate::field::Field;
use crate::path::FieldPath;
use crate::schema::{FieldSchema, ModelSchema};
use crate::state::{CoerceState, DumpState, Traversal};
use crate::typed::{FromTyped, IntoTyped};
use crate::value::TypedValue;

/// A model instance: one tri-state cell per schema field, in declared order.
///
/// The schema is shared by reference; cloning a model or replacing one of its
/// cells only copies the cells.
#[derive(Clone)]
pub struct Model {
    schema: &'static ModelSchema,
    cells: Vec<Field<TypedValue>>,
}

impl Model {
    /// A model with every field unset.
    pub fn new(schema: &'static ModelSchema) -> Self {
        Self {
            schema,
            cells: vec![Field::Unset; schema.fields().len()],
        }
    }

    pub fn schema(&self) -> &'static ModelSchema {
        self.schema
    }

    fn index_of(&self, name: &str) -> Result<usize, ConvertError> {
        self.schema
            .field_index(name)
            .ok_or_else(|| ConvertError::UnknownField {
                model: self.schema.name().to_string(),
                field: name.to_string(),
            })
    }

    /// Cell for logical field `name`, or `None` if the schema has no such field.
    pub fn get(&self, name: &str) -> Option<&Field<TypedValue>> {
        self.schema.field_index(name).map(|i| &self.cells[i])
    }

    pub fn is_set(&self, name: &str) -> bool {
        self.get(name).is_some_and(Field::is_present)
    }

    /// Replace one cell in place.
    pub fn set(&mut self, name: &str, cell: Field<TypedValue>) -> Result<&mut Self, ConvertError> {
        let idx = self.index_of(name)?;
        self.cells[idx] = cell;
        Ok(self)
    }

    /// Replace one cell from a typed field.
    pub fn set_from<T: IntoTyped>(
        &mut self,
        name: &str,
        cell: Field<T>,
    ) -> Result<&mut Self, ConvertError> {
        let cell = cell.try_map(IntoTyped::into_typed)?;
        self.set(name, cell)
    }

    /// Return a copy of this model with one cell replaced.
    pub fn with(&self, name: &str, cell: Field<TypedValue>) -> Result<Self, ConvertError> {
        let mut next = self.clone();
        next.set(name, cell)?;
        Ok(next)
    }

    /// Move a cell out (leaving it unset) and convert it to a typed field.
    pub fn take_as<T: FromTyped>(&mut self, name: &str) -> Result<Field<T>, ConvertError> {
        let idx = self.index_of(name)?;
        let path = FieldPath::root().child(self.schema.fields()[idx].wire_name());
        std::mem::take(&mut self.cells[idx]).try_map(|v| T::from_typed(v, &path))
    }

    /// Fields paired with their cells, in declared order.
    pub fn fields(&self) -> impl Iterator<Item = (&'static FieldSchema, &Field<TypedValue>)> {
        self.schema.fields().iter().zip(self.cells.iter())
    }

    /// Coerce a wire object against `schema`.
    ///
    /// Unknown wire keys are ignored. The result is all-or-nothing: the first
    /// failing field aborts the whole coercion.
    pub fn coerce(
        schema: &'static ModelSchema,
        wire: &Value,
        state: &mut CoerceState,
    ) -> Result<Self, ConvertError> {
        let obj = wire
            .as_object()
            .ok_or_else(|| ConvertError::mismatch(state.path(), format!("object {}", schema.name()), wire))?;

        let mut cells = Vec::with_capacity(schema.fields().len());
        for field in schema.fields() {
            let cell = match obj.get(field.wire_name()) {
                None if field.is_required() => {
                    return Err(ConvertError::MissingRequiredField {
                        path: state.path().child(field.wire_name()),
                    });
                }
                None => Field::Unset,
                Some(Value::Null) if field.is_nullable() => Field::Null,
                Some(Value::Null) => {
                    return Err(ConvertError::UnexpectedNull {
                        path: state.path().child(field.wire_name()),
                    });
                }
                Some(v) => Field::Value(state.scoped(field.wire_name(), |s| field.converter().coerce(v, s))?),
            };
            cells.push(cell);
        }

        if tracing::enabled!(tracing::Level::TRACE) {
            for key in obj.keys() {
                if !schema.fields().iter().any(|f| f.wire_name() == key) {
                    tracing::trace!(model = schema.name(), path = %state.path(), key = %key, "ignoring unknown wire key");
                }
            }
        }

        Ok(Self { schema, cells })
    }

    /// Dump to a wire object in declared field order.
    ///
    /// Unset fields are omitted; null cells are written as explicit `null`.
    /// At the root the whole tree is checked first without reading uploads,
    /// so a failed dump consumes nothing.
    pub fn dump(&self, state: &mut DumpState) -> Result<Value, ConvertError> {
        if state.path().is_root() && !state.is_rehearsal() {
            self.dump_fields(&mut DumpState::rehearsal())?;
        }
        self.dump_fields(state)
    }

    fn dump_fields(&self, state: &mut DumpState) -> Result<Value, ConvertError> {
        let mut out = Map::with_capacity(self.cells.len());
        for (field, cell) in self.fields() {
            match cell {
                Field::Unset if field.is_required() => {
                    return Err(ConvertError::MissingRequiredField {
                        path: state.path().child(field.wire_name()),
                    });
                }
                Field::Unset => {}
                Field::Null if !field.is_nullable() => {
                    return Err(ConvertError::UnexpectedNull {
                        path: state.path().child(field.wire_name()),
                    });
                }
                Field::Null => {
                    out.insert(field.wire_name().to_string(), Value::Null);
                }
                Field::Value(v) => {
                    let wire = state.scoped(field.wire_name(), |s| field.converter().dump(v, s))?;
                    out.insert(field.wire_name().to_string(), wire);
                }
            }
        }
        Ok(Value::Object(out))
    }

    /// Check required and null constraints through the whole model tree
    /// without dumping (uploads are left untouched).
    pub fn validate(&self) -> Result<(), ConvertError> {
        let mut path = FieldPath::root();
        validate_model(self, &mut path)
    }
}

fn validate_model(model: &Model, path: &mut FieldPath) -> Result<(), ConvertError> {
    for (field, cell) in model.fields() {
        match cell {
            Field::Unset if field.is_required() => {
                return Err(ConvertError::MissingRequiredField {
                    path: path.child(field.wire_name()),
                });
            }
            Field::Null if !field.is_nullable() => {
                return Err(ConvertError::UnexpectedNull {
                    path: path.child(field.wire_name()),
                });
            }
            Field::Value(v) => {
                path.push(field.wire_name().into());
                let res = validate_value(v, path);
                path.pop();
                res?;
            }
            _ => {}
        }
    }
    Ok(())
}

fn validate_value(value: &TypedValue, path: &mut FieldPath) -> Result<(), ConvertError> {
    match value {
        TypedValue::Model(m) => validate_model(m, path),
        TypedValue::List(items) => {
            for (i, item) in items.iter().enumerate() {
                path.push(i.into());
                let res = validate_value(item, path);
                path.pop();
                res?;
            }
            Ok(())
        }
        TypedValue::Map(entries) => {
            for (key, item) in entries {
                path.push(key.as_str().into());
                let res = validate_value(item, path);
                path.pop();
                res?;
            }
            Ok(())
        }
        TypedValue::Union(u) => validate_value(&u.value, path),
        _ => Ok(()),
    }
}

impl PartialEq for Model {
    fn eq(&self, other: &Self) -> bool {
        self.schema.name() == other.schema.name() && self.cells == other.cells
    }
}

impl fmt::Debug for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct(self.schema.name());
        for (field, cell) in self.fields() {
            if cell.is_present() {
                s.field(field.name(), cell);
            }
        }
        s.finish_non_exhaustive()
    }
}

/// A strongly typed model backed by a static schema.
///
/// Implementors convert to and from the untyped [`Model`]; coercion and dump
/// then run through the shared model converter.
pub trait ModelType: Sized {
    fn schema() -> &'static ModelSchema;

    fn from_model(model: Model) -> Result<Self, ConvertError>;

    fn to_model(&self) -> Result<Model, ConvertError>;

    fn coerce(wire: &Value) -> Result<Self, ConvertError> {
        Self::coerce_with(wire, &mut CoerceState::new())
    }

    fn coerce_with(wire: &Value, state: &mut CoerceState) -> Result<Self, ConvertError> {
        let model = Model::coerce(Self::schema(), wire, state)?;
        Self::from_model(model)
    }

    fn dump_with(&self, state: &mut DumpState) -> Result<Value, ConvertError> {
        self.to_model()?.dump(state)
    }
}
