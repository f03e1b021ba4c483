//! Static field tables describing each model type.

use crate::converter::Converter;

/// Lazy handle to a model's schema.
///
/// Schemas reference each other through these function pointers so that
/// recursive and mutually referencing models can be declared as independent
/// lazy statics.
pub type ModelRef = fn() -> &'static ModelSchema;

#[derive(Debug, Clone)]
pub struct FieldSchema {
    name: &'static str,
    wire_name: &'static str,
    converter: Converter,
    nullable: bool,
    required: bool,
}

impl FieldSchema {
    /// Optional, non-nullable field whose wire name equals its logical name.
    pub fn new(name: &'static str, converter: Converter) -> Self {
        Self::renamed(name, name, converter)
    }

    /// Optional, non-nullable field with a distinct wire name.
    pub fn renamed(name: &'static str, wire_name: &'static str, converter: Converter) -> Self {
        Self {
            name,
            wire_name,
            converter,
            nullable: false,
            required: false,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn wire_name(&self) -> &'static str {
        self.wire_name
    }

    pub fn converter(&self) -> &Converter {
        &self.converter
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    pub fn is_required(&self) -> bool {
        self.required
    }
}

/// Ordered field table plus the model's type name.
///
/// Built once per model type and never mutated.
#[derive(Debug, Clone)]
pub struct ModelSchema {
    name: &'static str,
    fields: Vec<FieldSchema>,
}

impl ModelSchema {
    pub fn new(name: &'static str, fields: Vec<FieldSchema>) -> Self {
        debug_assert!(
            {
                let mut wire: Vec<_> = fields.iter().map(|f| f.wire_name).collect();
                wire.sort_unstable();
                wire.windows(2).all(|w| w[0] != w[1])
            },
            "duplicate wire name in schema {name}"
        );
        Self { name, fields }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn fields(&self) -> &[FieldSchema] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Wire names of all required fields, in declared order.
    pub fn required_wire_names(&self) -> Vec<&'static str> {
        self.fields
            .iter()
            .filter(|f| f.required)
            .map(|f| f.wire_name)
            .collect()
    }
}
