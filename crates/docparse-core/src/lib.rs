#![doc = r#"
⚠️ INTERNAL CRATE – NOT A STABLE API

This crate is an internal implementation detail of the docparse client.

Do NOT depend on this crate directly.
Use `docparse-io` instead.
"#]

pub mod converter;
pub mod enumeration;
pub mod error;
pub mod field;
pub mod model;
pub mod path;
pub mod registry;
pub mod schema;
pub mod state;
pub mod timestamp;
pub mod typed;
pub mod upload;
pub mod value;

pub use converter::{Converter, Primitive};
pub use enumeration::{EnumLiteral, EnumValue, OpenEnum, WireEnum};
pub use error::ConvertError;
pub use field::Field;
pub use model::{Model, ModelType};
pub use path::{FieldPath, PathSegment};
pub use registry::SchemaRegistry;
pub use schema::{FieldSchema, ModelRef, ModelSchema};
pub use state::{CoerceState, DumpState, Traversal};
pub use typed::{FromTyped, IntoTyped};
pub use upload::{UploadPart, UploadResource};
pub use value::{TypedValue, UnionValue};
