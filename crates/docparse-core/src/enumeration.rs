//! Forward-compatible enumerations.
//!
//! The API adds enum members faster than clients are released, so coercion
//! never rejects an unknown member: it is kept verbatim as `Unrecognized` and
//! dumped back unchanged.

use std::fmt;

use serde_json::Value;

use crate::error::ConvertError;
use crate::state::{CoerceState, DumpState, Traversal};

/// A scalar enum member as it appears on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EnumLiteral {
    Str(String),
    Int(i64),
}

impl EnumLiteral {
    pub fn from_wire(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(EnumLiteral::Str(s.clone())),
            Value::Number(n) => n.as_i64().map(EnumLiteral::Int),
            _ => None,
        }
    }

    pub fn to_wire(&self) -> Value {
        match self {
            EnumLiteral::Str(s) => Value::String(s.clone()),
            EnumLiteral::Int(i) => Value::from(*i),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            EnumLiteral::Str(s) => Some(s),
            EnumLiteral::Int(_) => None,
        }
    }
}

impl From<&str> for EnumLiteral {
    fn from(s: &str) -> Self {
        EnumLiteral::Str(s.to_string())
    }
}

impl From<i64> for EnumLiteral {
    fn from(i: i64) -> Self {
        EnumLiteral::Int(i)
    }
}

impl fmt::Display for EnumLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnumLiteral::Str(s) => f.write_str(s),
            EnumLiteral::Int(i) => write!(f, "{i}"),
        }
    }
}

/// Untyped enum cell produced by [`EnumSet::coerce`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnumValue {
    Known(EnumLiteral),
    Unrecognized(EnumLiteral),
}

impl EnumValue {
    pub fn literal(&self) -> &EnumLiteral {
        match self {
            EnumValue::Known(lit) | EnumValue::Unrecognized(lit) => lit,
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, EnumValue::Known(_))
    }
}

/// The allowed members of one enumeration (the `EnumOf` converter payload).
#[derive(Debug, Clone, PartialEq)]
pub struct EnumSet {
    name: &'static str,
    members: Vec<EnumLiteral>,
}

impl EnumSet {
    pub fn new(name: &'static str, members: impl IntoIterator<Item = EnumLiteral>) -> Self {
        Self {
            name,
            members: members.into_iter().collect(),
        }
    }

    /// Build the member set from a Rust enum.
    pub fn of<E: WireEnum>() -> Self {
        Self::new(E::NAME, E::members().iter().map(|m| m.literal()))
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn members(&self) -> &[EnumLiteral] {
        &self.members
    }

    pub fn contains(&self, literal: &EnumLiteral) -> bool {
        self.members.contains(literal)
    }

    pub fn coerce(&self, wire: &Value, state: &mut CoerceState) -> Result<EnumValue, ConvertError> {
        let literal = EnumLiteral::from_wire(wire).ok_or_else(|| {
            ConvertError::mismatch(state.path(), format!("{} member (string or integer)", self.name), wire)
        })?;
        if self.contains(&literal) {
            Ok(EnumValue::Known(literal))
        } else {
            tracing::debug!(
                path = %state.path(),
                enum_name = self.name,
                value = %literal,
                "accepting unrecognized enum member"
            );
            Ok(EnumValue::Unrecognized(literal))
        }
    }

    pub fn dump(&self, value: &EnumValue, _state: &mut DumpState) -> Result<Value, ConvertError> {
        Ok(value.literal().to_wire())
    }
}

/// A Rust enum with a fixed wire vocabulary.
pub trait WireEnum: Sized + Copy + PartialEq + 'static {
    const NAME: &'static str;

    fn members() -> &'static [Self];

    fn literal(self) -> EnumLiteral;

    fn from_literal(literal: &EnumLiteral) -> Option<Self> {
        Self::members().iter().copied().find(|m| &m.literal() == literal)
    }
}

/// Typed enum field that still accepts members this client does not know.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenEnum<E> {
    Known(E),
    Unrecognized(EnumLiteral),
}

impl<E: WireEnum> OpenEnum<E> {
    /// Resolve a literal, preferring a known member when one matches.
    pub fn from_literal(literal: impl Into<EnumLiteral>) -> Self {
        let literal = literal.into();
        match E::from_literal(&literal) {
            Some(known) => OpenEnum::Known(known),
            None => OpenEnum::Unrecognized(literal),
        }
    }

    pub fn known(&self) -> Option<E> {
        match self {
            OpenEnum::Known(e) => Some(*e),
            OpenEnum::Unrecognized(_) => None,
        }
    }

    pub fn literal(&self) -> EnumLiteral {
        match self {
            OpenEnum::Known(e) => e.literal(),
            OpenEnum::Unrecognized(lit) => lit.clone(),
        }
    }

    pub fn from_enum_value(value: EnumValue) -> Self {
        match value {
            EnumValue::Known(lit) | EnumValue::Unrecognized(lit) => Self::from_literal(lit),
        }
    }

    pub fn into_enum_value(self) -> EnumValue {
        match self {
            OpenEnum::Known(e) => EnumValue::Known(e.literal()),
            OpenEnum::Unrecognized(lit) => EnumValue::Unrecognized(lit),
        }
    }
}

impl<E: WireEnum> From<E> for OpenEnum<E> {
    fn from(value: E) -> Self {
        OpenEnum::Known(value)
    }
}
