//! The polymorphic `result` payload of a parse response.

use docparse_core::{
    ConvertError, Converter, Field, FieldPath, FieldSchema, FromTyped, IntoTyped, Model,
    ModelSchema, ModelType, OpenEnum, TypedValue, UnionValue,
};
use once_cell::sync::Lazy;

use crate::enums::ResultType;
use crate::schema::{Chunk, typed_model};

typed_model!(FullResult, UrlResult);

static FULL_RESULT: Lazy<ModelSchema> = Lazy::new(|| {
    ModelSchema::new(
        "FullResult",
        vec![
            FieldSchema::renamed("resultType", "type", Converter::enum_of::<ResultType>()).required(),
            FieldSchema::new("chunks", Converter::list_of(Converter::model::<Chunk>())).required(),
        ],
    )
});

/// Result returned inline.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FullResult {
    pub result_type: Field<OpenEnum<ResultType>>,
    pub chunks: Field<Vec<Chunk>>,
}

impl FullResult {
    pub fn new(chunks: Vec<Chunk>) -> Self {
        Self {
            result_type: Field::Value(ResultType::Full.into()),
            chunks: Field::Value(chunks),
        }
    }
}

impl ModelType for FullResult {
    fn schema() -> &'static ModelSchema {
        &FULL_RESULT
    }

    fn from_model(mut model: Model) -> Result<Self, ConvertError> {
        Ok(Self {
            result_type: model.take_as("resultType")?,
            chunks: model.take_as("chunks")?,
        })
    }

    fn to_model(&self) -> Result<Model, ConvertError> {
        let mut model = Model::new(Self::schema());
        model
            .set_from("resultType", self.result_type.clone())?
            .set_from("chunks", self.chunks.clone())?;
        Ok(model)
    }
}

static URL_RESULT: Lazy<ModelSchema> = Lazy::new(|| {
    ModelSchema::new(
        "UrlResult",
        vec![
            FieldSchema::renamed("resultType", "type", Converter::enum_of::<ResultType>()).required(),
            FieldSchema::new("url", Converter::string()).required(),
            FieldSchema::renamed("resultId", "result_id", Converter::string()).required(),
        ],
    )
});

/// Result too large to inline; fetch it from `url`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UrlResult {
    pub result_type: Field<OpenEnum<ResultType>>,
    pub url: Field<String>,
    pub result_id: Field<String>,
}

impl UrlResult {
    pub fn new(url: impl Into<String>, result_id: impl Into<String>) -> Self {
        Self {
            result_type: Field::Value(ResultType::Url.into()),
            url: Field::Value(url.into()),
            result_id: Field::Value(result_id.into()),
        }
    }
}

impl ModelType for UrlResult {
    fn schema() -> &'static ModelSchema {
        &URL_RESULT
    }

    fn from_model(mut model: Model) -> Result<Self, ConvertError> {
        Ok(Self {
            result_type: model.take_as("resultType")?,
            url: model.take_as("url")?,
            result_id: model.take_as("resultId")?,
        })
    }

    fn to_model(&self) -> Result<Model, ConvertError> {
        let mut model = Model::new(Self::schema());
        model
            .set_from("resultType", self.result_type.clone())?
            .set_from("url", self.url.clone())?
            .set_from("resultId", self.result_id.clone())?;
        Ok(model)
    }
}

const FULL: &str = "full";
const URL: &str = "url";

/// Either an inline result or a pointer to one.
///
/// Variants are tried in declaration order; a full result needs `chunks`,
/// so URL payloads fall through to the second variant.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseResult {
    Full(FullResult),
    Url(UrlResult),
}

impl ParseResult {
    pub fn converter() -> Converter {
        Converter::union_of(
            "ParseResult",
            vec![
                (FULL, Converter::model::<FullResult>()),
                (URL, Converter::model::<UrlResult>()),
            ],
        )
    }

    pub fn as_full(&self) -> Option<&FullResult> {
        match self {
            ParseResult::Full(full) => Some(full),
            ParseResult::Url(_) => None,
        }
    }

    pub fn as_url(&self) -> Option<&UrlResult> {
        match self {
            ParseResult::Url(url) => Some(url),
            ParseResult::Full(_) => None,
        }
    }
}

impl FromTyped for ParseResult {
    fn from_typed(value: TypedValue, path: &FieldPath) -> Result<Self, ConvertError> {
        match value {
            TypedValue::Union(UnionValue { variant: FULL, value }) => {
                FullResult::from_typed(*value, path).map(ParseResult::Full)
            }
            TypedValue::Union(UnionValue { variant: URL, value }) => {
                UrlResult::from_typed(*value, path).map(ParseResult::Url)
            }
            other => Err(ConvertError::TypeMismatch {
                path: path.clone(),
                expected: "union ParseResult".to_string(),
                actual: match &other {
                    TypedValue::Union(u) => format!("variant `{}`", u.variant),
                    v => v.kind().to_string(),
                },
            }),
        }
    }
}

impl IntoTyped for ParseResult {
    fn into_typed(self) -> Result<TypedValue, ConvertError> {
        let (variant, value) = match self {
            ParseResult::Full(full) => (FULL, full.into_typed()?),
            ParseResult::Url(url) => (URL, url.into_typed()?),
        };
        Ok(TypedValue::Union(UnionValue::new(variant, value)))
    }
}
