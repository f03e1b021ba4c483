use docparse_core::{ModelRef, ModelType, SchemaRegistry};
use once_cell::sync::Lazy;

use crate::result::{FullResult, UrlResult};
use crate::schema::{
    Block, BoundingBox, Chunk, PageRange, ParseOptions, ParseRequest, ParseResponse, ParseUsage,
};

static REGISTRY: Lazy<SchemaRegistry> = Lazy::new(|| {
    SchemaRegistry::new([
        ("ParseRequest", ParseRequest::schema as ModelRef),
        ("ParseOptions", ParseOptions::schema as ModelRef),
        ("PageRange", PageRange::schema as ModelRef),
        ("ParseResponse", ParseResponse::schema as ModelRef),
        ("FullResult", FullResult::schema as ModelRef),
        ("UrlResult", UrlResult::schema as ModelRef),
        ("Chunk", Chunk::schema as ModelRef),
        ("Block", Block::schema as ModelRef),
        ("BoundingBox", BoundingBox::schema as ModelRef),
        ("ParseUsage", ParseUsage::schema as ModelRef),
    ])
});

/// Every model schema of the parse API, requests first.
pub fn registry() -> &'static SchemaRegistry {
    &REGISTRY
}
