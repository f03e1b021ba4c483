#![doc = r#"
⚠️ INTERNAL CRATE – NOT A STABLE API

This crate is an internal implementation detail of the docparse client.

Do NOT depend on this crate directly.
Use `docparse-io` instead.
"#]

pub mod enums;
pub mod registry;
pub mod result;
pub mod schema;
pub mod serialize;

pub use enums::{BlockType, JobStatus, OcrMode, OutputFormat, Priority, ResultType};
pub use registry::registry;
pub use result::{FullResult, ParseResult, UrlResult};
pub use schema::{
    Block, BoundingBox, Chunk, PageRange, ParseOptions, ParseRequest, ParseResponse, ParseUsage,
};
