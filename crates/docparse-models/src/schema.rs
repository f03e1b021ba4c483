//! Parse API models.
//!
//! Each model is a plain struct of [`Field`] cells over a static
//! [`ModelSchema`]. Field names are camelCase in Rust and snake_case on the
//! wire; the schema tables carry both.

use chrono::{DateTime, FixedOffset, NaiveDate};
use docparse_core::{
    ConvertError, Converter, Field, FieldSchema, Model, ModelSchema, ModelType, OpenEnum,
    UploadResource,
};
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use serde_json::Value;

use crate::enums::{BlockType, JobStatus, OcrMode, OutputFormat, Priority};
use crate::result::ParseResult;

/// `FromTyped`/`IntoTyped` for model structs, delegating to their schema.
macro_rules! typed_model {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl ::docparse_core::FromTyped for $ty {
                fn from_typed(
                    value: ::docparse_core::TypedValue,
                    path: &::docparse_core::FieldPath,
                ) -> Result<Self, ::docparse_core::ConvertError> {
                    ::docparse_core::typed::model_from_typed(value, path)
                }
            }

            impl ::docparse_core::IntoTyped for $ty {
                fn into_typed(self) -> Result<::docparse_core::TypedValue, ::docparse_core::ConvertError> {
                    ::docparse_core::typed::model_into_typed(&self)
                }
            }
        )+
    };
}

pub(crate) use typed_model;

typed_model!(BoundingBox, Block, Chunk, ParseUsage, PageRange, ParseOptions, ParseRequest, ParseResponse);

// ---------------------------------------------------------------------------
// BoundingBox
// ---------------------------------------------------------------------------

static BOUNDING_BOX: Lazy<ModelSchema> = Lazy::new(|| {
    ModelSchema::new(
        "BoundingBox",
        vec![
            FieldSchema::new("left", Converter::float()).required(),
            FieldSchema::new("top", Converter::float()).required(),
            FieldSchema::new("width", Converter::float()).required(),
            FieldSchema::new("height", Converter::float()).required(),
            FieldSchema::new("page", Converter::int()).required(),
            FieldSchema::renamed("originalPage", "original_page", Converter::int()),
        ],
    )
});

/// Block position in page coordinates (fractions of page width/height).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoundingBox {
    pub left: Field<f64>,
    pub top: Field<f64>,
    pub width: Field<f64>,
    pub height: Field<f64>,
    pub page: Field<i64>,
    /// Page in the uploaded file when a page range was requested.
    pub original_page: Field<i64>,
}

impl BoundingBox {
    pub fn new(left: f64, top: f64, width: f64, height: f64, page: i64) -> Self {
        Self {
            left: Field::Value(left),
            top: Field::Value(top),
            width: Field::Value(width),
            height: Field::Value(height),
            page: Field::Value(page),
            original_page: Field::Unset,
        }
    }

    pub fn with_original_page(mut self, page: i64) -> Self {
        self.original_page = Field::Value(page);
        self
    }
}

impl ModelType for BoundingBox {
    fn schema() -> &'static ModelSchema {
        &BOUNDING_BOX
    }

    fn from_model(mut model: Model) -> Result<Self, ConvertError> {
        Ok(Self {
            left: model.take_as("left")?,
            top: model.take_as("top")?,
            width: model.take_as("width")?,
            height: model.take_as("height")?,
            page: model.take_as("page")?,
            original_page: model.take_as("originalPage")?,
        })
    }

    fn to_model(&self) -> Result<Model, ConvertError> {
        let mut model = Model::new(Self::schema());
        model
            .set_from("left", self.left.clone())?
            .set_from("top", self.top.clone())?
            .set_from("width", self.width.clone())?
            .set_from("height", self.height.clone())?
            .set_from("page", self.page.clone())?
            .set_from("originalPage", self.original_page.clone())?;
        Ok(model)
    }
}

// ---------------------------------------------------------------------------
// Block
// ---------------------------------------------------------------------------

static BLOCK: Lazy<ModelSchema> = Lazy::new(|| {
    ModelSchema::new(
        "Block",
        vec![
            FieldSchema::renamed("blockType", "type", Converter::enum_of::<BlockType>()).required(),
            FieldSchema::new("content", Converter::string()).required(),
            FieldSchema::new("bbox", Converter::model::<BoundingBox>()).required(),
            FieldSchema::new("confidence", Converter::float()).nullable(),
            FieldSchema::renamed("imageUrl", "image_url", Converter::string()).nullable(),
        ],
    )
});

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Block {
    pub block_type: Field<OpenEnum<BlockType>>,
    pub content: Field<String>,
    pub bbox: Field<BoundingBox>,
    pub confidence: Field<f64>,
    /// Signed URL for figure crops. Null when the block has no image.
    pub image_url: Field<String>,
}

impl Block {
    pub fn new(block_type: impl Into<OpenEnum<BlockType>>, content: impl Into<String>, bbox: BoundingBox) -> Self {
        Self {
            block_type: Field::Value(block_type.into()),
            content: Field::Value(content.into()),
            bbox: Field::Value(bbox),
            ..Self::default()
        }
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = Field::Value(confidence);
        self
    }

    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Field::Value(url.into());
        self
    }
}

impl ModelType for Block {
    fn schema() -> &'static ModelSchema {
        &BLOCK
    }

    fn from_model(mut model: Model) -> Result<Self, ConvertError> {
        Ok(Self {
            block_type: model.take_as("blockType")?,
            content: model.take_as("content")?,
            bbox: model.take_as("bbox")?,
            confidence: model.take_as("confidence")?,
            image_url: model.take_as("imageUrl")?,
        })
    }

    fn to_model(&self) -> Result<Model, ConvertError> {
        let mut model = Model::new(Self::schema());
        model
            .set_from("blockType", self.block_type.clone())?
            .set_from("content", self.content.clone())?
            .set_from("bbox", self.bbox.clone())?
            .set_from("confidence", self.confidence.clone())?
            .set_from("imageUrl", self.image_url.clone())?;
        Ok(model)
    }
}

// ---------------------------------------------------------------------------
// Chunk
// ---------------------------------------------------------------------------

static CHUNK: Lazy<ModelSchema> = Lazy::new(|| {
    ModelSchema::new(
        "Chunk",
        vec![
            FieldSchema::new("content", Converter::string()).required(),
            FieldSchema::new("embed", Converter::string()),
            FieldSchema::new("enriched", Converter::string()).nullable(),
            FieldSchema::new("blocks", Converter::list_of(Converter::model::<Block>())).required(),
        ],
    )
});

/// A retrieval-sized slice of the document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Chunk {
    pub content: Field<String>,
    /// Text intended for embedding; may differ from `content` for tables.
    pub embed: Field<String>,
    pub enriched: Field<String>,
    pub blocks: Field<Vec<Block>>,
}

impl Chunk {
    pub fn new(content: impl Into<String>, blocks: Vec<Block>) -> Self {
        Self {
            content: Field::Value(content.into()),
            blocks: Field::Value(blocks),
            ..Self::default()
        }
    }

    pub fn with_embed(mut self, embed: impl Into<String>) -> Self {
        self.embed = Field::Value(embed.into());
        self
    }

    pub fn with_enriched(mut self, enriched: impl Into<String>) -> Self {
        self.enriched = Field::Value(enriched.into());
        self
    }
}

impl ModelType for Chunk {
    fn schema() -> &'static ModelSchema {
        &CHUNK
    }

    fn from_model(mut model: Model) -> Result<Self, ConvertError> {
        Ok(Self {
            content: model.take_as("content")?,
            embed: model.take_as("embed")?,
            enriched: model.take_as("enriched")?,
            blocks: model.take_as("blocks")?,
        })
    }

    fn to_model(&self) -> Result<Model, ConvertError> {
        let mut model = Model::new(Self::schema());
        model
            .set_from("content", self.content.clone())?
            .set_from("embed", self.embed.clone())?
            .set_from("enriched", self.enriched.clone())?
            .set_from("blocks", self.blocks.clone())?;
        Ok(model)
    }
}

// ---------------------------------------------------------------------------
// ParseUsage
// ---------------------------------------------------------------------------

static PARSE_USAGE: Lazy<ModelSchema> = Lazy::new(|| {
    ModelSchema::new(
        "ParseUsage",
        vec![
            FieldSchema::renamed("numPages", "num_pages", Converter::int()).required(),
            FieldSchema::new("credits", Converter::float()).nullable(),
            FieldSchema::renamed("billingDate", "billing_date", Converter::date()),
        ],
    )
});

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseUsage {
    pub num_pages: Field<i64>,
    pub credits: Field<f64>,
    pub billing_date: Field<NaiveDate>,
}

impl ParseUsage {
    pub fn new(num_pages: i64) -> Self {
        Self {
            num_pages: Field::Value(num_pages),
            ..Self::default()
        }
    }

    pub fn with_credits(mut self, credits: f64) -> Self {
        self.credits = Field::Value(credits);
        self
    }

    pub fn with_billing_date(mut self, date: NaiveDate) -> Self {
        self.billing_date = Field::Value(date);
        self
    }
}

impl ModelType for ParseUsage {
    fn schema() -> &'static ModelSchema {
        &PARSE_USAGE
    }

    fn from_model(mut model: Model) -> Result<Self, ConvertError> {
        Ok(Self {
            num_pages: model.take_as("numPages")?,
            credits: model.take_as("credits")?,
            billing_date: model.take_as("billingDate")?,
        })
    }

    fn to_model(&self) -> Result<Model, ConvertError> {
        let mut model = Model::new(Self::schema());
        model
            .set_from("numPages", self.num_pages.clone())?
            .set_from("credits", self.credits.clone())?
            .set_from("billingDate", self.billing_date.clone())?;
        Ok(model)
    }
}

// ---------------------------------------------------------------------------
// Request side
// ---------------------------------------------------------------------------

static PAGE_RANGE: Lazy<ModelSchema> = Lazy::new(|| {
    ModelSchema::new(
        "PageRange",
        vec![
            FieldSchema::new("start", Converter::int()).required(),
            FieldSchema::new("end", Converter::int()),
        ],
    )
});

/// Inclusive, 1-based page range. An unset `end` means "to the last page".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageRange {
    pub start: Field<i64>,
    pub end: Field<i64>,
}

impl PageRange {
    pub fn new(start: i64) -> Self {
        Self {
            start: Field::Value(start),
            end: Field::Unset,
        }
    }

    pub fn with_end(mut self, end: i64) -> Self {
        self.end = Field::Value(end);
        self
    }
}

impl ModelType for PageRange {
    fn schema() -> &'static ModelSchema {
        &PAGE_RANGE
    }

    fn from_model(mut model: Model) -> Result<Self, ConvertError> {
        Ok(Self {
            start: model.take_as("start")?,
            end: model.take_as("end")?,
        })
    }

    fn to_model(&self) -> Result<Model, ConvertError> {
        let mut model = Model::new(Self::schema());
        model
            .set_from("start", self.start.clone())?
            .set_from("end", self.end.clone())?;
        Ok(model)
    }
}

static PARSE_OPTIONS: Lazy<ModelSchema> = Lazy::new(|| {
    ModelSchema::new(
        "ParseOptions",
        vec![
            FieldSchema::renamed("outputFormat", "output_format", Converter::enum_of::<OutputFormat>()),
            FieldSchema::renamed("pageRange", "page_range", Converter::model::<PageRange>()).nullable(),
            FieldSchema::renamed("ocrMode", "ocr_mode", Converter::enum_of::<OcrMode>()),
            FieldSchema::renamed("extractImages", "extract_images", Converter::bool()),
            FieldSchema::renamed(
                "filterBlocks",
                "filter_blocks",
                Converter::list_of(Converter::enum_of::<BlockType>()),
            ),
        ],
    )
});

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseOptions {
    pub output_format: Field<OpenEnum<OutputFormat>>,
    /// Null clears a range set by a saved configuration.
    pub page_range: Field<PageRange>,
    pub ocr_mode: Field<OpenEnum<OcrMode>>,
    pub extract_images: Field<bool>,
    /// Block types to drop from the result.
    pub filter_blocks: Field<Vec<OpenEnum<BlockType>>>,
}

impl ParseOptions {
    pub fn with_output_format(mut self, format: impl Into<OpenEnum<OutputFormat>>) -> Self {
        self.output_format = Field::Value(format.into());
        self
    }

    pub fn with_page_range(mut self, range: PageRange) -> Self {
        self.page_range = Field::Value(range);
        self
    }

    pub fn with_ocr_mode(mut self, mode: impl Into<OpenEnum<OcrMode>>) -> Self {
        self.ocr_mode = Field::Value(mode.into());
        self
    }

    pub fn with_extract_images(mut self, extract: bool) -> Self {
        self.extract_images = Field::Value(extract);
        self
    }

    pub fn with_filter_blocks(mut self, blocks: impl IntoIterator<Item = BlockType>) -> Self {
        self.filter_blocks = Field::Value(blocks.into_iter().map(OpenEnum::Known).collect());
        self
    }
}

impl ModelType for ParseOptions {
    fn schema() -> &'static ModelSchema {
        &PARSE_OPTIONS
    }

    fn from_model(mut model: Model) -> Result<Self, ConvertError> {
        Ok(Self {
            output_format: model.take_as("outputFormat")?,
            page_range: model.take_as("pageRange")?,
            ocr_mode: model.take_as("ocrMode")?,
            extract_images: model.take_as("extractImages")?,
            filter_blocks: model.take_as("filterBlocks")?,
        })
    }

    fn to_model(&self) -> Result<Model, ConvertError> {
        let mut model = Model::new(Self::schema());
        model
            .set_from("outputFormat", self.output_format.clone())?
            .set_from("pageRange", self.page_range.clone())?
            .set_from("ocrMode", self.ocr_mode.clone())?
            .set_from("extractImages", self.extract_images.clone())?
            .set_from("filterBlocks", self.filter_blocks.clone())?;
        Ok(model)
    }
}

static PARSE_REQUEST: Lazy<ModelSchema> = Lazy::new(|| {
    ModelSchema::new(
        "ParseRequest",
        vec![
            FieldSchema::renamed("documentUrl", "document_url", Converter::string()),
            FieldSchema::new("file", Converter::Upload),
            FieldSchema::new("options", Converter::model::<ParseOptions>()),
            FieldSchema::new("priority", Converter::enum_of::<Priority>()),
            FieldSchema::new("metadata", Converter::map_of(Converter::json())),
        ],
    )
});

/// Body of a parse call: either a document URL or an uploaded file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseRequest {
    pub document_url: Field<String>,
    pub file: Field<UploadResource>,
    pub options: Field<ParseOptions>,
    pub priority: Field<OpenEnum<Priority>>,
    /// Caller-defined tags echoed back on the response.
    pub metadata: Field<IndexMap<String, Value>>,
}

impl ParseRequest {
    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            document_url: Field::Value(url.into()),
            ..Self::default()
        }
    }

    pub fn from_upload(file: UploadResource) -> Self {
        Self {
            file: Field::Value(file),
            ..Self::default()
        }
    }

    pub fn with_options(mut self, options: ParseOptions) -> Self {
        self.options = Field::Value(options);
        self
    }

    pub fn with_priority(mut self, priority: impl Into<OpenEnum<Priority>>) -> Self {
        self.priority = Field::Value(priority.into());
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: Value) -> Self {
        let mut entries = match std::mem::take(&mut self.metadata) {
            Field::Value(entries) => entries,
            Field::Unset | Field::Null => IndexMap::new(),
        };
        entries.insert(key.into(), value);
        self.metadata = Field::Value(entries);
        self
    }
}

impl ModelType for ParseRequest {
    fn schema() -> &'static ModelSchema {
        &PARSE_REQUEST
    }

    fn from_model(mut model: Model) -> Result<Self, ConvertError> {
        Ok(Self {
            document_url: model.take_as("documentUrl")?,
            file: model.take_as("file")?,
            options: model.take_as("options")?,
            priority: model.take_as("priority")?,
            metadata: model.take_as("metadata")?,
        })
    }

    fn to_model(&self) -> Result<Model, ConvertError> {
        let mut model = Model::new(Self::schema());
        model
            .set_from("documentUrl", self.document_url.clone())?
            .set_from("file", self.file.clone())?
            .set_from("options", self.options.clone())?
            .set_from("priority", self.priority.clone())?
            .set_from("metadata", self.metadata.clone())?;
        Ok(model)
    }
}

// ---------------------------------------------------------------------------
// ParseResponse
// ---------------------------------------------------------------------------

static PARSE_RESPONSE: Lazy<ModelSchema> = Lazy::new(|| {
    ModelSchema::new(
        "ParseResponse",
        vec![
            FieldSchema::renamed("jobId", "job_id", Converter::string()).required(),
            FieldSchema::new("status", Converter::enum_of::<JobStatus>()).required(),
            FieldSchema::new("duration", Converter::float()),
            FieldSchema::renamed("pdfUrl", "pdf_url", Converter::string()).nullable(),
            FieldSchema::new("result", ParseResult::converter()).required().nullable(),
            FieldSchema::new("usage", Converter::model::<ParseUsage>()),
            FieldSchema::renamed("createdAt", "created_at", Converter::timestamp()),
            FieldSchema::new("metadata", Converter::map_of(Converter::json())),
        ],
    )
});

/// Response of a parse call or a job poll.
///
/// `result` is null until the job completes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseResponse {
    pub job_id: Field<String>,
    pub status: Field<OpenEnum<JobStatus>>,
    pub duration: Field<f64>,
    pub pdf_url: Field<String>,
    pub result: Field<ParseResult>,
    pub usage: Field<ParseUsage>,
    pub created_at: Field<DateTime<FixedOffset>>,
    pub metadata: Field<IndexMap<String, Value>>,
}

impl ParseResponse {
    pub fn new(job_id: impl Into<String>, status: impl Into<OpenEnum<JobStatus>>) -> Self {
        Self {
            job_id: Field::Value(job_id.into()),
            status: Field::Value(status.into()),
            result: Field::Null,
            ..Self::default()
        }
    }

    pub fn with_result(mut self, result: ParseResult) -> Self {
        self.result = Field::Value(result);
        self
    }

    pub fn with_usage(mut self, usage: ParseUsage) -> Self {
        self.usage = Field::Value(usage);
        self
    }

    pub fn with_duration(mut self, seconds: f64) -> Self {
        self.duration = Field::Value(seconds);
        self
    }

    pub fn with_created_at(mut self, at: DateTime<FixedOffset>) -> Self {
        self.created_at = Field::Value(at);
        self
    }

    /// True once the server reports a terminal status.
    pub fn is_finished(&self) -> bool {
        matches!(
            self.status.value().and_then(OpenEnum::known),
            Some(JobStatus::Completed | JobStatus::Failed)
        )
    }
}

impl ModelType for ParseResponse {
    fn schema() -> &'static ModelSchema {
        &PARSE_RESPONSE
    }

    fn from_model(mut model: Model) -> Result<Self, ConvertError> {
        Ok(Self {
            job_id: model.take_as("jobId")?,
            status: model.take_as("status")?,
            duration: model.take_as("duration")?,
            pdf_url: model.take_as("pdfUrl")?,
            result: model.take_as("result")?,
            usage: model.take_as("usage")?,
            created_at: model.take_as("createdAt")?,
            metadata: model.take_as("metadata")?,
        })
    }

    fn to_model(&self) -> Result<Model, ConvertError> {
        let mut model = Model::new(Self::schema());
        model
            .set_from("jobId", self.job_id.clone())?
            .set_from("status", self.status.clone())?
            .set_from("duration", self.duration.clone())?
            .set_from("pdfUrl", self.pdf_url.clone())?
            .set_from("result", self.result.clone())?
            .set_from("usage", self.usage.clone())?
            .set_from("createdAt", self.created_at.clone())?
            .set_from("metadata", self.metadata.clone())?;
        Ok(model)
    }
}
