//! File uploads embedded in request bodies.
//!
//! A streamed upload can be read exactly once. Dumping it consumes the stream
//! and marks the surrounding [`DumpState`] as non-retryable; dumping it again
//! fails with [`ConvertError::UnresumableResource`]. Buffered uploads can be
//! replayed and never affect the retry flag. A model dumped from the root is
//! checked in full before any stream is read, so a body that fails to dump
//! leaves its uploads untouched.

use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};

use serde_json::Value;

use crate::error::ConvertError;
use crate::state::{DumpState, Traversal};

const DEFAULT_FILENAME: &str = "upload";

enum Source {
    Buffered(Arc<[u8]>),
    Stream(Box<dyn Read + Send>),
    Consumed,
}

/// A file supplied for upload.
///
/// Clones share the same underlying source, so a stream consumed through one
/// clone is consumed for all of them.
#[derive(Clone)]
pub struct UploadResource {
    source: Arc<Mutex<Source>>,
    filename: Option<String>,
    content_type: Option<String>,
}

impl UploadResource {
    /// One-shot upload read from `reader` when the body is dumped.
    pub fn from_reader(reader: impl Read + Send + 'static) -> Self {
        Self::with_source(Source::Stream(Box::new(reader)))
    }

    /// One-shot upload backed by an open file. The file name becomes the
    /// upload's filename.
    pub fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let mut upload = Self::from_reader(file);
        upload.filename = path.file_name().map(|n| n.to_string_lossy().into_owned());
        Ok(upload)
    }

    /// Replayable upload held in memory.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self::with_source(Source::Buffered(Arc::from(bytes.into())))
    }

    fn with_source(source: Source) -> Self {
        Self {
            source: Arc::new(Mutex::new(source)),
            filename: None,
            content_type: None,
        }
    }

    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// `true` when dumping this upload can be repeated.
    pub fn is_replayable(&self) -> bool {
        let source = self.source.lock().unwrap_or_else(PoisonError::into_inner);
        matches!(*source, Source::Buffered(_))
    }

    /// `true` once a streamed upload has been read.
    pub fn is_consumed(&self) -> bool {
        let source = self.source.lock().unwrap_or_else(PoisonError::into_inner);
        matches!(*source, Source::Consumed)
    }

    /// Read the upload into an [`UploadPart`] recorded on `state`, returning the
    /// JSON placeholder (the filename) for the body.
    pub(crate) fn dump(&self, state: &mut DumpState) -> Result<Value, ConvertError> {
        let mut source = self.source.lock().unwrap_or_else(PoisonError::into_inner);
        if state.is_rehearsal() {
            if matches!(*source, Source::Consumed) {
                return Err(ConvertError::UnresumableResource {
                    path: state.path().clone(),
                });
            }
            return Ok(Value::String(self.wire_filename()));
        }
        let bytes: Arc<[u8]> = match std::mem::replace(&mut *source, Source::Consumed) {
            Source::Buffered(bytes) => {
                *source = Source::Buffered(bytes.clone());
                bytes
            }
            Source::Stream(mut reader) => {
                drop(source);
                state.forbid_retry();
                let mut buf = Vec::new();
                reader
                    .read_to_end(&mut buf)
                    .map_err(|e| ConvertError::ResourceRead {
                        path: state.path().clone(),
                        message: e.to_string(),
                    })?;
                Arc::from(buf)
            }
            Source::Consumed => {
                return Err(ConvertError::UnresumableResource {
                    path: state.path().clone(),
                });
            }
        };

        let filename = self.wire_filename();
        state.push_upload(UploadPart {
            path: state.path().to_string(),
            filename: filename.clone(),
            content_type: self.content_type.clone(),
            bytes,
        });
        Ok(Value::String(filename))
    }

    fn wire_filename(&self) -> String {
        self.filename.clone().unwrap_or_else(|| DEFAULT_FILENAME.to_string())
    }
}

impl PartialEq for UploadResource {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.source, &other.source)
            && self.filename == other.filename
            && self.content_type == other.content_type
    }
}

impl fmt::Debug for UploadResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = {
            let source = self.source.lock().unwrap_or_else(PoisonError::into_inner);
            match &*source {
                Source::Buffered(b) => format!("buffered({} bytes)", b.len()),
                Source::Stream(_) => "stream".to_string(),
                Source::Consumed => "consumed".to_string(),
            }
        };
        f.debug_struct("UploadResource")
            .field("source", &kind)
            .field("filename", &self.filename)
            .field("content_type", &self.content_type)
            .finish()
    }
}

/// Bytes read from an upload during dump, for the transport to send as a
/// multipart part.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadPart {
    /// Location of the upload field in the body, e.g. `file`.
    pub path: String,
    pub filename: String,
    pub content_type: Option<String>,
    pub bytes: Arc<[u8]>,
}
