//! Per-call traversal context for coerce and dump.
//!
//! Both states are scratch values: create one per conversion call and never
//! share it between concurrent calls.

use crate::error::ConvertError;
use crate::path::{FieldPath, PathSegment};
use crate::upload::UploadPart;

/// Path bookkeeping shared by both states.
pub trait Traversal {
    fn path(&self) -> &FieldPath;
    fn path_mut(&mut self) -> &mut FieldPath;

    /// Run `f` with `segment` pushed onto the path.
    ///
    /// The segment is popped again whether `f` succeeds or fails, so a failed
    /// union variant leaves the path exactly as it found it.
    fn scoped<T>(
        &mut self,
        segment: impl Into<PathSegment>,
        f: impl FnOnce(&mut Self) -> Result<T, ConvertError>,
    ) -> Result<T, ConvertError>
    where
        Self: Sized,
    {
        self.path_mut().push(segment.into());
        let out = f(self);
        self.path_mut().pop();
        out
    }
}

#[derive(Debug, Default)]
pub struct CoerceState {
    path: FieldPath,
}

impl CoerceState {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Traversal for CoerceState {
    fn path(&self) -> &FieldPath {
        &self.path
    }

    fn path_mut(&mut self) -> &mut FieldPath {
        &mut self.path
    }
}

/// Dump context. `can_retry` starts `true` and only ever goes to `false`.
#[derive(Debug)]
pub struct DumpState {
    path: FieldPath,
    can_retry: bool,
    uploads: Vec<UploadPart>,
    rehearsal: bool,
}

impl Default for DumpState {
    fn default() -> Self {
        Self {
            path: FieldPath::root(),
            can_retry: true,
            uploads: Vec::new(),
            rehearsal: false,
        }
    }
}

impl DumpState {
    pub fn new() -> Self {
        Self::default()
    }

    /// A throwaway state for a checking pass: uploads are not read.
    pub(crate) fn rehearsal() -> Self {
        Self {
            rehearsal: true,
            ..Self::default()
        }
    }

    pub(crate) fn is_rehearsal(&self) -> bool {
        self.rehearsal
    }

    pub fn can_retry(&self) -> bool {
        self.can_retry
    }

    /// Record that the body being built cannot be regenerated.
    pub fn forbid_retry(&mut self) {
        if self.can_retry {
            tracing::debug!(path = %self.path, "body consumed a one-shot upload; retries disabled");
        }
        self.can_retry = false;
    }

    pub(crate) fn push_upload(&mut self, part: UploadPart) {
        self.uploads.push(part);
    }

    pub fn uploads(&self) -> &[UploadPart] {
        &self.uploads
    }

    /// Consume the state, returning `(can_retry, uploads)`.
    pub fn finish(self) -> (bool, Vec<UploadPart>) {
        (self.can_retry, self.uploads)
    }
}

impl Traversal for DumpState {
    fn path(&self) -> &FieldPath {
        &self.path
    }

    fn path_mut(&mut self) -> &mut FieldPath {
        &mut self.path
    }
}
