//! diff::traits
//!
//! The differ collaborator seam.

use thiserror::Error;

use super::request::CompareRequest;
use super::types::{Patch, TreeChanges};

/// Errors from comparisons.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DiffError {
    /// An explicit path matched no change and the policy is `Fail`.
    #[error("path '{path}' did not match any change")]
    UnmatchedPath { path: String },

    /// The differ returned a summary where a patch was requested.
    #[error("differ returned a change summary where a patch was requested")]
    UnexpectedShape,

    /// A tree could not be resolved.
    #[error("tree not found: {0}")]
    TreeNotFound(String),

    /// A blob could not be resolved.
    #[error("blob not found: {0}")]
    BlobNotFound(String),

    /// Any other differ failure.
    #[error("diff failed: {0}")]
    Internal(String),
}

/// Raw differ output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffOutput {
    Summary(TreeChanges),
    Patch(Patch),
}

impl DiffOutput {
    /// The change summary, whichever shape this is.
    pub fn changes(&self) -> TreeChanges {
        match self {
            DiffOutput::Summary(changes) => changes.clone(),
            DiffOutput::Patch(patch) => patch.changes(),
        }
    }
}

/// Something that can compare trees, indexes and working directories.
///
/// Implementations should honor `request.shape`, but the dispatcher copes
/// with a patch returned for a summary request.
pub trait TreeDiffer {
    /// Run one comparison.
    fn diff(&self, request: &CompareRequest) -> Result<DiffOutput, DiffError>;
}

impl<T: TreeDiffer + ?Sized> TreeDiffer for &T {
    fn diff(&self, request: &CompareRequest) -> Result<DiffOutput, DiffError> {
        (**self).diff(request)
    }
}
