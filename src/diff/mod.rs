//! diff
//!
//! Comparisons between trees, the index and the working directory, and
//! between two blobs.
//!
//! # Modules
//!
//! - [`types`] - Change summaries and patches
//! - [`request`] - The canonical [`CompareRequest`]
//! - [`shape`] - Type-level result shape selection
//! - [`dispatch`] - Entry points that funnel into one request
//! - [`mock`] - Scripted differ for tests
//!
//! # Example
//!
//! ```
//! use gitbridge::diff::{compare, ChangeSummary, CompareRequest};
//! use gitbridge::diff::mock::MockDiffer;
//!
//! let differ = MockDiffer::new();
//! let changes = compare::<ChangeSummary, _>(&differ, CompareRequest::index_to_workdir()).unwrap();
//! assert!(changes.is_empty());
//! ```

pub mod dispatch;
pub mod mock;
pub mod request;
pub mod shape;
mod traits;
pub mod types;

pub use dispatch::{
    compare, compare_blobs, compare_index_to_workdir, compare_tree_to_targets, compare_trees,
};
pub use request::{
    CompareEndpoints, CompareOptions, CompareRequest, DiffTargets, ExplicitPathsOptions,
    ShapeKind, UnmatchedPathPolicy,
};
pub use shape::{ChangeSummary, FullPatch, ResultShape};
pub use traits::{DiffError, DiffOutput, TreeDiffer};
pub use types::{ChangeKind, DiffLine, FilePatch, Hunk, LineOrigin, Patch, TreeChanges, TreeEntryChange};
