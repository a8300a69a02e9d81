//! diff::request
//!
//! The canonical comparison request. Every compare entry point builds one
//! of these and hands it to the dispatcher unchanged apart from the result
//! shape.

use serde::{Deserialize, Serialize};

use crate::core::types::Oid;

/// Targets a tree can be compared against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffTargets {
    /// The index (staged changes)
    Index,
    /// The working directory, ignoring the index
    WorkingDirectory,
    /// The working directory as seen through the index
    WorkingDirectoryAndIndex,
}

impl DiffTargets {
    /// Names accepted by [`DiffTargets::parse`].
    pub const NAMES: &'static [&'static str] = &["index", "workdir", "workdir-and-index"];

    /// Parse a target from its command-line name.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "index" => Some(DiffTargets::Index),
            "workdir" => Some(DiffTargets::WorkingDirectory),
            "workdir-and-index" => Some(DiffTargets::WorkingDirectoryAndIndex),
            _ => None,
        }
    }
}

/// What is compared with what.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CompareEndpoints {
    /// Two trees. A missing `old` side is the empty tree.
    Trees { old: Option<Oid>, new: Option<Oid> },
    /// A tree against the index and/or working directory.
    TreeToTargets { old: Option<Oid>, targets: DiffTargets },
    /// The index against the working directory.
    IndexToWorkdir { include_untracked: bool },
    /// Two blobs, line by line. A missing side is an empty blob.
    Blobs { old: Option<Oid>, new: Option<Oid> },
}

/// What to do with explicit paths that match no change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnmatchedPathPolicy {
    /// Log and continue.
    #[default]
    Ignore,
    /// Fail the comparison.
    Fail,
}

/// Presence of this record turns path filters into literal paths rather
/// than patterns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplicitPathsOptions {
    pub unmatched: UnmatchedPathPolicy,
}

/// Options forwarded to the differ.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompareOptions {
    pub context_lines: u32,
    pub interhunk_lines: u32,
    pub detect_renames: bool,
    pub include_unmodified: bool,
    pub ignore_whitespace: bool,
}

impl Default for CompareOptions {
    fn default() -> Self {
        Self {
            context_lines: 3,
            interhunk_lines: 0,
            detect_renames: false,
            include_unmodified: false,
            ignore_whitespace: false,
        }
    }
}

/// Requested result shape.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    #[default]
    Summary,
    Patch,
}

/// One comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompareRequest {
    pub endpoints: CompareEndpoints,
    /// `None` compares everything; `Some(vec![])` compares nothing.
    pub paths: Option<Vec<String>>,
    /// Set to treat `paths` literally.
    pub explicit_paths: Option<ExplicitPathsOptions>,
    pub options: CompareOptions,
    /// Overwritten by the dispatcher from the requested result type.
    pub shape: ShapeKind,
}

impl CompareRequest {
    fn with_endpoints(endpoints: CompareEndpoints) -> Self {
        Self {
            endpoints,
            paths: None,
            explicit_paths: None,
            options: CompareOptions::default(),
            shape: ShapeKind::default(),
        }
    }

    /// Compare two trees.
    pub fn trees(old: Option<Oid>, new: Option<Oid>) -> Self {
        Self::with_endpoints(CompareEndpoints::Trees { old, new })
    }

    /// Compare a tree against the index and/or working directory.
    pub fn tree_to_targets(old: Option<Oid>, targets: DiffTargets) -> Self {
        Self::with_endpoints(CompareEndpoints::TreeToTargets { old, targets })
    }

    /// Compare the index against the working directory, without untracked
    /// files.
    pub fn index_to_workdir() -> Self {
        Self::index_to_workdir_with(false)
    }

    /// Compare the index against the working directory.
    pub fn index_to_workdir_with(include_untracked: bool) -> Self {
        Self::with_endpoints(CompareEndpoints::IndexToWorkdir { include_untracked })
    }

    /// Compare the contents of two blobs.
    pub fn blobs(old: Option<Oid>, new: Option<Oid>) -> Self {
        Self::with_endpoints(CompareEndpoints::Blobs { old, new })
    }

    /// Restrict to these paths.
    pub fn with_paths<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.paths = Some(paths.into_iter().map(Into::into).collect());
        self
    }

    /// Treat paths literally, with the given unmatched-path policy.
    pub fn with_explicit_paths(mut self, explicit: ExplicitPathsOptions) -> Self {
        self.explicit_paths = Some(explicit);
        self
    }

    /// Replace the differ options.
    pub fn with_options(mut self, options: CompareOptions) -> Self {
        self.options = options;
        self
    }
}
