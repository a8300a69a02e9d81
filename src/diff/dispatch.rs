//! diff::dispatch
//!
//! Route every comparison through one canonical request.
//!
//! # Path filters
//!
//! - `None` compares everything.
//! - `Some(vec![])` compares nothing: an empty result of the requested
//!   shape is returned and the differ is not called.
//! - With explicit paths set, every requested path must touch at least one
//!   changed entry on either side. Unmatched paths are logged under
//!   [`UnmatchedPathPolicy::Ignore`] and fail the comparison under
//!   [`UnmatchedPathPolicy::Fail`].

use tracing::debug;

use super::request::{CompareRequest, DiffTargets, UnmatchedPathPolicy};
use super::shape::ResultShape;
use super::traits::{DiffError, DiffOutput, TreeDiffer};
use crate::core::types::Oid;

/// Run a comparison and return it in shape `S`.
///
/// The differ is invoked at most once.
pub fn compare<S, D>(differ: &D, mut request: CompareRequest) -> Result<S::Output, DiffError>
where
    S: ResultShape,
    D: TreeDiffer + ?Sized,
{
    request.shape = S::KIND;

    if request.paths.as_ref().is_some_and(|p| p.is_empty()) {
        debug!("empty path filter, nothing to compare");
        return Ok(S::empty());
    }

    debug!(
        endpoints = ?request.endpoints,
        shape = ?request.shape,
        paths = request.paths.as_ref().map_or(0, |p| p.len()),
        "comparing"
    );
    let output = differ.diff(&request)?;
    check_explicit_paths(&request, &output)?;
    S::project(output)
}

/// Compare two trees. A missing side is the empty tree.
pub fn compare_trees<S, D>(
    differ: &D,
    old: Option<Oid>,
    new: Option<Oid>,
) -> Result<S::Output, DiffError>
where
    S: ResultShape,
    D: TreeDiffer + ?Sized,
{
    compare::<S, D>(differ, CompareRequest::trees(old, new))
}

/// Compare a tree with the index and/or working directory.
pub fn compare_tree_to_targets<S, D>(
    differ: &D,
    old: Option<Oid>,
    targets: DiffTargets,
) -> Result<S::Output, DiffError>
where
    S: ResultShape,
    D: TreeDiffer + ?Sized,
{
    compare::<S, D>(differ, CompareRequest::tree_to_targets(old, targets))
}

/// Compare the index with the working directory.
pub fn compare_index_to_workdir<S, D>(
    differ: &D,
    include_untracked: bool,
) -> Result<S::Output, DiffError>
where
    S: ResultShape,
    D: TreeDiffer + ?Sized,
{
    compare::<S, D>(differ, CompareRequest::index_to_workdir_with(include_untracked))
}

/// Compare the contents of two blobs. A missing side is an empty blob.
///
/// Blobs carry no path, so the result holds at most one entry with an
/// empty path.
pub fn compare_blobs<S, D>(
    differ: &D,
    old: Option<Oid>,
    new: Option<Oid>,
) -> Result<S::Output, DiffError>
where
    S: ResultShape,
    D: TreeDiffer + ?Sized,
{
    compare::<S, D>(differ, CompareRequest::blobs(old, new))
}

fn check_explicit_paths(request: &CompareRequest, output: &DiffOutput) -> Result<(), DiffError> {
    let (Some(explicit), Some(paths)) = (request.explicit_paths, request.paths.as_ref()) else {
        return Ok(());
    };

    let changes = output.changes();
    for path in paths {
        if changes.touches(path) {
            continue;
        }
        match explicit.unmatched {
            UnmatchedPathPolicy::Ignore => debug!(path = %path, "explicit path matched nothing"),
            UnmatchedPathPolicy::Fail => {
                return Err(DiffError::UnmatchedPath { path: path.clone() })
            }
        }
    }
    Ok(())
}
