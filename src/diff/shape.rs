//! diff::shape
//!
//! Result shapes selected at the type level.
//!
//! [`ChangeSummary`] and [`FullPatch`] are uninhabited markers; only their
//! [`ResultShape`] impls matter. Adding a shape means adding a marker and
//! an impl, and every compare entry point picks it up.
//!
//! ```
//! use gitbridge::diff::{compare_trees, ChangeSummary, FullPatch};
//! use gitbridge::diff::mock::MockDiffer;
//!
//! let differ = MockDiffer::new();
//! let summary = compare_trees::<ChangeSummary, _>(&differ, None, None).unwrap();
//! let patch = compare_trees::<FullPatch, _>(&differ, None, None).unwrap();
//! assert_eq!(summary, patch.changes());
//! ```

use super::request::ShapeKind;
use super::traits::{DiffError, DiffOutput};
use super::types::{Patch, TreeChanges};

/// A comparison result shape.
pub trait ResultShape {
    /// Shape requested from the differ.
    const KIND: ShapeKind;

    /// Value handed back to the caller.
    type Output;

    /// Result of a comparison that compared nothing.
    fn empty() -> Self::Output;

    /// Convert raw differ output into this shape.
    fn project(output: DiffOutput) -> Result<Self::Output, DiffError>;
}

/// Which paths changed and how.
#[derive(Debug)]
pub enum ChangeSummary {}

/// Line-level patch.
#[derive(Debug)]
pub enum FullPatch {}

impl ResultShape for ChangeSummary {
    const KIND: ShapeKind = ShapeKind::Summary;
    type Output = TreeChanges;

    fn empty() -> TreeChanges {
        TreeChanges::default()
    }

    fn project(output: DiffOutput) -> Result<TreeChanges, DiffError> {
        Ok(match output {
            DiffOutput::Summary(changes) => changes,
            DiffOutput::Patch(patch) => patch.into(),
        })
    }
}

impl ResultShape for FullPatch {
    const KIND: ShapeKind = ShapeKind::Patch;
    type Output = Patch;

    fn empty() -> Patch {
        Patch::default()
    }

    fn project(output: DiffOutput) -> Result<Patch, DiffError> {
        match output {
            DiffOutput::Patch(patch) => Ok(patch),
            DiffOutput::Summary(_) => Err(DiffError::UnexpectedShape),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::types::{ChangeKind, FilePatch, TreeEntryChange};

    fn patch() -> Patch {
        Patch::new(vec![FilePatch::new(
            TreeEntryChange::new("a.txt", ChangeKind::Added),
            vec![],
            false,
        )])
    }

    #[test]
    fn summary_projects_patch() {
        let changes = ChangeSummary::project(DiffOutput::Patch(patch())).unwrap();
        assert_eq!(changes, patch().changes());
    }

    #[test]
    fn full_patch_rejects_summary() {
        assert_eq!(
            FullPatch::project(DiffOutput::Summary(TreeChanges::default())),
            Err(DiffError::UnexpectedShape)
        );
    }

    #[test]
    fn kinds() {
        assert_eq!(ChangeSummary::KIND, ShapeKind::Summary);
        assert_eq!(FullPatch::KIND, ShapeKind::Patch);
        assert!(ChangeSummary::empty().is_empty());
        assert!(FullPatch::empty().is_empty());
    }
}
