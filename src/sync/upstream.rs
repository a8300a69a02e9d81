//! sync::upstream
//!
//! Derive a branch's push refspec from its upstream tracking configuration.
//!
//! This is pure string composition over branch metadata the repository has
//! already resolved. Nothing here touches the network or object database.

use super::SyncError;
use crate::core::types::{Branch, Refspec, Remote};

/// Build the push refspec `<canonical>:<upstream>` for a branch.
///
/// # Errors
///
/// - [`SyncError::MissingUpstream`] if the branch has no (or an empty)
///   upstream configured
/// - [`SyncError::InvalidArgument`] if the composed refspec is malformed
///
/// # Example
///
/// ```
/// use gitbridge::core::types::{Branch, Remote};
/// use gitbridge::sync::upstream::resolve;
///
/// let branch = Branch::local("foo")
///     .tracking(Remote::new("origin", None), "refs/remotes/origin/foo");
/// let spec = resolve(&branch).unwrap();
/// assert_eq!(spec.as_str(), "refs/heads/foo:refs/remotes/origin/foo");
///
/// assert!(resolve(&Branch::local("bar")).is_err());
/// ```
pub fn resolve(branch: &Branch) -> Result<Refspec, SyncError> {
    let upstream = branch
        .upstream()
        .ok_or_else(|| SyncError::MissingUpstream {
            friendly_name: branch.friendly_name.clone(),
            canonical_name: branch.canonical_name.clone(),
        })?;

    Refspec::mapping(&branch.canonical_name, upstream).map_err(|e| SyncError::InvalidArgument {
        name: "branch",
        reason: e.to_string(),
    })
}

/// The remote a branch pushes to.
///
/// # Errors
///
/// Returns [`SyncError::MissingRemote`] if the branch has no remote.
pub fn remote_of(branch: &Branch) -> Result<&Remote, SyncError> {
    branch.remote.as_ref().ok_or_else(|| SyncError::MissingRemote {
        friendly_name: branch.friendly_name.clone(),
        canonical_name: branch.canonical_name.clone(),
    })
}
