//! sync
//!
//! Fetch, push and reference listing on top of a [`Network`](crate::network::Network).
//!
//! # Modules
//!
//! - [`request`] - One canonical request record per operation
//! - [`upstream`] - Branch -> `<local>:<upstream>` refspec
//! - [`planner`] - Validate-then-execute push planning
//! - [`ext`] - [`NetworkExt`], the shorthand call shapes
//!
//! # Errors
//!
//! [`SyncError`] separates caller mistakes (`InvalidArgument`), repository
//! configuration problems found before anything is sent (`MissingUpstream`,
//! `MissingRemote`) and collaborator failures (`Network`), which are passed
//! through untouched.

pub mod ext;
pub mod planner;
pub mod request;
pub mod upstream;

pub use ext::NetworkExt;
pub use planner::PushPrecondition;

use thiserror::Error;

use crate::network::NetworkError;

/// Errors from sync operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SyncError {
    /// A caller-supplied argument is empty or malformed.
    #[error("invalid argument '{name}': {reason}")]
    InvalidArgument {
        /// Parameter name
        name: &'static str,
        /// What is wrong with it
        reason: String,
    },

    /// A branch to push has no upstream configured.
    #[error(
        "the branch '{friendly_name}' (\"{canonical_name}\") that you are trying to push \
         does not track an upstream branch"
    )]
    MissingUpstream {
        /// Short branch name
        friendly_name: String,
        /// Full ref name
        canonical_name: String,
    },

    /// A branch to push has an upstream but no remote.
    #[error(
        "the branch '{friendly_name}' (\"{canonical_name}\") that you are trying to push \
         has no remote configured"
    )]
    MissingRemote {
        /// Short branch name
        friendly_name: String,
        /// Full ref name
        canonical_name: String,
    },

    /// The network collaborator failed.
    #[error(transparent)]
    Network(#[from] NetworkError),
}

impl SyncError {
    /// Whether this error was raised before any collaborator call.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            SyncError::MissingUpstream { .. } | SyncError::MissingRemote { .. }
        )
    }
}
