//! sync::planner
//!
//! Turn branches, refspecs or object/destination pairs into push requests.
//!
//! # Validate, then execute
//!
//! Pushing a set of branches happens in two passes over a single
//! materialized list:
//!
//! 1. [`validate_branches`] checks every branch for an upstream and a
//!    remote. This is a pure function and returns all failures.
//! 2. Only if nothing failed, each branch's refspec is resolved in input
//!    order and [`execute`] submits one push per branch.
//!
//! A validation failure therefore never leaves the remote half-updated by
//! this crate. Failures raised by the network collaborator after pushes
//! have started are propagated as they are.

use tracing::{debug, info};

use super::request::{parse_refspecs, PushRequest};
use super::upstream;
use super::SyncError;
use crate::core::types::{Branch, Refspec, Remote};
use crate::network::{Network, PushOptions};

/// A branch that cannot be pushed as configured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PushPrecondition {
    /// No upstream branch configured.
    MissingUpstream {
        friendly_name: String,
        canonical_name: String,
    },
    /// Upstream configured but no remote to push to.
    MissingRemote {
        friendly_name: String,
        canonical_name: String,
    },
}

impl From<PushPrecondition> for SyncError {
    fn from(failure: PushPrecondition) -> Self {
        match failure {
            PushPrecondition::MissingUpstream {
                friendly_name,
                canonical_name,
            } => SyncError::MissingUpstream {
                friendly_name,
                canonical_name,
            },
            PushPrecondition::MissingRemote {
                friendly_name,
                canonical_name,
            } => SyncError::MissingRemote {
                friendly_name,
                canonical_name,
            },
        }
    }
}

/// Check every branch for push preconditions.
///
/// Returns one entry per failing branch, in input order. An empty result
/// means every branch can be pushed.
pub fn validate_branches<'a>(branches: impl IntoIterator<Item = &'a Branch>) -> Vec<PushPrecondition> {
    branches
        .into_iter()
        .filter_map(|branch| {
            if branch.upstream().is_none() {
                Some(PushPrecondition::MissingUpstream {
                    friendly_name: branch.friendly_name.clone(),
                    canonical_name: branch.canonical_name.clone(),
                })
            } else if branch.remote.is_none() {
                Some(PushPrecondition::MissingRemote {
                    friendly_name: branch.friendly_name.clone(),
                    canonical_name: branch.canonical_name.clone(),
                })
            } else {
                None
            }
        })
        .collect()
}

/// Plan one push per branch, to each branch's upstream.
///
/// The input is materialized once; validation of all branches completes
/// before any refspec is produced.
///
/// # Errors
///
/// Returns the first precondition failure (see [`validate_branches`]).
///
/// # Example
///
/// ```
/// use gitbridge::core::types::{Branch, Remote};
/// use gitbridge::network::PushOptions;
/// use gitbridge::sync::planner::plan_branches;
///
/// let origin = Remote::new("origin", None);
/// let branches = vec![
///     Branch::local("a").tracking(origin.clone(), "refs/heads/a"),
///     Branch::local("b").tracking(origin, "refs/heads/b"),
/// ];
///
/// let plans = plan_branches(&branches, &PushOptions::default()).unwrap();
/// assert_eq!(plans.len(), 2);
/// assert_eq!(plans[1].refspecs[0].as_str(), "refs/heads/b:refs/heads/b");
///
/// assert!(plan_branches(&[Branch::local("c")], &PushOptions::default()).is_err());
/// ```
pub fn plan_branches<'a>(
    branches: impl IntoIterator<Item = &'a Branch>,
    options: &PushOptions,
) -> Result<Vec<PushRequest>, SyncError> {
    let branches: Vec<&Branch> = branches.into_iter().collect();

    if let Some(failure) = validate_branches(branches.iter().copied())
        .into_iter()
        .next()
    {
        return Err(failure.into());
    }

    branches
        .into_iter()
        .map(|branch| {
            let refspec = upstream::resolve(branch)?;
            let remote = upstream::remote_of(branch)?;
            Ok(PushRequest::new(remote.clone(), vec![refspec], options.clone()))
        })
        .collect()
}

/// Plan a push of a single explicit refspec.
///
/// # Errors
///
/// Returns [`SyncError::InvalidArgument`] if the refspec is empty or malformed.
pub fn plan_refspec(
    remote: &Remote,
    refspec: &str,
    options: &PushOptions,
) -> Result<PushRequest, SyncError> {
    plan_refspecs(remote, &[refspec], options)
}

/// Plan a push of several explicit refspecs in one request.
///
/// # Errors
///
/// Returns [`SyncError::InvalidArgument`] if the list is empty or any entry
/// is empty or malformed.
pub fn plan_refspecs<S: AsRef<str>>(
    remote: &Remote,
    refspecs: &[S],
    options: &PushOptions,
) -> Result<PushRequest, SyncError> {
    if refspecs.is_empty() {
        return Err(SyncError::InvalidArgument {
            name: "refspecs",
            reason: "at least one refspec is required".into(),
        });
    }
    let refspecs = parse_refspecs("refspecs", refspecs)?;
    Ok(PushRequest::new(remote.clone(), refspecs, options.clone()))
}

/// Plan a push of `objectish` to `destination` on the remote.
///
/// An empty `objectish` is accepted and produces the deletion refspec
/// `:destination`.
///
/// # Errors
///
/// Returns [`SyncError::InvalidArgument`] if `destination` is empty or the
/// resulting refspec is malformed.
pub fn plan_object(
    remote: &Remote,
    objectish: &str,
    destination: &str,
    options: &PushOptions,
) -> Result<PushRequest, SyncError> {
    if destination.is_empty() {
        return Err(SyncError::InvalidArgument {
            name: "destination",
            reason: "destination cannot be empty".into(),
        });
    }
    let refspec =
        Refspec::mapping(objectish, destination).map_err(|e| SyncError::InvalidArgument {
            name: "objectish",
            reason: e.to_string(),
        })?;
    Ok(PushRequest::new(remote.clone(), vec![refspec], options.clone()))
}

/// Submit planned pushes in order.
///
/// # Errors
///
/// Stops at the first collaborator error and returns it as
/// [`SyncError::Network`]; later requests are not submitted.
pub fn execute<N: Network + ?Sized>(network: &N, plans: &[PushRequest]) -> Result<(), SyncError> {
    if plans.is_empty() {
        debug!("nothing to push");
        return Ok(());
    }

    for (i, plan) in plans.iter().enumerate() {
        debug!(
            step = i + 1,
            total = plans.len(),
            remote = %plan.remote,
            refspecs = plan.refspecs.len(),
            "pushing"
        );
        network.push(plan)?;
    }

    info!(pushes = plans.len(), "push complete");
    Ok(())
}
