//! sync::ext
//!
//! Shorthand call shapes for fetch, push and reference listing.
//!
//! [`NetworkExt`] is implemented for every [`Network`]. Each operation has
//! one full form (`fetch_with`, `push_with`, `push_branches_with_options`,
//! `list_references_with`); every other method only fills in the defaults
//! listed in [`crate::sync::request`] and forwards.
//!
//! # Example
//!
//! ```
//! use gitbridge::core::types::{Branch, Remote};
//! use gitbridge::network::mock::MockNetwork;
//! use gitbridge::sync::NetworkExt;
//!
//! let network = MockNetwork::new();
//! let origin = Remote::new("origin", None);
//! let branch = Branch::local("feature").tracking(origin.clone(), "refs/heads/feature");
//!
//! network.fetch_remote(&origin).unwrap();
//! network.push_branch(&branch).unwrap();
//!
//! assert_eq!(
//!     network.pushes()[0].refspecs[0].as_str(),
//!     "refs/heads/feature:refs/heads/feature"
//! );
//! ```

use tracing::debug;

use super::planner;
use super::request::{parse_refspecs, FetchRequest, ListReferencesRequest, PushRequest};
use super::SyncError;
use crate::core::types::{Branch, Remote};
use crate::network::{DirectReference, FetchOptions, Network, PushOptions};

/// Convenience methods over a [`Network`].
pub trait NetworkExt: Network {
    // =========================================================================
    // Fetch
    // =========================================================================

    /// Fetch with a fully-specified request.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Network`] if the collaborator fails.
    fn fetch_with(&self, request: &FetchRequest) -> Result<(), SyncError> {
        debug!(
            remote = %request.target,
            refspecs = request.refspecs.as_ref().map_or(0, Vec::len),
            "fetching"
        );
        self.fetch(request)?;
        Ok(())
    }

    /// Fetch a remote using its configured refspecs.
    fn fetch_remote(&self, remote: &Remote) -> Result<(), SyncError> {
        self.fetch_with(&FetchRequest::remote(remote))
    }

    /// Fetch a remote using its configured refspecs and explicit options.
    fn fetch_remote_with_options(
        &self,
        remote: &Remote,
        options: &FetchOptions,
    ) -> Result<(), SyncError> {
        self.fetch_with(&FetchRequest::remote(remote).with_options(options.clone()))
    }

    /// Fetch a remote using its configured refspecs, recording a reflog message.
    fn fetch_remote_with_log(&self, remote: &Remote, log_message: &str) -> Result<(), SyncError> {
        self.fetch_with(&FetchRequest::remote(remote).with_log_message(log_message))
    }

    /// Fetch explicit refspecs from a remote.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::InvalidArgument`] if a refspec is empty or malformed.
    fn fetch_refspecs<S: AsRef<str>>(&self, remote: &Remote, refspecs: &[S]) -> Result<(), SyncError>
    where
        Self: Sized,
    {
        let refspecs = parse_refspecs("refspecs", refspecs)?;
        self.fetch_with(&FetchRequest::remote(remote).with_refspecs(refspecs))
    }

    /// Fetch explicit refspecs from a remote with explicit options.
    fn fetch_refspecs_with_options<S: AsRef<str>>(
        &self,
        remote: &Remote,
        refspecs: &[S],
        options: &FetchOptions,
    ) -> Result<(), SyncError>
    where
        Self: Sized,
    {
        let refspecs = parse_refspecs("refspecs", refspecs)?;
        self.fetch_with(
            &FetchRequest::remote(remote)
                .with_refspecs(refspecs)
                .with_options(options.clone()),
        )
    }

    /// Fetch explicit refspecs from a remote, recording a reflog message.
    fn fetch_refspecs_with_log<S: AsRef<str>>(
        &self,
        remote: &Remote,
        refspecs: &[S],
        log_message: &str,
    ) -> Result<(), SyncError>
    where
        Self: Sized,
    {
        let refspecs = parse_refspecs("refspecs", refspecs)?;
        self.fetch_with(
            &FetchRequest::remote(remote)
                .with_refspecs(refspecs)
                .with_log_message(log_message),
        )
    }

    /// Fetch explicit refspecs from a URL.
    fn fetch_url<S: AsRef<str>>(&self, url: &str, refspecs: &[S]) -> Result<(), SyncError>
    where
        Self: Sized,
    {
        let refspecs = parse_refspecs("refspecs", refspecs)?;
        self.fetch_with(&FetchRequest::url(url, refspecs))
    }

    /// Fetch explicit refspecs from a URL with explicit options.
    fn fetch_url_with_options<S: AsRef<str>>(
        &self,
        url: &str,
        refspecs: &[S],
        options: &FetchOptions,
    ) -> Result<(), SyncError>
    where
        Self: Sized,
    {
        let refspecs = parse_refspecs("refspecs", refspecs)?;
        self.fetch_with(&FetchRequest::url(url, refspecs).with_options(options.clone()))
    }

    /// Fetch explicit refspecs from a URL, recording a reflog message.
    fn fetch_url_with_log<S: AsRef<str>>(
        &self,
        url: &str,
        refspecs: &[S],
        log_message: &str,
    ) -> Result<(), SyncError>
    where
        Self: Sized,
    {
        let refspecs = parse_refspecs("refspecs", refspecs)?;
        self.fetch_with(&FetchRequest::url(url, refspecs).with_log_message(log_message))
    }

    // =========================================================================
    // Push
    // =========================================================================

    /// Push with a fully-specified request.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Network`] if the collaborator fails.
    fn push_with(&self, request: &PushRequest) -> Result<(), SyncError> {
        planner::execute(self, std::slice::from_ref(request))
    }

    /// Push several branches to their upstreams.
    ///
    /// Every branch is validated before the first push is sent. An empty
    /// collection succeeds without contacting the network.
    ///
    /// # Errors
    ///
    /// - [`SyncError::MissingUpstream`] / [`SyncError::MissingRemote`] before
    ///   any push if a branch is not fully tracked
    /// - [`SyncError::Network`] if the collaborator fails
    fn push_branches_with_options<'a, I>(
        &self,
        branches: I,
        options: &PushOptions,
    ) -> Result<(), SyncError>
    where
        I: IntoIterator<Item = &'a Branch>,
        Self: Sized,
    {
        let plans = planner::plan_branches(branches, options)?;
        planner::execute(self, &plans)
    }

    /// Push several branches to their upstreams with default options.
    fn push_branches<'a, I>(&self, branches: I) -> Result<(), SyncError>
    where
        I: IntoIterator<Item = &'a Branch>,
        Self: Sized,
    {
        self.push_branches_with_options(branches, &PushOptions::default())
    }

    /// Push one branch to its upstream.
    fn push_branch(&self, branch: &Branch) -> Result<(), SyncError>
    where
        Self: Sized,
    {
        self.push_branches_with_options([branch], &PushOptions::default())
    }

    /// Push one branch to its upstream with explicit options.
    fn push_branch_with_options(
        &self,
        branch: &Branch,
        options: &PushOptions,
    ) -> Result<(), SyncError>
    where
        Self: Sized,
    {
        self.push_branches_with_options([branch], options)
    }

    /// Push a single refspec.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::InvalidArgument`] if the refspec is empty.
    fn push_refspec(&self, remote: &Remote, refspec: &str) -> Result<(), SyncError> {
        self.push_with(&planner::plan_refspec(remote, refspec, &PushOptions::default())?)
    }

    /// Push a single refspec with explicit options.
    fn push_refspec_with_options(
        &self,
        remote: &Remote,
        refspec: &str,
        options: &PushOptions,
    ) -> Result<(), SyncError> {
        self.push_with(&planner::plan_refspec(remote, refspec, options)?)
    }

    /// Push several refspecs in one request.
    fn push_refspecs<S: AsRef<str>>(&self, remote: &Remote, refspecs: &[S]) -> Result<(), SyncError>
    where
        Self: Sized,
    {
        self.push_with(&planner::plan_refspecs(
            remote,
            refspecs,
            &PushOptions::default(),
        )?)
    }

    /// Push several refspecs in one request with explicit options.
    fn push_refspecs_with_options<S: AsRef<str>>(
        &self,
        remote: &Remote,
        refspecs: &[S],
        options: &PushOptions,
    ) -> Result<(), SyncError>
    where
        Self: Sized,
    {
        self.push_with(&planner::plan_refspecs(remote, refspecs, options)?)
    }

    /// Push `objectish` to `destination` on the remote.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::InvalidArgument`] if `destination` is empty.
    fn push_object(
        &self,
        remote: &Remote,
        objectish: &str,
        destination: &str,
    ) -> Result<(), SyncError> {
        self.push_with(&planner::plan_object(
            remote,
            objectish,
            destination,
            &PushOptions::default(),
        )?)
    }

    /// Push `objectish` to `destination` with explicit options.
    fn push_object_with_options(
        &self,
        remote: &Remote,
        objectish: &str,
        destination: &str,
        options: &PushOptions,
    ) -> Result<(), SyncError> {
        self.push_with(&planner::plan_object(
            remote,
            objectish,
            destination,
            options,
        )?)
    }

    // =========================================================================
    // List references
    // =========================================================================

    /// List references with a fully-specified request.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Network`] if the collaborator fails.
    fn list_references_with(
        &self,
        request: &ListReferencesRequest,
    ) -> Result<Vec<DirectReference>, SyncError> {
        debug!(remote = %request.target, "listing references");
        Ok(self.list_references(request)?)
    }

    /// List every reference advertised by a configured remote.
    fn list_remote_references(&self, remote: &Remote) -> Result<Vec<DirectReference>, SyncError> {
        self.list_references_with(&ListReferencesRequest::remote(remote))
    }

    /// List every reference advertised at a URL.
    fn list_url_references(&self, url: &str) -> Result<Vec<DirectReference>, SyncError> {
        self.list_references_with(&ListReferencesRequest::url(url))
    }
}

impl<N: Network + ?Sized> NetworkExt for N {}
