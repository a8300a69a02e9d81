//! network
//!
//! Abstraction over the transport that moves objects between repositories.
//!
//! # Architecture
//!
//! The [`Network`] trait is the collaborator boundary for fetch, push and
//! reference listing. Production code uses [`crate::git::Git`], which
//! implements it with `git2`; tests use [`mock::MockNetwork`].
//!
//! Request normalization and push planning live in [`crate::sync`]; by the
//! time a request reaches a `Network` implementation it is fully specified.

pub mod mock;
mod traits;

pub use traits::{
    DirectReference, FetchOptions, ListOptions, Network, NetworkError, PushOptions, RemoteTarget,
    TagFetchMode,
};
