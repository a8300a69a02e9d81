//! network::traits
//!
//! The `Network` collaborator trait and the value types that cross it.
//!
//! # Design
//!
//! The trait is synchronous: a call returns once the transport has finished
//! and nothing suspends in between. Implementations own transport,
//! credentials, retries and timeouts. Callers hand over fully-specified
//! requests built in [`crate::sync::request`].
//!
//! Implementations are not required to be safe for concurrent use against
//! the same repository; callers serialize access to a handle.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::types::{Oid, Remote};
use crate::sync::request::{FetchRequest, ListReferencesRequest, PushRequest};

/// Errors from network operations.
///
/// These are produced by the collaborator and propagated verbatim by the
/// sync layer.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NetworkError {
    /// The named remote is not configured.
    #[error("remote not found: {0}")]
    RemoteNotFound(String),

    /// The remote refused to update a reference.
    #[error("remote rejected {refname}: {reason}")]
    Rejected {
        /// Destination ref that was refused
        refname: String,
        /// Reason reported by the remote
        reason: String,
    },

    /// Connection or protocol failure.
    #[error("transport error: {0}")]
    Transport(String),

    /// Any other failure inside the collaborator.
    #[error("network error: {0}")]
    Internal(String),
}

/// Where a fetch or reference listing goes: a configured remote or a bare URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RemoteTarget {
    /// A remote configured in the repository
    Remote(Remote),
    /// An ad-hoc URL, not recorded in the repository config
    Url(String),
}

impl std::fmt::Display for RemoteTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RemoteTarget::Remote(remote) => write!(f, "{}", remote.name),
            RemoteTarget::Url(url) => write!(f, "{}", url),
        }
    }
}

impl From<Remote> for RemoteTarget {
    fn from(remote: Remote) -> Self {
        RemoteTarget::Remote(remote)
    }
}

/// Tag download behaviour during fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagFetchMode {
    /// Fetch tags that point into fetched history
    #[default]
    Auto,
    /// Fetch every tag
    All,
    /// Do not fetch tags
    None,
}

impl TagFetchMode {
    /// Names accepted in configuration files and on the command line.
    pub const NAMES: [&'static str; 3] = ["auto", "all", "none"];

    /// Parse a mode from its configuration name.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "auto" => Some(TagFetchMode::Auto),
            "all" => Some(TagFetchMode::All),
            "none" => Some(TagFetchMode::None),
            _ => None,
        }
    }
}

impl std::fmt::Display for TagFetchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TagFetchMode::Auto => write!(f, "auto"),
            TagFetchMode::All => write!(f, "all"),
            TagFetchMode::None => write!(f, "none"),
        }
    }
}

/// Options for fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchOptions {
    /// Remove remote-tracking refs that no longer exist on the remote.
    /// `None` defers to the remote's own configuration.
    pub prune: Option<bool>,
    /// Tag download behaviour
    pub tags: TagFetchMode,
}

/// Options for push.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushOptions {
    /// Threads used to build the pack; 0 lets the transport decide.
    pub packbuilder_parallelism: u32,
}

/// Options for listing remote references.
///
/// With both flags unset every advertised reference is returned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListOptions {
    /// Include `refs/heads/*`
    pub heads: bool,
    /// Include `refs/tags/*`
    pub tags: bool,
}

impl ListOptions {
    /// Whether a reference with this name passes the filter.
    pub fn accepts(&self, name: &str) -> bool {
        if !self.heads && !self.tags {
            return true;
        }
        (self.heads && name.starts_with("refs/heads/"))
            || (self.tags && name.starts_with("refs/tags/"))
    }
}

/// A reference advertised by a remote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectReference {
    /// Full reference name
    pub name: String,
    /// Object the reference points to
    pub target: Oid,
    /// For symbolic refs such as `HEAD`, the ref they point at
    pub symref_target: Option<String>,
}

/// The transport collaborator.
///
/// # Error Handling
///
/// All methods return `Result<T, NetworkError>`. The sync layer never
/// retries or reinterprets these errors.
pub trait Network {
    /// Download objects and update remote-tracking refs.
    ///
    /// `request.refspecs == None` means the remote's configured fetch
    /// refspecs.
    fn fetch(&self, request: &FetchRequest) -> Result<(), NetworkError>;

    /// Upload objects and update refs on the remote.
    fn push(&self, request: &PushRequest) -> Result<(), NetworkError>;

    /// List references advertised by a remote.
    fn list_references(
        &self,
        request: &ListReferencesRequest,
    ) -> Result<Vec<DirectReference>, NetworkError>;
}
