//! sync::request
//!
//! Canonical request records for fetch, push and reference listing.
//!
//! Every operation has exactly one full request type carrying every
//! optional parameter. Shorthand constructors fill the documented defaults
//! and nothing else; they never validate or touch a collaborator.
//!
//! | Parameter | Default |
//! |-----------|---------|
//! | fetch refspecs | `None` (the remote's configured fetch refspecs) |
//! | fetch options | [`FetchOptions::default`] |
//! | push options | [`PushOptions::default`] |
//! | list options | [`ListOptions::default`] (all references) |
//! | log message | `None` |

use serde::{Deserialize, Serialize};

use super::SyncError;
use crate::core::types::{Refspec, Remote};
use crate::network::{FetchOptions, ListOptions, PushOptions, RemoteTarget};

/// A fully-specified fetch.
///
/// # Example
///
/// ```
/// use gitbridge::core::types::Remote;
/// use gitbridge::network::{FetchOptions, RemoteTarget};
/// use gitbridge::sync::request::FetchRequest;
///
/// let origin = Remote::new("origin", None);
/// let short = FetchRequest::remote(&origin);
/// let full = FetchRequest::new(
///     RemoteTarget::Remote(origin),
///     None,
///     FetchOptions::default(),
///     None,
/// );
/// assert_eq!(short, full);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchRequest {
    /// Remote or URL to fetch from
    pub target: RemoteTarget,
    /// Refspecs to fetch; `None` uses the remote's configured ones
    pub refspecs: Option<Vec<Refspec>>,
    /// Transport options
    pub options: FetchOptions,
    /// Reflog message for updated refs; `None` lets the transport pick one
    pub log_message: Option<String>,
}

impl FetchRequest {
    /// The full form.
    pub fn new(
        target: RemoteTarget,
        refspecs: Option<Vec<Refspec>>,
        options: FetchOptions,
        log_message: Option<String>,
    ) -> Self {
        Self {
            target,
            refspecs,
            options,
            log_message,
        }
    }

    /// Fetch a configured remote with its own refspecs and default options.
    pub fn remote(remote: &Remote) -> Self {
        Self::new(
            RemoteTarget::Remote(remote.clone()),
            None,
            FetchOptions::default(),
            None,
        )
    }

    /// Fetch explicit refspecs from a URL with default options.
    pub fn url(url: impl Into<String>, refspecs: Vec<Refspec>) -> Self {
        Self::new(
            RemoteTarget::Url(url.into()),
            Some(refspecs),
            FetchOptions::default(),
            None,
        )
    }

    /// Replace the refspecs.
    pub fn with_refspecs(mut self, refspecs: Vec<Refspec>) -> Self {
        self.refspecs = Some(refspecs);
        self
    }

    /// Replace the options.
    pub fn with_options(mut self, options: FetchOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the reflog message.
    pub fn with_log_message(mut self, message: impl Into<String>) -> Self {
        self.log_message = Some(message.into());
        self
    }
}

/// A fully-specified push to one remote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushRequest {
    /// Destination remote
    pub remote: Remote,
    /// Refspecs, transmitted in order
    pub refspecs: Vec<Refspec>,
    /// Transport options
    pub options: PushOptions,
}

impl PushRequest {
    /// The full form.
    pub fn new(remote: Remote, refspecs: Vec<Refspec>, options: PushOptions) -> Self {
        Self {
            remote,
            refspecs,
            options,
        }
    }
}

/// A fully-specified reference listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListReferencesRequest {
    /// Remote or URL to query
    pub target: RemoteTarget,
    /// Which references to return
    pub options: ListOptions,
}

impl ListReferencesRequest {
    /// The full form.
    pub fn new(target: RemoteTarget, options: ListOptions) -> Self {
        Self { target, options }
    }

    /// List every reference of a configured remote.
    pub fn remote(remote: &Remote) -> Self {
        Self::new(RemoteTarget::Remote(remote.clone()), ListOptions::default())
    }

    /// List every reference at a URL.
    pub fn url(url: impl Into<String>) -> Self {
        Self::new(RemoteTarget::Url(url.into()), ListOptions::default())
    }
}

/// Parse caller-supplied refspec strings.
///
/// # Errors
///
/// Returns [`SyncError::InvalidArgument`] naming `argument` if any entry is
/// empty or malformed.
pub fn parse_refspecs<S: AsRef<str>>(
    argument: &'static str,
    specs: &[S],
) -> Result<Vec<Refspec>, SyncError> {
    specs
        .iter()
        .map(|spec| {
            Refspec::new(spec.as_ref()).map_err(|e| SyncError::InvalidArgument {
                name: argument,
                reason: e.to_string(),
            })
        })
        .collect()
}
