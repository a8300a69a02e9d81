//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`Oid`] - Git object identifier (SHA)
//! - [`Refspec`] - Validated fetch/push refspec
//! - [`Signature`] - Author/committer identity with timestamp
//! - [`Remote`] - A configured remote (name plus URL)
//! - [`Branch`] - Read-only view of a local branch and its tracking setup
//!
//! # Validation
//!
//! These types enforce validity at construction time. Invalid values
//! cannot be represented, preventing entire classes of bugs.
//!
//! # Examples
//!
//! ```
//! use gitbridge::core::types::{Branch, Oid, Refspec};
//!
//! let oid = Oid::new("abc123def4567890abc123def4567890abc12345").unwrap();
//! let branch = Branch::local("main");
//! let spec = Refspec::mapping(&branch.canonical_name, "refs/heads/main").unwrap();
//! assert_eq!(spec.as_str(), "refs/heads/main:refs/heads/main");
//!
//! assert!(Oid::new("not-a-sha").is_err());
//! assert!(Refspec::new("").is_err());
//! ```

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid object id: {0}")]
    InvalidOid(String),

    #[error("invalid refspec: {0}")]
    InvalidRefspec(String),
}

/// A Git object identifier (SHA-1 or SHA-256).
///
/// OIDs are normalized to lowercase for consistency.
///
/// # Example
///
/// ```
/// use gitbridge::core::types::Oid;
///
/// let oid = Oid::new("ABC123DEF4567890ABC123DEF4567890ABC12345").unwrap();
/// assert_eq!(oid.as_str(), "abc123def4567890abc123def4567890abc12345");
///
/// assert!(Oid::zero().is_zero());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Oid(String);

impl Oid {
    /// The zero OID (40 zeros for SHA-1).
    const ZERO_SHA1: &'static str = "0000000000000000000000000000000000000000";

    /// Create a new validated object id.
    ///
    /// The OID is normalized to lowercase.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidOid` if the string is not a valid hex OID.
    pub fn new(oid: impl Into<String>) -> Result<Self, TypeError> {
        let oid = oid.into().to_ascii_lowercase();
        Self::validate(&oid)?;
        Ok(Self(oid))
    }

    /// Create the zero/null OID (40 zeros).
    pub fn zero() -> Self {
        Self(Self::ZERO_SHA1.to_string())
    }

    /// Check if this is the zero/null OID.
    pub fn is_zero(&self) -> bool {
        self.0.chars().all(|c| c == '0')
    }

    fn validate(oid: &str) -> Result<(), TypeError> {
        // SHA-1 is 40 hex chars, SHA-256 is 64
        if oid.len() != 40 && oid.len() != 64 {
            return Err(TypeError::InvalidOid(format!(
                "expected 40 or 64 hex characters, got {}",
                oid.len()
            )));
        }
        if !oid.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(TypeError::InvalidOid(
                "object id must be hexadecimal".into(),
            ));
        }
        Ok(())
    }

    /// Get the object id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Oid {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<Oid> for String {
    fn from(oid: Oid) -> Self {
        oid.0
    }
}

impl AsRef<str> for Oid {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Oid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A fetch or push refspec.
///
/// Either a `source:destination` mapping (optionally prefixed with `+` to
/// force the update) or a bare pattern such as `refs/heads/main`. An empty
/// source is allowed and denotes deletion of the destination on push.
///
/// Refspecs are only checked for shape here; whether the sides name real
/// refs is decided by the transport.
///
/// # Example
///
/// ```
/// use gitbridge::core::types::Refspec;
///
/// let spec = Refspec::new("+refs/heads/*:refs/remotes/origin/*").unwrap();
/// assert!(spec.is_force());
/// assert_eq!(spec.source(), "refs/heads/*");
/// assert_eq!(spec.destination(), Some("refs/remotes/origin/*"));
///
/// let delete = Refspec::mapping("", "refs/heads/old").unwrap();
/// assert_eq!(delete.as_str(), ":refs/heads/old");
///
/// assert!(Refspec::new("a:b:c").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Refspec(String);

impl Refspec {
    /// Create a new validated refspec.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidRefspec` if the refspec is empty, has more
    /// than one `:` separator, or contains whitespace or control characters.
    pub fn new(spec: impl Into<String>) -> Result<Self, TypeError> {
        let spec = spec.into();
        Self::validate(&spec)?;
        Ok(Self(spec))
    }

    /// Build a `source:destination` refspec.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidRefspec` if `destination` is empty or the
    /// composed refspec is malformed.
    pub fn mapping(source: &str, destination: &str) -> Result<Self, TypeError> {
        if destination.is_empty() {
            return Err(TypeError::InvalidRefspec(
                "destination cannot be empty".into(),
            ));
        }
        Self::new(format!("{}:{}", source, destination))
    }

    fn validate(spec: &str) -> Result<(), TypeError> {
        let body = spec.strip_prefix('+').unwrap_or(spec);
        if body.is_empty() {
            return Err(TypeError::InvalidRefspec("refspec cannot be empty".into()));
        }
        if body.matches(':').count() > 1 {
            return Err(TypeError::InvalidRefspec(format!(
                "'{spec}' has more than one ':' separator"
            )));
        }
        if body.chars().any(|c| c.is_whitespace() || c.is_ascii_control()) {
            return Err(TypeError::InvalidRefspec(format!(
                "'{spec}' contains whitespace or control characters"
            )));
        }
        Ok(())
    }

    /// Whether the refspec carries the `+` force marker.
    pub fn is_force(&self) -> bool {
        self.0.starts_with('+')
    }

    /// The source side (left of `:`), without the force marker.
    pub fn source(&self) -> &str {
        let body = self.0.strip_prefix('+').unwrap_or(&self.0);
        body.split_once(':').map_or(body, |(src, _)| src)
    }

    /// The destination side (right of `:`), if the refspec is a mapping.
    pub fn destination(&self) -> Option<&str> {
        self.0.split_once(':').map(|(_, dst)| dst)
    }

    /// Get the refspec as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Refspec {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<Refspec> for String {
    fn from(spec: Refspec) -> Self {
        spec.0
    }
}

impl AsRef<str> for Refspec {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Refspec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An author or committer identity.
///
/// Signatures are plain values: cloning one yields an independent copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    /// Display name
    pub name: String,
    /// Email address
    pub email: String,
    /// When the signature was made, in the signer's timezone
    pub when: DateTime<FixedOffset>,
}

impl Signature {
    /// Create a new signature.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        when: DateTime<FixedOffset>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            when,
        }
    }
}

impl std::fmt::Display for Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} <{}> {}", self.name, self.email, self.when.to_rfc3339())
    }
}

/// A configured remote.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Remote {
    /// Remote name (e.g. "origin")
    pub name: String,
    /// Fetch URL, if configured
    pub url: Option<String>,
}

impl Remote {
    /// Create a remote handle.
    pub fn new(name: impl Into<String>, url: Option<String>) -> Self {
        Self {
            name: name.into(),
            url,
        }
    }
}

impl std::fmt::Display for Remote {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Read-only view of a local branch and its tracking configuration.
///
/// Produced by the repository (see [`crate::git::Git::find_branch`]) or
/// built directly in tests.
///
/// # Example
///
/// ```
/// use gitbridge::core::types::{Branch, Remote};
///
/// let branch = Branch::local("foo")
///     .tracking(Remote::new("origin", None), "refs/heads/foo");
/// assert_eq!(branch.canonical_name, "refs/heads/foo");
/// assert_eq!(branch.upstream(), Some("refs/heads/foo"));
///
/// assert_eq!(Branch::local("bar").upstream(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branch {
    /// Full ref name (e.g. "refs/heads/foo")
    pub canonical_name: String,
    /// Short name shown to users (e.g. "foo")
    pub friendly_name: String,
    /// Remote the branch tracks, if any
    pub remote: Option<Remote>,
    /// Canonical name of the upstream branch, if configured
    pub upstream_canonical_name: Option<String>,
}

impl Branch {
    /// A local branch with no tracking configuration.
    pub fn local(name: &str) -> Self {
        Self {
            canonical_name: format!("refs/heads/{}", name),
            friendly_name: name.to_string(),
            remote: None,
            upstream_canonical_name: None,
        }
    }

    /// Attach tracking configuration.
    pub fn tracking(mut self, remote: Remote, upstream: impl Into<String>) -> Self {
        self.remote = Some(remote);
        self.upstream_canonical_name = Some(upstream.into());
        self
    }

    /// The upstream canonical name, treating an empty string as unset.
    pub fn upstream(&self) -> Option<&str> {
        self.upstream_canonical_name
            .as_deref()
            .filter(|name| !name.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod oid {
        use super::*;

        #[test]
        fn valid_sha1() {
            let oid = Oid::new("abc123def4567890abc123def4567890abc12345").unwrap();
            assert_eq!(oid.as_str().len(), 40);
        }

        #[test]
        fn valid_sha256() {
            let oid = Oid::new("a".repeat(64)).unwrap();
            assert_eq!(oid.as_str().len(), 64);
        }

        #[test]
        fn wrong_length_rejected() {
            assert!(Oid::new("abc123").is_err());
        }

        #[test]
        fn non_hex_rejected() {
            assert!(Oid::new("g".repeat(40)).is_err());
        }

        #[test]
        fn normalized_to_lowercase() {
            let oid = Oid::new("ABCDEF".repeat(6) + "ABCD").unwrap();
            assert!(oid.as_str().chars().all(|c| !c.is_ascii_uppercase()));
        }

        #[test]
        fn zero_is_zero() {
            assert!(Oid::zero().is_zero());
            assert!(!Oid::new("abc123def4567890abc123def4567890abc12345")
                .unwrap()
                .is_zero());
        }
    }

    mod refspec {
        use super::*;

        #[test]
        fn plain_pattern() {
            let spec = Refspec::new("refs/heads/main").unwrap();
            assert_eq!(spec.source(), "refs/heads/main");
            assert_eq!(spec.destination(), None);
            assert!(!spec.is_force());
        }

        #[test]
        fn forced_mapping() {
            let spec = Refspec::new("+refs/heads/a:refs/heads/b").unwrap();
            assert!(spec.is_force());
            assert_eq!(spec.source(), "refs/heads/a");
            assert_eq!(spec.destination(), Some("refs/heads/b"));
        }

        #[test]
        fn empty_rejected() {
            assert!(Refspec::new("").is_err());
            assert!(Refspec::new("+").is_err());
        }

        #[test]
        fn whitespace_rejected() {
            assert!(Refspec::new("refs/heads/a b").is_err());
        }

        #[test]
        fn mapping_requires_destination() {
            assert!(matches!(
                Refspec::mapping("refs/heads/a", ""),
                Err(TypeError::InvalidRefspec(_))
            ));
        }

        #[test]
        fn deletion_mapping() {
            let spec = Refspec::mapping("", "refs/heads/gone").unwrap();
            assert_eq!(spec.source(), "");
            assert_eq!(spec.destination(), Some("refs/heads/gone"));
        }

        #[test]
        fn serde_rejects_invalid() {
            let parsed: Result<Refspec, _> = serde_json::from_str("\"a:b:c\"");
            assert!(parsed.is_err());
        }
    }

    mod branch {
        use super::*;

        #[test]
        fn empty_upstream_is_unset() {
            let mut branch = Branch::local("foo");
            branch.upstream_canonical_name = Some(String::new());
            assert_eq!(branch.upstream(), None);
        }

        #[test]
        fn local_branch_names() {
            let branch = Branch::local("feature/x");
            assert_eq!(branch.canonical_name, "refs/heads/feature/x");
            assert_eq!(branch.friendly_name, "feature/x");
            assert!(branch.remote.is_none());
        }
    }
}
