//! rewrite
//!
//! Seed data for history rewrites.
//!
//! A [`RewriteSnapshot`] copies author, committer and message out of an
//! existing commit. The caller edits it and hands it to whatever creates
//! the replacement commit; nothing here writes objects.
//!
//! # Example
//!
//! ```
//! use chrono::DateTime;
//! use gitbridge::core::types::Signature;
//! use gitbridge::rewrite::{CommitSource, RewriteSnapshot};
//!
//! struct Commit {
//!     author: Signature,
//!     message: String,
//! }
//!
//! impl CommitSource for Commit {
//!     fn author(&self) -> &Signature { &self.author }
//!     fn committer(&self) -> &Signature { &self.author }
//!     fn message(&self) -> &str { &self.message }
//! }
//!
//! let when = DateTime::parse_from_rfc3339("2024-01-01T00:00:00+00:00").unwrap();
//! let commit = Commit {
//!     author: Signature::new("A", "a@example.com", when),
//!     message: "m".into(),
//! };
//!
//! let mut snapshot = RewriteSnapshot::from_commit(&commit);
//! snapshot.message.push_str(" (amended)");
//! assert_eq!(commit.message, "m");
//! ```

use serde::{Deserialize, Serialize};

use crate::core::types::Signature;

/// Anything that exposes commit metadata.
pub trait CommitSource {
    fn author(&self) -> &Signature;
    fn committer(&self) -> &Signature;
    fn message(&self) -> &str;
}

/// Mutable copy of a commit's metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewriteSnapshot {
    pub author: Signature,
    pub committer: Signature,
    pub message: String,
}

impl RewriteSnapshot {
    /// Copy author, committer and message from `commit`.
    pub fn from_commit<C: CommitSource + ?Sized>(commit: &C) -> Self {
        Self {
            author: commit.author().clone(),
            committer: commit.committer().clone(),
            message: commit.message().to_string(),
        }
    }
}
