//! git
//!
//! Single interface for all Git operations.
//!
//! # Architecture
//!
//! This module is the **ONLY doorway** to libgit2. No other module imports
//! `git2`. Everything above it talks to the [`Network`](crate::network::Network)
//! and [`TreeDiffer`](crate::diff::TreeDiffer) traits, which [`Git`]
//! implements.
//!
//! # Responsibilities
//!
//! - Repository discovery and opening
//! - Branch tracking configuration and remotes
//! - Revision to tree / commit resolution
//! - Fetch, push and remote reference listing
//! - Tree, index and working directory comparisons

mod interface;

pub use interface::{CommitInfo, Git, GitError};
