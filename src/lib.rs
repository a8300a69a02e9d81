//! gitbridge - Fetch, push and diff over Git repositories
//!
//! gitbridge turns the many call shapes of fetch, push, reference listing
//! and tree comparison into one fully-specified request per operation,
//! validates it, and hands it to a collaborator: libgit2 through [`git::Git`],
//! or the mocks used in tests.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface layer (the `gb` binary)
//! - [`sync`] - Fetch/push/ls-remote requests, upstream resolution, push planning
//! - [`diff`] - Comparison requests and type-level result shapes
//! - [`rewrite`] - Commit metadata snapshots for history rewrites
//! - [`network`] - The transport collaborator trait and its mock
//! - [`git`] - Single interface to libgit2
//! - [`core`] - Domain types and configuration
//! - [`ui`] - User-facing output
//!
//! # Correctness Invariants
//!
//! 1. Every shorthand is observably identical to its full form with defaults
//! 2. A branch push validates every branch before the first push is sent
//! 3. A change summary is always the projection of the patch for the same input

pub mod cli;
pub mod core;
pub mod diff;
pub mod git;
pub mod network;
pub mod rewrite;
pub mod sync;
pub mod ui;
