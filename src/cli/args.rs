//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--cwd <path>`: Run as if in that directory
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// gitbridge - fetch, push and diff over Git repositories
#[derive(Parser, Debug)]
#[command(name = "gb")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Run as if gb was started in this directory
    #[arg(long, global = true)]
    pub cwd: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Download objects and refs from a remote
    #[command(after_help = "\
EXAMPLES:
    # Fetch the configured remote with its own refspecs
    gb fetch

    # Fetch one branch into a remote-tracking ref
    gb fetch origin --refspec refs/heads/main:refs/remotes/origin/main

    # Fetch from a URL (refspecs required)
    gb fetch --url https://example.com/repo.git --refspec refs/heads/main:refs/remotes/mirror/main")]
    Fetch {
        /// Remote name (default: configured remote, then "origin")
        #[arg(conflicts_with = "url")]
        remote: Option<String>,

        /// Refspecs to fetch instead of the remote's configured ones
        #[arg(long = "refspec", value_name = "REFSPEC")]
        refspecs: Vec<String>,

        /// Fetch from this URL instead of a configured remote
        #[arg(long)]
        url: Option<String>,

        /// Prune remote-tracking refs that no longer exist
        #[arg(long, conflicts_with = "no_prune")]
        prune: bool,

        /// Never prune
        #[arg(long)]
        no_prune: bool,

        /// Tag mode: auto, all or none
        #[arg(long, value_name = "MODE")]
        tags: Option<String>,

        /// Reflog message for updated refs
        #[arg(short = 'm', long = "message")]
        log_message: Option<String>,
    },

    /// Update remote refs
    #[command(
        long_about = "Update remote refs.\n\n\
            Without --remote, each branch is pushed to its configured upstream. \
            Every branch is checked for tracking configuration before anything \
            is sent; one untracked branch fails the whole command.",
        after_help = "\
EXAMPLES:
    # Push the current branch to its upstream
    gb push

    # Push several branches to their upstreams
    gb push feature-a feature-b

    # Push explicit refspecs
    gb push --remote origin --refspec refs/heads/main:refs/heads/release

    # Push an object to a destination ref (empty object deletes)
    gb push --remote origin --object main --to refs/heads/release"
    )]
    Push {
        /// Branches to push to their upstreams (default: current branch)
        #[arg(conflicts_with_all = ["refspecs", "object"])]
        branches: Vec<String>,

        /// Push every local branch
        #[arg(long, conflicts_with_all = ["branches", "refspecs", "object"])]
        all: bool,

        /// Remote for --refspec / --object pushes
        #[arg(long)]
        remote: Option<String>,

        /// Explicit refspecs to push
        #[arg(long = "refspec", value_name = "REFSPEC", conflicts_with = "object")]
        refspecs: Vec<String>,

        /// Object to push (with --to)
        #[arg(long, requires = "to")]
        object: Option<String>,

        /// Destination ref for --object
        #[arg(long, requires = "object")]
        to: Option<String>,

        /// Pack builder threads (0 = automatic)
        #[arg(long)]
        parallelism: Option<u32>,

        /// Show what would be pushed without pushing
        #[arg(long)]
        dry_run: bool,
    },

    /// List references advertised by a remote
    #[command(name = "ls-remote")]
    LsRemote {
        /// Remote name (default: configured remote, then "origin")
        #[arg(conflicts_with = "url")]
        remote: Option<String>,

        /// List references at this URL instead of a configured remote
        #[arg(long)]
        url: Option<String>,

        /// Only refs/heads/*
        #[arg(long)]
        heads: bool,

        /// Only refs/tags/*
        #[arg(long)]
        tags: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Compare trees, the index and the working directory
    #[command(after_help = "\
EXAMPLES:
    # Index against working directory
    gb diff

    # HEAD against the index (staged changes)
    gb diff --target index

    # Two revisions, names only
    gb diff HEAD~1 HEAD --name-status

    # Restrict to literal paths, failing if one matches nothing
    gb diff HEAD~1 HEAD --explicit --fail-on-unmatched -- src/lib.rs")]
    Diff {
        /// Old side (tree-ish)
        old: Option<String>,

        /// New side (tree-ish); requires OLD
        #[arg(requires = "old", conflicts_with = "target")]
        new: Option<String>,

        /// Compare OLD (default HEAD) against: index, workdir or workdir-and-index
        #[arg(long, value_name = "TARGET")]
        target: Option<String>,

        /// Include untracked files (index against working directory only)
        #[arg(long)]
        untracked: bool,

        /// Show only names and change kinds
        #[arg(long)]
        name_status: bool,

        /// Treat paths literally instead of as patterns
        #[arg(long)]
        explicit: bool,

        /// With --explicit, fail if a path matches no change
        #[arg(long, requires = "explicit")]
        fail_on_unmatched: bool,

        /// Context lines
        #[arg(short = 'U', long)]
        unified: Option<u32>,

        /// Detect renames
        #[arg(short = 'M', long)]
        find_renames: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Paths to restrict the comparison to
        #[arg(last = true)]
        paths: Vec<String>,
    },

    /// Show the metadata a rewrite of a commit would start from
    #[command(name = "show-rewrite")]
    ShowRewrite {
        /// Revision (default: HEAD)
        #[arg(default_value = "HEAD")]
        rev: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
