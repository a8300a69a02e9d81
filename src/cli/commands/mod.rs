//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Opens the repository and loads config
//! 2. Merges flags over config defaults into one request
//! 3. Calls the sync or diff layer
//! 4. Formats and displays output

mod diff;
mod fetch;
mod ls_remote;
mod push;
mod show_rewrite;

pub use diff::{diff, DiffArgs};
pub use fetch::fetch;
pub use ls_remote::ls_remote;
pub use push::{push, PushTarget};
pub use show_rewrite::show_rewrite;

use anyhow::{Context as _, Result};

use super::Context;
use crate::cli::args::Command;
use crate::core::config::Config;
use crate::core::types::Remote;
use crate::git::Git;

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Fetch {
            remote,
            refspecs,
            url,
            prune,
            no_prune,
            tags,
            log_message,
        } => {
            let prune = match (prune, no_prune) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            };
            fetch::fetch(
                ctx,
                remote.as_deref(),
                url.as_deref(),
                &refspecs,
                prune,
                tags.as_deref(),
                log_message.as_deref(),
            )
        }
        Command::Push {
            branches,
            all,
            remote,
            refspecs,
            object,
            to,
            parallelism,
            dry_run,
        } => {
            let target = match (object, to) {
                (Some(object), Some(destination)) => PushTarget::Object {
                    remote,
                    object,
                    destination,
                },
                _ if !refspecs.is_empty() => PushTarget::Refspecs { remote, refspecs },
                _ => PushTarget::Branches { names: branches, all },
            };
            push::push(ctx, target, parallelism, dry_run)
        }
        Command::LsRemote {
            remote,
            url,
            heads,
            tags,
            json,
        } => ls_remote::ls_remote(ctx, remote.as_deref(), url.as_deref(), heads, tags, json),
        Command::Diff {
            old,
            new,
            target,
            untracked,
            name_status,
            explicit,
            fail_on_unmatched,
            unified,
            find_renames,
            json,
            paths,
        } => diff::diff(
            ctx,
            DiffArgs {
                old,
                new,
                target,
                untracked,
                name_status,
                explicit,
                fail_on_unmatched,
                unified,
                find_renames,
                json,
                paths,
            },
        ),
        Command::ShowRewrite { rev, json } => show_rewrite::show_rewrite(ctx, &rev, json),
    }
}

/// Open the repository the context points at.
fn open_git(ctx: &Context) -> Result<Git> {
    let cwd = match &ctx.cwd {
        Some(cwd) => cwd.clone(),
        None => std::env::current_dir().context("Failed to read current directory")?,
    };
    Git::open(&cwd).context("Failed to open repository")
}

/// Open the repository and load global and repo config.
fn open(ctx: &Context) -> Result<(Git, Config)> {
    let git = open_git(ctx)?;
    let config = Config::load(Some(git.git_dir())).context("Failed to load config")?;
    Ok((git, config))
}

/// Resolve a remote by name, falling back to the configured default.
fn resolve_remote(git: &Git, config: &Config, name: Option<&str>) -> Result<Remote> {
    let name = name.unwrap_or_else(|| config.remote());
    git.find_remote(name)
        .with_context(|| format!("Unknown remote '{}'", name))
}
