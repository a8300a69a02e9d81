//! push command - Update remote refs

use anyhow::{bail, Context as _, Result};

use super::{open, resolve_remote};
use crate::cli::Context;
use crate::core::types::Branch;
use crate::sync::planner::{self, PushPrecondition};
use crate::sync::SyncError;
use crate::ui::output;

/// What to push.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PushTarget {
    /// Branches to their upstreams. No names and `all == false` means the
    /// current branch.
    Branches { names: Vec<String>, all: bool },
    /// Explicit refspecs to one remote.
    Refspecs {
        remote: Option<String>,
        refspecs: Vec<String>,
    },
    /// One object to one destination ref. An empty object deletes.
    Object {
        remote: Option<String>,
        object: String,
        destination: String,
    },
}

/// Push branches, refspecs or an object.
///
/// Branch pushes are validated as a whole before anything is sent.
pub fn push(
    ctx: &Context,
    target: PushTarget,
    parallelism: Option<u32>,
    dry_run: bool,
) -> Result<()> {
    let (git, config) = open(ctx)?;

    let mut options = config.push_options();
    if let Some(n) = parallelism {
        options.packbuilder_parallelism = n;
    }

    let plans = match target {
        PushTarget::Branches { names, all } => {
            let branches: Vec<Branch> = if all {
                git.branches()?
            } else if names.is_empty() {
                vec![git
                    .current_branch()?
                    .context("HEAD is detached or unborn; name a branch to push")?]
            } else {
                names
                    .iter()
                    .map(|name| git.find_branch(name))
                    .collect::<Result<_, _>>()?
            };

            let failures = planner::validate_branches(&branches);
            if !failures.is_empty() {
                bail!(describe_failures(failures));
            }
            planner::plan_branches(&branches, &options)?
        }
        PushTarget::Refspecs { remote, refspecs } => {
            let remote = resolve_remote(&git, &config, remote.as_deref())?;
            vec![planner::plan_refspecs(&remote, &refspecs, &options)?]
        }
        PushTarget::Object {
            remote,
            object,
            destination,
        } => {
            let remote = resolve_remote(&git, &config, remote.as_deref())?;
            vec![planner::plan_object(&remote, &object, &destination, &options)?]
        }
    };

    if dry_run {
        for plan in &plans {
            for refspec in &plan.refspecs {
                println!("{}\t{}", plan.remote, refspec);
            }
        }
        return Ok(());
    }

    planner::execute(&git, &plans).context("Push failed")?;

    let count: usize = plans.iter().map(|p| p.refspecs.len()).sum();
    output::print(format!("Pushed {} refspec(s)", count), ctx.verbosity);
    Ok(())
}

fn describe_failures(failures: Vec<PushPrecondition>) -> String {
    failures
        .into_iter()
        .map(|failure| SyncError::from(failure).to_string())
        .collect::<Vec<_>>()
        .join("\n")
}
