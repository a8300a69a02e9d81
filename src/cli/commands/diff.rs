//! diff command - Compare trees, the index and the working directory

use anyhow::{bail, Context as _, Result};

use super::open;
use crate::cli::Context;
use crate::diff::{
    compare, ChangeKind, ChangeSummary, CompareRequest, DiffTargets, ExplicitPathsOptions,
    FullPatch, TreeEntryChange, UnmatchedPathPolicy,
};
use crate::git::Git;
use crate::ui::output;

/// Arguments of the diff command.
#[derive(Debug, Clone, Default)]
pub struct DiffArgs {
    pub old: Option<String>,
    pub new: Option<String>,
    pub target: Option<String>,
    pub untracked: bool,
    pub name_status: bool,
    pub explicit: bool,
    pub fail_on_unmatched: bool,
    pub unified: Option<u32>,
    pub find_renames: bool,
    pub json: bool,
    pub paths: Vec<String>,
}

/// Run one comparison and print it.
///
/// - `OLD NEW`: tree against tree
/// - `OLD`: tree against working directory through the index
/// - `--target T [OLD]`: tree (default HEAD) against T
/// - nothing: index against working directory
pub fn diff(ctx: &Context, args: DiffArgs) -> Result<()> {
    let (git, config) = open(ctx)?;

    let mut options = config.compare_options();
    if let Some(n) = args.unified {
        options.context_lines = n;
    }
    if args.find_renames {
        options.detect_renames = true;
    }

    let mut request = build_request(&git, &args)?.with_options(options);
    if !args.paths.is_empty() {
        request = request.with_paths(args.paths.iter().cloned());
        if args.explicit {
            request = request.with_explicit_paths(ExplicitPathsOptions {
                unmatched: if args.fail_on_unmatched {
                    UnmatchedPathPolicy::Fail
                } else {
                    UnmatchedPathPolicy::Ignore
                },
            });
        }
    }

    if args.name_status {
        let changes = compare::<ChangeSummary, _>(&git, request).context("Diff failed")?;
        if args.json {
            output::json(&changes)?;
        } else {
            for change in &changes {
                println!("{}", name_status_line(change));
            }
        }
    } else {
        let patch = compare::<FullPatch, _>(&git, request).context("Diff failed")?;
        if args.json {
            output::json(&patch)?;
        } else {
            print!("{}", patch.content());
        }
    }
    Ok(())
}

fn build_request(git: &Git, args: &DiffArgs) -> Result<CompareRequest> {
    let tree = |rev: &str| {
        git.resolve_tree(rev)
            .with_context(|| format!("Failed to resolve '{}' to a tree", rev))
    };

    Ok(match (&args.old, &args.new, &args.target) {
        (Some(old), Some(new), _) => CompareRequest::trees(Some(tree(old)?), Some(tree(new)?)),
        (None, Some(_), _) => bail!("NEW requires OLD"),
        (old, None, Some(target)) => {
            let targets = DiffTargets::parse(target).with_context(|| {
                format!(
                    "Invalid --target '{}', must be one of: {}",
                    target,
                    DiffTargets::NAMES.join(", ")
                )
            })?;
            CompareRequest::tree_to_targets(Some(tree(old.as_deref().unwrap_or("HEAD"))?), targets)
        }
        (Some(old), None, None) => CompareRequest::tree_to_targets(
            Some(tree(old)?),
            DiffTargets::WorkingDirectoryAndIndex,
        ),
        (None, None, None) => CompareRequest::index_to_workdir_with(args.untracked),
    })
}

fn name_status_line(change: &TreeEntryChange) -> String {
    match change.kind {
        ChangeKind::Renamed | ChangeKind::Copied => format!(
            "{}\t{}\t{}",
            change.kind.code(),
            change.old_path,
            change.path
        ),
        _ => format!("{}\t{}", change.kind.code(), change.path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_status_formats() {
        let modified = TreeEntryChange::new("src/lib.rs", ChangeKind::Modified);
        assert_eq!(name_status_line(&modified), "M\tsrc/lib.rs");

        let mut renamed = TreeEntryChange::new("new.txt", ChangeKind::Renamed);
        renamed.old_path = "old.txt".into();
        assert_eq!(name_status_line(&renamed), "R\told.txt\tnew.txt");
    }
}
