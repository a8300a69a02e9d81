//! show-rewrite command - Show the seed metadata for rewriting a commit

use anyhow::{Context as _, Result};

use super::open_git;
use crate::cli::Context;
use crate::rewrite::RewriteSnapshot;
use crate::ui::output;

/// Print the author, committer and message a rewrite of `rev` starts from.
pub fn show_rewrite(ctx: &Context, rev: &str, json: bool) -> Result<()> {
    let git = open_git(ctx)?;
    let commit = git
        .commit_info(rev)
        .with_context(|| format!("Failed to read commit '{}'", rev))?;
    let snapshot = RewriteSnapshot::from_commit(&commit);

    if json {
        output::json(&snapshot)?;
        return Ok(());
    }

    println!("author:    {}", snapshot.author);
    println!("committer: {}", snapshot.committer);
    println!();
    print!("{}", snapshot.message);
    if !snapshot.message.ends_with('\n') {
        println!();
    }
    Ok(())
}
