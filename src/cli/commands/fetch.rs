//! fetch command - Download objects and refs from a remote

use anyhow::{bail, Context as _, Result};

use super::{open, resolve_remote};
use crate::cli::Context;
use crate::network::{RemoteTarget, TagFetchMode};
use crate::sync::request::{parse_refspecs, FetchRequest};
use crate::sync::NetworkExt;
use crate::ui::output;

/// Fetch from a configured remote or a URL.
///
/// # Arguments
///
/// * `remote` - Remote name; defaults to the configured remote
/// * `url` - Fetch from this URL instead; requires `refspecs`
/// * `refspecs` - Explicit refspecs; empty uses the remote's own
/// * `prune` - Override the configured prune setting
/// * `tags` - Override the configured tag mode
/// * `log_message` - Reflog message for updated refs
pub fn fetch(
    ctx: &Context,
    remote: Option<&str>,
    url: Option<&str>,
    refspecs: &[String],
    prune: Option<bool>,
    tags: Option<&str>,
    log_message: Option<&str>,
) -> Result<()> {
    let (git, config) = open(ctx)?;

    let mut options = config.fetch_options();
    if prune.is_some() {
        options.prune = prune;
    }
    if let Some(tags) = tags {
        options.tags = TagFetchMode::parse(tags).with_context(|| {
            format!(
                "Invalid --tags '{}', must be one of: {}",
                tags,
                TagFetchMode::NAMES.join(", ")
            )
        })?;
    }

    let target = match url {
        Some(url) => {
            if refspecs.is_empty() {
                bail!("--url requires at least one --refspec");
            }
            RemoteTarget::Url(url.to_string())
        }
        None => RemoteTarget::Remote(resolve_remote(&git, &config, remote)?),
    };

    let refspecs = if refspecs.is_empty() {
        None
    } else {
        Some(parse_refspecs("refspecs", refspecs)?)
    };

    let request = FetchRequest::new(
        target.clone(),
        refspecs,
        options,
        log_message.map(String::from),
    );
    git.fetch_with(&request)
        .with_context(|| format!("Fetch from '{}' failed", target))?;

    output::print(format!("Fetched from {}", target), ctx.verbosity);
    Ok(())
}
