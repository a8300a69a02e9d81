//! ls-remote command - List references advertised by a remote

use anyhow::{Context as _, Result};

use super::{open, resolve_remote};
use crate::cli::Context;
use crate::network::{ListOptions, RemoteTarget};
use crate::sync::request::ListReferencesRequest;
use crate::sync::NetworkExt;
use crate::ui::output;

/// List remote references, one `<oid>\t<name>` line each.
pub fn ls_remote(
    ctx: &Context,
    remote: Option<&str>,
    url: Option<&str>,
    heads: bool,
    tags: bool,
    json: bool,
) -> Result<()> {
    let (git, config) = open(ctx)?;

    let target = match url {
        Some(url) => RemoteTarget::Url(url.to_string()),
        None => RemoteTarget::Remote(resolve_remote(&git, &config, remote)?),
    };
    let request = ListReferencesRequest::new(target.clone(), ListOptions { heads, tags });

    let references = git
        .list_references_with(&request)
        .with_context(|| format!("Failed to list references of '{}'", target))?;

    if json {
        output::json(&references)?;
        return Ok(());
    }

    for reference in &references {
        println!("{}\t{}", reference.target, reference.name);
    }
    Ok(())
}
