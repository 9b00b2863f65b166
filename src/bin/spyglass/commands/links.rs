//! `spyglass links` command
//!
//! Scans one document for embedded identifier URIs, independent of whether
//! each identifier is indexed, then reports each occurrence with its
//! resolution status.

use anyhow::{Context, Result};

use spyglass::{build_link_index, ComponentIdentifier};

use crate::cli::{Cli, LinksArgs};
use crate::commands::index_options;

pub fn execute(cli: &Cli, args: &LinksArgs) -> Result<()> {
    let options = index_options(cli);
    let show_unresolved = args.show_unresolved || options.config.index.show_unresolved_links;

    let text = std::fs::read_to_string(&args.file)
        .with_context(|| format!("failed to read document: {}", args.file.display()))?;

    let (index, _) = build_link_index(&options)?;

    for uri in ComponentIdentifier::matches_in(&text) {
        let line = text[..uri.span.start].matches('\n').count() + 1;
        let key = uri.identifier.to_string();

        match index.resolve(&key) {
            Some(manifest) => {
                println!("{}:{}: {} -> {}", args.file.display(), line, key, manifest.display());
            }
            None if show_unresolved => {
                println!("{}:{}: {} -> (unresolved)", args.file.display(), line, key);
            }
            None => {}
        }
    }

    Ok(())
}
