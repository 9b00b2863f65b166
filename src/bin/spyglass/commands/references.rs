//! `spyglass references` command

use anyhow::Result;

use spyglass::build_link_index;

use crate::cli::{Cli, ReferencesArgs};
use crate::commands::index_options;

pub fn execute(cli: &Cli, args: &ReferencesArgs) -> Result<()> {
    let options = index_options(cli);
    let (index, _) = build_link_index(&options)?;

    let Some(references) = index.references_for(&args.manifest) else {
        anyhow::bail!(
            "no references found for `{}`\n\
             help: The path must match the manifest's source path relative to --root",
            args.manifest.display()
        );
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(references)?);
    } else {
        for reference in references {
            // 1-based for display; the index stores 0-based spans.
            println!(
                "{}:{}:{}",
                reference.source_path.display(),
                reference.line + 1,
                reference.column + 1
            );
        }
    }

    Ok(())
}
