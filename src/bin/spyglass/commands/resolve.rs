//! `spyglass resolve` command

use anyhow::Result;

use spyglass::build_link_index;

use crate::cli::{Cli, ResolveArgs};
use crate::commands::index_options;

pub fn execute(cli: &Cli, args: &ResolveArgs) -> Result<()> {
    let options = index_options(cli);
    let (index, _) = build_link_index(&options)?;

    match index.resolve(&args.identifier) {
        Some(manifest) => {
            println!("{}", manifest.display());
            Ok(())
        }
        None => anyhow::bail!(
            "no manifest found for `{}`\n\
             help: Run `spyglass index` to check coverage, or try --heuristics",
            args.identifier
        ),
    }
}
