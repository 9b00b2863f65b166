//! `spyglass index` command

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};

use spyglass::build_link_index;

use crate::cli::{Cli, IndexArgs};
use crate::commands::index_options;

pub fn execute(cli: &Cli, args: &IndexArgs) -> Result<()> {
    let options = index_options(cli);

    let spinner = if args.json || cli.verbose {
        None
    } else {
        let bar = ProgressBar::new_spinner().with_message("indexing build tree");
        bar.set_style(ProgressStyle::with_template("{spinner} {msg}").unwrap_or_else(|_| ProgressStyle::default_spinner()));
        bar.enable_steady_tick(std::time::Duration::from_millis(100));
        Some(bar)
    };

    let result = build_link_index(&options);

    if let Some(bar) = spinner {
        bar.finish_and_clear();
    }

    let (_, stats) = result?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        println!(
            "indexed {} in {:.1?}",
            options.deps_log_path().display(),
            stats.elapsed
        );
        println!("  lines scanned:      {}", stats.lines_scanned);
        println!("  component targets:  {}", stats.component_targets);
        println!("  manifest records:   {}", stats.manifest_records);
        println!("  packages named:     {}", stats.packages_named);
        println!("  links registered:   {}", stats.links);
        println!(
            "  references:         {} across {} identifiers",
            stats.references, stats.referenced_identifiers
        );
    }

    Ok(())
}
