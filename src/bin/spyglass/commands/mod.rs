//! Command implementations

pub mod completions;
pub mod index;
pub mod links;
pub mod references;
pub mod resolve;

use spyglass::util::config::CONFIG_FILE_NAME;
use spyglass::{Config, IndexOptions};

use crate::cli::Cli;

/// Assemble index options from the config file and global CLI overrides.
pub(crate) fn index_options(cli: &Cli) -> IndexOptions {
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| cli.root.join(CONFIG_FILE_NAME));
    let mut config = Config::load_or_default(&config_path);

    if cli.normalize {
        config.index.normalize_word_separators = true;
    }
    if cli.heuristics {
        config.index.use_heuristics_to_find_more_links = true;
    }
    if let Some(program) = &cli.search_program {
        config.search.program = Some(program.clone());
    }

    let build_dir = if cli.build_dir.is_absolute() {
        cli.build_dir.clone()
    } else {
        cli.root.join(&cli.build_dir)
    };

    let mut options = IndexOptions::new(build_dir, &cli.root);
    options.config = config;
    options
}
