//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// Spyglass - component-to-manifest link lookup for build trees
#[derive(Parser)]
#[command(name = "spyglass")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Source tree root
    #[arg(long, global = true, default_value = ".")]
    pub root: PathBuf,

    /// Build output directory containing the dependency log
    /// (relative paths are resolved against --root)
    #[arg(long, global = true, default_value = "out/default")]
    pub build_dir: PathBuf,

    /// Configuration file (defaults to spyglass.toml under --root)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Also register hyphen/underscore alias keys
    #[arg(long, global = true)]
    pub normalize: bool,

    /// Enable suffix-stripping fallback resolution
    #[arg(long, global = true)]
    pub heuristics: bool,

    /// Search executable override (defaults to git on PATH)
    #[arg(long, global = true)]
    pub search_program: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build the link index and report summary statistics
    Index(IndexArgs),

    /// Resolve a package/component identifier to its manifest path
    Resolve(ResolveArgs),

    /// List every reference to the component defined by a manifest
    References(ReferencesArgs),

    /// Scan one document for embedded component identifier URIs
    Links(LinksArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct IndexArgs {
    /// Emit machine-readable JSON instead of a summary table
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct ResolveArgs {
    /// Identifier to look up, as package/component
    pub identifier: String,
}

#[derive(Args)]
pub struct ReferencesArgs {
    /// Manifest source path, relative to the source tree root
    pub manifest: PathBuf,

    /// Emit machine-readable JSON instead of path:line:column rows
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct LinksArgs {
    /// Document to scan
    pub file: PathBuf,

    /// Also print identifiers that did not resolve
    #[arg(long)]
    pub show_unresolved: bool,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
