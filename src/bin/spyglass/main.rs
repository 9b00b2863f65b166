//! Spyglass CLI - component-to-manifest link lookup for build trees

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("spyglass=debug")
    } else {
        EnvFilter::new("spyglass=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    // Execute command
    match &cli.command {
        Commands::Index(args) => commands::index::execute(&cli, args),
        Commands::Resolve(args) => commands::resolve::execute(&cli, args),
        Commands::References(args) => commands::references::execute(&cli, args),
        Commands::Links(args) => commands::links::execute(&cli, args),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
