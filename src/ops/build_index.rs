//! Link index construction.
//!
//! Initialization runs the build-graph pass and the reference scan
//! concurrently; neither shares state with the other, and each publishes
//! its half of the index only after its own pass succeeds. Both always run
//! to completion so diagnostics from both are available; failure of either
//! is fatal to initialization as a whole.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{bail, Result};
use serde::Serialize;

use crate::index::LinkIndex;
use crate::indexer::{resolve_links, BuildGraphIndexer};
use crate::scanner::ReferenceScanner;
use crate::util::config::Config;

/// File name of the dependency log within the build output directory.
pub const DEPS_LOG_FILE_NAME: &str = "toolchain.ninja";

/// Inputs for one index construction.
#[derive(Debug, Clone)]
pub struct IndexOptions {
    /// Build output directory containing the dependency log.
    pub build_dir: PathBuf,

    /// Source tree root; the reference search runs here, and manifest
    /// paths in the index are relative to it.
    pub source_root: PathBuf,

    /// Dependency log override; defaults to the log inside `build_dir`.
    pub log_path: Option<PathBuf>,

    pub config: Config,
}

impl IndexOptions {
    pub fn new(build_dir: impl Into<PathBuf>, source_root: impl Into<PathBuf>) -> Self {
        IndexOptions {
            build_dir: build_dir.into(),
            source_root: source_root.into(),
            log_path: None,
            config: Config::default(),
        }
    }

    /// The dependency log to stream: the override if set, otherwise the
    /// default log inside the build output directory.
    pub fn deps_log_path(&self) -> PathBuf {
        self.log_path
            .clone()
            .unwrap_or_else(|| self.build_dir.join(DEPS_LOG_FILE_NAME))
    }
}

/// Counters reported after a successful initialization.
#[derive(Debug, Clone, Serialize)]
pub struct IndexStats {
    pub lines_scanned: u64,
    pub component_targets: usize,
    pub manifest_records: usize,
    pub packages_named: usize,
    pub links: usize,
    pub referenced_identifiers: usize,
    pub references: usize,
    #[serde(skip)]
    pub elapsed: Duration,
}

/// Build the full bidirectional link index.
///
/// The returned index is immutable; a refresh builds a new one.
pub fn build_link_index(options: &IndexOptions) -> Result<(LinkIndex, IndexStats)> {
    let started = Instant::now();
    let log_path = options.deps_log_path();
    let normalize = options.config.index.normalize_word_separators;

    let scanner = match &options.config.search.program {
        Some(program) => ReferenceScanner::with_program(program, &options.source_root),
        None => ReferenceScanner::new(&options.source_root),
    };

    let (graph_result, scan_result) = rayon::join(
        || {
            BuildGraphIndexer::index_file(&log_path).map(|graph| {
                let links = resolve_links(&graph, &options.config.index);
                (graph.stats(), links)
            })
        },
        || scanner.scan(normalize),
    );

    let ((graph_stats, links), references) = match (graph_result, scan_result) {
        (Ok(graph), Ok(references)) => (graph, references),
        (graph_result, scan_result) => {
            let mut rendered = String::from("link index initialization failed\n");
            if let Err(e) = &graph_result {
                rendered.push_str(&e.to_diagnostic().to_string());
            }
            if let Err(e) = &scan_result {
                rendered.push_str(&e.to_diagnostic().to_string());
            }
            bail!(rendered.trim_end().to_string());
        }
    };

    let stats = IndexStats {
        lines_scanned: graph_stats.lines_scanned,
        component_targets: graph_stats.component_targets,
        manifest_records: graph_stats.manifest_records,
        packages_named: graph_stats.packages_named,
        links: links.len(),
        referenced_identifiers: references.identifier_count(),
        references: references.total_count(),
        elapsed: started.elapsed(),
    };

    tracing::info!(
        "indexed {} links and {} references in {:.1?}",
        stats.links,
        stats.references,
        stats.elapsed
    );

    Ok((LinkIndex::new(links, references), stats))
}
