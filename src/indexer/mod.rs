//! Streaming build-graph indexing.
//!
//! The indexer walks the dependency log exactly once, line by line, joining
//! `$`-continued physical lines into logical statements and feeding each
//! statement to the pattern matchers. Matches accumulate into four
//! intermediate maps representing partial knowledge of the target graph;
//! the manifest resolver joins them after the stream ends.

pub mod errors;
pub mod resolve;

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::core::BuildTargetPath;
use crate::matcher::{self, LineMatch, MatcherFamily};

pub use errors::GraphError;
pub use resolve::resolve_links;

/// A component-name/manifest-path record, keyed by component target path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentManifest {
    pub component_name: String,
    pub manifest_path: PathBuf,
}

/// Which of the three structurally critical matcher families have fired.
#[derive(Debug, Clone, Copy, Default)]
struct MatchedFamilies {
    package_assembly: bool,
    manifest_command: bool,
    package_naming: bool,
}

/// Counters reported after the streaming pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct GraphStats {
    pub lines_scanned: u64,
    pub component_targets: usize,
    pub manifest_records: usize,
    pub sub_component_links: usize,
    pub packages_named: usize,
}

/// Accumulates the four intermediate maps over one pass of the log.
#[derive(Debug, Default)]
pub struct BuildGraphIndexer {
    packages_by_component: HashMap<BuildTargetPath, Vec<BuildTargetPath>>,
    manifest_by_component: HashMap<BuildTargetPath, ComponentManifest>,
    subcomponents_by_component: HashMap<BuildTargetPath, Vec<BuildTargetPath>>,
    name_by_package: HashMap<BuildTargetPath, String>,
    matched: MatchedFamilies,
    lines_scanned: u64,
}

impl BuildGraphIndexer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stream a dependency log from disk and verify matcher coverage.
    pub fn index_file(path: &Path) -> Result<Self, GraphError> {
        let file =
            File::open(path).map_err(|source| GraphError::log_unavailable(path, source))?;

        let mut indexer = Self::new();
        indexer
            .consume(BufReader::new(file))
            .map_err(|source| GraphError::log_unavailable(path, source))?;
        indexer.verify_coverage()?;

        Ok(indexer)
    }

    /// Feed every line of `reader` through the matchers.
    ///
    /// Physical lines ending in `$` continue the same logical statement;
    /// memory use is bounded by one statement at a time.
    pub fn consume<R: BufRead>(&mut self, reader: R) -> io::Result<()> {
        let mut pending = String::new();

        for line in reader.lines() {
            let line = line?;
            self.lines_scanned += 1;

            let trimmed = line.trim_end();
            if let Some(partial) = trimmed.strip_suffix('$') {
                if !pending.is_empty() {
                    pending.push(' ');
                }
                pending.push_str(partial);
                continue;
            }

            if pending.is_empty() {
                self.process(trimmed);
            } else {
                pending.push(' ');
                pending.push_str(trimmed.trim_start());
                let statement = std::mem::take(&mut pending);
                self.process(&statement);
            }
        }

        // A trailing continuation with no final line still forms a statement.
        if !pending.is_empty() {
            let statement = std::mem::take(&mut pending);
            self.process(&statement);
        }

        Ok(())
    }

    /// Fail unless every structurally critical matcher family fired at
    /// least once; a silent log means the format has diverged.
    pub fn verify_coverage(&self) -> Result<(), GraphError> {
        let missing = if !self.matched.package_assembly {
            Some(MatcherFamily::PackageAssembly)
        } else if !self.matched.manifest_command {
            Some(MatcherFamily::ManifestCommand)
        } else if !self.matched.package_naming {
            Some(MatcherFamily::PackageNaming)
        } else {
            None
        };

        match missing {
            Some(family) => Err(GraphError::FormatMismatch { family }),
            None => Ok(()),
        }
    }

    fn process(&mut self, statement: &str) {
        let Some(matched) = matcher::match_statement(statement) else {
            return;
        };

        match matched {
            LineMatch::PackageAssembly(assembly) => {
                self.matched.package_assembly = true;
                for component_target in assembly.component_targets {
                    let packages = self.packages_by_component.entry(component_target).or_default();
                    if !packages.contains(&assembly.package_target) {
                        packages.push(assembly.package_target.clone());
                    }
                }
            }
            LineMatch::SubComponents(subs) => {
                if subs.sub_targets.is_empty() {
                    return;
                }
                let known = self
                    .subcomponents_by_component
                    .entry(subs.component_target)
                    .or_default();
                for sub in subs.sub_targets {
                    if !known.contains(&sub) {
                        known.push(sub);
                    }
                }
            }
            LineMatch::ValidationCommand(record) | LineMatch::CompileCommand(record) => {
                self.matched.manifest_command = true;
                let manifest = ComponentManifest {
                    component_name: record.component_name,
                    manifest_path: record.manifest_path,
                };
                // Last write wins; a differing overwrite is an accepted
                // ambiguity, surfaced only as a debug diagnostic.
                if let Some(previous) = self
                    .manifest_by_component
                    .insert(record.component_target.clone(), manifest.clone())
                {
                    if previous != manifest {
                        tracing::debug!(
                            "duplicate manifest record for {}: {} replaces {}",
                            record.component_target,
                            manifest.manifest_path.display(),
                            previous.manifest_path.display(),
                        );
                    }
                }
            }
            LineMatch::PackageNaming(naming) => {
                self.matched.package_naming = true;
                self.name_by_package
                    .insert(naming.package_target, naming.package_name);
            }
        }
    }

    pub fn packages_by_component(
        &self,
    ) -> impl Iterator<Item = (&BuildTargetPath, &Vec<BuildTargetPath>)> {
        self.packages_by_component.iter()
    }

    pub fn manifest_for(&self, target: &BuildTargetPath) -> Option<&ComponentManifest> {
        self.manifest_by_component.get(target)
    }

    pub fn sub_components(&self, target: &BuildTargetPath) -> &[BuildTargetPath] {
        self.subcomponents_by_component
            .get(target)
            .map_or(&[], Vec::as_slice)
    }

    pub fn package_name(&self, target: &BuildTargetPath) -> Option<&str> {
        self.name_by_package.get(target).map(String::as_str)
    }

    pub fn stats(&self) -> GraphStats {
        GraphStats {
            lines_scanned: self.lines_scanned,
            component_targets: self.packages_by_component.len(),
            manifest_records: self.manifest_by_component.len(),
            sub_component_links: self
                .subcomponents_by_component
                .values()
                .map(Vec::len)
                .sum(),
            packages_named: self.name_by_package.len(),
        }
    }
}
