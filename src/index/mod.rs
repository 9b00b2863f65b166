//! The link index - a read-only bidirectional store.
//!
//! Built once during initialization and queried read-only thereafter. The
//! forward/reverse link halves come from the build-graph pass; the
//! reference lists come from the repository scan. A refresh rebuilds a new
//! index and swaps it in wholesale; there is no in-place update path.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::core::{ComponentIdentifier, ReferenceLocation, UriMatch};

/// Forward (`identifier → manifest`) and reverse (`manifest → identifier`)
/// association maps.
///
/// Registration always writes the literal `package/component` key. With
/// normalization enabled, the hyphens-to-underscores form is registered as
/// an additional live key when it differs; the two keys are independent and
/// may diverge if later overwritten separately. The reverse map always
/// stores the literal key, first writer wins.
#[derive(Debug, Default)]
pub struct LinkTable {
    forward: HashMap<String, PathBuf>,
    reverse: HashMap<PathBuf, String>,
}

impl LinkTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        identifier: &ComponentIdentifier,
        manifest: PathBuf,
        normalize: bool,
    ) {
        let literal = identifier.to_string();

        self.reverse
            .entry(manifest.clone())
            .or_insert_with(|| literal.clone());

        if normalize {
            let normalized = identifier.normalized().to_string();
            if normalized != literal {
                self.forward.insert(normalized, manifest.clone());
            }
        }
        self.forward.insert(literal, manifest);
    }

    pub fn resolve(&self, identifier: &str) -> Option<&Path> {
        self.forward.get(identifier).map(PathBuf::as_path)
    }

    pub fn identifier_for(&self, manifest: &Path) -> Option<&str> {
        self.reverse.get(manifest).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }
}

/// Reference lists keyed by identifier.
///
/// Dual registration mirrors [`LinkTable`]: a reference is recorded under
/// the literal identifier and, when normalization applies, under its
/// normalized form as well - two independent lists, never merged.
#[derive(Debug, Default)]
pub struct ReferenceTable {
    by_identifier: HashMap<String, Vec<ReferenceLocation>>,
    total: usize,
}

impl ReferenceTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(
        &mut self,
        identifier: &ComponentIdentifier,
        location: ReferenceLocation,
        normalize: bool,
    ) {
        let literal = identifier.to_string();

        if normalize {
            let normalized = identifier.normalized().to_string();
            if normalized != literal {
                self.by_identifier
                    .entry(normalized)
                    .or_default()
                    .push(location.clone());
            }
        }

        self.by_identifier
            .entry(literal)
            .or_default()
            .push(location);
        self.total += 1;
    }

    pub fn references(&self, identifier: &str) -> Option<&[ReferenceLocation]> {
        self.by_identifier.get(identifier).map(Vec::as_slice)
    }

    /// Number of distinct identifiers with at least one reference.
    pub fn identifier_count(&self) -> usize {
        self.by_identifier.len()
    }

    /// Number of occurrences recorded (each counted once, however many
    /// keys it was registered under).
    pub fn total_count(&self) -> usize {
        self.total
    }
}

/// The published, immutable bidirectional index.
#[derive(Debug, Default)]
pub struct LinkIndex {
    links: LinkTable,
    references: ReferenceTable,
}

impl LinkIndex {
    pub fn new(links: LinkTable, references: ReferenceTable) -> Self {
        LinkIndex { links, references }
    }

    /// Resolve a `package/component` identifier to its manifest location.
    pub fn resolve(&self, identifier: &str) -> Option<&Path> {
        self.links.resolve(identifier)
    }

    /// Every recorded occurrence of the identifier defined by the given
    /// manifest source path, in scan order.
    pub fn references_for(&self, manifest: &Path) -> Option<&[ReferenceLocation]> {
        let identifier = self.links.identifier_for(manifest)?;
        self.references.references(identifier)
    }

    /// Find the identifier URI spanning `offset` in arbitrary document
    /// text. Independent of the index contents.
    pub fn identifier_at(text: &str, offset: usize) -> Option<UriMatch> {
        ComponentIdentifier::matches_in(text)
            .into_iter()
            .find(|m| m.span.start <= offset && offset < m.span.end)
    }
}
