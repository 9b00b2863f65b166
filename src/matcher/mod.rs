//! Structural matchers for dependency-log statements.
//!
//! Each matcher is a pure function from one logical log statement to a typed
//! extraction result or "no match". A statement is tested against the
//! matchers in fixed priority order (package assembly, sub-components,
//! validation command, compile command, package naming); the first match
//! wins.
//!
//! The matchers only recognize the narrow rule shapes needed to associate
//! components with manifests. They do not understand general build
//! semantics.

mod manifest;
mod package;

use std::fmt;
use std::path::PathBuf;

use crate::core::BuildTargetPath;

pub use manifest::{match_compile_command, match_sub_components, match_validation_command};
pub use package::{match_package_assembly, match_package_naming};

/// The result of matching one log statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineMatch {
    PackageAssembly(PackageAssembly),
    SubComponents(SubComponents),
    ValidationCommand(ManifestRecord),
    CompileCommand(ManifestRecord),
    PackageNaming(PackageNaming),
}

/// A package-assembly rule: the package target and every component target
/// its dependency list consumes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageAssembly {
    pub package_target: BuildTargetPath,
    pub component_targets: Vec<BuildTargetPath>,
}

/// A manifest-build rule: the owning component target and its constituent
/// sub-component targets, which inherit the component's manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubComponents {
    pub component_target: BuildTargetPath,
    pub sub_targets: Vec<BuildTargetPath>,
}

/// A component-name/manifest-path association recovered from a manifest
/// validation or compile command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestRecord {
    pub component_target: BuildTargetPath,
    pub component_name: String,
    /// Source-root-relative path to the manifest file.
    pub manifest_path: PathBuf,
}

/// A packaging-tool invocation naming a package target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageNaming {
    pub package_target: BuildTargetPath,
    pub package_name: String,
}

/// The three structurally critical matcher families.
///
/// At least one statement from each family must appear in a dependency log
/// for indexing to be considered sound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatcherFamily {
    PackageAssembly,
    ManifestCommand,
    PackageNaming,
}

impl fmt::Display for MatcherFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatcherFamily::PackageAssembly => write!(f, "package-assembly"),
            MatcherFamily::ManifestCommand => write!(f, "manifest-command"),
            MatcherFamily::PackageNaming => write!(f, "package-naming"),
        }
    }
}

/// Run one logical statement through the matchers in priority order.
pub fn match_statement(statement: &str) -> Option<LineMatch> {
    match_package_assembly(statement)
        .or_else(|| match_sub_components(statement))
        .or_else(|| match_validation_command(statement))
        .or_else(|| match_compile_command(statement))
        .or_else(|| match_package_naming(statement))
}
