//! Spyglass - a component-to-manifest link indexer for Fuchsia build trees
//!
//! This crate reconstructs, from a build tool's low-level dependency log
//! and a repository-wide text search, a bidirectional index between
//! component identifiers (`package/component`) and the manifest source
//! files that define them. Given an identifier it resolves the manifest
//! location; given a manifest it resolves every place in the tree that
//! references the identifier.

pub mod core;
pub mod index;
pub mod indexer;
pub mod matcher;
pub mod ops;
pub mod scanner;
pub mod util;

/// Test utilities and fixtures for Spyglass unit tests.
///
/// This module is only available when compiling with `--cfg test` or
/// running tests.
#[cfg(test)]
pub mod test_support;

pub use crate::core::{
    identifier::ComponentIdentifier, reference::ReferenceLocation, target_path::BuildTargetPath,
};

pub use index::LinkIndex;
pub use ops::build_index::{build_link_index, IndexOptions, IndexStats};
pub use util::config::Config;
