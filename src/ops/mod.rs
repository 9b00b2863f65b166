//! High-level operations.

pub mod build_index;

pub use build_index::{build_link_index, IndexOptions, IndexStats, DEPS_LOG_FILE_NAME};
