//! Reference locations - WHERE an identifier URI occurs in the source tree.

use std::path::PathBuf;

use serde::Serialize;

/// The exact span of one textual identifier-URI occurrence.
///
/// `line` and `column` are 0-based; `length` is the byte length of the
/// matched URI text. `source_path` is relative to the source tree root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReferenceLocation {
    pub source_path: PathBuf,
    pub line: u32,
    pub column: u32,
    pub length: u32,
}

impl ReferenceLocation {
    pub fn new(source_path: impl Into<PathBuf>, line: u32, column: u32, length: u32) -> Self {
        ReferenceLocation {
            source_path: source_path.into(),
            line,
            column,
            length,
        }
    }
}
