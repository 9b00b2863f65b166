//! Build-graph indexing error types and diagnostics.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::matcher::MatcherFamily;
use crate::util::diagnostic::{suggestions, Diagnostic};

/// Fatal error during the build-graph pass.
///
/// Unresolved or duplicate associations are not errors; they only reduce
/// index completeness.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("cannot read dependency log `{path}`: {source}")]
    LogUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("dependency log matched no {family} rules")]
    FormatMismatch { family: MatcherFamily },
}

impl GraphError {
    pub fn log_unavailable(path: &Path, source: io::Error) -> Self {
        GraphError::LogUnavailable {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            GraphError::LogUnavailable { path, source } => {
                Diagnostic::error(format!("cannot read dependency log: {}", source))
                    .with_location(path.clone())
                    .with_suggestion(suggestions::NO_DEPS_LOG)
            }

            GraphError::FormatMismatch { family } => Diagnostic::error(format!(
                "dependency log matched no {} rules",
                family
            ))
            .with_context("the build tool's rule naming may have changed, or the output directory is stale")
            .with_suggestion(suggestions::FORMAT_MISMATCH),
        }
    }
}
