//! Reference-scanning error types and diagnostics.

use thiserror::Error;

use crate::util::diagnostic::{suggestions, Diagnostic};

/// Fatal error during reference scanning.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("reference search could not run: {message}")]
    SearchUnavailable { message: String },

    #[error("reference search produced no identifier references")]
    SearchEmpty,
}

impl ScanError {
    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            ScanError::SearchUnavailable { message } => {
                Diagnostic::error(format!("reference search could not run: {}", message))
                    .with_suggestion(suggestions::SEARCH_UNAVAILABLE)
            }

            ScanError::SearchEmpty => {
                Diagnostic::error("reference search produced no identifier references")
                    .with_suggestion(suggestions::SEARCH_EMPTY)
            }
        }
    }
}
