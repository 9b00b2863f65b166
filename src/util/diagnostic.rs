//! User-friendly diagnostic messages.
//!
//! Every fatal initialization error is rendered with its root cause and a
//! suggested fix, so an operator can diagnose a stale tree or a build-tool
//! version skew without reading source.

use std::fmt;
use std::path::PathBuf;

/// Common suggestion messages for consistent error handling.
pub mod suggestions {
    /// Suggestion when the dependency log is missing.
    pub const NO_DEPS_LOG: &str =
        "help: Run your build once, then pass --build-dir pointing at the build output directory";

    /// Suggestion when no critical rule pattern matched.
    pub const FORMAT_MISMATCH: &str =
        "help: Re-run the build to refresh the dependency log; if it persists, the build tool output format has changed";

    /// Suggestion when the search tool cannot run.
    pub const SEARCH_UNAVAILABLE: &str =
        "help: Ensure `git` is installed and --root points inside a checkout";

    /// Suggestion when the search produced nothing usable.
    pub const SEARCH_EMPTY: &str =
        "help: Verify the tree contains component identifier URIs, or widen --root";
}

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// A diagnostic message with optional suggestions.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// Primary message
    pub message: String,
    /// Severity level
    pub severity: Severity,
    /// Additional context lines
    pub context: Vec<String>,
    /// Suggested fixes
    pub suggestions: Vec<String>,
    /// Related location (file path)
    pub location: Option<PathBuf>,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    pub fn error(message: impl Into<String>) -> Self {
        Diagnostic {
            message: message.into(),
            severity: Severity::Error,
            context: Vec::new(),
            suggestions: Vec::new(),
            location: None,
        }
    }

    /// Create a new warning diagnostic.
    pub fn warning(message: impl Into<String>) -> Self {
        Diagnostic {
            message: message.into(),
            severity: Severity::Warning,
            context: Vec::new(),
            suggestions: Vec::new(),
            location: None,
        }
    }

    /// Add context to the diagnostic.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context.push(context.into());
        self
    }

    /// Add a suggestion for fixing the issue.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// Add a file location.
    pub fn with_location(mut self, path: impl Into<PathBuf>) -> Self {
        self.location = Some(path.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}: {}", self.severity, self.message)?;

        if let Some(ref path) = self.location {
            writeln!(f, "  --> {}", path.display())?;
        }

        for ctx in &self.context {
            writeln!(f, "  note: {}", ctx)?;
        }

        for suggestion in &self.suggestions {
            writeln!(f, "  {}", suggestion)?;
        }

        Ok(())
    }
}
