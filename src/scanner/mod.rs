//! Repository reference scanning.
//!
//! One repository-wide text search for the identifier-URI syntax, invoked
//! through the external search tool, then parsed into the reverse index.
//! The invocation is synchronous; initialization waits for the full output
//! before any reference lookups are served.

pub mod errors;

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::core::{ComponentIdentifier, ReferenceLocation, COMPONENT_URI_SEARCH_PATTERN};
use crate::index::ReferenceTable;
use crate::util::process::{find_search_tool, ProcessBuilder};

pub use errors::ScanError;

/// One `path:lineNumber:matchedtext` search result row. The path is matched
/// lazily so a `C:\...` drive prefix cannot confuse the split.
static RESULT_ROW_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?P<path>.+?):(?P<line>\d+):(?P<text>.*)$").unwrap());

/// Runs the repository search and builds the reference table.
#[derive(Debug)]
pub struct ReferenceScanner {
    program: PathBuf,
    source_root: PathBuf,
}

impl ReferenceScanner {
    /// Scanner using the default search tool from PATH.
    pub fn new(source_root: impl Into<PathBuf>) -> Self {
        Self::with_program(find_search_tool(), source_root)
    }

    /// Scanner using an explicit search executable.
    pub fn with_program(program: impl Into<PathBuf>, source_root: impl Into<PathBuf>) -> Self {
        ReferenceScanner {
            program: program.into(),
            source_root: source_root.into(),
        }
    }

    /// Run one repository-wide search and parse every result row.
    pub fn scan(&self, normalize: bool) -> Result<ReferenceTable, ScanError> {
        let search = ProcessBuilder::new(&self.program)
            .args(["grep", "--recurse-submodules", "-n", "-E"])
            .arg(COMPONENT_URI_SEARCH_PATTERN)
            .cwd(&self.source_root);

        tracing::debug!("running `{}`", search.display_command());

        let output = search.exec().map_err(|e| ScanError::SearchUnavailable {
            message: format!("{:#}", e),
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ScanError::SearchUnavailable {
                message: format!(
                    "`{}` exited with {:?}: {}",
                    search.display_command(),
                    output.status.code(),
                    stderr.trim()
                ),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        parse_search_output(&stdout, normalize)
    }
}

/// Parse raw search output into the reference table.
///
/// Each parseable row is re-scanned with the identifier-URI pattern for
/// per-occurrence column offsets; a row may contain several occurrences.
/// Zero recorded occurrences over the whole output is a fatal
/// [`ScanError::SearchEmpty`]; a first row that parses but matches no URI
/// additionally warns that the search output format may have drifted.
pub fn parse_search_output(output: &str, normalize: bool) -> Result<ReferenceTable, ScanError> {
    let mut table = ReferenceTable::new();
    let mut rows_parsed = 0usize;

    for row in output.lines() {
        if row.is_empty() {
            continue;
        }
        let Some(caps) = RESULT_ROW_RE.captures(row) else {
            continue;
        };

        let Ok(line_number) = caps.name("line").unwrap().as_str().parse::<u32>() else {
            continue;
        };
        rows_parsed += 1;

        let path = caps.name("path").unwrap().as_str();
        let text = caps.name("text").unwrap().as_str();

        let matches = ComponentIdentifier::matches_in(text);
        if matches.is_empty() && rows_parsed == 1 {
            tracing::warn!(
                "first search result contains no identifier URI; search output format may have changed: {}",
                row
            );
        }

        for uri in matches {
            let location = ReferenceLocation::new(
                Path::new(path),
                line_number.saturating_sub(1),
                uri.span.start as u32,
                (uri.span.end - uri.span.start) as u32,
            );
            table.record(&uri.identifier, location, normalize);
        }
    }

    if table.total_count() == 0 {
        return Err(ScanError::SearchEmpty);
    }

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    const URI: &str = "fuchsia-pkg://fuchsia.com/foo#meta/bar.cmx";

    #[test]
    fn test_parse_single_row() {
        let output = format!("src/main.cml:12:    \"{}\",\n", URI);
        let table = parse_search_output(&output, false).unwrap();

        let refs = table.references("foo/bar").unwrap();
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].source_path, PathBuf::from("src/main.cml"));
        assert_eq!(refs[0].line, 11);
        assert_eq!(refs[0].column, 5);
        assert_eq!(refs[0].length, URI.len() as u32);
    }

    #[test]
    fn test_parse_multiple_matches_per_row() {
        let output = format!("src/list.md:1:{} then {}\n", URI, URI);
        let table = parse_search_output(&output, false).unwrap();

        let refs = table.references("foo/bar").unwrap();
        assert_eq!(refs.len(), 2);
        assert_eq!(refs[0].column, 0);
        assert_eq!(refs[1].column, (URI.len() + 6) as u32);
    }

    #[test]
    fn test_parse_keeps_scan_order() {
        let output = format!(
            "src/a.cml:3:{}\nsrc/b.cml:9:{}\n",
            URI, URI
        );
        let table = parse_search_output(&output, false).unwrap();

        let refs = table.references("foo/bar").unwrap();
        assert_eq!(refs[0].source_path, PathBuf::from("src/a.cml"));
        assert_eq!(refs[1].source_path, PathBuf::from("src/b.cml"));
    }

    #[test]
    fn test_parse_windows_style_path_prefix() {
        let output = format!(r"C:\work\src\main.cml:12:{}", URI);
        let table = parse_search_output(&output, false).unwrap();

        let refs = table.references("foo/bar").unwrap();
        assert_eq!(refs[0].source_path, PathBuf::from(r"C:\work\src\main.cml"));
        assert_eq!(refs[0].line, 11);
    }

    #[test]
    fn test_parse_empty_output_is_fatal() {
        match parse_search_output("", false) {
            Err(ScanError::SearchEmpty) => {}
            other => panic!("expected SearchEmpty, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_rows_without_matches_is_fatal() {
        // Well-formed rows whose text carries no URI: warned about, and
        // still an empty (failed) scan.
        let output = "src/readme.md:4:no identifiers here\n";
        match parse_search_output(output, false) {
            Err(ScanError::SearchEmpty) => {}
            other => panic!("expected SearchEmpty, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_skips_malformed_rows() {
        let output = format!("garbage without row shape\nsrc/main.cml:12:{}\n", URI);
        let table = parse_search_output(&output, false).unwrap();
        assert_eq!(table.total_count(), 1);
    }

    #[test]
    fn test_parse_normalization_registers_both_forms() {
        let output =
            "src/main.cml:12:fuchsia-pkg://fuchsia.com/my-pkg#meta/my-comp.cmx\n".to_string();
        let table = parse_search_output(&output, true).unwrap();

        assert!(table.references("my-pkg/my-comp").is_some());
        assert!(table.references("my_pkg/my_comp").is_some());
        assert_eq!(table.total_count(), 1);
    }

    #[test]
    fn test_scan_unavailable_program() {
        let scanner = ReferenceScanner::with_program("/nonexistent/search-tool", ".");
        match scanner.scan(false) {
            Err(ScanError::SearchUnavailable { .. }) => {}
            other => panic!("expected SearchUnavailable, got {:?}", other),
        }
    }
}
