//! Component identification - WHAT component (package name + component name).
//!
//! The identifier `package/component` is the canonical lookup key for the
//! link index. The same pair is embedded in runtime addressing URIs of the
//! form `fuchsia-pkg://fuchsia.com/<package>#meta/<component>.cmx`, which is
//! how references to a component appear in source text.

use std::fmt;
use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

/// The pattern handed to the external repository search (POSIX ERE).
///
/// Broader than [`COMPONENT_URI_RE`]: the package segment accepts anything
/// up to the `#` so the search surfaces near-miss lines, which the stricter
/// in-process pattern then filters.
pub const COMPONENT_URI_SEARCH_PATTERN: &str =
    r"fuchsia-pkg://fuchsia\.com/[^#]*#meta/(-|\w)*\.cmx?";

/// The in-process identifier-URI pattern.
///
/// Package and component segments are restricted to word characters and
/// hyphens, with an optional `?variant` query between package and `#meta/`.
static COMPONENT_URI_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"fuchsia-pkg://fuchsia\.com/(?P<package>[-\w]+)(?:\?[^#\s]*)?#meta/(?P<component>[-\w]+)\.cmx?",
    )
    .unwrap()
});

/// A `package/component` pair, the canonical link-index key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ComponentIdentifier {
    package: String,
    component: String,
}

/// One identifier-URI occurrence inside a piece of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UriMatch {
    pub identifier: ComponentIdentifier,
    /// Byte span of the full URI within the scanned text.
    pub span: Range<usize>,
}

impl ComponentIdentifier {
    pub fn new(package: impl Into<String>, component: impl Into<String>) -> Self {
        ComponentIdentifier {
            package: package.into(),
            component: component.into(),
        }
    }

    /// Parse a `package/component` key.
    pub fn parse(key: &str) -> Option<Self> {
        let (package, component) = key.split_once('/')?;
        if package.is_empty() || component.is_empty() || component.contains('/') {
            return None;
        }
        Some(ComponentIdentifier::new(package, component))
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    pub fn component(&self) -> &str {
        &self.component
    }

    /// The identifier with every `-` replaced by `_` in both segments.
    ///
    /// Normalization is idempotent; an already-normalized identifier maps to
    /// itself.
    pub fn normalized(&self) -> Self {
        ComponentIdentifier {
            package: self.package.replace('-', "_"),
            component: self.component.replace('-', "_"),
        }
    }

    /// Scan arbitrary text for embedded identifier URIs.
    ///
    /// Returns every occurrence in order, with exact byte spans. A line may
    /// contain more than one.
    pub fn matches_in(text: &str) -> Vec<UriMatch> {
        COMPONENT_URI_RE
            .captures_iter(text)
            .map(|caps| {
                let whole = caps.get(0).unwrap();
                UriMatch {
                    identifier: ComponentIdentifier::new(&caps["package"], &caps["component"]),
                    span: whole.start()..whole.end(),
                }
            })
            .collect()
    }
}

impl fmt::Display for ComponentIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.package, self.component)
    }
}
