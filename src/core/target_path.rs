//! Build target identification - WHICH build rule (directory + target name).
//!
//! A target path is an opaque identity key for one rule in the dependency
//! log, written `dir:target` or `dir/subdir:target`. Equality is exact
//! string match.

use std::fmt;

/// A build-rule identity key of the form `dir:target`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BuildTargetPath(String);

impl BuildTargetPath {
    /// Create a target path from a build subdirectory and a target name.
    pub fn new(build_dir: &str, target_name: &str) -> Self {
        BuildTargetPath(format!("{}:{}", build_dir, target_name))
    }

    /// The build subdirectory (everything before the `:`).
    pub fn build_dir(&self) -> &str {
        self.0.split_once(':').map_or("", |(dir, _)| dir)
    }

    /// The target name (everything after the `:`).
    pub fn target_name(&self) -> &str {
        self.0.split_once(':').map_or(self.0.as_str(), |(_, name)| name)
    }

    /// Rewrite `dir:test_foo` to `dir:foo`.
    ///
    /// Returns `None` when the target name carries no `test_` prefix.
    pub fn collapse_test_prefix(&self) -> Option<Self> {
        let rest = self.target_name().strip_prefix("test_")?;
        Some(BuildTargetPath::new(self.build_dir(), rest))
    }

    /// Rewrite `dir:foo_component` to `dir:foo`.
    ///
    /// Returns `None` when the target name carries no `_component` suffix.
    pub fn strip_component_suffix(&self) -> Option<Self> {
        let rest = self.target_name().strip_suffix("_component")?;
        Some(BuildTargetPath::new(self.build_dir(), rest))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BuildTargetPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
