//! Configuration file support for Spyglass.
//!
//! Configuration lives in `spyglass.toml` at the source tree root (or a
//! path given with `--config`). All options default to off/auto; CLI flags
//! override file values.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// The canonical configuration file name.
pub const CONFIG_FILE_NAME: &str = "spyglass.toml";

/// Spyglass configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Index construction settings
    pub index: IndexConfig,

    /// Repository search settings
    pub search: SearchConfig,
}

/// Settings that shape index construction and lookup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Also register hyphens-to-underscores alias keys.
    pub normalize_word_separators: bool,

    /// Retry unresolved component targets under suffix-stripped keys.
    pub use_heuristics_to_find_more_links: bool,

    /// Display policy only: show identifiers that did not resolve.
    pub show_unresolved_links: bool,
}

/// Settings for the external repository search.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Search executable override (defaults to `git` found on PATH).
    pub program: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if the file doesn't
    /// exist or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Save configuration to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("failed to create config directory: {}", parent.display())
            })?;
        }

        let contents =
            toml::to_string_pretty(self).with_context(|| "failed to serialize config")?;

        std::fs::write(path, contents)
            .with_context(|| format!("failed to write config: {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_are_all_off() {
        let config = Config::default();
        assert!(!config.index.normalize_word_separators);
        assert!(!config.index.use_heuristics_to_find_more_links);
        assert!(!config.index.show_unresolved_links);
        assert!(config.search.program.is_none());
    }

    #[test]
    fn test_load_partial_config() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILE_NAME);
        std::fs::write(
            &path,
            "[index]\nnormalize_word_separators = true\n\n[search]\nprogram = \"/usr/bin/git\"\n",
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert!(config.index.normalize_word_separators);
        assert!(!config.index.use_heuristics_to_find_more_links);
        assert_eq!(config.search.program, Some(PathBuf::from("/usr/bin/git")));
    }

    #[test]
    fn test_save_load_round_trip() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested").join(CONFIG_FILE_NAME);

        let mut config = Config::default();
        config.index.use_heuristics_to_find_more_links = true;
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert!(loaded.index.use_heuristics_to_find_more_links);
        assert!(!loaded.index.normalize_word_separators);
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let tmp = TempDir::new().unwrap();
        let config = Config::load_or_default(&tmp.path().join(CONFIG_FILE_NAME));
        assert!(!config.index.normalize_word_separators);
    }

    #[test]
    fn test_load_or_default_malformed_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "not valid toml [[[").unwrap();

        let config = Config::load_or_default(&path);
        assert!(!config.index.use_heuristics_to_find_more_links);
    }
}
